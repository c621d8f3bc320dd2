// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::{dsl::count_star, sql_types::BigInt, QueryableByName};
use listmagify_core_api::Stats;
use listmagify_repo::{stats::StatsRepo, RepoResult};

use crate::{
    db::schema::{dismissed_recommendations, track_cooccurrence, track_edges_seq, tracks},
    prelude::*,
    repo_error,
};

#[derive(QueryableByName)]
struct PragmaValue {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

fn database_size_bytes(connection: &mut crate::DbConnection) -> diesel::QueryResult<i64> {
    let page_count = diesel::sql_query("PRAGMA page_count")
        .get_result::<PragmaValue>(connection)?
        .value;
    let page_size = diesel::sql_query("PRAGMA page_size")
        .get_result::<PragmaValue>(connection)?
        .value;
    Ok(page_count * page_size)
}

impl<'db> StatsRepo for crate::Connection<'db> {
    fn stats(&mut self) -> RepoResult<Stats> {
        let connection = self.as_mut();
        let tracks: i64 = tracks::table
            .select(count_star())
            .get_result(connection)
            .map_err(repo_error)?;
        let adjacency_edges: i64 = track_edges_seq::table
            .select(count_star())
            .get_result(connection)
            .map_err(repo_error)?;
        let cooccurrence_edges: i64 = track_cooccurrence::table
            .select(count_star())
            .get_result(connection)
            .map_err(repo_error)?;
        let dismissals: i64 = dismissed_recommendations::table
            .select(count_star())
            .get_result(connection)
            .map_err(repo_error)?;
        let storage_bytes = database_size_bytes(connection).map_err(repo_error)?;
        Ok(Stats {
            tracks: tracks.try_into().unwrap_or(0),
            adjacency_edges: adjacency_edges.try_into().unwrap_or(0),
            cooccurrence_edges: cooccurrence_edges.try_into().unwrap_or(0),
            dismissals: dismissals.try_into().unwrap_or(0),
            storage_bytes: storage_bytes.try_into().unwrap_or(0),
        })
    }
}
