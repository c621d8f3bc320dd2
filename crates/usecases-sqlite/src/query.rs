// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use listmagify_core_api::{AppendixQuery, Recommendation, SeedQuery};
use listmagify_repo_sqlite::{prelude::Connection as RepoConnection, DbConnection};
use listmagify_usecases::{
    cancellation::CancellationToken,
    query::{
        appendix_recommendations as appendix_recs, seed_recommendations as seed_recs,
        AppendixOutcome,
    },
};

use crate::{Error, Result};

/// `seed_recommendations` (C4, §4.4), wrapped in a single Store read
/// transaction for a snapshot-consistent view of edges and
/// dismissals.
pub fn seed_recommendations(
    connection: &mut DbConnection,
    query: SeedQuery,
    cancellation: &CancellationToken,
) -> Result<Vec<Recommendation>> {
    connection.transaction(|connection| {
        let mut repo = RepoConnection::new(connection);
        seed_recs(&mut repo, query, cancellation).map_err(Error::from)
    })
}

/// `appendix_recommendations` (C4, §4.4).
pub fn appendix_recommendations(
    connection: &mut DbConnection,
    query: AppendixQuery,
    cancellation: &CancellationToken,
) -> Result<AppendixOutcome> {
    connection.transaction(|connection| {
        let mut repo = RepoConnection::new(connection);
        appendix_recs(&mut repo, query, cancellation).map_err(Error::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use listmagify_core::{track::Track, PlaylistId, TrackId};
    use listmagify_repo_sqlite::run_migrations;
    use listmagify_storage_sqlite::initialize_database;
    use listmagify_usecases::ingest::{capture_and_update_edges, IngestRequest};

    fn fixture_connection() -> DbConnection {
        let mut connection =
            DbConnection::establish(":memory:").expect("in-memory database connection");
        initialize_database(&mut connection).expect("pragmas apply cleanly");
        run_migrations(&mut connection).expect("pending migrations apply cleanly");
        connection
    }

    fn track(id: &str) -> Track {
        Track { id: TrackId::new(id).unwrap(), name: id.to_owned(), artist_id: None, artist_name: None }
    }

    #[test]
    fn seed_query_ranks_adjacent_track_first() {
        let mut connection = fixture_connection();
        {
            let mut repo = RepoConnection::new(&mut connection);
            let request = IngestRequest {
                playlist_id: PlaylistId::new("p1").unwrap(),
                tracks: vec![track("a"), track("b"), track("c")],
                cooccurrence_only: false,
            };
            capture_and_update_edges(&mut repo, request, listmagify_core::util::clock::DateTime::now_utc())
                .unwrap();
        }

        let query = SeedQuery {
            seed_ids: vec![TrackId::new("a").unwrap()],
            exclude_ids: vec![],
            context_id: None,
            top_n: 10,
        };
        let recs = seed_recommendations(&mut connection, query, &CancellationToken::new()).unwrap();
        assert_eq!(recs[0].track_id, TrackId::new("b").unwrap());
        assert_eq!(recs[0].rank, 1);
    }
}
