// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core_api::Stats;
use listmagify_repo::stats::StatsRepo as _;
use listmagify_repo_sqlite::{prelude::Connection as RepoConnection, DbConnection};

use crate::Result;

/// `stats()` (§4.1, §6: `GET /stats/recs`).
pub fn stats(connection: &mut DbConnection) -> Result<Stats> {
    let mut repo = RepoConnection::new(connection);
    Ok(repo.stats()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::Connection as _;
    use listmagify_core::{track::Track, util::clock::DateTime, TrackId};
    use listmagify_repo::track::TrackRepo as _;
    use listmagify_repo_sqlite::run_migrations;
    use listmagify_storage_sqlite::initialize_database;

    fn fixture_connection() -> DbConnection {
        let mut connection =
            DbConnection::establish(":memory:").expect("in-memory database connection");
        initialize_database(&mut connection).expect("pragmas apply cleanly");
        run_migrations(&mut connection).expect("pending migrations apply cleanly");
        connection
    }

    #[test]
    fn stats_reflect_inserted_tracks() {
        let mut connection = fixture_connection();
        {
            let mut repo = RepoConnection::new(&mut connection);
            let track = Track {
                id: TrackId::new("a").unwrap(),
                name: "A".to_owned(),
                artist_id: None,
                artist_name: None,
            };
            repo.upsert_track(&track, DateTime::now_utc()).unwrap();
        }
        let stats = stats(&mut connection).unwrap();
        assert_eq!(stats.tracks, 1);
    }
}
