// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use listmagify_core::util::clock::DateTime;
use listmagify_repo_sqlite::{prelude::Connection as RepoConnection, DbConnection};
use listmagify_usecases::ingest::{
    capture_and_update_edges as capture_edges, IngestOutcome, IngestRequest,
};

use crate::{
    playlist_lock::{PlaylistLocks, DEFAULT_LOCK_TIMEOUT},
    Error, Result,
};

/// `capture_and_update_edges` (C2, §4.2) wrapped in a single Store
/// write transaction, serialized on `request.playlist_id`'s advisory
/// lock (§5).
pub fn capture_and_update_edges(
    connection: &mut DbConnection,
    locks: &PlaylistLocks,
    request: IngestRequest,
) -> Result<IngestOutcome> {
    let playlist_id = request.playlist_id.clone();
    locks.with_lock(&playlist_id, DEFAULT_LOCK_TIMEOUT, || {
        connection.transaction(|connection| {
            let mut repo = RepoConnection::new(connection);
            capture_edges(&mut repo, request, DateTime::now_utc()).map_err(Error::from)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use listmagify_core::{track::Track, PlaylistId, TrackId};
    use listmagify_repo_sqlite::run_migrations;
    use listmagify_storage_sqlite::initialize_database;

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
    fn captures_a_snapshot_inside_one_transaction() {
        let mut connection = fixture_connection();
        let locks = PlaylistLocks::new();
        let request = IngestRequest {
            playlist_id: PlaylistId::new("p1").unwrap(),
            tracks: vec![track("a"), track("b"), track("c")],
            cooccurrence_only: false,
        };
        let outcome = capture_and_update_edges(&mut connection, &locks, request).unwrap();
        assert_eq!(outcome.tracks_captured, 3);
        assert_eq!(outcome.adjacency_edges, 2);
        assert_eq!(outcome.cooccurrence_edges, 3);
    }
}
