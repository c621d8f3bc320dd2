// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use listmagify_core::{track::Track, PlaylistId};
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use listmagify_usecases::ingest::{IngestOutcome, IngestRequest};
use listmagify_usecases_sqlite::playlist_lock::PlaylistLocks;

use crate::prelude::*;

/// `capture_and_update_edges` (C2, §4.2), dispatched onto the blocking
/// pool behind a write permit and serialized on `playlist_id`'s
/// advisory lock (§5).
pub async fn capture_and_update_edges(
    db_gatekeeper: &Gatekeeper,
    playlist_locks: &Arc<PlaylistLocks>,
    playlist_id: PlaylistId,
    tracks: Vec<Track>,
    cooccurrence_only: bool,
) -> Result<IngestOutcome> {
    let playlist_locks = Arc::clone(playlist_locks);
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            let request = IngestRequest { playlist_id, tracks, cooccurrence_only };
            listmagify_usecases_sqlite::capture::capture_and_update_edges(
                connection,
                &playlist_locks,
                request,
            )
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
