// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{util::clock::DateTime, PlaylistId, TrackId};

use crate::RepoResult;

/// `playlist_tracks` table operations (§4.1). Holds only the latest
/// snapshot per playlist; older rows are purged in the same
/// transaction that writes a new one (§4.1, §3: PlaylistLatestTracks).
pub trait PlaylistRepo {
    /// Delete any prior snapshot for `playlist_id` and insert
    /// `track_ids` in order, stamped with `snapshot_ts`.
    fn replace_playlist_tracks(
        &mut self,
        playlist_id: &PlaylistId,
        track_ids: &[TrackId],
        snapshot_ts: DateTime,
    ) -> RepoResult<()>;

    /// The most recently ingested snapshot for `playlist_id`, in
    /// order, or an empty vector if none exists.
    fn latest_track_ids(&mut self, playlist_id: &PlaylistId) -> RepoResult<Vec<TrackId>>;
}
