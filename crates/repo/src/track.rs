// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{util::clock::DateTime, Track, TrackId};

use crate::RepoResult;

/// `tracks` table operations (§4.1).
pub trait TrackRepo {
    /// Insert or update a track's metadata. Idempotent: re-upserting
    /// identical metadata is a no-op aside from `updated_at`.
    fn upsert_track(&mut self, track: &Track, now: DateTime) -> RepoResult<()>;

    /// Load a previously-upserted track, if any has been seen.
    fn load_track(&mut self, track_id: &TrackId) -> RepoResult<Option<Track>>;
}
