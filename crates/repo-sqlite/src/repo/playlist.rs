// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{playlist::PlaylistId, util::clock::DateTime, TrackId};
use listmagify_repo::{playlist::PlaylistRepo, RepoResult};

use crate::{
    db::{playlist::InsertableRecord, schema::playlist_tracks},
    prelude::*,
    repo_error,
};

impl<'db> PlaylistRepo for crate::Connection<'db> {
    fn replace_playlist_tracks(
        &mut self,
        playlist_id: &PlaylistId,
        track_ids: &[TrackId],
        snapshot_ts: DateTime,
    ) -> RepoResult<()> {
        self.as_mut()
            .transaction(|connection| {
                diesel::delete(
                    playlist_tracks::table
                        .filter(playlist_tracks::playlist_id.eq(playlist_id.as_str())),
                )
                .execute(connection)?;
                let snapshot_ms = snapshot_ts.timestamp_millis();
                let records: Vec<_> = track_ids
                    .iter()
                    .enumerate()
                    .map(|(position, track_id)| InsertableRecord {
                        playlist_id: playlist_id.as_str(),
                        position: i32::try_from(position).unwrap_or(i32::MAX),
                        track_id: track_id.as_str(),
                        snapshot_ms,
                    })
                    .collect();
                if !records.is_empty() {
                    diesel::insert_into(playlist_tracks::table)
                        .values(&records)
                        .execute(connection)?;
                }
                Ok(())
            })
            .map_err(repo_error)
    }

    fn latest_track_ids(&mut self, playlist_id: &PlaylistId) -> RepoResult<Vec<TrackId>> {
        let track_ids = playlist_tracks::table
            .filter(playlist_tracks::playlist_id.eq(playlist_id.as_str()))
            .order(playlist_tracks::position.asc())
            .select(playlist_tracks::track_id)
            .load::<String>(self.as_mut())
            .map_err(repo_error)?;
        Ok(track_ids
            .into_iter()
            .map(|id| TrackId::new(id).expect("stored track id is valid"))
            .collect())
    }
}
