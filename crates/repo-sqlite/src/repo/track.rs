// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{track::Track, util::clock::DateTime, TrackId};
use listmagify_repo::{track::TrackRepo, RepoResult};

use crate::{
    db::{
        schema::tracks,
        track::{InsertableRecord, QueryableRecord},
    },
    prelude::*,
    repo_error,
};

impl<'db> TrackRepo for crate::Connection<'db> {
    fn upsert_track(&mut self, track: &Track, now: DateTime) -> RepoResult<()> {
        let record = InsertableRecord {
            id: track.id.as_str(),
            name: &track.name,
            artist_id: track.artist_id.as_deref(),
            artist_name: track.artist_name.as_deref(),
            updated_at_ms: now.timestamp_millis(),
        };
        diesel::insert_into(tracks::table)
            .values(&record)
            .on_conflict(tracks::id)
            .do_update()
            .set(&record)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }

    fn load_track(&mut self, track_id: &TrackId) -> RepoResult<Option<Track>> {
        let record = tracks::table
            .filter(tracks::id.eq(track_id.as_str()))
            .first::<QueryableRecord>(self.as_mut())
            .optional()
            .map_err(repo_error)?;
        Ok(record.map(|record| Track {
            id: TrackId::new(record.id).expect("stored track id is valid"),
            name: record.name,
            artist_id: record.artist_id,
            artist_name: record.artist_name,
        }))
    }
}
