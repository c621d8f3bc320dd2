// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use listmagify_core::{util::clock::DateTime, ContextId, TrackId};
use listmagify_repo::{dismissal::DismissalRepo, RepoResult};

use crate::{
    db::{dismissal::InsertableRecord, schema::dismissed_recommendations},
    prelude::*,
    repo_error,
};

impl<'db> DismissalRepo for crate::Connection<'db> {
    fn insert_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<()> {
        let record = InsertableRecord {
            context_id: context_id.as_str(),
            track_id: track_id.as_str(),
            dismissed_ms: DateTime::now_utc().timestamp_millis(),
        };
        diesel::insert_into(dismissed_recommendations::table)
            .values(&record)
            .on_conflict((
                dismissed_recommendations::context_id,
                dismissed_recommendations::track_id,
            ))
            .do_nothing()
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }

    fn delete_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<()> {
        diesel::delete(
            dismissed_recommendations::table
                .filter(dismissed_recommendations::context_id.eq(context_id.as_str()))
                .filter(dismissed_recommendations::track_id.eq(track_id.as_str())),
        )
        .execute(self.as_mut())
        .map_err(repo_error)?;
        Ok(())
    }

    fn clear_context(&mut self, context_id: &ContextId) -> RepoResult<()> {
        diesel::delete(
            dismissed_recommendations::table
                .filter(dismissed_recommendations::context_id.eq(context_id.as_str())),
        )
        .execute(self.as_mut())
        .map_err(repo_error)?;
        Ok(())
    }

    fn is_dismissed(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<bool> {
        let count: i64 = dismissed_recommendations::table
            .filter(dismissed_recommendations::context_id.eq(context_id.as_str()))
            .filter(dismissed_recommendations::track_id.eq(track_id.as_str()))
            .count()
            .get_result(self.as_mut())
            .map_err(repo_error)?;
        Ok(count > 0)
    }

    fn dismissals_for_context(&mut self, context_id: &ContextId) -> RepoResult<HashSet<TrackId>> {
        let track_ids = dismissed_recommendations::table
            .filter(dismissed_recommendations::context_id.eq(context_id.as_str()))
            .select(dismissed_recommendations::track_id)
            .load::<String>(self.as_mut())
            .map_err(repo_error)?;
        Ok(track_ids
            .into_iter()
            .map(|id| TrackId::new(id).expect("stored track id is valid"))
            .collect())
    }
}
