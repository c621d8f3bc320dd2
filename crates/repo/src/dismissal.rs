// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use listmagify_core::{ContextId, TrackId};

use crate::RepoResult;

/// `dismissed_recommendations` table operations (§4.1, §4.5).
pub trait DismissalRepo {
    /// Insert `(context_id, track_id)`. Idempotent: dismissing an
    /// already-dismissed track is a no-op (§3 invariant 6: unique per
    /// pair).
    fn insert_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<()>;

    /// Remove a single dismissal. A no-op if it did not exist.
    fn delete_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<()>;

    /// Remove every dismissal for `context_id` (§4.5: `clear`).
    fn clear_context(&mut self, context_id: &ContextId) -> RepoResult<()>;

    fn is_dismissed(&mut self, context_id: &ContextId, track_id: &TrackId) -> RepoResult<bool>;

    /// All track ids dismissed for `context_id`, for bulk filtering.
    fn dismissals_for_context(&mut self, context_id: &ContextId) -> RepoResult<HashSet<TrackId>>;
}
