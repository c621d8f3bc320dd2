// SPDX-License-Identifier: AGPL-3.0-or-later

//! Dismissal Service (C5, §4.5).

use listmagify_core::{ContextId, TrackId};
use listmagify_repo::dismissal::DismissalRepo;

use crate::Result;

/// `dismiss(track_id, context_id = "global")`. Idempotent: dismissing
/// an already-dismissed track is a no-op (§3 invariant 6).
pub fn dismiss<R>(repo: &mut R, track_id: &TrackId, context_id: &ContextId) -> Result<()>
where
    R: DismissalRepo,
{
    repo.insert_dismissal(context_id, track_id)?;
    Ok(())
}

/// Remove a single dismissal. A per-context operation: clearing
/// `"global"` does not affect per-playlist entries and vice versa
/// (§4.5).
pub fn undismiss<R>(repo: &mut R, track_id: &TrackId, context_id: &ContextId) -> Result<()>
where
    R: DismissalRepo,
{
    repo.delete_dismissal(context_id, track_id)?;
    Ok(())
}

/// `clear(context_id)`: remove every dismissal for one context.
pub fn clear<R>(repo: &mut R, context_id: &ContextId) -> Result<()>
where
    R: DismissalRepo,
{
    repo.clear_context(context_id)?;
    Ok(())
}

pub fn is_dismissed<R>(repo: &mut R, context_id: &ContextId, track_id: &TrackId) -> Result<bool>
where
    R: DismissalRepo,
{
    Ok(repo.is_dismissed(context_id, track_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeRepo {
        dismissed: std::collections::HashMap<String, HashSet<TrackId>>,
    }

    impl DismissalRepo for FakeRepo {
        fn insert_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> listmagify_repo::RepoResult<()> {
            self.dismissed.entry(context_id.as_str().to_owned()).or_default().insert(track_id.clone());
            Ok(())
        }

        fn delete_dismissal(&mut self, context_id: &ContextId, track_id: &TrackId) -> listmagify_repo::RepoResult<()> {
            if let Some(set) = self.dismissed.get_mut(context_id.as_str()) {
                set.remove(track_id);
            }
            Ok(())
        }

        fn clear_context(&mut self, context_id: &ContextId) -> listmagify_repo::RepoResult<()> {
            self.dismissed.remove(context_id.as_str());
            Ok(())
        }

        fn is_dismissed(&mut self, context_id: &ContextId, track_id: &TrackId) -> listmagify_repo::RepoResult<bool> {
            Ok(self.dismissed.get(context_id.as_str()).is_some_and(|s| s.contains(track_id)))
        }

        fn dismissals_for_context(&mut self, context_id: &ContextId) -> listmagify_repo::RepoResult<HashSet<TrackId>> {
            Ok(self.dismissed.get(context_id.as_str()).cloned().unwrap_or_default())
        }
    }

    fn id(s: &str) -> TrackId {
        TrackId::new(s).unwrap()
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut repo = FakeRepo::default();
        let ctx = ContextId::global();
        dismiss(&mut repo, &id("a"), &ctx).unwrap();
        dismiss(&mut repo, &id("a"), &ctx).unwrap();
        assert!(is_dismissed(&mut repo, &ctx, &id("a")).unwrap());
        assert_eq!(repo.dismissed[&"global".to_owned()].len(), 1);
    }

    #[test]
    fn clearing_global_does_not_affect_playlist_scope() {
        let mut repo = FakeRepo::default();
        let playlist = listmagify_core::PlaylistId::new("p1").unwrap();
        let playlist_ctx = ContextId::playlist(&playlist);
        let global_ctx = ContextId::global();

        dismiss(&mut repo, &id("a"), &global_ctx).unwrap();
        dismiss(&mut repo, &id("a"), &playlist_ctx).unwrap();
        clear(&mut repo, &global_ctx).unwrap();

        assert!(!is_dismissed(&mut repo, &global_ctx, &id("a")).unwrap());
        assert!(is_dismissed(&mut repo, &playlist_ctx, &id("a")).unwrap());
    }

    #[test]
    fn undismiss_removes_a_single_entry() {
        let mut repo = FakeRepo::default();
        let ctx = ContextId::global();
        dismiss(&mut repo, &id("a"), &ctx).unwrap();
        undismiss(&mut repo, &id("a"), &ctx).unwrap();
        assert!(!is_dismissed(&mut repo, &ctx, &id("a")).unwrap());
    }
}
