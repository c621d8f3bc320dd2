// SPDX-License-Identifier: AGPL-3.0-or-later

//! Query Engine (C4, §4.4).

use listmagify_core::ContextId;
use listmagify_core_api::{
    AppendixQuery, Recommendation, SeedQuery, MAX_SEED_TRACKS, MAX_TOP_N,
};
use listmagify_repo::{dismissal::DismissalRepo, edge::EdgeRepo, playlist::PlaylistRepo};

use crate::{
    cancellation::CancellationToken,
    scorer::{appendix_candidate_scores, cmp_candidates, seed_candidate_scores},
    Error, Result,
};

/// Result of `appendix_recommendations` when no snapshot exists and
/// none was supplied inline (§4.4: "return `{recommendations: [],
/// message: \"no snapshot\"}`").
#[derive(Debug, Clone, Default)]
pub struct AppendixOutcome {
    pub recommendations: Vec<Recommendation>,
    pub message: Option<&'static str>,
}

/// `seed_recommendations` (§4.4). `repo` must be a handle into a
/// single Store read transaction so the edge and dismissal views it
/// sees are mutually consistent.
pub fn seed_recommendations<R>(
    repo: &mut R,
    query: SeedQuery,
    cancellation: &CancellationToken,
) -> Result<Vec<Recommendation>>
where
    R: EdgeRepo + DismissalRepo,
{
    if query.seed_ids.is_empty() || query.seed_ids.len() > MAX_SEED_TRACKS {
        return Err(Error::InvalidInput(format!(
            "seed_ids must have length 1..={MAX_SEED_TRACKS}, got {}",
            query.seed_ids.len()
        )));
    }

    cancellation.check()?;
    let mut candidates = seed_candidate_scores(repo, &query.seed_ids)?;
    cancellation.check()?;

    let context_id = ContextId::from(query.context_id.clone());
    let dismissed = repo.dismissals_for_context(&context_id)?;
    let global = if context_id.is_global() {
        None
    } else {
        Some(repo.dismissals_for_context(&ContextId::global())?)
    };

    candidates.retain(|track_id, _| {
        !query.exclude_ids.contains(track_id)
            && !query.seed_ids.contains(track_id)
            && !dismissed.contains(track_id)
            && !global.as_ref().is_some_and(|g| g.contains(track_id))
    });

    Ok(rank(candidates, query.top_n))
}

/// `appendix_recommendations` (§4.4).
pub fn appendix_recommendations<R>(
    repo: &mut R,
    query: AppendixQuery,
    cancellation: &CancellationToken,
) -> Result<AppendixOutcome>
where
    R: EdgeRepo + DismissalRepo + PlaylistRepo,
{
    cancellation.check()?;

    let track_ids = match query.track_ids {
        Some(track_ids) if !track_ids.is_empty() => track_ids,
        _ => repo.latest_track_ids(&query.playlist_id)?,
    };
    if track_ids.is_empty() {
        return Ok(AppendixOutcome { recommendations: Vec::new(), message: Some("no snapshot") });
    }

    let mut candidates = appendix_candidate_scores(repo, &track_ids)?;
    cancellation.check()?;

    let playlist_context = ContextId::playlist(&query.playlist_id);
    let dismissed = repo.dismissals_for_context(&playlist_context)?;
    let global = repo.dismissals_for_context(&ContextId::global())?;

    candidates.retain(|track_id, _| !dismissed.contains(track_id) && !global.contains(track_id));

    Ok(AppendixOutcome { recommendations: rank(candidates, query.top_n), message: None })
}

fn rank(
    candidates: std::collections::HashMap<
        listmagify_core::TrackId,
        crate::scorer::CandidateScore,
    >,
    top_n: u32,
) -> Vec<Recommendation> {
    let top_n = top_n.clamp(1, MAX_TOP_N) as usize;
    let mut entries: Vec<_> = candidates.iter().collect();
    entries.sort_by(|a, b| cmp_candidates((a.0, a.1), (b.0, b.1)));
    entries
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(index, (track_id, score))| Recommendation {
            track_id: track_id.clone(),
            score: score.score as f32,
            rank: index as u32 + 1,
            track: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use listmagify_core::TrackId;
    use listmagify_repo::edge::{CoocNeighbor, Direction, SeqNeighbor};
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct FakeRepo {
        seq: HashMap<String, Vec<SeqNeighbor>>,
        cooc: HashMap<String, Vec<CoocNeighbor>>,
        dismissed: HashMap<String, HashSet<TrackId>>,
        latest: HashMap<String, Vec<TrackId>>,
    }

    impl EdgeRepo for FakeRepo {
        fn increment_adjacency(
            &mut self,
            _: &TrackId,
            _: &TrackId,
            _: u32,
        ) -> listmagify_repo::RepoResult<()> {
            unreachable!()
        }

        fn increment_cooccurrence(
            &mut self,
            _: &TrackId,
            _: &TrackId,
            _: u32,
        ) -> listmagify_repo::RepoResult<()> {
            unreachable!()
        }

        fn neighbors_seq(&mut self, track_id: &TrackId) -> listmagify_repo::RepoResult<Vec<SeqNeighbor>> {
            Ok(self.seq.get(track_id.as_str()).cloned().unwrap_or_default())
        }

        fn neighbors_cooccur(
            &mut self,
            track_id: &TrackId,
        ) -> listmagify_repo::RepoResult<Vec<CoocNeighbor>> {
            Ok(self.cooc.get(track_id.as_str()).cloned().unwrap_or_default())
        }
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

    impl PlaylistRepo for FakeRepo {
        fn replace_playlist_tracks(
            &mut self,
            _: &listmagify_core::PlaylistId,
            _: &[TrackId],
            _: listmagify_core::util::clock::DateTime,
        ) -> listmagify_repo::RepoResult<()> {
            unreachable!()
        }

        fn latest_track_ids(&mut self, playlist_id: &listmagify_core::PlaylistId) -> listmagify_repo::RepoResult<Vec<TrackId>> {
            Ok(self.latest.get(playlist_id.as_str()).cloned().unwrap_or_default())
        }
    }

    fn id(s: &str) -> TrackId {
        TrackId::new(s).unwrap()
    }

    #[test]
    fn rejects_out_of_range_seed_counts() {
        let mut repo = FakeRepo::default();
        let too_many = SeedQuery {
            seed_ids: vec![id("a"), id("b"), id("c"), id("d"), id("e"), id("f")],
            exclude_ids: vec![],
            context_id: None,
            top_n: 10,
        };
        let err = seed_recommendations(&mut repo, too_many, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let empty = SeedQuery { seed_ids: vec![], exclude_ids: vec![], context_id: None, top_n: 10 };
        let err = seed_recommendations(&mut repo, empty, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn drops_seeds_excludes_and_dismissed() {
        let mut repo = FakeRepo {
            seq: HashMap::from([(
                "seed".to_owned(),
                vec![
                    SeqNeighbor { neighbor_id: id("keep"), weight: 1, direction: Direction::Out },
                    SeqNeighbor { neighbor_id: id("excluded"), weight: 1, direction: Direction::Out },
                    SeqNeighbor { neighbor_id: id("dismissed"), weight: 1, direction: Direction::Out },
                ],
            )]),
            ..Default::default()
        };
        repo.dismissed.insert("global".to_owned(), HashSet::from([id("dismissed")]));

        let query = SeedQuery {
            seed_ids: vec![id("seed")],
            exclude_ids: vec![id("excluded")],
            context_id: None,
            top_n: 10,
        };
        let recs = seed_recommendations(&mut repo, query, &CancellationToken::new()).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].track_id, id("keep"));
        assert_eq!(recs[0].rank, 1);
    }

    #[test]
    fn cancellation_short_circuits_before_scoring() {
        let mut repo = FakeRepo::default();
        let token = CancellationToken::new();
        token.cancel();
        let query = SeedQuery { seed_ids: vec![id("seed")], exclude_ids: vec![], context_id: None, top_n: 10 };
        let err = seed_recommendations(&mut repo, query, &token).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[test]
    fn appendix_reports_no_snapshot_message_when_empty() {
        let mut repo = FakeRepo::default();
        let query = AppendixQuery {
            playlist_id: listmagify_core::PlaylistId::new("p").unwrap(),
            track_ids: None,
            top_n: 10,
        };
        let outcome = appendix_recommendations(&mut repo, query, &CancellationToken::new()).unwrap();
        assert!(outcome.recommendations.is_empty());
        assert_eq!(outcome.message, Some("no snapshot"));
    }
}
