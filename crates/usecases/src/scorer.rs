// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pure scoring (C3, §4.3). Candidate accumulation uses `f64` sums to
//! avoid precision loss across playlists with hundreds of
//! contributing edges; final scores are narrowed to `f32` at the
//! boundary with `listmagify-core-api::Recommendation`.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use listmagify_core::TrackId;
use listmagify_repo::{edge::EdgeRepo, RepoResult};

/// Adjacency is a stronger signal than co-occurrence: directional and
/// rarer (§4.3).
const W_SEQ: f64 = 1.0;
const W_COOC: f64 = 0.7;

/// One candidate's running score plus the raw (unnormalized) adjacency
/// weight used to break ties deterministically (§4.3: "higher raw
/// adjacency weight first").
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandidateScore {
    pub score: f64,
    pub raw_adjacency_weight: u64,
}

/// Score candidates against 1-5 seed tracks (§4.3 Seed mode).
pub fn seed_candidate_scores<R>(
    repo: &mut R,
    seed_ids: &[TrackId],
) -> RepoResult<HashMap<TrackId, CandidateScore>>
where
    R: EdgeRepo,
{
    let mut candidates: HashMap<TrackId, CandidateScore> = HashMap::new();
    for seed in seed_ids {
        let seq_neighbors = repo.neighbors_seq(seed)?;
        let total_seq_weight: u64 = seq_neighbors.iter().map(|n| u64::from(n.weight)).sum();
        let seq_log = (1.0 + total_seq_weight as f64).ln();

        let mut per_neighbor_seq_weight: HashMap<&TrackId, u64> = HashMap::new();
        for neighbor in &seq_neighbors {
            *per_neighbor_seq_weight.entry(&neighbor.neighbor_id).or_default() +=
                u64::from(neighbor.weight);
        }
        for (neighbor_id, weight) in per_neighbor_seq_weight {
            let entry = candidates.entry(neighbor_id.clone()).or_default();
            entry.raw_adjacency_weight += weight;
            if seq_log > 0.0 {
                entry.score += W_SEQ * (weight as f64 / seq_log);
            }
        }

        let cooc_neighbors = repo.neighbors_cooccur(seed)?;
        let total_cooc_weight: u64 = cooc_neighbors.iter().map(|n| u64::from(n.weight)).sum();
        let cooc_log = (1.0 + total_cooc_weight as f64).ln();
        for neighbor in &cooc_neighbors {
            if cooc_log <= 0.0 {
                continue;
            }
            let entry = candidates.entry(neighbor.neighbor_id.clone()).or_default();
            entry.score += W_COOC * (f64::from(neighbor.weight) / cooc_log);
        }
    }
    Ok(candidates)
}

/// Score candidates against an entire playlist (§4.3 Appendix mode).
/// Co-occurrence only; adjacency is dominated by noise at this scale.
pub fn appendix_candidate_scores<R>(
    repo: &mut R,
    track_ids: &[TrackId],
) -> RepoResult<HashMap<TrackId, CandidateScore>>
where
    R: EdgeRepo,
{
    let playlist: HashSet<&TrackId> = track_ids.iter().collect();
    let playlist_log = (1.0 + track_ids.len() as f64).ln();
    let mut candidates: HashMap<TrackId, CandidateScore> = HashMap::new();
    for seed in track_ids {
        for neighbor in repo.neighbors_cooccur(seed)? {
            if playlist.contains(&neighbor.neighbor_id) {
                continue;
            }
            let entry = candidates.entry(neighbor.neighbor_id).or_default();
            if playlist_log > 0.0 {
                entry.score += f64::from(neighbor.weight) / playlist_log;
            }
        }
    }
    Ok(candidates)
}

/// Deterministic ranking order: score descending, then raw adjacency
/// weight descending, then `TrackId` ascending (§4.3).
pub fn cmp_candidates(
    a: (&TrackId, &CandidateScore),
    b: (&TrackId, &CandidateScore),
) -> Ordering {
    b.1.score
        .partial_cmp(&a.1.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.1.raw_adjacency_weight.cmp(&a.1.raw_adjacency_weight))
        .then_with(|| a.0.cmp(b.0))
}
