// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{PlaylistId, Track, TrackId};

/// Lower bound enforced on `seed_ids` by `seed_recommendations`
/// (§4.4): at least one seed is required.
pub const MIN_SEED_TRACKS: usize = 1;

/// Upper bound enforced on `seed_ids` by `seed_recommendations`
/// (§4.4): more than 5 seeds is rejected as `InvalidInput`.
pub const MAX_SEED_TRACKS: usize = 5;

/// `top_n` is clamped into `[1, MAX_TOP_N]` (§4.4, §8 Boundary).
pub const MAX_TOP_N: u32 = 50;

/// Clamp a caller-supplied `top_n` into `[1, MAX_TOP_N]` (§8: "`top_n`
/// values of `0` and `> 50` are clamped to `[1, 50]`").
#[must_use]
pub fn clamp_top_n(top_n: i64) -> u32 {
    if top_n <= 0 {
        1
    } else {
        u32::try_from(top_n).unwrap_or(u32::MAX).min(MAX_TOP_N)
    }
}

/// Which scoring formula the Scorer (C3) should apply (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// 1-5 explicit seed tracks; adjacency and co-occurrence both count.
    Seed,
    /// An entire playlist as the seed set; co-occurrence only.
    Appendix,
}

/// Input to `seed_recommendations` (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedQuery {
    pub seed_ids: Vec<TrackId>,
    pub exclude_ids: Vec<TrackId>,
    pub context_id: Option<PlaylistId>,
    pub top_n: u32,
}

/// Input to `appendix_recommendations` (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendixQuery {
    pub playlist_id: PlaylistId,
    pub track_ids: Option<Vec<TrackId>>,
    pub top_n: u32,
}

/// A single ranked result (§4.4, §6: Recommendation object).
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub track_id: TrackId,
    pub score: f32,
    pub rank: u32,
    pub track: Option<Track>,
}

/// `GET /stats/recs` response body (§4.1 `stats()`, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub tracks: u64,
    pub adjacency_edges: u64,
    pub cooccurrence_edges: u64,
    pub dismissals: u64,
    pub storage_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::clamp_top_n;

    #[test]
    fn clamps_zero_and_negative_to_one() {
        assert_eq!(clamp_top_n(0), 1);
        assert_eq!(clamp_top_n(-5), 1);
    }

    #[test]
    fn clamps_above_max_to_max() {
        assert_eq!(clamp_top_n(51), 50);
        assert_eq!(clamp_top_n(10_000), 50);
    }

    #[test]
    fn passes_through_in_range() {
        assert_eq!(clamp_top_n(1), 1);
        assert_eq!(clamp_top_n(50), 50);
        assert_eq!(clamp_top_n(17), 17);
    }
}
