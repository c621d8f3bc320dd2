// SPDX-License-Identifier: AGPL-3.0-or-later

//! Snapshot ingestion (C2, §4.2).

use listmagify_core::{track::Track, util::clock::DateTime, PlaylistId, TrackId};
use listmagify_repo::{edge::EdgeRepo, playlist::PlaylistRepo, track::TrackRepo};

use crate::Result;

#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub playlist_id: PlaylistId,
    pub tracks: Vec<Track>,
    pub cooccurrence_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestOutcome {
    pub tracks_captured: u64,
    pub adjacency_edges: u64,
    pub cooccurrence_edges: u64,
}

/// `capture_and_update_edges` (§4.2). `repo` must give the caller a
/// single Store transaction: the sqlite wiring in
/// `listmagify-usecases-sqlite` opens one before calling this and
/// commits/rolls back around it.
pub fn capture_and_update_edges<R>(
    repo: &mut R,
    request: IngestRequest,
    now: DateTime,
) -> Result<IngestOutcome>
where
    R: TrackRepo + EdgeRepo + PlaylistRepo,
{
    let IngestRequest { playlist_id, tracks, cooccurrence_only } = request;

    // Dedup preserving first-occurrence order (§4.2 step 1): a track
    // seen twice in one snapshot is a single co-occurrence participant
    // and contributes only its first appearance's adjacency edges.
    let mut deduped: Vec<Track> = Vec::with_capacity(tracks.len());
    let mut seen: Vec<TrackId> = Vec::with_capacity(tracks.len());
    for track in tracks {
        if seen.contains(&track.id) {
            continue;
        }
        seen.push(track.id.clone());
        deduped.push(track);
    }

    if deduped.is_empty() {
        // An empty snapshot is a no-op: no writes, zero counts, and
        // the prior `playlist_tracks` row (if any) is left untouched
        // (§4.2 invariants, §9 open question resolution in DESIGN.md).
        return Ok(IngestOutcome::default());
    }

    for track in &deduped {
        repo.upsert_track(track, now)?;
    }

    let mut adjacency_edges = 0u64;
    if !cooccurrence_only {
        for window in seen.windows(2) {
            let [prev, next] = window else { unreachable!("windows(2) yields pairs") };
            if prev == next {
                continue;
            }
            repo.increment_adjacency(prev, next, 1)?;
            adjacency_edges += 1;
        }
    }

    let mut cooccurrence_edges = 0u64;
    for i in 0..seen.len() {
        for j in (i + 1)..seen.len() {
            repo.increment_cooccurrence(&seen[i], &seen[j], 1)?;
            cooccurrence_edges += 1;
        }
    }

    repo.replace_playlist_tracks(&playlist_id, &seen, now)?;

    Ok(IngestOutcome {
        tracks_captured: deduped.len() as u64,
        adjacency_edges,
        cooccurrence_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use listmagify_core::track::Track;
    use listmagify_repo::edge::{CoocNeighbor, SeqNeighbor};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeStore {
        tracks: HashMap<String, Track>,
        seq_weight: HashMap<(String, String), u32>,
        cooc_weight: HashMap<(String, String), u32>,
        playlist_tracks: HashMap<String, Vec<TrackId>>,
    }

    impl TrackRepo for FakeStore {
        fn upsert_track(&mut self, track: &Track, _now: DateTime) -> listmagify_repo::RepoResult<()> {
            self.tracks.insert(track.id.as_str().to_owned(), track.clone());
            Ok(())
        }

        fn load_track(&mut self, track_id: &TrackId) -> listmagify_repo::RepoResult<Option<Track>> {
            Ok(self.tracks.get(track_id.as_str()).cloned())
        }
    }

    impl EdgeRepo for FakeStore {
        fn increment_adjacency(
            &mut self,
            from: &TrackId,
            to: &TrackId,
            delta: u32,
        ) -> listmagify_repo::RepoResult<()> {
            *self
                .seq_weight
                .entry((from.as_str().to_owned(), to.as_str().to_owned()))
                .or_default() += delta;
            Ok(())
        }

        fn increment_cooccurrence(
            &mut self,
            a: &TrackId,
            b: &TrackId,
            delta: u32,
        ) -> listmagify_repo::RepoResult<()> {
            let (a, b) = if a.as_str() <= b.as_str() { (a, b) } else { (b, a) };
            *self
                .cooc_weight
                .entry((a.as_str().to_owned(), b.as_str().to_owned()))
                .or_default() += delta;
            Ok(())
        }

        fn neighbors_seq(&mut self, _track_id: &TrackId) -> listmagify_repo::RepoResult<Vec<SeqNeighbor>> {
            Ok(Vec::new())
        }

        fn neighbors_cooccur(
            &mut self,
            _track_id: &TrackId,
        ) -> listmagify_repo::RepoResult<Vec<CoocNeighbor>> {
            Ok(Vec::new())
        }
    }

    impl PlaylistRepo for FakeStore {
        fn replace_playlist_tracks(
            &mut self,
            playlist_id: &PlaylistId,
            track_ids: &[TrackId],
            _snapshot_ts: DateTime,
        ) -> listmagify_repo::RepoResult<()> {
            self.playlist_tracks
                .insert(playlist_id.as_str().to_owned(), track_ids.to_vec());
            Ok(())
        }

        fn latest_track_ids(&mut self, playlist_id: &PlaylistId) -> listmagify_repo::RepoResult<Vec<TrackId>> {
            Ok(self.playlist_tracks.get(playlist_id.as_str()).cloned().unwrap_or_default())
        }
    }

    fn track(id: &str) -> Track {
        Track { id: TrackId::new(id).unwrap(), name: id.to_owned(), artist_id: None, artist_name: None }
    }

    #[test]
    fn dedups_and_counts_distinct_edges() {
        let mut store = FakeStore::default();
        let request = IngestRequest {
            playlist_id: PlaylistId::new("p").unwrap(),
            tracks: vec![track("a"), track("b"), track("a"), track("c")],
            cooccurrence_only: false,
        };
        let outcome = capture_and_update_edges(&mut store, request, DateTime::now_utc()).unwrap();
        assert_eq!(outcome.tracks_captured, 3);
        // deduped sequence: a, b, c -> 2 adjacency pairs, 3 cooc pairs
        assert_eq!(outcome.adjacency_edges, 2);
        assert_eq!(outcome.cooccurrence_edges, 3);
        assert_eq!(
            store.playlist_tracks[&"p".to_owned()],
            vec![TrackId::new("a").unwrap(), TrackId::new("b").unwrap(), TrackId::new("c").unwrap()]
        );
    }

    #[test]
    fn empty_snapshot_is_a_no_op() {
        let mut store = FakeStore::default();
        let request = IngestRequest {
            playlist_id: PlaylistId::new("p").unwrap(),
            tracks: Vec::new(),
            cooccurrence_only: false,
        };
        let outcome = capture_and_update_edges(&mut store, request, DateTime::now_utc()).unwrap();
        assert_eq!(outcome, IngestOutcome::default());
        assert!(!store.playlist_tracks.contains_key("p"));
    }

    #[test]
    fn cooccurrence_only_skips_adjacency() {
        let mut store = FakeStore::default();
        let request = IngestRequest {
            playlist_id: PlaylistId::new("p").unwrap(),
            tracks: vec![track("a"), track("b")],
            cooccurrence_only: true,
        };
        let outcome = capture_and_update_edges(&mut store, request, DateTime::now_utc()).unwrap();
        assert_eq!(outcome.adjacency_edges, 0);
        assert_eq!(outcome.cooccurrence_edges, 1);
    }
}
