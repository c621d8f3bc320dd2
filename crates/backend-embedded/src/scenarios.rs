// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end scenarios spanning capture, query, and dismissal against
//! a single provisioned Store, exercising the same seams the Dispatch
//! Surface calls through.

use std::{
    num::{NonZeroU32, NonZeroU64},
    sync::Arc,
    time::Duration,
};

use listmagify_core::{track::Track, ContextId, PlaylistId, TrackId};
use listmagify_core_api::{AppendixQuery, SeedQuery};
use listmagify_storage_sqlite::connection::{
    pool::{gatekeeper, gatekeeper::Gatekeeper, Config as PoolConfig},
    Config as ConnectionConfig, Storage,
};
use listmagify_usecases_sqlite::playlist_lock::PlaylistLocks;

use crate::storage::{provision_database, DatabaseConfig};

fn track(id: &str) -> Track {
    Track { id: TrackId::new(id).unwrap(), name: id.to_owned(), artist_id: None, artist_name: None }
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().copied().map(track).collect()
}

fn track_id(id: &str) -> TrackId {
    TrackId::new(id).unwrap()
}

fn playlist_id(id: &str) -> PlaylistId {
    PlaylistId::new(id).unwrap()
}

/// A file-backed database, not `:memory:`: the in-memory storage mode
/// hands every pooled connection an independent, empty database, which
/// would defeat the concurrent-ingest scenario below.
struct Fixture {
    gatekeeper: Gatekeeper,
    playlist_locks: Arc<PlaylistLocks>,
    _db_file: tempfile::TempPath,
}

impl Fixture {
    fn new() -> Self {
        let db_file = tempfile::NamedTempFile::new()
            .expect("temp file for test database")
            .into_temp_path();
        let config = DatabaseConfig {
            connection: ConnectionConfig {
                storage: Storage::File { path: db_file.to_path_buf() },
                pool: PoolConfig {
                    max_size: NonZeroU32::new(4).unwrap(),
                    gatekeeper: gatekeeper::Config {
                        acquire_read_timeout_millis: NonZeroU64::new(2_000).unwrap(),
                        acquire_write_timeout_millis: NonZeroU64::new(2_000).unwrap(),
                    },
                },
            },
        };
        let gatekeeper = provision_database(&config).expect("database provisions cleanly");
        Self { gatekeeper, playlist_locks: Arc::new(PlaylistLocks::new()), _db_file: db_file }
    }

    async fn capture(&self, playlist: &str, track_ids: &[&str], cooccurrence_only: bool) {
        crate::capture::capture_and_update_edges(
            &self.gatekeeper,
            &self.playlist_locks,
            playlist_id(playlist),
            tracks(track_ids),
            cooccurrence_only,
        )
        .await
        .unwrap();
    }

    async fn seed(&self, seed_ids: &[&str], top_n: u32) -> Vec<listmagify_core_api::Recommendation> {
        let query = SeedQuery {
            seed_ids: seed_ids.iter().copied().map(track_id).collect(),
            exclude_ids: Vec::new(),
            context_id: None,
            top_n,
        };
        crate::query::seed_recommendations(&self.gatekeeper, query, Duration::from_secs(5))
            .await
            .unwrap()
    }

    async fn appendix(&self, playlist: &str) -> listmagify_usecases::query::AppendixOutcome {
        let query = AppendixQuery { playlist_id: playlist_id(playlist), track_ids: None, top_n: 50 };
        crate::query::appendix_recommendations(&self.gatekeeper, query, Duration::from_secs(5))
            .await
            .unwrap()
    }
}

/// §8 scenario 1: adjacency outranks pure co-occurrence.
#[tokio::test]
async fn simple_seed_ranks_adjacent_track_first() {
    let fixture = Fixture::new();
    fixture.capture("p1", &["a", "b", "c"], false).await;

    let recs = fixture.seed(&["a"], 10).await;
    let ranked_ids: Vec<_> = recs.iter().map(|rec| rec.track_id.clone()).collect();
    assert_eq!(ranked_ids, vec![track_id("b"), track_id("c")]);
    assert_eq!(recs[0].rank, 1);
    assert_eq!(recs[1].rank, 2);
    assert!(recs[0].score > recs[1].score);
}

/// §8 scenario 2: adjacency accumulates across separate ingestions.
#[tokio::test]
async fn cumulative_adjacency_scales_score_with_weight() {
    let fixture = Fixture::new();
    fixture.capture("p1", &["a", "b"], false).await;
    fixture.capture("p2", &["a", "b"], false).await;

    let recs = fixture.seed(&["a"], 10).await;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].track_id, track_id("b"));
    assert!(recs[0].score > 0.0);
}

/// §8 scenario 3: a snapshot dedups a repeated track before counting
/// adjacency or co-occurrence.
#[tokio::test]
async fn dedup_within_snapshot_drops_the_repeated_edge() {
    let fixture = Fixture::new();
    fixture.capture("p3", &["x", "y", "x"], false).await;

    let recs = fixture.seed(&["x"], 10).await;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].track_id, track_id("y"));
}

/// §8 scenario 4: appendix mode recommends tracks co-occurring with
/// the playlist, excluding tracks already in it.
#[tokio::test]
async fn appendix_mode_excludes_playlist_tracks() {
    let fixture = Fixture::new();
    fixture.capture("p4", &["a", "b", "c", "d"], false).await;
    fixture.capture("p5", &["c", "d", "e"], false).await;

    let outcome = fixture.appendix("p4").await;
    let ranked_ids: Vec<_> = outcome.recommendations.iter().map(|rec| rec.track_id.clone()).collect();
    assert_eq!(ranked_ids, vec![track_id("e")]);
    assert!(outcome.recommendations[0].score > 0.0);
}

/// §8 scenario 5: dismissals are scoped to their context, and `global`
/// clears every scope.
#[tokio::test]
async fn dismissal_scoping_respects_context() {
    let fixture = Fixture::new();
    fixture.capture("p4", &["a", "b", "c", "d"], false).await;
    fixture.capture("p5", &["c", "d", "e"], false).await;

    crate::dismissal::dismiss(
        &fixture.gatekeeper,
        track_id("e"),
        ContextId::playlist(&playlist_id("p4")),
    )
    .await
    .unwrap();

    let p4_outcome = fixture.appendix("p4").await;
    assert!(p4_outcome.recommendations.iter().all(|rec| rec.track_id != track_id("e")));

    let p5_outcome = fixture.appendix("p5").await;
    assert!(p5_outcome.recommendations.iter().any(|rec| rec.track_id == track_id("e")));

    crate::dismissal::dismiss(&fixture.gatekeeper, track_id("e"), ContextId::global()).await.unwrap();

    let p5_outcome = fixture.appendix("p5").await;
    assert!(p5_outcome.recommendations.iter().all(|rec| rec.track_id != track_id("e")));
}

/// §8 scenario 6: two concurrent ingestions of the same snapshot both
/// succeed and the adjacency weight reflects both.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_ingest_both_succeed_and_adjacency_accumulates() {
    let fixture = Arc::new(Fixture::new());

    let first = {
        let fixture = Arc::clone(&fixture);
        tokio::spawn(async move { fixture.capture("p6", &["a", "b"], false).await })
    };
    let second = {
        let fixture = Arc::clone(&fixture);
        tokio::spawn(async move { fixture.capture("p6", &["a", "b"], false).await })
    };
    first.await.unwrap();
    second.await.unwrap();

    let stats = crate::stats::stats(&fixture.gatekeeper).await.unwrap();
    assert_eq!(stats.adjacency_edges, 1);

    let recs = fixture.seed(&["a"], 10).await;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].track_id, track_id("b"));
}
