// SPDX-License-Identifier: AGPL-3.0-or-later

//! Metadata Enricher (C6, §4.6): attaches `Track` metadata to already
//! scored and ranked recommendations. Never reorders or rescales;
//! per-track lookup failures are tolerated and leave `track` absent.

use std::{future::Future, pin::Pin};

use listmagify_core::{track::Track, TrackId};
use listmagify_core_api::Recommendation;
use listmagify_repo::track::TrackRepo;
use listmagify_repo_sqlite::prelude::Connection as RepoConnection;
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

/// Maximum number of tracks looked up per catalog request (§4.6).
pub const MAX_BATCH_SIZE: usize = 50;

/// External music-catalog lookup. One entry per requested id, in the
/// same order, `None` where the lookup failed or the track is
/// unknown.
pub trait TrackCatalogClient: Send + Sync {
    fn fetch_tracks<'a>(
        &'a self,
        track_ids: &'a [TrackId],
    ) -> Pin<Box<dyn Future<Output = Vec<Option<Track>>> + Send + 'a>>;
}

/// A [`TrackCatalogClient`] backed by the local `tracks` table rather
/// than a remote service: every track `capture_and_update_edges` has
/// ever seen already carries the metadata it was ingested with, so the
/// default deployment needs no network round trip to enrich results.
#[derive(Debug, Clone, Copy)]
pub struct StoreTrackCatalogClient<'a> {
    db_gatekeeper: &'a Gatekeeper,
}

impl<'a> StoreTrackCatalogClient<'a> {
    #[must_use]
    pub fn new(db_gatekeeper: &'a Gatekeeper) -> Self {
        Self { db_gatekeeper }
    }
}

impl TrackCatalogClient for StoreTrackCatalogClient<'_> {
    fn fetch_tracks<'b>(
        &'b self,
        track_ids: &'b [TrackId],
    ) -> Pin<Box<dyn Future<Output = Vec<Option<Track>>> + Send + 'b>> {
        let owned_ids: Vec<TrackId> = track_ids.to_vec();
        Box::pin(async move {
            let len = owned_ids.len();
            self.db_gatekeeper
                .spawn_blocking_read_task(move |mut pooled_connection, _abort_flag| {
                    let connection = &mut *pooled_connection;
                    let mut repo = RepoConnection::new(connection);
                    owned_ids
                        .iter()
                        .map(|track_id| repo.load_track(track_id).unwrap_or(None))
                        .collect::<Vec<_>>()
                })
                .await
                .unwrap_or_else(|_| vec![None; len])
        })
    }
}

/// Enrich `recommendations` against the local Store (§4.6). The
/// convenience most callers want; tests and a future remote catalog
/// integration go through [`enrich`] directly with a different
/// [`TrackCatalogClient`].
pub async fn enrich_with_store(
    db_gatekeeper: &Gatekeeper,
    recommendations: Vec<Recommendation>,
) -> Vec<Recommendation> {
    let client = StoreTrackCatalogClient::new(db_gatekeeper);
    enrich(&client, recommendations).await
}

/// Attach `track` metadata to each recommendation in batches of at
/// most [`MAX_BATCH_SIZE`]. Score and rank are untouched; the input
/// order is preserved.
pub async fn enrich(
    client: &dyn TrackCatalogClient,
    mut recommendations: Vec<Recommendation>,
) -> Vec<Recommendation> {
    for batch in recommendations.chunks_mut(MAX_BATCH_SIZE) {
        let track_ids: Vec<TrackId> = batch.iter().map(|rec| rec.track_id.clone()).collect();
        let tracks = client.fetch_tracks(&track_ids).await;
        for (rec, track) in batch.iter_mut().zip(tracks) {
            rec.track = track;
        }
    }
    recommendations
}

#[cfg(feature = "reqwest-client")]
pub mod reqwest_client {
    use std::{future::Future, pin::Pin};

    use listmagify_core::{track::Track, TrackId};
    use serde::Deserialize;

    use super::TrackCatalogClient;

    /// Looks up one track per HTTP request against `{base_url}/tracks/{id}`.
    /// Any transport error, non-2xx status, or malformed body is treated
    /// as an absent track rather than propagated (§4.6).
    #[derive(Debug, Clone)]
    pub struct ReqwestTrackCatalogClient {
        http: reqwest::Client,
        base_url: reqwest::Url,
    }

    impl ReqwestTrackCatalogClient {
        #[must_use]
        pub fn new(http: reqwest::Client, base_url: reqwest::Url) -> Self {
            Self { http, base_url }
        }

        async fn fetch_one(&self, track_id: &TrackId) -> Option<Track> {
            #[derive(Deserialize)]
            struct TrackResponse {
                id: String,
                name: String,
                #[serde(rename = "artistId")]
                artist_id: Option<String>,
                #[serde(rename = "artistName")]
                artist_name: Option<String>,
            }

            let url = self.base_url.join(&format!("tracks/{}", track_id.as_str())).ok()?;
            let response = self.http.get(url).send().await.ok()?;
            if !response.status().is_success() {
                return None;
            }
            let body = response.json::<TrackResponse>().await.ok()?;
            let id = TrackId::new(body.id).ok()?;
            Some(Track { id, name: body.name, artist_id: body.artist_id, artist_name: body.artist_name })
        }
    }

    impl TrackCatalogClient for ReqwestTrackCatalogClient {
        fn fetch_tracks<'a>(
            &'a self,
            track_ids: &'a [TrackId],
        ) -> Pin<Box<dyn Future<Output = Vec<Option<Track>>> + Send + 'a>> {
            Box::pin(async move {
                let mut results = Vec::with_capacity(track_ids.len());
                for track_id in track_ids {
                    results.push(self.fetch_one(track_id).await);
                }
                results
            })
        }
    }
}
