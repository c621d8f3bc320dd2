// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! JSON codec for the Dispatch Surface (C7, §4.7, §6). Deserializes
//! request bodies/query params into domain values, calls into
//! `listmagify-backend-embedded`, and serializes the response. Knows
//! nothing about HTTP status codes or transport framing — that is
//! `listmagify-websrv-warp-sqlite`'s job.

use std::result::Result as StdResult;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use listmagify_backend_embedded as backend;
use listmagify_core::{track::Track, ContextId, PlaylistId, TrackId};
use listmagify_core_api::Recommendation;

pub mod dismiss;
pub mod recs_appendix;
pub mod recs_capture;
pub mod recs_seed;
pub mod stats;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error(transparent)]
    Backend(#[from] backend::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;

fn bad_request(err: impl std::fmt::Display) -> Error {
    Error::BadRequest(anyhow::Error::msg(err.to_string()))
}

/// Wire representation of a track (§6: "Track object at the
/// interface"). Only `id`, falling back to `uri`, is authoritative;
/// everything else is metadata captured verbatim into the `tracks`
/// table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    pub id: Option<String>,
    pub uri: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistDto>,
    #[serde(default)]
    pub album: Option<serde_json::Value>,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDto {
    pub id: Option<String>,
    pub name: String,
}

impl TrackDto {
    fn into_track(self) -> Result<Track> {
        let raw_id = self
            .id
            .or(self.uri)
            .ok_or_else(|| bad_request("track is missing both `id` and `uri`"))?;
        let id = TrackId::new(raw_id).map_err(bad_request)?;
        let (artist_id, artist_name) = self
            .artists
            .into_iter()
            .next()
            .map_or((None, None), |artist| (artist.id, Some(artist.name)));
        Ok(Track { id, name: self.name, artist_id, artist_name })
    }
}

/// Wire representation of a ranked recommendation (§6: "Recommendation
/// object at the interface").
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub track_id: String,
    pub score: f32,
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<TrackMetadataDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadataDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
}

impl From<Recommendation> for RecommendationDto {
    fn from(rec: Recommendation) -> Self {
        let Recommendation { track_id, score, rank, track } = rec;
        Self {
            track_id: track_id.into_string(),
            score,
            rank,
            track: track.map(|track| TrackMetadataDto {
                id: track.id.into_string(),
                name: track.name,
                artist_id: track.artist_id,
                artist_name: track.artist_name,
            }),
        }
    }
}

fn parse_playlist_id(raw: String) -> Result<PlaylistId> {
    PlaylistId::new(raw).map_err(bad_request)
}

fn parse_track_id(raw: String) -> Result<TrackId> {
    TrackId::new(raw).map_err(bad_request)
}

fn parse_context_id(raw: Option<String>) -> ContextId {
    raw.map_or_else(ContextId::global, ContextId::from)
}
