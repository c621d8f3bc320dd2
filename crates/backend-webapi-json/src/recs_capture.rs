// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use listmagify_usecases_sqlite::playlist_lock::PlaylistLocks;

use super::*;

/// `POST /recs/capture` (§6).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub playlist_id: String,
    pub tracks: Vec<TrackDto>,
    #[serde(default)]
    pub cooccurrence_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub success: bool,
    pub enabled: bool,
    pub stats: CaptureStatsDto,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureStatsDto {
    pub tracks_captured: u64,
    pub adjacency_edges: u64,
    pub cooccurrence_edges: u64,
}

pub async fn handle_request(
    db_gatekeeper: &Gatekeeper,
    playlist_locks: &Arc<PlaylistLocks>,
    recs_enabled: bool,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    if !recs_enabled {
        return Ok(ResponseBody { success: false, enabled: false, stats: CaptureStatsDto::default() });
    }

    let RequestBody { playlist_id, tracks, cooccurrence_only } = request_body;
    let playlist_id = parse_playlist_id(playlist_id)?;
    let tracks = tracks
        .into_iter()
        .map(TrackDto::into_track)
        .collect::<Result<Vec<_>>>()?;

    let outcome = backend::capture::capture_and_update_edges(
        db_gatekeeper,
        playlist_locks,
        playlist_id,
        tracks,
        cooccurrence_only,
    )
    .await?;

    Ok(ResponseBody {
        success: true,
        enabled: true,
        stats: CaptureStatsDto {
            tracks_captured: outcome.tracks_captured,
            adjacency_edges: outcome.adjacency_edges,
            cooccurrence_edges: outcome.cooccurrence_edges,
        },
    })
}
