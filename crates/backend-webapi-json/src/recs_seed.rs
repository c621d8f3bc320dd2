// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use serde::{Deserialize, Serialize};

use listmagify_core_api::SeedQuery as BackendSeedQuery;
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use super::*;

/// `POST /recs/seed` (§6).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub seed_track_ids: Vec<String>,
    #[serde(default)]
    pub exclude_track_ids: Vec<String>,
    pub playlist_id: Option<String>,
    pub top_n: Option<i64>,
    #[serde(default)]
    pub include_metadata: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub recommendations: Vec<RecommendationDto>,
    pub enabled: bool,
}

pub async fn handle_request(
    db_gatekeeper: &Gatekeeper,
    recs_enabled: bool,
    deadline: Duration,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    if !recs_enabled {
        return Ok(ResponseBody { recommendations: Vec::new(), enabled: false });
    }

    let RequestBody { seed_track_ids, exclude_track_ids, playlist_id, top_n, include_metadata } =
        request_body;

    let seed_ids = seed_track_ids
        .into_iter()
        .map(parse_track_id)
        .collect::<Result<Vec<_>>>()?;
    let exclude_ids = exclude_track_ids
        .into_iter()
        .map(parse_track_id)
        .collect::<Result<Vec<_>>>()?;
    let context_id = playlist_id.map(parse_playlist_id).transpose()?;
    let top_n = listmagify_core_api::clamp_top_n(top_n.unwrap_or(i64::from(listmagify_core_api::MAX_TOP_N)));

    let query = BackendSeedQuery { seed_ids, exclude_ids, context_id, top_n };
    let recommendations =
        backend::query::seed_recommendations(db_gatekeeper, query, deadline).await?;
    let recommendations = if include_metadata {
        backend::enrich::enrich_with_store(db_gatekeeper, recommendations).await
    } else {
        recommendations
    };

    Ok(ResponseBody {
        recommendations: recommendations.into_iter().map(Into::into).collect(),
        enabled: true,
    })
}
