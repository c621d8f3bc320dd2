// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use serde::{Deserialize, Serialize};

use listmagify_core_api::AppendixQuery as BackendAppendixQuery;
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use super::*;

/// `POST /recs/playlist-appendix` body, or the equivalent
/// `GET ?playlistId=&topN=&includeMetadata=` query params (§6).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub playlist_id: String,
    pub track_ids: Option<Vec<String>>,
    pub top_n: Option<i64>,
    #[serde(default)]
    pub include_metadata: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub playlist_id: String,
    pub top_n: Option<i64>,
    #[serde(default)]
    pub include_metadata: bool,
}

impl From<QueryParams> for RequestBody {
    fn from(params: QueryParams) -> Self {
        let QueryParams { playlist_id, top_n, include_metadata } = params;
        Self { playlist_id, track_ids: None, top_n, include_metadata }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub recommendations: Vec<RecommendationDto>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn handle_request(
    db_gatekeeper: &Gatekeeper,
    recs_enabled: bool,
    deadline: Duration,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    if !recs_enabled {
        return Ok(ResponseBody { recommendations: Vec::new(), enabled: false, message: None });
    }

    let RequestBody { playlist_id, track_ids, top_n, include_metadata } = request_body;
    let playlist_id = parse_playlist_id(playlist_id)?;
    let track_ids = track_ids
        .map(|ids| ids.into_iter().map(parse_track_id).collect::<Result<Vec<_>>>())
        .transpose()?
        .filter(|ids| !ids.is_empty());
    let top_n = listmagify_core_api::clamp_top_n(top_n.unwrap_or(i64::from(listmagify_core_api::MAX_TOP_N)));

    let query = BackendAppendixQuery { playlist_id, track_ids, top_n };
    let outcome = backend::query::appendix_recommendations(db_gatekeeper, query, deadline).await?;

    let recommendations = if include_metadata {
        backend::enrich::enrich_with_store(db_gatekeeper, outcome.recommendations).await
    } else {
        outcome.recommendations
    };

    Ok(ResponseBody {
        recommendations: recommendations.into_iter().map(Into::into).collect(),
        enabled: true,
        message: outcome.message,
    })
}
