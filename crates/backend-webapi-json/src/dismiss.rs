// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use super::*;

/// `POST /recs/dismiss` (§6).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub track_id: String,
    pub context_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub success: bool,
}

pub async fn handle_request(
    db_gatekeeper: &Gatekeeper,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let RequestBody { track_id, context_id } = request_body;
    let track_id = parse_track_id(track_id)?;
    let context_id = parse_context_id(context_id);
    backend::dismissal::dismiss(db_gatekeeper, track_id, context_id).await?;
    Ok(ResponseBody { success: true })
}

/// `DELETE /recs/dismiss?contextId=` (§6). Clears every dismissal
/// recorded for `context_id`; unrelated scopes are untouched (§4.5).
pub async fn handle_clear_request(
    db_gatekeeper: &Gatekeeper,
    context_id: Option<String>,
) -> Result<ResponseBody> {
    let context_id = parse_context_id(context_id);
    backend::dismissal::clear(db_gatekeeper, context_id).await?;
    Ok(ResponseBody { success: true })
}
