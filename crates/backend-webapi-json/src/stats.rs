// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Serialize;

use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use super::*;

/// `GET /stats/recs` (§6).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub tracks: u64,
    pub adjacency_edges: u64,
    pub cooccurrence_edges: u64,
    pub dismissals: u64,
    pub storage_bytes: u64,
}

pub async fn handle_request(db_gatekeeper: &Gatekeeper) -> Result<ResponseBody> {
    let stats = backend::stats::stats(db_gatekeeper).await?;
    Ok(ResponseBody {
        tracks: stats.tracks,
        adjacency_edges: stats.adjacency_edges,
        cooccurrence_edges: stats.cooccurrence_edges,
        dismissals: stats.dismissals,
        storage_bytes: stats.storage_bytes,
    })
}
