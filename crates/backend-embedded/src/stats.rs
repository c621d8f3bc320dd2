// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core_api::Stats;
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use crate::prelude::*;

/// `GET /stats/recs` (§4.1 `stats()`, §6).
pub async fn stats(db_gatekeeper: &Gatekeeper) -> Result<Stats> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            listmagify_usecases_sqlite::stats::stats(connection)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
