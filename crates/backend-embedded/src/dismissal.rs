// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{ContextId, TrackId};
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

use crate::prelude::*;

/// `dismiss` (C5, §4.5). Dismissal-write errors always surface to the
/// caller: a successful response is the only guarantee that the
/// dismissal took effect (§7).
pub async fn dismiss(
    db_gatekeeper: &Gatekeeper,
    track_id: TrackId,
    context_id: ContextId,
) -> Result<()> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            listmagify_usecases_sqlite::dismissal::dismiss(connection, &track_id, &context_id)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn undismiss(
    db_gatekeeper: &Gatekeeper,
    track_id: TrackId,
    context_id: ContextId,
) -> Result<()> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            listmagify_usecases_sqlite::dismissal::undismiss(connection, &track_id, &context_id)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// `clear(context_id)`.
pub async fn clear(db_gatekeeper: &Gatekeeper, context_id: ContextId) -> Result<()> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            listmagify_usecases_sqlite::dismissal::clear(connection, &context_id)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
