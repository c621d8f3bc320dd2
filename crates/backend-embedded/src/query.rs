// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use listmagify_core_api::{AppendixQuery, Recommendation, SeedQuery};
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use listmagify_usecases::{cancellation::CancellationToken, query::AppendixOutcome};

use crate::prelude::*;

/// `seed_recommendations` (C4, §4.4). `deadline` is the Dispatch
/// Surface's per-request timeout (§5: "default ... 10 s for
/// queries"); once it elapses the in-flight query is cancelled
/// cooperatively rather than the task being killed outright.
pub async fn seed_recommendations(
    db_gatekeeper: &Gatekeeper,
    query: SeedQuery,
    deadline: Duration,
) -> Result<Vec<Recommendation>> {
    with_cancellable_read(db_gatekeeper, deadline, move |connection, cancellation| {
        listmagify_usecases_sqlite::query::seed_recommendations(connection, query, cancellation)
    })
    .await
}

/// `appendix_recommendations` (C4, §4.4).
pub async fn appendix_recommendations(
    db_gatekeeper: &Gatekeeper,
    query: AppendixQuery,
    deadline: Duration,
) -> Result<AppendixOutcome> {
    with_cancellable_read(db_gatekeeper, deadline, move |connection, cancellation| {
        listmagify_usecases_sqlite::query::appendix_recommendations(connection, query, cancellation)
    })
    .await
}

async fn with_cancellable_read<T, F>(
    db_gatekeeper: &Gatekeeper,
    deadline: Duration,
    query: F,
) -> Result<T>
where
    F: FnOnce(&mut listmagify_repo_sqlite::DbConnection, &CancellationToken) -> Result<T>
        + Send
        + 'static,
    T: Send + 'static,
{
    let cancellation = CancellationToken::new();
    let watchdog_cancellation = cancellation.clone();
    let watchdog = tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        watchdog_cancellation.cancel();
    });

    let result = db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            query(connection, &cancellation)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err);

    watchdog.abort();
    result
}
