// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_storage_sqlite::connection::{
    pool::{create_connection_pool, gatekeeper::Gatekeeper, get_pooled_connection},
    Config as ConnectionConfig,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connection pool and concurrency-gate settings for the embedded
/// Store (§4.1, §5). Migrations are always forward-only and applied
/// eagerly at startup; there is no reapply/rollback mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatabaseConfig {
    pub connection: ConnectionConfig,
}

/// Open the connection pool, apply startup pragmas and pending
/// migrations, and hand back a `Gatekeeper` ready to service
/// ingestion and query tasks.
pub fn provision_database(config: &DatabaseConfig) -> anyhow::Result<Gatekeeper> {
    let DatabaseConfig { connection } = config;

    log::info!("Provisioning SQLite database: {}", connection.storage);
    log::info!(
        "Creating connection pool of max. size {}",
        connection.pool.max_size
    );
    let connection_pool = create_connection_pool(&connection.storage, connection.pool.max_size)?;

    log::info!("Initializing database");
    listmagify_storage_sqlite::initialize_database(&mut *get_pooled_connection(&connection_pool)?)?;

    log::info!("Migrating database schema");
    listmagify_usecases_sqlite::database::migrate_schema(&mut *get_pooled_connection(
        &connection_pool,
    )?)?;

    Ok(Gatekeeper::new(connection_pool, connection.pool.gatekeeper))
}
