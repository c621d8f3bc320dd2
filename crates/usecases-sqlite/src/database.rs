// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_repo_sqlite::DbConnection;

use crate::{Error, Result};

/// Apply every pending embedded migration (§4.1: "Migrations are
/// forward-only ... applied at startup").
pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    listmagify_repo_sqlite::run_migrations(connection)
        .map(|_| ())
        .map_err(|err| Error::Other(anyhow::Error::from(err)))
}
