// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// diesel's generated query types nest deeply.
#![recursion_limit = "256"]

//! Diesel/SQLite schema and `listmagify-repo` trait implementations
//! (C1, §4.1). Owns the table definitions and embedded migrations;
//! connection pooling and concurrency gating live in
//! `listmagify-storage-sqlite`.

use diesel::{
    migration::{MigrationVersion, Result as MigrationResult},
    result::Error as DieselError,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness as _};
use listmagify_repo::RepoError;

mod db;
pub mod repo;

pub type DbBackend = diesel::sqlite::Sqlite;
pub type DbConnection = diesel::sqlite::SqliteConnection;

pub mod prelude {
    pub(crate) use diesel::prelude::*;
    pub use diesel::Connection as _;

    pub use crate::{DbBackend, DbConnection};

    use std::ops::{Deref, DerefMut};

    #[allow(missing_debug_implementations)]
    pub struct Connection<'db>(&'db mut DbConnection);

    impl<'db> Connection<'db> {
        #[must_use]
        pub fn new(inner: &'db mut DbConnection) -> Self {
            Self(inner)
        }
    }

    impl<'db> From<&'db mut DbConnection> for Connection<'db> {
        fn from(inner: &'db mut DbConnection) -> Self {
            Self::new(inner)
        }
    }

    impl<'db> AsRef<DbConnection> for Connection<'db> {
        fn as_ref(&self) -> &DbConnection {
            self.0
        }
    }

    impl<'db> AsMut<DbConnection> for Connection<'db> {
        fn as_mut(&mut self) -> &mut DbConnection {
            self.0
        }
    }

    impl<'db> Deref for Connection<'db> {
        type Target = DbConnection;

        fn deref(&self) -> &Self::Target {
            self.as_ref()
        }
    }

    impl<'db> DerefMut for Connection<'db> {
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut()
        }
    }

    #[cfg(test)]
    pub(crate) mod tests {
        use super::DbConnection;
        use diesel::Connection as _;

        pub(crate) fn establish_connection() -> DbConnection {
            let mut connection =
                DbConnection::establish(":memory:").expect("in-memory database connection");
            crate::run_migrations(&mut connection).expect("pending migrations apply cleanly");
            connection
        }
    }
}

pub(crate) fn repo_error(err: DieselError) -> RepoError {
    match err {
        DieselError::NotFound => RepoError::NotFound,
        err => anyhow::Error::from(err).into(),
    }
}

const EMBEDDED_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending forward-only migrations (§4.1).
pub fn run_migrations(connection: &mut DbConnection) -> MigrationResult<Vec<MigrationVersion<'_>>> {
    connection.run_pending_migrations(EMBEDDED_MIGRATIONS)
}
