// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Connection pool and concurrency gate (`Gatekeeper`) for the
//! embedded SQLite store (C1, §5). Owns nothing about the schema —
//! that lives in `listmagify-repo-sqlite` — only how connections are
//! acquired, how many readers/writers may run concurrently, and how
//! a caller-supplied deadline becomes a timeout error.

use diesel::{RunQueryDsl as _, SqliteConnection};
use thiserror::Error;

pub mod connection;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error(transparent)]
    DatabaseConnection(#[from] diesel::ConnectionError),

    #[error(transparent)]
    DatabaseConnectionPool(#[from] r2d2::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    #[cfg(feature = "tokio")]
    #[error("timeout: {reason}")]
    TaskTimeout { reason: String },

    #[cfg(feature = "tokio")]
    #[error(transparent)]
    TaskScheduling(#[from] ::tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// WAL journaling plus enforced foreign keys, applied once per
/// connection at startup.
pub fn initialize_database(connection: &mut SqliteConnection) -> diesel::QueryResult<()> {
    diesel::sql_query(
        r"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = 1;
PRAGMA defer_foreign_keys = 1;
PRAGMA encoding = 'UTF-8';
",
    )
    .execute(connection)?;
    Ok(())
}
