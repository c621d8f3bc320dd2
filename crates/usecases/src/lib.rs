// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Storage-agnostic recommendation-engine logic (C2-C5, §4.2-§4.5).
//! Every function here is generic over `listmagify_repo` traits and
//! knows nothing about SQLite; the concrete wiring lives in
//! `listmagify-usecases-sqlite`.

use listmagify_repo::RepoError;
use thiserror::Error;

pub mod cancellation;
pub mod dismissal;
pub mod ingest;
pub mod query;
pub mod scorer;

/// Error taxonomy surfaced by use cases, independent of transport
/// (§7). The Dispatch Surface is the only layer that maps these to
/// HTTP status codes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("store failure: {0}")]
    StoreFailure(#[source] anyhow::Error),

    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            RepoError::Conflict => Self::Conflict,
            RepoError::Other(err) => Self::StoreFailure(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
