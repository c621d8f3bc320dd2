// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::missing_errors_doc)]

//! Storage-agnostic repository traits for the recommendation graph
//! engine (C1, §4.1). Implementations live in `listmagify-repo-sqlite`;
//! everything above this crate (the usecases in `listmagify-usecases`)
//! is generic over these traits and knows nothing about SQLite.

pub mod dismissal;
pub mod edge;
pub mod playlist;
pub mod stats;
pub mod track;

pub mod prelude {
    pub use thiserror::Error;

    pub use crate::{OptionalRepoResult, RepoError, RepoResult};
}

use thiserror::Error;

/// Errors surfaced by a repository implementation, independent of the
/// concrete storage engine (§7: repo-layer slice of the error
/// taxonomy — `NotFound`, `Conflict`; everything else is opaque).
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

pub trait OptionalRepoResult<T> {
    /// Turn a `NotFound` error into `Ok(None)`, leaving every other
    /// error untouched.
    fn optional(self) -> RepoResult<Option<T>>;
}

impl<T> OptionalRepoResult<T> for RepoResult<T> {
    fn optional(self) -> RepoResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(RepoError::NotFound) => Ok(None),
            Err(other) => Err(other),
        }
    }
}

/// Aggregate of every repository trait, implemented once per storage
/// backend (`listmagify-repo-sqlite::Connection` implements this for
/// a single transaction/connection handle).
pub trait Store:
    track::TrackRepo + edge::EdgeRepo + playlist::PlaylistRepo + dismissal::DismissalRepo + stats::StatsRepo
{
}

impl<T> Store for T where
    T: track::TrackRepo + edge::EdgeRepo + playlist::PlaylistRepo + dismissal::DismissalRepo + stats::StatsRepo
{
}
