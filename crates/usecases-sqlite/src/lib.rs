// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Concrete SQLite wiring for `listmagify-usecases`: owns the Store
//! transaction boundary and the per-playlist advisory lock (§4.2,
//! §4.4, §5). Nothing above this crate knows SQLite exists.

use thiserror::Error;

pub mod capture;
pub mod database;
pub mod dismissal;
pub mod playlist_lock;
pub mod query;
pub mod stats;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Usecase(#[from] listmagify_usecases::Error),

    #[error(transparent)]
    Storage(#[from] listmagify_storage_sqlite::Error),

    #[error(transparent)]
    Repository(#[from] listmagify_repo::RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
