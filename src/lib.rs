// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]

//! Umbrella crate that re-exports the recommendation graph engine at
//! whatever granularity the enabled features allow.
//!
//! Downstream binaries (e.g. `listmagify-websrv`) depend on this crate
//! rather than reaching into individual `listmagify-*` crates directly,
//! so that the feature flags below are the single place that decides
//! which layers are linked in.

pub use listmagify_core as core;

#[cfg(feature = "api")]
pub use listmagify_core_api as core_api;

#[cfg(feature = "repo")]
pub use listmagify_repo as repo;

#[cfg(feature = "sqlite")]
pub use listmagify_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use listmagify_storage_sqlite as storage_sqlite;

#[cfg(feature = "usecases")]
pub use listmagify_usecases as usecases;

#[cfg(feature = "sqlite")]
pub use listmagify_usecases_sqlite as usecases_sqlite;

#[cfg(feature = "backend-embedded")]
pub use listmagify_backend_embedded as backend_embedded;
