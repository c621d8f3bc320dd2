// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Asynchronous, JSON-free API for an embedded recommendation engine
//! (C1-C6 wired together behind a `Gatekeeper`, §5). Every public
//! function here is `async` and dispatches onto the blocking pool
//! itself; `listmagify-backend-webapi-json` builds the JSON dispatch
//! surface (C7) on top of this crate and never touches SQLite or
//! `diesel` directly.

pub mod capture;
pub mod dismissal;
pub mod enrich;
pub mod query;
pub mod stats;
pub mod storage;

pub type Error = listmagify_usecases_sqlite::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{Error, Result};
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod scenarios;
