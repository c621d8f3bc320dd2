// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Storage-agnostic boundary types shared between `listmagify-repo`
//! and `listmagify-usecases`: the shapes that cross from the Query
//! Engine (C4) down into the Scorer (C3) and back up, without any
//! dependency on how they are persisted or serialized over HTTP.

pub mod recs;

pub use recs::{
    clamp_top_n, AppendixQuery, Recommendation, ScoreMode, SeedQuery, Stats, MAX_SEED_TRACKS,
    MAX_TOP_N,
};
