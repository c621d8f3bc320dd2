// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::wildcard_imports)]

//! Domain model shared by every layer of the recommendation graph
//! engine: opaque identifiers, track metadata, and the clock type
//! used for timestamps.

pub mod playlist;
pub mod track;
pub mod util;

pub use playlist::{ContextId, PlaylistId};
pub use track::{Track, TrackId};
