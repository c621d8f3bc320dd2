// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::util::clock::DateTime;

/// Maximum length in bytes of an opaque [`TrackId`].
pub const TRACK_ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackIdInvalidity {
    Empty,
    TooLong,
}

impl fmt::Display for TrackIdInvalidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("track id must not be empty"),
            Self::TooLong => write!(f, "track id must be at most {TRACK_ID_MAX_LEN} bytes"),
        }
    }
}

/// Opaque identifier for a track in the external music catalog.
///
/// The engine never interprets the contents, only compares and stores
/// it verbatim (§3, §GLOSSARY: TrackId).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Result<Self, TrackIdInvalidity> {
        let id = id.into();
        if id.is_empty() {
            return Err(TrackIdInvalidity::Empty);
        }
        if id.len() > TRACK_ID_MAX_LEN {
            return Err(TrackIdInvalidity::TooLong);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TrackId {
    type Error = TrackIdInvalidity;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// Metadata attached to a [`TrackId`] the first time it is seen during
/// ingestion, and refreshed on subsequent sightings (§3: Track).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
}

/// A [`Track`] as stored, including bookkeeping not part of the
/// engine's identity (§3 SUPPLEMENT: `updated_at`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTrack {
    pub track: Track,
    pub updated_at: DateTime,
}
