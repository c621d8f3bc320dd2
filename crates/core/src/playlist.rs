// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

/// Opaque identifier for a user's playlist (§GLOSSARY: PlaylistId).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn new(id: impl Into<String>) -> Result<Self, PlaylistIdInvalidity> {
        let id = id.into();
        if id.is_empty() {
            return Err(PlaylistIdInvalidity::Empty);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistIdInvalidity {
    Empty,
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaylistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaylistId {
    type Error = PlaylistIdInvalidity;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// Sentinel `ContextId` used for dismissals that apply across every
/// playlist (§3: Dismissal, §4.5).
pub const GLOBAL_CONTEXT: &str = "global";

/// A dismissal's scope: either a single playlist, or the `"global"`
/// sentinel which applies additively to every query (§4.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ContextId(String);

impl ContextId {
    #[must_use]
    pub fn global() -> Self {
        Self(GLOBAL_CONTEXT.to_owned())
    }

    #[must_use]
    pub fn playlist(playlist_id: &PlaylistId) -> Self {
        Self(playlist_id.as_str().to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_CONTEXT
    }
}

impl From<String> for ContextId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<Option<PlaylistId>> for ContextId {
    fn from(playlist_id: Option<PlaylistId>) -> Self {
        playlist_id
            .as_ref()
            .map_or_else(Self::global, Self::playlist)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
