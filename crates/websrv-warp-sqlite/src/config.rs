// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_INGESTION_TIMEOUT, DEFAULT_QUERY_TIMEOUT};

/// Feature-flag configuration for the Dispatch Surface (§6): `recs_enabled`
/// gates every endpoint, `stats_allowed_user_ids` gates `/stats/recs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub recs_enabled: bool,
    pub stats_allowed_user_ids: Vec<String>,
    #[serde(with = "humantime_secs")]
    pub ingestion_timeout: Duration,
    #[serde(with = "humantime_secs")]
    pub query_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recs_enabled: true,
            stats_allowed_user_ids: Vec::new(),
            ingestion_timeout: DEFAULT_INGESTION_TIMEOUT,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl Config {
    #[must_use]
    pub fn stats_allowed(&self, user_id: Option<&str>) -> bool {
        if self.stats_allowed_user_ids.is_empty() {
            return true;
        }
        user_id.is_some_and(|user_id| self.stats_allowed_user_ids.iter().any(|id| id == user_id))
    }
}

/// Serializes a [`Duration`] as a plain number of seconds, so the RON
/// config file reads `ingestion_timeout: 30` rather than a struct.
mod humantime_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
