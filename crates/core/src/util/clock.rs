// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, ops::Deref, time::SystemTime};

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

pub type DateTimeInner = OffsetDateTime;

pub type TimestampMillis = i64;

const NANOS_PER_MILLISECOND: i128 = 1_000_000;

/// A UTC timestamp truncated to millisecond precision.
///
/// Millisecond truncation keeps round-trips through the SQLite
/// `BigInt` storage representation (`timestamp_millis`) lossless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DateTime(DateTimeInner);

impl DateTime {
    #[must_use]
    pub fn new(inner: DateTimeInner) -> Self {
        let subsec_nanos = inner.unix_timestamp_nanos() % NANOS_PER_MILLISECOND;
        let truncated = inner - Duration::nanoseconds(subsec_nanos as i64);
        Self(truncated)
    }

    #[must_use]
    pub fn now_utc() -> Self {
        DateTimeInner::now_utc().into()
    }

    #[must_use]
    pub fn from_timestamp_millis(timestamp_millis: TimestampMillis) -> Self {
        DateTimeInner::from_unix_timestamp_nanos(
            i128::from(timestamp_millis) * NANOS_PER_MILLISECOND,
        )
        .expect("valid timestamp")
        .into()
    }

    #[must_use]
    pub fn timestamp_millis(self) -> TimestampMillis {
        (self.0.unix_timestamp_nanos() / NANOS_PER_MILLISECOND) as TimestampMillis
    }

    #[must_use]
    pub const fn to_inner(self) -> DateTimeInner {
        let Self(inner) = self;
        inner
    }
}

impl AsRef<DateTimeInner> for DateTime {
    fn as_ref(&self) -> &DateTimeInner {
        &self.0
    }
}

impl Deref for DateTime {
    type Target = DateTimeInner;

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

impl From<DateTimeInner> for DateTime {
    fn from(from: DateTimeInner) -> Self {
        Self::new(from)
    }
}

impl From<DateTime> for DateTimeInner {
    fn from(from: DateTime) -> Self {
        from.to_inner()
    }
}

impl From<SystemTime> for DateTime {
    fn from(from: SystemTime) -> Self {
        Self::new(from.into())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(&Rfc3339).expect("valid timestamp"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.timestamp_millis())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        Ok(Self::from_timestamp_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_milliseconds() {
        let now = DateTime::now_utc();
        assert_eq!(
            now.timestamp_millis(),
            DateTime::from_timestamp_millis(now.timestamp_millis()).timestamp_millis()
        );
    }
}
