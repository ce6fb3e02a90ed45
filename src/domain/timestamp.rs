//! Millisecond-precision UTC timestamp value

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Canonical text form: `YYYY-MM-DDTHH:mm:ss.sssZ`
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A point in time truncated to milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap an existing instant, dropping sub-millisecond precision
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(3))
    }

    /// Parse RFC 3339 text (any offset) or a bare `YYYY-MM-DD` date at UTC midnight.
    ///
    /// Empty or blank text is rejected rather than mapped to the epoch.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_timestamp(text));
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_datetime(parsed.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self::from_datetime(naive.and_utc()))
            .ok_or_else(|| DomainError::invalid_timestamp(text))
    }

    /// Canonical serialization, stable for a given instant
    pub fn to_text(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Timestamp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_text()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}
