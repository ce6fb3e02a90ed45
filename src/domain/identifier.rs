//! Lexicographically sortable entity identifiers (ULID)

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ulid::Generator;

use super::error::DomainError;

/// Crockford Base32, 26 characters, accepted in either case
static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[0-9A-HJKMNP-TV-Z]{26}$").unwrap());

/// Length of every identifier in text form
pub const ID_LENGTH: usize = 26;

/// Validated entity identifier, stored in canonical uppercase form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse identifier text, rejecting anything that is not 26 Crockford Base32 characters
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        if text.len() != ID_LENGTH || !ID_PATTERN.is_match(text) {
            return Err(DomainError::invalid_identifier(text));
        }

        Ok(Self(text.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Monotonic identifier source.
///
/// Identifiers from one generator are strictly increasing, including calls
/// that land in the same millisecond (the previous value's random tail is
/// incremented). Uniqueness across separate generators relies on randomness.
pub struct IdGenerator {
    inner: Mutex<Generator>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Generator::new()),
        }
    }

    /// Produce the next identifier
    pub fn generate(&self) -> EntityId {
        let mut generator = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            match generator.generate() {
                Ok(ulid) => return EntityId(ulid.to_string()),
                // Random tail exhausted for this millisecond; wait for the clock to move.
                Err(_) => std::thread::yield_now(),
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
