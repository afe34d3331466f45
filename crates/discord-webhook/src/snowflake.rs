//! Platform object identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 64-bit unsigned identifier assigned by the platform to every object.
///
/// The platform sends identifiers as decimal strings so that JavaScript
/// clients do not lose precision. Serialization always produces a string;
/// deserialization accepts both strings and plain numbers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(u64);

/// Milliseconds between the Unix epoch and the first second of 2015.
const PLATFORM_EPOCH_MS: i64 = 1_420_070_400_000;

impl Snowflake {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns whether this is the zero identifier, which the platform never assigns.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the creation time encoded in the upper 42 bits.
    pub fn created_at(self) -> Option<jiff::Timestamp> {
        let ms = (self.0 >> 22) as i64 + PLATFORM_EPOCH_MS;
        jiff::Timestamp::from_millisecond(ms).ok()
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            String(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(Self(id)),
            Repr::String(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
