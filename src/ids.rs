use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque key a secret is stored under, backed by ULID.
///
/// The string form is the 26-character Crockford base32 encoding, which is URL safe
/// and goes straight into `/?key=<key>`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SecretKey(pub ulid::Ulid);

impl SecretKey {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Parse a key taken from a query string; `None` when it is not a valid key.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        value.and_then(|s| s.parse::<SecretKey>().ok())
    }
}

impl Default for SecretKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SecretKey {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SecretKey(ulid::Ulid::from_string(s)?))
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<SecretKey>()
            .map_err(|_| serde::de::Error::custom("invalid secret key"))
    }
}
