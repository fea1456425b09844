//! Domain identifier types with validation

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Camp identifier newtype wrapper
///
/// The API hands out numeric identifiers, but they only ever travel inside
/// URL paths and report cells, so they are kept as text. Input lists may
/// spell them either as a JSON/TOML number or as a string.
///
/// # Examples
///
/// ```
/// use campdoc::domain::ids::CampId;
/// use std::str::FromStr;
///
/// let camp_id = CampId::from_str("42").unwrap();
/// assert_eq!(camp_id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CampId(String);

impl CampId {
    /// Creates a new CampId from a string
    ///
    /// Returns `Err` for an empty identifier or one containing a path separator.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Camp ID cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('?') {
            return Err(format!("Camp ID cannot contain '/' or '?': {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the camp ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CampId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CampId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CampId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CampId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        };
        CampId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camp_id_valid() {
        let id = CampId::new("  1234 ").unwrap();
        assert_eq!(id.as_str(), "1234");
        assert_eq!(id.to_string(), "1234");
    }

    #[test]
    fn test_camp_id_rejects_empty_and_paths() {
        assert!(CampId::new("").is_err());
        assert!(CampId::new("   ").is_err());
        assert!(CampId::new("12/34").is_err());
        assert!(CampId::new("12?module=X").is_err());
    }

    #[test]
    fn test_camp_id_deserializes_number_or_string() {
        let from_number: CampId = serde_json::from_str("42").unwrap();
        let from_text: CampId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }
}
