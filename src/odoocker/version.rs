// Odoo version as given by the caller, plus its parsed (major, minor) pair.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct OdooVersion {
    // Kept as received so "15.0" stays a string and 15 stays a number.
    raw: Value,
    major: u32,
    minor: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Int(u64),
    Float(f64),
}

impl OdooVersion {
    pub fn parse(text: &str) -> Result<Self> {
        let (major, minor) = parse_pair(text)?;
        Ok(Self {
            raw: Value::String(text.to_string()),
            major,
            minor,
        })
    }

    fn from_raw(raw: RawVersion) -> Result<Self> {
        match raw {
            RawVersion::Text(text) => Self::parse(&text),
            RawVersion::Int(n) => {
                let major = u32::try_from(n).map_err(|_| Error::InvalidVersion {
                    raw: n.to_string(),
                })?;
                Ok(Self {
                    raw: Value::from(n),
                    major,
                    minor: 0,
                })
            }
            RawVersion::Float(f) => {
                let raw = Value::from(f);
                if raw.is_null() {
                    return Err(Error::InvalidVersion { raw: f.to_string() });
                }
                let (major, minor) = parse_pair(&raw.to_string())?;
                Ok(Self { raw, major, minor })
            }
        }
    }

    #[cfg(test)]
    pub fn major(&self) -> u32 {
        self.major
    }

    #[cfg(test)]
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// True when the version is lower or equal to `major.0`.
    pub fn at_most(&self, major: u32) -> bool {
        (self.major, self.minor) <= (major, 0)
    }

    /// True when the version is strictly lower than `major.0`.
    pub fn below(&self, major: u32) -> bool {
        self.major < major
    }
}

fn parse_pair(text: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidVersion {
        raw: text.to_string(),
    };
    let trimmed = text.trim();
    let (major, minor) = match trimmed.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (trimmed, "0"),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(major) || !digits(minor) {
        return Err(invalid());
    }
    let major = major.parse().map_err(|_| invalid())?;
    let minor = minor.parse().map_err(|_| invalid())?;
    Ok((major, minor))
}

impl fmt::Display for OdooVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl PartialEq for OdooVersion {
    fn eq(&self, other: &Self) -> bool {
        (self.major, self.minor) == (other.major, other.minor)
    }
}

impl Eq for OdooVersion {}

impl PartialOrd for OdooVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OdooVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl Serialize for OdooVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OdooVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawVersion::deserialize(deserializer)?;
        OdooVersion::from_raw(raw).map_err(serde::de::Error::custom)
    }
}
