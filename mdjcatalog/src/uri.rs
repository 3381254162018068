//! Canonical track identifiers
//!
//! Clients submit track references in whatever form their player hands
//! them: a `spotify:track:...` URI, a share URL with tracking parameters,
//! or a bare id. Everything downstream (deduplication, removal, cache
//! keying) compares identifiers only in the canonical `spotify:track:<id>`
//! form, so the conversion lives here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const URI_PREFIX: &str = "spotify:track:";

/// A track identifier in canonical form
///
/// Two `TrackUri` values are equal iff they denote the same track,
/// regardless of how the original reference was written.
///
/// # Examples
///
/// ```
/// use mdjcatalog::TrackUri;
///
/// let a: TrackUri = "spotify:track:4uLU6hMCjMI75M1A2tKUQC".parse().unwrap();
/// let b: TrackUri = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=xyz"
///     .parse()
///     .unwrap();
/// let c: TrackUri = "4uLU6hMCjMI75M1A2tKUQC".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b, c);
/// assert_eq!(a.to_string(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackUri {
    id: String,
}

impl TrackUri {
    /// Builds a canonical URI from any raw reference
    ///
    /// Accepted forms, tried in order:
    /// - `spotify:track:<id>`
    /// - any URL containing a `track/<id>` segment (query string stripped)
    /// - a bare id, taken as-is
    pub fn canonicalize(raw: &str) -> Self {
        Self {
            id: extract_track_id(raw).to_string(),
        }
    }

    /// Returns the bare track id (without the `spotify:track:` prefix)
    pub fn track_id(&self) -> &str {
        &self.id
    }

    /// Returns the canonical textual form
    pub fn as_uri(&self) -> String {
        format!("{URI_PREFIX}{}", self.id)
    }
}

/// Extracts the bare track id from a raw reference
fn extract_track_id(raw: &str) -> &str {
    let raw = raw.trim();
    if let Some(id) = raw.strip_prefix(URI_PREFIX) {
        return id;
    }
    if let Some(idx) = raw.find("track/") {
        let id = &raw[idx + "track/".len()..];
        return match id.find('?') {
            Some(q) => &id[..q],
            None => id,
        };
    }
    raw
}

impl fmt::Display for TrackUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_PREFIX}{}", self.id)
    }
}

impl FromStr for TrackUri {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::canonicalize(s))
    }
}

impl From<&str> for TrackUri {
    fn from(value: &str) -> Self {
        Self::canonicalize(value)
    }
}

impl Serialize for TrackUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_uri())
    }
}

impl<'de> Deserialize<'de> for TrackUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::canonicalize(&value))
    }
}
