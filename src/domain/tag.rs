//! Tag type for org headline and file tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tag attached to a headline (`:tag:`) or declared in `#+FILETAGS:`.
///
/// Tags use org's tag alphabet: alphanumeric characters plus `_`, `@`, `#`,
/// and `%`. Tags are case-sensitive, matching org's behavior.
///
/// # Examples
///
/// ```
/// use loam::domain::Tag;
///
/// let tag = Tag::new("project").unwrap();
/// assert_eq!(tag.as_str(), "project");
/// assert!(Tag::new("has space").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a Tag from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty or contains characters
    /// outside org's tag alphabet.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '@' | '#' | '%'))
        {
            return Err(ParseTagError(format!(
                "invalid tag '{}': allowed characters are alphanumerics, '_', '@', '#', '%'",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
