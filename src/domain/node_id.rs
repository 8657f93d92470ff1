//! Node identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identifier of a node, taken from an `:ID:` property.
///
/// Identifiers are opaque: any non-empty string without internal whitespace
/// or square brackets is accepted, so UUIDs, ULIDs, and hand-written ids all
/// work. Whitespace is forbidden because ids travel inside `[[id:...]]` link
/// targets; brackets would break the link syntax itself.
///
/// # Examples
///
/// ```
/// use loam::domain::NodeId;
///
/// let id = NodeId::new("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
/// assert_eq!(id.as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
/// assert!(NodeId::new("has space").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone)]
pub struct ParseNodeIdError(String);

impl fmt::Display for ParseNodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseNodeIdError {}

impl NodeId {
    /// Creates a NodeId from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseNodeIdError` if the id is empty, contains internal
    /// whitespace, or contains square brackets.
    pub fn new(s: &str) -> Result<Self, ParseNodeIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseNodeIdError("node id cannot be empty".to_string()));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ParseNodeIdError(format!(
                "invalid node id '{}': whitespace is not allowed",
                trimmed
            )));
        }

        if trimmed.contains(['[', ']']) {
            return Err(ParseNodeIdError(format!(
                "invalid node id '{}': square brackets are not allowed",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId(\"{}\")", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
