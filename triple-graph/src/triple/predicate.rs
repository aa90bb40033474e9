//! Predicates, immutable or anchored in time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::ParseError;

/// Identifier of the relation that builds the tree walked by depth-first
/// traversal.
pub const PARENT_OF: &str = "parent_of";

/// The relation identifier of a triple.
///
/// Immutable predicates render as `"id"@[]`, temporal ones carry their anchor
/// inside the brackets as an RFC 3339 timestamp with nanosecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    id: String,
    anchor: Option<DateTime<Utc>>,
}

impl Predicate {
    pub fn immutable(id: impl Into<String>) -> Result<Self, ParseError> {
        let id = validate_id(id.into())?;
        Ok(Self { id, anchor: None })
    }

    pub fn temporal(id: impl Into<String>, anchor: DateTime<Utc>) -> Result<Self, ParseError> {
        let id = validate_id(id.into())?;
        Ok(Self {
            id,
            anchor: Some(anchor),
        })
    }

    /// The immutable `parent_of` predicate shared by every traversal.
    pub fn parent_of() -> Self {
        Self {
            id: PARENT_OF.to_string(),
            anchor: None,
        }
    }

    /// Parse the canonical `"id"@[anchor]` form.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let body = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| ParseError::predicate(text))?;
        let (id, anchor) = body
            .split_once("\"@[")
            .ok_or_else(|| ParseError::predicate(text))?;

        if anchor.is_empty() {
            return Self::immutable(id);
        }

        let anchor = DateTime::parse_from_rfc3339(anchor)
            .map_err(|e| ParseError::InvalidAnchor {
                anchor: anchor.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);
        Self::temporal(id, anchor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn anchor(&self) -> Option<&DateTime<Utc>> {
        self.anchor.as_ref()
    }

    pub fn is_temporal(&self) -> bool {
        self.anchor.is_some()
    }
}

fn validate_id(id: String) -> Result<String, ParseError> {
    if id.is_empty() || id.chars().any(|c| c == '"' || c.is_control()) {
        return Err(ParseError::predicate(id));
    }
    Ok(id)
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(
                f,
                "\"{}\"@[{}]",
                self.id,
                anchor.to_rfc3339_opts(SecondsFormat::Nanos, true)
            ),
            None => write!(f, "\"{}\"@[]", self.id),
        }
    }
}

impl FromStr for Predicate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
