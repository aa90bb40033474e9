//! Node identifiers.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// An entity usable as a triple subject or as a node-shaped object.
///
/// The canonical text form is `/type<id>`. Only the id takes part in sibling
/// ordering during traversal; the full form is used for triple ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    node_type: String,
    id: String,
}

impl Node {
    /// Create a node after validating both parts.
    pub fn new(node_type: impl Into<String>, id: impl Into<String>) -> Result<Self, ParseError> {
        let node_type = node_type.into();
        let id = id.into();

        let valid_type = node_type.len() > 1
            && node_type.starts_with('/')
            && !node_type
                .chars()
                .any(|c| c == '<' || c == '>' || c.is_whitespace() || c.is_control());
        let valid_id = !id.is_empty()
            && !id
                .chars()
                .any(|c| c == '<' || c == '>' || c == '\n' || c == '\r');

        if !valid_type || !valid_id {
            return Err(ParseError::node(format!("{}<{}>", node_type, id)));
        }

        Ok(Self { node_type, id })
    }

    /// Parse the canonical `/type<id>` form.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let inner = text
            .strip_suffix('>')
            .ok_or_else(|| ParseError::node(text))?;
        let (node_type, id) = inner
            .split_once('<')
            .ok_or_else(|| ParseError::node(text))?;
        Self::new(node_type, id)
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// The bare identifier, without the type prefix.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.node_type, self.id)
    }
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
