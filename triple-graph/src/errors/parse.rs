use thiserror::Error;

/// Errors raised while turning a line of text into a triple.
///
/// Every variant carries the offending text so a failing line in a large
/// file can be located without re-reading it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("Invalid temporal anchor {anchor}: {reason}")]
    InvalidAnchor { anchor: String, reason: String },

    #[error("Literal of {len} bytes exceeds maximum {max}")]
    LiteralTooLong { len: usize, max: usize },

    #[error("Invalid triple: {0}")]
    InvalidTriple(String),
}

impl ParseError {
    pub fn node(text: impl Into<String>) -> Self {
        Self::InvalidNode(text.into())
    }

    pub fn predicate(text: impl Into<String>) -> Self {
        Self::InvalidPredicate(text.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::InvalidLiteral(text.into())
    }

    pub fn triple(text: impl Into<String>) -> Self {
        Self::InvalidTriple(text.into())
    }
}
