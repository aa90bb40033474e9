//! Typed literal values and the builder used to parse them.

use std::fmt;

use crate::errors::ParseError;

const TYPE_MARKER: &str = "\"^^type:";

/// A literal object value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Literal {
    /// Build a text literal.
    ///
    /// Line breaks are rejected because a triple must fit on a single line of
    /// the serialized form.
    pub fn text(value: impl Into<String>) -> Result<Self, ParseError> {
        let value = value.into();
        if value.contains(['\n', '\r']) {
            return Err(ParseError::literal(format!(
                "\"{}\"^^type:text",
                value.escape_default()
            )));
        }
        Ok(Literal::Text(value))
    }

    /// The type tag used in the canonical text form.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Int64(_) => "int64",
            Literal::Float64(_) => "float64",
            Literal::Text(_) => "text",
            Literal::Blob(_) => "blob",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(v) => write!(f, "\"{}\"", v)?,
            Literal::Int64(v) => write!(f, "\"{}\"", v)?,
            Literal::Float64(v) => write!(f, "\"{}\"", v)?,
            Literal::Text(v) => write!(f, "\"{}\"", v)?,
            Literal::Blob(bytes) => {
                let parts: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
                write!(f, "\"[{}]\"", parts.join(" "))?
            }
        }
        write!(f, "^^type:{}", self.kind())
    }
}

/// Builds literals from their text form.
///
/// The default builder accepts values of any size. A bounded builder rejects
/// text and blob values whose decoded length exceeds the bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralBuilder {
    max_len: Option<usize>,
}

impl LiteralBuilder {
    pub fn bounded(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
        }
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Parse the canonical `"value"^^type:kind` form.
    pub fn parse(&self, text: &str) -> Result<Literal, ParseError> {
        let text = text.trim();
        let marker = text
            .rfind(TYPE_MARKER)
            .filter(|_| text.starts_with('"'))
            .ok_or_else(|| ParseError::literal(text))?;
        let value = text.get(1..marker).ok_or_else(|| ParseError::literal(text))?;
        let kind = &text[marker + TYPE_MARKER.len()..];

        let invalid = || ParseError::literal(text);
        let literal = match kind {
            "bool" => Literal::Bool(value.parse().map_err(|_| invalid())?),
            "int64" => Literal::Int64(value.parse().map_err(|_| invalid())?),
            "float64" => Literal::Float64(value.parse().map_err(|_| invalid())?),
            "text" => Literal::text(value).map_err(|_| invalid())?,
            "blob" => Literal::Blob(parse_blob(value).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        self.check_len(&literal)?;
        Ok(literal)
    }

    fn check_len(&self, literal: &Literal) -> Result<(), ParseError> {
        let len = match literal {
            Literal::Text(v) => v.len(),
            Literal::Blob(v) => v.len(),
            _ => return Ok(()),
        };
        match self.max_len {
            Some(max) if len > max => Err(ParseError::LiteralTooLong { len, max }),
            _ => Ok(()),
        }
    }
}

/// Parse a `[1 2 3]` byte list.
fn parse_blob(value: &str) -> Option<Vec<u8>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    inner
        .split_whitespace()
        .map(|b| b.parse::<u8>().ok())
        .collect()
}
