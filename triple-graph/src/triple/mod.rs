//! Triple data model
//!
//! This module contains the fact types stored in a graph:
//! - `Node`: an entity identifier, `/type<id>`
//! - `Predicate`: a relation identifier, `"id"@[]` or `"id"@[anchor]`
//! - `Literal`: a typed value, `"value"^^type:kind`
//! - `Triple`: a subject, predicate and object joined by tabs
//!
//! Triples compare, hash and sort by their canonical text form, which is also
//! the line format used by graph serialization.

mod literal;
mod node;
mod predicate;

pub use literal::{Literal, LiteralBuilder};
pub use node::Node;
pub use predicate::{Predicate, PARENT_OF};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::errors::ParseError;

/// The object of a triple.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Node(Node),
    Predicate(Predicate),
    Literal(Literal),
}

impl Object {
    /// Returns the node if this object is node-shaped.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Object::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Node(node) => node.fmt(f),
            Object::Predicate(predicate) => predicate.fmt(f),
            Object::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        Object::Node(node)
    }
}

impl From<Predicate> for Object {
    fn from(predicate: Predicate) -> Self {
        Object::Predicate(predicate)
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

/// An immutable (subject, predicate, object) fact.
///
/// The canonical text is computed once at construction; equality, hashing
/// and ordering all go through it.
#[derive(Debug, Clone)]
pub struct Triple {
    subject: Node,
    predicate: Predicate,
    object: Object,
    canonical: String,
}

impl Triple {
    pub fn new(subject: Node, predicate: Predicate, object: impl Into<Object>) -> Self {
        let object = object.into();
        let canonical = format!("{}\t{}\t{}", subject, predicate, object);
        Self {
            subject,
            predicate,
            object,
            canonical,
        }
    }

    /// Parse a single line with the given literal builder.
    ///
    /// Surrounding whitespace is ignored and components may be separated by
    /// any run of whitespace.
    pub fn parse(line: &str, builder: &LiteralBuilder) -> Result<Self, ParseError> {
        let text = line.trim();

        let subject_end = text
            .find('>')
            .ok_or_else(|| ParseError::triple(text))?;
        let (subject, rest) = text.split_at(subject_end + 1);
        if !rest.starts_with(char::is_whitespace) {
            return Err(ParseError::triple(text));
        }
        let subject = Node::parse(subject)?;

        let rest = rest.trim_start();
        let predicate_end = rest
            .find("\"@[")
            .and_then(|start| rest[start..].find(']').map(|end| start + end))
            .ok_or_else(|| ParseError::triple(text))?;
        let (predicate, rest) = rest.split_at(predicate_end + 1);
        if !rest.starts_with(char::is_whitespace) {
            return Err(ParseError::triple(text));
        }
        let predicate = Predicate::parse(predicate)?;

        let object = parse_object(rest.trim(), builder)?;

        Ok(Self::new(subject, predicate, object))
    }

    pub fn subject(&self) -> &Node {
        &self.subject
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    /// The canonical text form, identical to `to_string()`.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

fn parse_object(text: &str, builder: &LiteralBuilder) -> Result<Object, ParseError> {
    if text.starts_with('/') {
        return Node::parse(text).map(Object::Node);
    }
    if text.starts_with('"') && text.ends_with(']') && text.contains("\"@[") {
        return Predicate::parse(text).map(Object::Predicate);
    }
    if text.starts_with('"') {
        return builder.parse(text).map(Object::Literal);
    }
    Err(ParseError::triple(text))
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Triple {}

impl Hash for Triple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Triple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Triple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl FromStr for Triple {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &LiteralBuilder::default())
    }
}
