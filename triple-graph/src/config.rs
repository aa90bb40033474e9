//! Configuration types for graph operations.

use std::env;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::triple::LiteralBuilder;

const MAX_DEPTH_VAR: &str = "TRIPLE_GRAPH_MAX_DEPTH";
const SCAN_BUFFER_VAR: &str = "TRIPLE_GRAPH_SCAN_BUFFER";
const MAX_LITERAL_LEN_VAR: &str = "TRIPLE_GRAPH_MAX_LITERAL_LEN";

const DEFAULT_SCAN_BUFFER: usize = 100;

/// Configuration for a `Graph`.
///
/// Controls how deep traversals may go, how many triples a full scan buffers
/// between the store and the collecting side, and which literal builder is
/// used when parsing serialized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Maximum traversal depth relative to the start depth.
    ///
    /// `None` walks the whole tree.
    pub max_depth: Option<usize>,

    /// Capacity of the channel used to collect a full scan. Minimum 1.
    pub scan_buffer: usize,

    /// Maximum byte length of text and blob literals when parsing.
    ///
    /// `None` accepts literals of any size.
    pub max_literal_len: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            scan_buffer: DEFAULT_SCAN_BUFFER,
            max_literal_len: None,
        }
    }
}

impl GraphConfig {
    /// Read configuration from environment variables.
    ///
    /// Unset variables keep their defaults. Set but malformed variables are
    /// reported rather than ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_depth: read_var(MAX_DEPTH_VAR)?,
            scan_buffer: read_var(SCAN_BUFFER_VAR)?
                .unwrap_or(defaults.scan_buffer)
                .max(1),
            max_literal_len: read_var(MAX_LITERAL_LEN_VAR)?,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_scan_buffer(mut self, scan_buffer: usize) -> Self {
        self.scan_buffer = scan_buffer.max(1);
        self
    }

    pub fn with_max_literal_len(mut self, max_literal_len: usize) -> Self {
        self.max_literal_len = Some(max_literal_len);
        self
    }

    /// The literal builder matching `max_literal_len`.
    pub fn literal_builder(&self) -> LiteralBuilder {
        match self.max_literal_len {
            Some(max) => LiteralBuilder::bounded(max),
            None => LiteralBuilder::default(),
        }
    }
}

fn read_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
