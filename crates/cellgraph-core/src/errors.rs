//! Error types for cellgraph-core.
//!
//! Only two things can fail in the core: turning bytes into a graph, and
//! accepting a configuration. Structural problems inside a well-formed
//! document are never errors here; they are reported as values in a
//! [`crate::Report`].

use thiserror::Error;

pub type CellGraphResult<T> = Result<T, CellGraphError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellGraphError {
    /// The document is not well-formed XML.
    #[error("{message} (at byte {position})")]
    Parse { message: String, position: u64 },

    /// The document exceeds the configured size limit.
    #[error("document too large ({size} bytes > limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// A configuration value was rejected by `validate_config`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CellGraphError {
    pub fn parse(message: impl Into<String>, position: u64) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// True for the failures that make a single document unparseable.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::TooLarge { .. })
    }
}
