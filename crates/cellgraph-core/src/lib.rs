//! cellgraph-core
//!
//! Core primitives for cellgraph:
//! - the draw.io cell graph model (cells, id index)
//! - a well-formedness parser from document bytes to a graph
//! - ordered, independent integrity rules producing a fixed-shape report
//! - a raw-text scanner for deprecated stencil namespaces
//! - aggregation of per-file reports into one verdict
//!
//! The core crate performs no filesystem or network I/O. Callers read bytes
//! and pass them in as [`SourceDocument`]s.

pub mod config;
pub mod errors;
pub mod model;
pub mod pipeline;

pub use crate::errors::{CellGraphError, CellGraphResult};
pub use crate::model::{Cell, Graph, Report, Stats};
pub use crate::pipeline::aggregate::{aggregate, Verdict};
pub use crate::pipeline::validate::{validate_batch, validate_document, SourceDocument};

/// Default configuration values.
pub mod defaults {
    /// Id of the document root cell.
    pub const DOCUMENT_ROOT_ID: &str = "0";
    /// Id of the default layer cell.
    pub const LAYER_ROOT_ID: &str = "1";
    /// Stats placeholder for documents that do not declare a generator.
    pub const GENERATOR_NOT_SET: &str = "(not set)";
    /// Largest document accepted by the parser (64 MiB).
    pub const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{validate_config, CheckerConfig, ParseLimits, RootIds};
    pub use crate::model::{Cell, Graph, Report, Stats};
    pub use crate::pipeline::aggregate::{aggregate, Verdict};
    pub use crate::pipeline::checker::IntegrityChecker;
    pub use crate::pipeline::parse::parse_document;
    pub use crate::pipeline::rules::default_rules;
    pub use crate::pipeline::scan::scan_deprecated_patterns;
    pub use crate::pipeline::validate::{validate_batch, validate_document, SourceDocument};
    pub use crate::pipeline::{Findings, Rule};
    pub use crate::{CellGraphError, CellGraphResult};
}
