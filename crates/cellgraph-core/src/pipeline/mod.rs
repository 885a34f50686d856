//! Validation pipeline primitives for cellgraph.
//!
//! A document moves through a short, linear pipeline:
//! - bytes are parsed into a [`crate::Graph`] (`parse`)
//! - an ordered list of independent [`Rule`]s reads the graph (`rules`,
//!   driven by `checker`)
//! - the raw bytes are scanned for deprecated patterns (`scan`)
//! - findings become an immutable [`crate::Report`] (`validate`)
//! - reports of a batch reduce to one verdict (`aggregate`)
//!
//! A parse failure skips the rules and goes straight to an invalid report.

use crate::config::CheckerConfig;
use crate::model::Graph;

pub mod aggregate;
pub mod checker;
pub mod parse;
pub mod rules;
pub mod scan;
pub mod validate;

/// Error and warning messages collected by one or more rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Append another accumulator, keeping its order after ours.
    pub fn extend(&mut self, other: Findings) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A single integrity rule.
///
/// Rules are stateless and independent: each reads the same immutable graph
/// and writes only to the accumulator it is handed. A rule never stops the
/// rules after it.
pub trait Rule: Send + Sync {
    /// Stable dot-delimited identifier, e.g. `cell.id.duplicate`.
    fn id(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    fn check(&self, graph: &Graph, cfg: &CheckerConfig, findings: &mut Findings);
}
