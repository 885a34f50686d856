//! Per-document validation report.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::defaults;
use crate::model::Graph;

/// Counted population of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Stats {
    /// Declared generator, or `(not set)`.
    pub generator: String,
    pub total_cells: usize,
    pub vertices: usize,
    pub edges: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            generator: defaults::GENERATOR_NOT_SET.to_string(),
            total_cells: 0,
            vertices: 0,
            edges: 0,
        }
    }
}

impl Stats {
    pub fn from_graph(graph: &Graph) -> Self {
        let generator = match graph.generator() {
            Some(g) if !g.is_empty() => g.to_string(),
            _ => defaults::GENERATOR_NOT_SET.to_string(),
        };
        Self {
            generator,
            total_cells: graph.len(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Result of checking one document.
///
/// A report is valid iff it carries no errors. Warnings are informational.
/// Construction is the only way to set fields; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    file: String,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    stats: Stats,
}

impl Report {
    pub fn new(file: impl Into<String>, errors: Vec<String>, warnings: Vec<String>, stats: Stats) -> Self {
        Self {
            file: file.into(),
            valid: errors.is_empty(),
            errors,
            warnings,
            stats,
        }
    }

    /// Report for a document that could not be parsed: one error, default stats.
    pub fn parse_failure(file: impl Into<String>, reason: impl std::fmt::Display, warnings: Vec<String>) -> Self {
        Self::new(
            file,
            vec![format!("XML parse error: {reason}")],
            warnings,
            Stats::default(),
        )
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
