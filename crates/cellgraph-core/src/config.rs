//! Configuration structures for cellgraph-core.
//!
//! Configuration is explicit and passed by value into the parser and the
//! checker. The core crate itself does not read environment variables or
//! files; the CLI builds a [`CheckerConfig`] from its flags.

use crate::defaults;
use crate::errors::{CellGraphError, CellGraphResult};

/// Global configuration container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub roots: RootIds,
    pub limits: ParseLimits,
    /// Run the raw-text deprecated pattern scan.
    pub scan_deprecated_patterns: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            roots: RootIds::default(),
            limits: ParseLimits::default(),
            scan_deprecated_patterns: true,
        }
    }
}

/// Ids of the two mandatory root cells.
///
/// draw.io uses `"0"` for the document root and `"1"` for the default layer.
/// Format variants with other conventions pass their own ids here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootIds {
    pub document: String,
    pub layer: String,
}

impl Default for RootIds {
    fn default() -> Self {
        Self {
            document: defaults::DOCUMENT_ROOT_ID.to_string(),
            layer: defaults::LAYER_ROOT_ID.to_string(),
        }
    }
}

impl RootIds {
    pub fn new(document: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            layer: layer.into(),
        }
    }

    /// Number of root cells every document must contain.
    pub fn count(&self) -> usize {
        2
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.document.as_str(), self.layer.as_str()].into_iter()
    }
}

/// Parser resource limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_document_bytes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: defaults::MAX_DOCUMENT_BYTES,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CheckerConfig) -> CellGraphResult<()> {
    if cfg.roots.document.trim().is_empty() || cfg.roots.layer.trim().is_empty() {
        return Err(CellGraphError::invalid_config("root ids must not be empty"));
    }

    if cfg.roots.document == cfg.roots.layer {
        return Err(CellGraphError::invalid_config(format!(
            "document and layer root ids must differ (both are '{}')",
            cfg.roots.document
        )));
    }

    if cfg.limits.max_document_bytes == 0 {
        return Err(CellGraphError::invalid_config(
            "max_document_bytes must be greater than zero",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_config_is_valid() {
        let cfg = CheckerConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.roots.iter().collect::<Vec<_>>(), vec!["0", "1"]);
    }

    #[test]
    fn identical_roots_detected() {
        let mut cfg = CheckerConfig::default();
        cfg.roots = RootIds::new("root", "root");
        assert_matches!(validate_config(&cfg), Err(CellGraphError::InvalidConfig(_)));
    }

    #[test]
    fn empty_root_detected() {
        let mut cfg = CheckerConfig::default();
        cfg.roots.layer = " ".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn zero_limit_detected() {
        let mut cfg = CheckerConfig::default();
        cfg.limits.max_document_bytes = 0;
        assert!(validate_config(&cfg).is_err());
    }
}
