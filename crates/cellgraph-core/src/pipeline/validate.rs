//! Document and batch validation.
//!
//! `Unparsed -> Parsed -> Checked -> Reported`, or straight from `Unparsed` to
//! an invalid report when parsing fails. Failures never leave one document:
//! every outcome is a [`Report`] value.

use tracing::debug;

use crate::model::{Report, Stats};
use crate::pipeline::checker::IntegrityChecker;
use crate::pipeline::parse::parse_document;
use crate::pipeline::scan::scan_deprecated_patterns;

/// Raw bytes of one document plus the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Parse, check and scan one document.
///
/// Pattern-scan warnings follow the rule warnings, and are kept even when
/// the document fails to parse.
pub fn validate_document(doc: &SourceDocument, checker: &IntegrityChecker) -> Report {
    let cfg = checker.config();
    let scan_warnings = if cfg.scan_deprecated_patterns {
        scan_deprecated_patterns(&doc.bytes)
    } else {
        Vec::new()
    };

    let graph = match parse_document(&doc.bytes, &cfg.limits) {
        Ok(graph) => graph,
        Err(err) => {
            debug!(file = %doc.name, error = %err, "parse failure");
            return Report::parse_failure(&doc.name, err, scan_warnings);
        }
    };

    let mut findings = checker.findings(&graph);
    findings.warnings.extend(scan_warnings);

    let report = Report::new(
        &doc.name,
        findings.errors,
        findings.warnings,
        Stats::from_graph(&graph),
    );
    debug!(
        file = %doc.name,
        valid = report.is_valid(),
        errors = report.errors().len(),
        warnings = report.warnings().len(),
        "document checked"
    );
    report
}

/// Validate every document; reports come back in input order.
///
/// With the `parallel` feature documents are checked on the rayon pool.
pub fn validate_batch(docs: &[SourceDocument], checker: &IntegrityChecker) -> Vec<Report> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        docs.par_iter().map(|d| validate_document(d, checker)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        docs.iter().map(|d| validate_document(d, checker)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;

    const AZURE_BROKEN: &str = r#"<mxfile><mxCell style="shape=mxgraph.azure.vm;"></mxfile>"#;

    #[test]
    fn parse_failure_keeps_scan_warnings() {
        let doc = SourceDocument::new("broken.drawio", AZURE_BROKEN);
        let r = validate_document(&doc, &IntegrityChecker::default());
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
        assert!(r.errors()[0].starts_with("XML parse error: "));
        assert_eq!(r.warnings().len(), 1);
        assert!(r.warnings()[0].contains("mxgraph.azure.*"));
    }

    #[test]
    fn scan_can_be_disabled() {
        let cfg = CheckerConfig {
            scan_deprecated_patterns: false,
            ..CheckerConfig::default()
        };
        let doc = SourceDocument::new("broken.drawio", AZURE_BROKEN);
        let r = validate_document(&doc, &IntegrityChecker::new(cfg));
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn scan_warnings_follow_rule_warnings() {
        let doc = SourceDocument::new(
            "a.drawio",
            r#"<mxfile><root><mxCell id="0"/><mxCell id="1"/><mxCell id="2" vertex="1" style="shape=mxgraph.azure.vm"/></root></mxfile>"#,
        );
        let r = validate_document(&doc, &IntegrityChecker::default());
        assert!(r.is_valid());
        assert_eq!(r.warnings().len(), 3);
        assert_eq!(r.warnings()[0], "generator attribute not set in mxfile");
        assert_eq!(r.warnings()[1], "mxCell '2' missing mxGeometry");
        assert!(r.warnings()[2].starts_with("Deprecated Azure format detected"));
    }

    #[test]
    fn batch_preserves_order_and_isolation() {
        let docs = vec![
            SourceDocument::new("bad.drawio", "<mxfile>"),
            SourceDocument::new(
                "good.drawio",
                r#"<mxfile generator="t"><mxCell id="0"/><mxCell id="1"/></mxfile>"#,
            ),
        ];
        let reports = validate_batch(&docs, &IntegrityChecker::default());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file(), "bad.drawio");
        assert!(!reports[0].is_valid());
        assert_eq!(reports[1].file(), "good.drawio");
        assert!(reports[1].is_valid());
    }
}
