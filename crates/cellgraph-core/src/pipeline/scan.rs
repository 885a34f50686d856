//! Raw-text scan for deprecated stencil namespaces.
//!
//! Operates on the unparsed bytes, so it also runs for documents the parser
//! rejects. Matches are advisory and only ever produce warnings.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// A deprecated lexical pattern and its recommended replacement.
pub struct DeprecatedPattern {
    /// Family named in the warning, e.g. `Azure`.
    pub family: &'static str,
    pub name: &'static str,
    pub regex: Regex,
    pub replacement: &'static str,
    pub reason: &'static str,
}

impl DeprecatedPattern {
    pub fn warning(&self) -> String {
        format!(
            "Deprecated {} format detected: '{}' Use '{}' instead {}",
            self.family,
            self.name,
            self.replacement,
            self.reason
        )
    }
}

/// `mxgraph.azure` not followed by the `2` of the current `azure2` library.
pub static DEPRECATED_PATTERNS: Lazy<Vec<DeprecatedPattern>> = Lazy::new(|| {
    vec![DeprecatedPattern {
        family: "Azure",
        name: "mxgraph.azure.*",
        regex: Regex::new(r"mxgraph\.azure[^2]").expect("built-in pattern compiles"),
        replacement: "img/lib/azure2/**/*.svg",
        reason: "for VS Code compatibility",
    }]
});

/// One warning per deprecated pattern found anywhere in `bytes`.
pub fn scan_deprecated_patterns(bytes: &[u8]) -> Vec<String> {
    DEPRECATED_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(bytes))
        .map(DeprecatedPattern::warning)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_patterns_compile() {
        assert!(!DEPRECATED_PATTERNS.is_empty());
        for p in DEPRECATED_PATTERNS.iter() {
            assert!(!p.regex.as_str().is_empty(), "{}", p.name);
        }
    }

    #[test]
    fn legacy_azure_namespace_warns_once() {
        let text = br#"<mxCell style="shape=mxgraph.azure.vm;"/><mxCell style="shape=mxgraph.azure.sql;"/>"#;
        let w = scan_deprecated_patterns(text);
        assert_eq!(
            w,
            vec!["Deprecated Azure format detected: 'mxgraph.azure.*' Use 'img/lib/azure2/**/*.svg' instead for VS Code compatibility"]
        );
    }

    #[test]
    fn current_library_is_not_flagged() {
        let text = br#"<mxCell style="image=img/lib/azure2/compute/VM.svg;shape=mxgraph.azure2.vm"/>"#;
        assert!(scan_deprecated_patterns(text).is_empty());
    }

    #[test]
    fn works_on_unparseable_text() {
        assert_eq!(scan_deprecated_patterns(b"<a mxgraph.azure.x").len(), 1);
    }

    #[test]
    fn prefix_at_end_of_input_is_not_a_match() {
        assert!(scan_deprecated_patterns(b"shape=mxgraph.azure").is_empty());
    }
}
