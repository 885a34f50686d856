//! The integrity checker: an ordered list of rules over one graph.

use tracing::debug;

use crate::config::CheckerConfig;
use crate::model::{Graph, Report, Stats};
use crate::pipeline::rules::default_rules;
use crate::pipeline::{Findings, Rule};

/// Runs rules in order, each into its own accumulator, then concatenates
/// the accumulators in rule order.
///
/// With the `parallel` feature the rules of one graph are evaluated on the
/// rayon pool. Output order is the same either way.
pub struct IntegrityChecker {
    config: CheckerConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl IntegrityChecker {
    /// A checker with the built-in rules.
    pub fn new(config: CheckerConfig) -> Self {
        Self::with_rules(config, default_rules())
    }

    pub fn with_rules(config: CheckerConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Run every rule and return the merged findings.
    pub fn findings(&self, graph: &Graph) -> Findings {
        let per_rule = self.run_rules(graph);

        let mut merged = Findings::new();
        for (rule, f) in self.rules.iter().zip(per_rule) {
            debug!(
                rule = rule.id(),
                errors = f.errors.len(),
                warnings = f.warnings.len(),
                "rule evaluated"
            );
            merged.extend(f);
        }
        merged
    }

    /// Check a graph and build its report.
    pub fn check(&self, file: &str, graph: &Graph) -> Report {
        let f = self.findings(graph);
        Report::new(file, f.errors, f.warnings, Stats::from_graph(graph))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rules(&self, graph: &Graph) -> Vec<Findings> {
        self.rules.iter().map(|r| self.run_one(r.as_ref(), graph)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_rules(&self, graph: &Graph) -> Vec<Findings> {
        use rayon::prelude::*;
        self.rules
            .par_iter()
            .map(|r| self.run_one(r.as_ref(), graph))
            .collect()
    }

    fn run_one(&self, rule: &dyn Rule, graph: &Graph) -> Findings {
        let mut f = Findings::new();
        rule.check(graph, &self.config, &mut f);
        f
    }
}
