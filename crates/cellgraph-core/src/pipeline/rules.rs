//! Built-in integrity rules.
//!
//! [`default_rules`] returns them in evaluation order. Only the duplicate-id,
//! root-cell and edge-reference rules emit errors; the rest are advisory.

use tracing::debug;

use crate::config::CheckerConfig;
use crate::model::Graph;
use crate::pipeline::{Findings, Rule};

/// The built-in rule list, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(GeneratorRule),
        Box::new(DuplicateIdRule),
        Box::new(RootCellRule),
        Box::new(EdgeReferenceRule),
        Box::new(CompletenessRule),
        Box::new(GeometryRule),
    ]
}

/// Warns when the document root declares no generator.
pub struct GeneratorRule;

impl Rule for GeneratorRule {
    fn id(&self) -> &'static str {
        "document.generator"
    }

    fn description(&self) -> &'static str {
        "mxfile declares a generator attribute (warning)"
    }

    fn check(&self, graph: &Graph, _cfg: &CheckerConfig, findings: &mut Findings) {
        if graph.generator().map_or(true, str::is_empty) {
            findings.push_warning("generator attribute not set in mxfile");
        }
    }
}

/// One error per id that occurs more than once.
pub struct DuplicateIdRule;

impl Rule for DuplicateIdRule {
    fn id(&self) -> &'static str {
        "cell.id.duplicate"
    }

    fn description(&self) -> &'static str {
        "cell ids are pairwise distinct"
    }

    fn check(&self, graph: &Graph, _cfg: &CheckerConfig, findings: &mut Findings) {
        for (id, count) in graph.id_counts() {
            if count > 1 {
                debug!(rule = self.id(), id, count, "duplicate cell id");
                findings.push_error(format!("Duplicate cell ID '{id}' ({count} occurrences)"));
            }
        }
    }
}

/// Both root cells are present.
pub struct RootCellRule;

impl Rule for RootCellRule {
    fn id(&self) -> &'static str {
        "cell.root"
    }

    fn description(&self) -> &'static str {
        "document root and default layer cells exist"
    }

    fn check(&self, graph: &Graph, cfg: &CheckerConfig, findings: &mut Findings) {
        for root in cfg.roots.iter() {
            if !graph.contains_id(root) {
                findings.push_error(format!("Missing root mxCell id='{root}'"));
            }
        }
    }
}

/// Edge endpoints resolve to existing cells.
pub struct EdgeReferenceRule;

impl Rule for EdgeReferenceRule {
    fn id(&self) -> &'static str {
        "edge.reference"
    }

    fn description(&self) -> &'static str {
        "edge source/target ids resolve to existing cells"
    }

    fn check(&self, graph: &Graph, _cfg: &CheckerConfig, findings: &mut Findings) {
        for edge in graph.edges() {
            for (end, reference) in [("source", &edge.source), ("target", &edge.target)] {
                let Some(reference) = reference.as_deref() else {
                    continue;
                };
                if !graph.contains_id(reference) {
                    findings.push_error(format!(
                        "Edge '{}' references invalid {end} '{reference}'",
                        edge.display_id()
                    ));
                }
            }
        }
    }
}

/// Heuristic: every root, vertex and edge should be its own cell record.
///
/// The bound ignores plain containers, so it stays a warning.
pub struct CompletenessRule;

impl Rule for CompletenessRule {
    fn id(&self) -> &'static str {
        "cell.count"
    }

    fn description(&self) -> &'static str {
        "cell count is at least roots + vertices + edges (warning)"
    }

    fn check(&self, graph: &Graph, cfg: &CheckerConfig, findings: &mut Findings) {
        let expected_min = cfg.roots.count() + graph.vertex_count() + graph.edge_count();
        let total = graph.len();
        if total < expected_min {
            findings.push_warning(format!(
                "mxCell count ({total}) may be incomplete. Expected >= {expected_min}"
            ));
        }
    }
}

/// Warns for each vertex or edge without an `mxGeometry` child.
///
/// Vertices are reported first, then edges; a cell flagged as both is
/// reported once.
pub struct GeometryRule;

impl Rule for GeometryRule {
    fn id(&self) -> &'static str {
        "cell.geometry"
    }

    fn description(&self) -> &'static str {
        "vertices and edges carry mxGeometry (warning)"
    }

    fn check(&self, graph: &Graph, _cfg: &CheckerConfig, findings: &mut Findings) {
        let edges_only = graph.edges().filter(|c| !c.is_vertex);
        for cell in graph.vertices().chain(edges_only) {
            if !cell.has_geometry {
                findings.push_warning(format!("mxCell '{}' missing mxGeometry", cell.display_id()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RootIds;
    use crate::model::Cell;

    fn run(rule: &dyn Rule, graph: &Graph) -> Findings {
        let mut f = Findings::new();
        rule.check(graph, &CheckerConfig::default(), &mut f);
        f
    }

    fn roots() -> Vec<Cell> {
        vec![Cell::new("0"), Cell::new("1")]
    }

    #[test]
    fn generator_missing_or_empty_warns() {
        let g = Graph::new(None, roots());
        assert_eq!(run(&GeneratorRule, &g).warnings.len(), 1);

        let g = Graph::new(Some(String::new()), roots());
        assert_eq!(run(&GeneratorRule, &g).warnings.len(), 1);

        let g = Graph::new(Some("drawio".into()), roots());
        assert!(run(&GeneratorRule, &g).warnings.is_empty());
    }

    #[test]
    fn duplicate_reported_once_per_id() {
        let mut cells = roots();
        cells.push(Cell::vertex("2"));
        cells.push(Cell::vertex("2"));
        cells.push(Cell::vertex("2"));
        cells.push(Cell::vertex("3"));
        cells.push(Cell::vertex("3"));
        let f = run(&DuplicateIdRule, &Graph::new(None, cells));
        assert_eq!(
            f.errors,
            vec![
                "Duplicate cell ID '2' (3 occurrences)",
                "Duplicate cell ID '3' (2 occurrences)",
            ]
        );
    }

    #[test]
    fn id_less_cells_are_not_duplicates() {
        let mut cells = roots();
        cells.push(Cell::new(""));
        cells.push(Cell::new(""));
        assert!(run(&DuplicateIdRule, &Graph::new(None, cells)).errors.is_empty());
    }

    #[test]
    fn both_roots_missing_fire_separately() {
        let g = Graph::new(None, vec![Cell::vertex("2")]);
        let f = run(&RootCellRule, &g);
        assert_eq!(
            f.errors,
            vec!["Missing root mxCell id='0'", "Missing root mxCell id='1'"]
        );
    }

    #[test]
    fn configured_roots_are_used() {
        let g = Graph::new(None, vec![Cell::new("root"), Cell::new("layer")]);
        let mut cfg = CheckerConfig::default();
        cfg.roots = RootIds::new("root", "layer");
        let mut f = Findings::new();
        RootCellRule.check(&g, &cfg, &mut f);
        assert!(f.errors.is_empty());
    }

    #[test]
    fn dangling_source_and_target() {
        let mut cells = roots();
        cells.push(Cell::vertex("2"));
        cells.push(Cell::edge("e1", Some("2"), Some("Z")));
        cells.push(Cell::edge("e2", Some("Y"), None));
        let f = run(&EdgeReferenceRule, &Graph::new(None, cells));
        assert_eq!(
            f.errors,
            vec![
                "Edge 'e1' references invalid target 'Z'",
                "Edge 'e2' references invalid source 'Y'",
            ]
        );
    }

    #[test]
    fn unset_endpoints_are_fine() {
        let mut cells = roots();
        cells.push(Cell::edge("e", None, None));
        assert!(run(&EdgeReferenceRule, &Graph::new(None, cells)).errors.is_empty());
    }

    #[test]
    fn completeness_counts_roots_vertices_edges() {
        // A cell flagged as vertex and edge counts twice towards the bound.
        let mut both = Cell::vertex("2");
        both.is_edge = true;
        let mut cells = roots();
        cells.push(both);
        let f = run(&CompletenessRule, &Graph::new(None, cells));
        assert_eq!(
            f.warnings,
            vec!["mxCell count (3) may be incomplete. Expected >= 4"]
        );
        assert!(f.errors.is_empty());
    }

    #[test]
    fn geometry_vertices_then_edges() {
        let mut both = Cell::vertex("b");
        both.is_edge = true;
        let cells = vec![
            Cell::new("0"),
            Cell::edge("e", None, None),
            Cell::vertex("v"),
            Cell::vertex("ok").with_geometry(),
            both,
        ];
        let f = run(&GeometryRule, &Graph::new(None, cells));
        assert_eq!(
            f.warnings,
            vec![
                "mxCell 'v' missing mxGeometry",
                "mxCell 'b' missing mxGeometry",
                "mxCell 'e' missing mxGeometry",
            ]
        );
    }

    #[test]
    fn rule_ids_are_unique() {
        let rules = default_rules();
        let mut ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }
}
