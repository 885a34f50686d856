//! Property tests for the integrity checker.

use cellgraph_core::prelude::*;
use proptest::prelude::*;

/// Graphs with unique ids, both roots, and edges between existing vertices.
fn sound_graph() -> impl Strategy<Value = Graph> {
    (1usize..12, 0usize..12, any::<bool>(), any::<Option<String>>()).prop_flat_map(
        |(vertices, edges, geometry, generator)| {
            proptest::collection::vec((0..vertices, 0..vertices, any::<bool>()), edges).prop_map(
                move |pairs| {
                    let mut cells = vec![Cell::new("0"), Cell::new("1")];
                    for v in 0..vertices {
                        let mut c = Cell::vertex(format!("v{v}"));
                        c.has_geometry = geometry;
                        cells.push(c);
                    }
                    for (i, (s, t, set_target)) in pairs.into_iter().enumerate() {
                        let source = format!("v{s}");
                        let target = format!("v{t}");
                        cells.push(Cell::edge(
                            format!("e{i}"),
                            Some(source.as_str()),
                            set_target.then_some(target.as_str()),
                        ));
                    }
                    Graph::new(generator.clone(), cells)
                },
            )
        },
    )
}

proptest! {
    #[test]
    fn sound_graphs_are_valid(graph in sound_graph()) {
        let report = IntegrityChecker::default().check("p.drawio", &graph);
        prop_assert!(report.is_valid(), "errors: {:?}", report.errors());
    }

    #[test]
    fn checking_is_idempotent(graph in sound_graph(), drop_root in any::<bool>()) {
        let graph = if drop_root {
            Graph::new(graph.generator().map(str::to_string), graph.cells()[1..].to_vec())
        } else {
            graph
        };
        let checker = IntegrityChecker::default();
        prop_assert_eq!(checker.check("p", &graph), checker.check("p", &graph));
    }

    #[test]
    fn duplicating_a_cell_yields_one_error(graph in sound_graph(), pick in any::<proptest::sample::Index>()) {
        let mut cells = graph.cells().to_vec();
        let dup = cells[pick.index(cells.len())].clone();
        let id = dup.id.clone();
        cells.push(dup.clone());
        cells.push(dup);
        let report = IntegrityChecker::default().check("p", &Graph::new(None, cells));
        prop_assert!(!report.is_valid());
        let naming: Vec<_> = report.errors().iter().filter(|e| e.contains(&format!("'{id}'"))).collect();
        prop_assert_eq!(naming.len(), 1);
    }
}
