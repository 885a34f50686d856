//! Cell graph model.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One `mxCell` record: a node, connector or container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Cell {
    /// Cell id. Empty when the document gave none.
    pub id: String,
    pub is_vertex: bool,
    pub is_edge: bool,
    pub source: Option<String>,
    pub target: Option<String>,
    pub has_geometry: bool,
}

impl Cell {
    /// A plain cell (root, layer or container).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn vertex(id: impl Into<String>) -> Self {
        Self {
            is_vertex: true,
            ..Self::new(id)
        }
    }

    pub fn edge(id: impl Into<String>, source: Option<&str>, target: Option<&str>) -> Self {
        Self {
            is_edge: true,
            source: source.map(str::to_string),
            target: target.map(str::to_string),
            ..Self::new(id)
        }
    }

    pub fn with_geometry(mut self) -> Self {
        self.has_geometry = true;
        self
    }

    /// Name used in messages: the id, or `unknown` for id-less cells.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            "unknown"
        } else {
            &self.id
        }
    }
}

/// The cells of one document in document order, plus an id index.
///
/// The index maps each non-empty id to every position it occurs at, so
/// duplicates stay visible to the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    generator: Option<String>,
    cells: Vec<Cell>,
    index: BTreeMap<String, Vec<usize>>,
}

impl Graph {
    pub fn new(generator: Option<String>, cells: Vec<Cell>) -> Self {
        let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, cell) in cells.iter().enumerate() {
            if !cell.id.is_empty() {
                index.entry(cell.id.clone()).or_default().push(pos);
            }
        }
        Self {
            generator,
            cells,
            index,
        }
    }

    /// The generator declared by the document root, if any.
    pub fn generator(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All cells carrying `id`, in document order.
    pub fn cells_with_id<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.index
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&pos| &self.cells[pos])
    }

    /// Every distinct non-empty id with its multiplicity, ordered by first appearance.
    pub fn id_counts(&self) -> Vec<(&str, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(pos, cell)| {
                let positions = self.index.get(&cell.id)?;
                (positions.first() == Some(&pos)).then_some((cell.id.as_str(), positions.len()))
            })
            .collect()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_vertex)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_edge)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
