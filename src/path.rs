use crate::cell::Position;
use crate::manhattan_distance;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Maps every relaxed cell to the cell it was last reached from.
pub type PredecessorMap = FxIndexMap<Position, Position>;

/// Walks a [PredecessorMap] backwards from `end`, yielding the predecessor of `end`, then its
/// predecessor and so on, until a cell without an entry (the start) has been yielded. `end`
/// itself is not yielded. If `end` has no entry nothing is yielded.
pub fn reconstruct(predecessors: &PredecessorMap, end: Position) -> Reconstruct<'_> {
    Reconstruct {
        predecessors,
        current: end,
    }
}

/// Iterator returned by [reconstruct].
#[derive(Clone, Debug)]
pub struct Reconstruct<'a> {
    predecessors: &'a PredecessorMap,
    current: Position,
}

impl Iterator for Reconstruct<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let previous = *self.predecessors.get(&self.current)?;
        self.current = previous;
        Some(previous)
    }
}

/// A route over the grid from its first cell to its last, moving one cell up, down, left or right
/// per step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// Builds a path from `end` and the cells [reconstruct] yields for it.
    pub(crate) fn from_trace(end: Position, trace: Vec<Position>) -> Path {
        let mut cells = trace;
        cells.reverse();
        cells.push(end);
        Path { cells }
    }

    /// Cells from start to end, both included.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }

    /// Number of steps (edges) along the path.
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    /// True if start and end coincide.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every consecutive pair of cells is exactly one step apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| manhattan_distance(*a, *b) == 1)
    }
}
