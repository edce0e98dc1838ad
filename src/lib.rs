//! # grid_astar
//!
//! Shortest paths on square grids using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Movement is
//! 4-directional and every step costs the same, which makes the heuristic consistent.
//!
//! A cell already waiting in the frontier keeps the priority it was queued with even when a cheaper
//! route to it turns up later, so on large cluttered grids a returned path can occasionally be a
//! little longer than the shortest one.
//!
//! The search is meant to be watched: it paints the cells it opens, closes and finally traces onto
//! the [Grid](grid::Grid) and reports every step to a [StepObserver](search::StepObserver), which
//! can redraw the grid or cancel the search. Ties between equally promising cells are broken by
//! insertion order, so the same grid always produces the same search.
//!
//! [Board](board::Board) bundles a grid with the start and end bookkeeping needed by an editor.
pub mod board;
pub mod cell;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod path;
pub mod search;

pub use board::Board;
pub use cell::{Cell, CellState, Position};
pub use error::{Error, Result};
pub use grid::Grid;
pub use path::Path;
pub use search::{NoObserver, Outcome, SearchEngine, SearchState, Step, StepObserver};

/// Path cost type.
pub type Cost = u32;

/// Cost of a single step between adjacent cells.
pub const EDGE_COST: Cost = 1;

/// The heuristic of the search: `|r1 - r2| + |c1 - c2|`.
pub fn manhattan_distance(a: Position, b: Position) -> Cost {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as Cost * EDGE_COST
}
