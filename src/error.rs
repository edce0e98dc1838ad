//! Precondition violations reported to callers of [Board](crate::board::Board) and
//! [SearchEngine](crate::search::SearchEngine). Search outcomes, including failing to find a
//! path, are not errors: see [Outcome](crate::search::Outcome).

use crate::cell::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{position} is outside the {rows}x{rows} grid")]
    OutOfBounds { position: Position, rows: usize },
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no end cell has been placed")]
    MissingEnd,
    /// Barriers changed since neighbours were last recomputed.
    #[error("neighbours are stale, recompute them before searching")]
    StaleNeighbours,
    /// Start and end cells cannot be painted over by edits targeting another state.
    #[error("{position} already holds the start or end cell")]
    Occupied { position: Position },
}

pub type Result<T> = std::result::Result<T, Error>;
