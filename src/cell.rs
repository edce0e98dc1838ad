use core::fmt;

/// A `(row, col)` index into a square [Grid](crate::grid::Grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The state of a single cell. Exactly one holds at any time.
///
/// [Start](CellState::Start) and [End](CellState::End) carry the identity of the search endpoints,
/// [Open](CellState::Open), [Closed](CellState::Closed) and [Path](CellState::Path) are written by
/// the search purely so that progress can be rendered. Only [Barrier](CellState::Barrier)
/// affects traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellState {
    /// Start and End mark the search endpoints and are never painted over by the search.
    pub fn is_identity(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }

    /// States written by the search as a rendering hint.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }

    /// Single character used when printing a grid.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    state: CellState,
}

impl Cell {
    pub fn new(position: Position) -> Cell {
        Cell {
            position,
            state: CellState::Empty,
        }
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn row(&self) -> usize {
        self.position.row
    }
    pub fn col(&self) -> usize {
        self.position.col
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    /// Makes the cell [Empty](CellState::Empty) again. Resetting a start or end cell leaves any
    /// bookkeeping of those endpoints to the caller.
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}
