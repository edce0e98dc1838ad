use crate::cell::{CellState, Position};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::search::{Outcome, SearchEngine, StepObserver};
use log::{debug, info};

/// Rows (and columns) of a board created with [Board::default].
pub const DEFAULT_ROWS: usize = 50;
/// Width in pixels of the square area a board is drawn on, unless told otherwise.
pub const DEFAULT_WIDTH: u32 = 800;

/// A [Grid] together with the positions of its start and end cells.
///
/// All edits go through the board, which keeps at most one start and one end on the grid, refuses
/// to paint barriers over either of them and reports coordinates outside the grid as
/// [Error::OutOfBounds]. Searching borrows the board mutably, so it cannot be edited while a
/// search is running.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    pixel_width: u32,
    start: Option<Position>,
    end: Option<Position>,
}

impl Default for Board {
    fn default() -> Board {
        Board::new(DEFAULT_ROWS)
    }
}

impl Board {
    pub fn new(rows: usize) -> Board {
        Board::with_geometry(rows, DEFAULT_WIDTH)
    }

    /// A board drawn `pixel_width` pixels wide. The width is handed to [Grid::create] again
    /// whenever the board is reset.
    pub fn with_geometry(rows: usize, pixel_width: u32) -> Board {
        Board {
            grid: Grid::create(rows, pixel_width),
            pixel_width,
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    fn check(&self, position: Position) -> Result<()> {
        if self.grid.in_bounds(position) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                position,
                rows: self.grid.rows(),
            })
        }
    }

    fn is_endpoint(&self, position: Position) -> bool {
        self.start == Some(position) || self.end == Some(position)
    }

    pub fn set_barrier(&mut self, position: Position) -> Result<()> {
        self.check(position)?;
        if self.is_endpoint(position) {
            return Err(Error::Occupied { position });
        }
        debug!("Placing barrier at {}", position);
        self.grid.set_state(position, CellState::Barrier);
        Ok(())
    }

    /// Moves the start to `position`, clearing the previous start cell.
    pub fn set_start(&mut self, position: Position) -> Result<()> {
        self.check(position)?;
        if self.end == Some(position) {
            return Err(Error::Occupied { position });
        }
        if let Some(old) = self.start.replace(position) {
            if old != position {
                self.grid.reset(old);
            }
        }
        debug!("Placing start at {}", position);
        self.grid.set_state(position, CellState::Start);
        Ok(())
    }

    /// Moves the end to `position`, clearing the previous end cell.
    pub fn set_end(&mut self, position: Position) -> Result<()> {
        self.check(position)?;
        if self.start == Some(position) {
            return Err(Error::Occupied { position });
        }
        if let Some(old) = self.end.replace(position) {
            if old != position {
                self.grid.reset(old);
            }
        }
        debug!("Placing end at {}", position);
        self.grid.set_state(position, CellState::End);
        Ok(())
    }

    /// Empties the cell at `position`, forgetting it as start or end if it was one.
    pub fn reset(&mut self, position: Position) -> Result<()> {
        self.check(position)?;
        self.grid.reset(position);
        if self.start == Some(position) {
            self.start = None;
        } else if self.end == Some(position) {
            self.end = None;
        }
        Ok(())
    }

    /// Primary click: the first click places the start, the next one the end, and further clicks
    /// place barriers. Clicking the start or end again does nothing. Returns the state of the cell
    /// afterwards.
    pub fn place(&mut self, position: Position) -> Result<CellState> {
        self.check(position)?;
        if self.start.is_none() && self.end != Some(position) {
            self.set_start(position)?;
        } else if self.end.is_none() && self.start != Some(position) {
            self.set_end(position)?;
        } else if !self.grid.state(position).is_identity() {
            self.set_barrier(position)?;
        }
        Ok(self.grid.state(position))
    }

    /// Secondary click, the same as [reset](Self::reset).
    pub fn erase(&mut self, position: Position) -> Result<()> {
        self.reset(position)
    }

    pub fn recompute_all_neighbours(&mut self) {
        self.grid.recompute_all_neighbours();
    }

    /// Whether start and end are connected, judged by the grid's connected components.
    pub fn reachable(&mut self) -> Result<bool> {
        let start = self.start.ok_or(Error::MissingStart)?;
        let end = self.end.ok_or(Error::MissingEnd)?;
        self.grid.update();
        Ok(self.grid.reachable(start, end))
    }

    /// Wipes the marks of any earlier search, recomputes neighbours and prepares a search from the
    /// start to the end, to be driven step by step.
    pub fn search(&mut self) -> Result<SearchEngine<'_>> {
        let start = self.start.ok_or(Error::MissingStart)?;
        let end = self.end.ok_or(Error::MissingEnd)?;
        self.grid.clear_search_marks();
        self.grid.recompute_all_neighbours();
        info!("Searching from {} to {}", start, end);
        SearchEngine::new(&mut self.grid, start, end)
    }

    /// Runs a complete search, see [search](Self::search).
    pub fn run_search<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<Outcome> {
        Ok(self.search()?.run(observer))
    }

    /// Replaces the grid with an empty one of `rows` rows.
    pub fn reset_board(&mut self, rows: usize) {
        info!("Resetting board to {}x{}", rows, rows);
        self.grid = Grid::create(rows, self.pixel_width);
        self.start = None;
        self.end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::NoObserver;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn clicks_place_start_end_then_barriers() {
        let mut board = Board::new(4);
        assert_eq!(board.place(p(0, 0)), Ok(CellState::Start));
        assert_eq!(board.place(p(3, 3)), Ok(CellState::End));
        assert_eq!(board.place(p(1, 1)), Ok(CellState::Barrier));
        // Clicking the endpoints again leaves them alone
        assert_eq!(board.place(p(0, 0)), Ok(CellState::Start));
        assert_eq!(board.place(p(3, 3)), Ok(CellState::End));
        assert_eq!(board.start(), Some(p(0, 0)));
        assert_eq!(board.end(), Some(p(3, 3)));
    }

    #[test]
    fn erasing_start_frees_the_next_click() {
        let mut board = Board::new(4);
        board.place(p(0, 0)).unwrap();
        board.place(p(3, 3)).unwrap();
        board.erase(p(0, 0)).unwrap();
        assert_eq!(board.start(), None);
        assert_eq!(board.grid().state(p(0, 0)), CellState::Empty);
        // The end cannot become the start
        assert_eq!(board.place(p(3, 3)), Ok(CellState::End));
        assert_eq!(board.start(), None);
        assert_eq!(board.place(p(2, 0)), Ok(CellState::Start));
    }

    #[test]
    fn endpoints_cannot_be_overwritten() {
        let mut board = Board::new(3);
        board.set_start(p(0, 0)).unwrap();
        board.set_end(p(2, 2)).unwrap();
        assert_eq!(
            board.set_barrier(p(0, 0)),
            Err(Error::Occupied { position: p(0, 0) })
        );
        assert_eq!(
            board.set_end(p(0, 0)),
            Err(Error::Occupied { position: p(0, 0) })
        );
        assert_eq!(
            board.set_start(p(2, 2)),
            Err(Error::Occupied { position: p(2, 2) })
        );
    }

    #[test]
    fn moving_the_start_clears_the_old_cell() {
        let mut board = Board::new(3);
        board.set_start(p(0, 0)).unwrap();
        board.set_start(p(1, 0)).unwrap();
        assert_eq!(board.grid().state(p(0, 0)), CellState::Empty);
        assert_eq!(board.grid().state(p(1, 0)), CellState::Start);
        assert_eq!(
            board.grid().cells().filter(|c| c.state() == CellState::Start).count(),
            1
        );
    }

    #[test]
    fn start_can_replace_a_barrier() {
        let mut board = Board::new(3);
        board.set_barrier(p(1, 1)).unwrap();
        board.set_start(p(1, 1)).unwrap();
        board.set_end(p(0, 0)).unwrap();
        assert_eq!(board.grid().state(p(1, 1)), CellState::Start);
        let outcome = board.run_search(&mut NoObserver).unwrap();
        assert_eq!(outcome.path().unwrap().len(), 2);
    }

    #[test]
    fn out_of_bounds_edits_are_rejected() {
        let mut board = Board::new(3);
        let err = Error::OutOfBounds {
            position: p(0, 3),
            rows: 3,
        };
        assert_eq!(board.set_barrier(p(0, 3)), Err(err.clone()));
        assert_eq!(board.place(p(0, 3)), Err(err.clone()));
        assert_eq!(board.reset(p(0, 3)), Err(err));
    }

    #[test]
    fn search_needs_both_endpoints() {
        let mut board = Board::new(3);
        assert_eq!(
            board.run_search(&mut NoObserver),
            Err(Error::MissingStart)
        );
        board.set_start(p(0, 0)).unwrap();
        assert_eq!(board.run_search(&mut NoObserver), Err(Error::MissingEnd));
        assert_eq!(board.reachable(), Err(Error::MissingEnd));
    }

    #[test]
    fn rerunning_clears_previous_marks() {
        let mut board = Board::new(5);
        board.set_start(p(0, 0)).unwrap();
        board.set_end(p(4, 4)).unwrap();
        let first = board.run_search(&mut NoObserver).unwrap();
        let painted = board.grid().to_string();
        let second = board.run_search(&mut NoObserver).unwrap();
        assert_eq!(first, second);
        assert_eq!(board.grid().to_string(), painted);
    }

    #[test]
    fn reachable_follows_edits() {
        let mut board = Board::new(3);
        board.set_start(p(0, 0)).unwrap();
        board.set_end(p(2, 0)).unwrap();
        assert_eq!(board.reachable(), Ok(true));
        for col in 0..3 {
            board.set_barrier(p(1, col)).unwrap();
        }
        assert_eq!(board.reachable(), Ok(false));
        board.erase(p(1, 2)).unwrap();
        assert_eq!(board.reachable(), Ok(true));
    }

    #[test]
    fn reset_board_starts_over() {
        let mut board = Board::with_geometry(4, 400);
        board.place(p(0, 0)).unwrap();
        board.place(p(1, 1)).unwrap();
        board.place(p(2, 2)).unwrap();
        board.reset_board(6);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.start(), None);
        assert_eq!(board.end(), None);
        assert!(board
            .grid()
            .cells()
            .all(|c| c.state() == CellState::Empty));
        assert_eq!(Board::default().rows(), DEFAULT_ROWS);
    }
}
