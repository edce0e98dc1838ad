use crate::cell::{Cell, CellState, Position};
use core::fmt;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;

/// Row and column offsets of the 4-neighbourhood in the order neighbours are visited: down, up,
/// right, left. Bit `i` of a neighbour mask refers to `NEUMANN_OFFSETS[i]`.
const NEUMANN_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Iterator over the neighbours of a cell selected by a 4-bit mask, in the fixed
/// down, up, right, left order. Owns its data so the grid can be mutated while iterating.
#[derive(Clone, Debug)]
pub struct Neighbours {
    origin: Position,
    mask: u8,
    next: usize,
}

impl Iterator for Neighbours {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.next < NEUMANN_OFFSETS.len() {
            let i = self.next;
            self.next += 1;
            if self.mask & (1 << i) != 0 {
                let (dr, dc) = NEUMANN_OFFSETS[i];
                return Some(Position::new(
                    self.origin.row.wrapping_add_signed(dr),
                    self.origin.col.wrapping_add_signed(dc),
                ));
            }
        }
        None
    }
}

/// A square grid of [Cell]s. Besides the cells it caches the traversable 4-neighbourhood of every
/// cell as a [u8] mask, and keeps connected components of non-barrier cells in a [UnionFind]
/// structure. Both are flagged dirty by edits that change whether a cell is a barrier.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cells: Vec<Cell>,
    neighbours: Vec<u8>,
    neighbours_dirty: bool,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a `rows` x `rows` grid of empty cells.
    ///
    /// The neighbour cache starts out dirty: call
    /// [recompute_all_neighbours](Self::recompute_all_neighbours) before searching.
    pub fn new(rows: usize) -> Grid {
        assert!(rows > 0, "a grid needs at least one row");
        let cells = iproduct!(0..rows, 0..rows)
            .map(|(row, col)| Cell::new(Position::new(row, col)))
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            rows,
            neighbours: vec![0; cells.len()],
            cells,
            neighbours_dirty: true,
            components: UnionFind::new(0),
            components_dirty: true,
        };
        grid.generate_components();
        grid
    }

    /// Creates a grid for a board drawn `pixel_width` pixels wide. The width only matters to
    /// whoever renders the board and is not kept.
    pub fn create(rows: usize, pixel_width: u32) -> Grid {
        debug!(
            "Creating {}x{} grid for a {}px board ({}px per cell)",
            rows,
            rows,
            pixel_width,
            pixel_width as usize / rows.max(1)
        );
        Grid::new(rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.rows
    }

    /// Row-major index of `pos`. Panics if `pos` lies outside the grid.
    pub(crate) fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "{} is outside the {}x{} grid",
            pos,
            self.rows,
            self.rows
        );
        pos.row * self.rows + pos.col
    }

    /// Panics if `pos` lies outside the grid, see [get](Self::get) for the checked variant.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index_of(pos)]
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(self.cell(pos))
        } else {
            None
        }
    }

    pub fn state(&self, pos: Position) -> CellState {
        self.cell(pos).state()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Changes the state of the cell at `pos`. If this turns a barrier into a free cell or vice
    /// versa, the neighbour cache is marked dirty. Freeing a cell joins it to the components of
    /// its free neighbours, while placing a barrier flags the components as dirty since it may
    /// break a component apart.
    pub fn set_state(&mut self, pos: Position, state: CellState) {
        let ix = self.index_of(pos);
        let was_barrier = self.cells[ix].is_barrier();
        self.cells[ix].set_state(state);
        let is_barrier = state == CellState::Barrier;
        if was_barrier == is_barrier {
            return;
        }
        self.neighbours_dirty = true;
        if is_barrier {
            self.components_dirty = true;
        } else {
            for n in self.open_neighbours(pos) {
                let n_ix = self.index_of(n);
                self.components.union(ix, n_ix);
            }
        }
    }

    pub fn reset(&mut self, pos: Position) {
        self.set_state(pos, CellState::Empty);
    }

    fn open_mask(&self, pos: Position) -> u8 {
        let mut mask = 0;
        for (i, (dr, dc)) in NEUMANN_OFFSETS.iter().enumerate() {
            let (Some(row), Some(col)) = (
                pos.row.checked_add_signed(*dr),
                pos.col.checked_add_signed(*dc),
            ) else {
                continue;
            };
            let n = Position::new(row, col);
            if self.in_bounds(n) && !self.cell(n).is_barrier() {
                mask |= 1 << i;
            }
        }
        mask
    }

    /// The in-bounds, non-barrier neighbours of `pos` as the grid is right now, ignoring the
    /// neighbour cache.
    pub fn open_neighbours(&self, pos: Position) -> Neighbours {
        Neighbours {
            origin: pos,
            mask: self.open_mask(pos),
            next: 0,
        }
    }

    /// The neighbours of `pos` recorded by the last call to
    /// [recompute_all_neighbours](Self::recompute_all_neighbours). These are stale whenever
    /// [neighbours_dirty](Self::neighbours_dirty) is set.
    pub fn neighbours(&self, pos: Position) -> Neighbours {
        Neighbours {
            origin: pos,
            mask: self.neighbours[self.index_of(pos)],
            next: 0,
        }
    }

    /// Rebuilds the neighbour cache from the current barriers.
    pub fn recompute_all_neighbours(&mut self) {
        debug!("Recomputing neighbours of {} cells", self.cells.len());
        for ix in 0..self.cells.len() {
            self.neighbours[ix] = self.open_mask(self.cells[ix].position());
        }
        self.neighbours_dirty = false;
    }

    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }

    /// Turns every [Open](CellState::Open), [Closed](CellState::Closed) and
    /// [Path](CellState::Path) cell back into an empty one.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state().is_search_mark()) {
            cell.reset();
        }
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn get_component(&self, pos: Position) -> usize {
        self.components.find(self.index_of(pos))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: Position, goal: Position) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Barriers are never reachable.
    pub fn unreachable(&self, start: Position, goal: Position) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            self.cell(start).is_barrier()
                || self.cell(goal).is_barrier()
                || !self
                    .components
                    .equiv(self.index_of(start), self.index_of(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            let cell = &self.cells[ix];
            if cell.is_barrier() {
                continue;
            }
            // Linking downwards and rightwards covers every edge once.
            let pos = cell.position();
            for n in [
                Position::new(pos.row + 1, pos.col),
                Position::new(pos.row, pos.col + 1),
            ] {
                if self.in_bounds(n) && !self.cell(n).is_barrier() {
                    let n_ix = self.index_of(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows) {
            let line = row.iter().map(|c| c.state().symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
