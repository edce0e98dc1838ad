use crate::cell::{CellState, Position};
use crate::error::{Error, Result};
use crate::frontier::{Frontier, FrontierEntry};
use crate::grid::Grid;
use crate::path::{reconstruct, Path, PredecessorMap};
use crate::{manhattan_distance, Cost, EDGE_COST};
use log::{info, trace, warn};
use num_traits::Bounded;
use std::ops::ControlFlow;

/// What the engine just did, reported to the [StepObserver] after every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The cell was popped from the frontier and its neighbours were relaxed.
    Expanded(Position),
    /// The cell was reached while walking the found path back from the end.
    Traced(Position),
}

/// Receives progress from a running search, typically to redraw the grid.
///
/// Returning [ControlFlow::Break] from [on_step](Self::on_step) after an expansion cancels the
/// search before the next cell is popped. Breaks returned while the found path is traced are
/// ignored.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid, step: Step) -> ControlFlow<()>;

    /// Called once by [SearchEngine::run] when the search has finished.
    fn on_outcome(&mut self, _outcome: &Outcome) {}
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    fn on_step(&mut self, grid: &Grid, step: Step) -> ControlFlow<()> {
        self(grid, step)
    }
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    fn on_step(&mut self, _: &Grid, _: Step) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    Running,
    Found,
    NotFound,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    /// The frontier ran dry: barriers separate start and end.
    NotFound,
    /// The observer asked the search to stop.
    Cancelled,
}

impl Outcome {
    pub fn state(&self) -> SearchState {
        match self {
            Outcome::Found(_) => SearchState::Found,
            Outcome::NotFound => SearchState::NotFound,
            Outcome::Cancelled => SearchState::Cancelled,
        }
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Per-cell scores defaulting to infinity, represented by the maximum value of `C`.
#[derive(Clone, Debug)]
struct ScoreTable<C> {
    scores: Vec<C>,
}

impl<C: Bounded + Copy + PartialEq> ScoreTable<C> {
    fn new(len: usize) -> Self {
        ScoreTable {
            scores: vec![C::max_value(); len],
        }
    }
    fn get(&self, ix: usize) -> C {
        self.scores[ix]
    }
    fn set(&mut self, ix: usize, score: C) {
        self.scores[ix] = score;
    }
    fn finite(&self, ix: usize) -> Option<C> {
        let score = self.scores[ix];
        (score != C::max_value()).then_some(score)
    }
}

/// A* search over a [Grid] with unit edge costs and the Manhattan distance as heuristic.
///
/// The engine holds the grid exclusively for its whole lifetime and paints search progress onto it
/// ([Open](CellState::Open), [Closed](CellState::Closed), [Path](CellState::Path)); the start and
/// end cells are never repainted. The frontier, score tables and predecessor map live and die with
/// the engine, so every search starts from scratch.
///
/// The search either runs to completion with [run](Self::run) or is driven one expansion at a time
/// with [step](Self::step). Once a terminal state is reached further steps do nothing.
#[derive(Debug)]
pub struct SearchEngine<'g> {
    grid: &'g mut Grid,
    start: Position,
    end: Position,
    frontier: Frontier<Cost>,
    g_score: ScoreTable<Cost>,
    f_score: ScoreTable<Cost>,
    predecessors: PredecessorMap,
    state: SearchState,
    path: Option<Path>,
    expanded: usize,
}

/// Paints a search mark, leaving the endpoints alone.
fn paint(grid: &mut Grid, start: Position, end: Position, cell: Position, state: CellState) {
    if cell != start && cell != end {
        grid.set_state(cell, state);
    }
}

impl<'g> SearchEngine<'g> {
    /// Prepares a search from `start` to `end`. The neighbours of `grid` must have been recomputed
    /// since barriers were last edited.
    pub fn new(grid: &'g mut Grid, start: Position, end: Position) -> Result<SearchEngine<'g>> {
        for position in [start, end] {
            if !grid.in_bounds(position) {
                return Err(Error::OutOfBounds {
                    position,
                    rows: grid.rows(),
                });
            }
        }
        if grid.neighbours_dirty() {
            return Err(Error::StaleNeighbours);
        }
        let start_ix = grid.index_of(start);
        let h = manhattan_distance(start, end);
        let mut g_score = ScoreTable::new(grid.cell_count());
        let mut f_score = ScoreTable::new(grid.cell_count());
        g_score.set(start_ix, 0);
        f_score.set(start_ix, h);
        let mut frontier = Frontier::new();
        frontier.push(h, start);
        Ok(SearchEngine {
            grid,
            start,
            end,
            frontier,
            g_score,
            f_score,
            predecessors: PredecessorMap::default(),
            state: SearchState::Running,
            path: None,
            expanded: 0,
        })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn frontier(&self) -> &Frontier<Cost> {
        &self.frontier
    }

    /// Cost of the best known route from the start to `cell`, [None] if it has not been reached.
    pub fn g_score(&self, cell: Position) -> Option<Cost> {
        self.g_score.finite(self.grid.index_of(cell))
    }

    pub fn f_score(&self, cell: Position) -> Option<Cost> {
        self.f_score.finite(self.grid.index_of(cell))
    }

    /// The path, once the search has ended in [SearchState::Found].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Number of cells expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Pops the best cell from the frontier and relaxes its neighbours, or finishes the search.
    pub fn step<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        let Some(FrontierEntry { cell: current, .. }) = self.frontier.pop_min() else {
            warn!(
                "Frontier exhausted after expanding {} cells, {} cannot be reached from {}",
                self.expanded, self.end, self.start
            );
            self.state = SearchState::NotFound;
            return self.state;
        };
        if current == self.end {
            self.trace_path(observer);
            self.grid.set_state(self.end, CellState::End);
            info!(
                "Found a path of {} steps from {} to {} after expanding {} cells",
                self.path.as_ref().map_or(0, Path::len),
                self.start,
                self.end,
                self.expanded
            );
            self.state = SearchState::Found;
            return self.state;
        }

        self.expanded += 1;
        let tentative_g = self.g_score.get(self.grid.index_of(current)) + EDGE_COST;
        for neighbour in self.grid.neighbours(current) {
            let ix = self.grid.index_of(neighbour);
            if tentative_g >= self.g_score.get(ix) {
                continue;
            }
            let f = tentative_g + manhattan_distance(neighbour, self.end);
            self.predecessors.insert(neighbour, current);
            self.g_score.set(ix, tentative_g);
            self.f_score.set(ix, f);
            // Members keep the entry they were queued with
            if !self.frontier.contains(&neighbour) {
                self.frontier.push(f, neighbour);
                paint(self.grid, self.start, self.end, neighbour, CellState::Open);
            }
        }
        trace!(
            "Expanded {} at cost {}, {} cells in frontier",
            current,
            tentative_g - EDGE_COST,
            self.frontier.len()
        );

        let flow = observer.on_step(&*self.grid, Step::Expanded(current));
        if current != self.start {
            paint(self.grid, self.start, self.end, current, CellState::Closed);
        }
        if flow.is_break() {
            info!(
                "Search from {} to {} cancelled after expanding {} cells",
                self.start, self.end, self.expanded
            );
            self.state = SearchState::Cancelled;
        }
        self.state
    }

    fn trace_path<O: StepObserver + ?Sized>(&mut self, observer: &mut O) {
        let mut trace = Vec::new();
        for cell in reconstruct(&self.predecessors, self.end) {
            paint(self.grid, self.start, self.end, cell, CellState::Path);
            trace.push(cell);
            // The path is already found, so a request to stop changes nothing
            let _ = observer.on_step(&*self.grid, Step::Traced(cell));
        }
        self.path = Some(Path::from_trace(self.end, trace));
    }

    /// Steps until the search ends and reports the outcome to `observer`.
    pub fn run<O: StepObserver + ?Sized>(mut self, observer: &mut O) -> Outcome {
        while self.step(observer) == SearchState::Running {}
        let outcome = match (self.state, self.path) {
            (SearchState::Found, Some(path)) => Outcome::Found(path),
            (SearchState::Cancelled, _) => Outcome::Cancelled,
            _ => Outcome::NotFound,
        };
        observer.on_outcome(&outcome);
        outcome
    }
}
