use grid_astar::{CellState, Grid, NoObserver, Position, SearchEngine};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(3);
    grid.set_state(Position::new(1, 1), CellState::Barrier);
    grid.recompute_all_neighbours();
    let start = Position::new(0, 0);
    let end = Position::new(2, 2);
    let outcome = SearchEngine::new(&mut grid, start, end)
        .unwrap()
        .run(&mut NoObserver);
    println!("{}", grid);
    if let Some(path) = outcome.path() {
        println!("Path:");
        for p in path.cells() {
            println!("{}", p);
        }
    }
}
