use grid_astar::{Board, Grid, Outcome, Position, Step};
use std::ops::ControlFlow;

// Watches a search on an open 20x20 board and stops it after a fixed number of expansions,
// printing the board as it was left.

const BUDGET: usize = 40;

fn main() {
    let mut board = Board::new(20);
    board.set_start(Position::new(0, 0)).unwrap();
    board.set_end(Position::new(19, 19)).unwrap();
    for row in 0..15 {
        board.set_barrier(Position::new(row, 10)).unwrap();
    }
    let mut expanded = 0;
    let outcome = board
        .run_search(&mut |_: &Grid, step: Step| -> ControlFlow<()> {
            if let Step::Expanded(_) = step {
                expanded += 1;
            }
            if expanded >= BUDGET {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
    match outcome {
        Outcome::Cancelled => println!("Stopped after {} expansions:", expanded),
        Outcome::Found(path) => println!("Found a path of {} steps:", path.len()),
        Outcome::NotFound => println!("No path:"),
    }
    println!("{}", board.grid());
}
