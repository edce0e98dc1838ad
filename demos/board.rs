use grid_astar::{Board, Grid, Outcome, Position, Step, StepObserver};
use std::ops::ControlFlow;

// Drives a board the way an editor would: clicks place the start, the end and then barriers,
// and every step of the search "redraws" the board.

struct Printer {
    frames: usize,
}

impl StepObserver for Printer {
    fn on_step(&mut self, grid: &Grid, step: Step) -> ControlFlow<()> {
        self.frames += 1;
        println!("Frame {} ({:?}):\n{}", self.frames, step, grid);
        ControlFlow::Continue(())
    }

    fn on_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Found(path) => println!("Found a path of {} steps", path.len()),
            Outcome::NotFound => println!("No path exists"),
            Outcome::Cancelled => println!("Cancelled"),
        }
    }
}

fn main() {
    let mut board = Board::new(6);
    let clicks = [(0, 0), (5, 5), (1, 1), (1, 2), (1, 3), (1, 4), (3, 1), (3, 2), (3, 3), (3, 5)];
    for (row, col) in clicks {
        board.place(Position::new(row, col)).unwrap();
    }
    let mut printer = Printer { frames: 0 };
    board.run_search(&mut printer).unwrap();

    // Opening a gap and searching again
    board.erase(Position::new(3, 5)).unwrap();
    board.run_search(&mut printer).unwrap();
}
