//! Best move command - print the engine's choice for a stored position.

use std::path::PathBuf;

use structopt::StructOpt;

use super::util::{load_state, print_outcome, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(long = "state", parse(from_os_str))]
    pub state: Option<PathBuf>,
    #[structopt(short, long, help = "Also print search statistics")]
    pub verbose: bool,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let state = load_state(self.state.as_ref());
        if state.is_terminal() {
            eprintln!("The game in the given position is already over.");
            print_outcome(&state);
            return;
        }

        let mut engine = self.engine.engine();
        let color = state.current_player();
        let best_move = match engine.get_best_move(&state, color) {
            Some(best_move) => best_move,
            None => {
                eprintln!("There are no valid moves in the given position.");
                return;
            }
        };

        println!("{}", best_move.to_algebraic());

        if self.verbose {
            if let Some(report) = engine.last_report() {
                match report.score {
                    Some(score) => println!("score: {}", score),
                    None => println!("score: n/a (exploration move)"),
                }
                println!("depth reached: {}", report.depth_reached);
                println!("positions searched: {}", report.nodes);
                println!("table hits: {}", report.table_hits);
                println!("duration: {:?}", report.duration);
                if report.timed_out {
                    println!("search stopped at the time budget");
                }
            }
        }
    }
}
