//! Watch command - watch the computer play against itself.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use log::error;
use structopt::StructOpt;
use wizard_chess::game::GameSession;

use super::util::{load_state, print_outcome, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(long = "state", parse(from_os_str))]
    pub state: Option<PathBuf>,
    #[structopt(
        long = "delay",
        default_value = "1000",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(
        long = "max-moves",
        default_value = "400",
        help = "Stop after this many moves"
    )]
    pub max_moves: usize,
}

impl Command for WatchArgs {
    fn execute(self) {
        let state = load_state(self.state.as_ref());
        let mut session = GameSession::from_state(state, self.engine.engine());
        if let Err(err) = session.start() {
            eprintln!("Failed to start game: {}", err);
            return;
        }
        println!("{}", session.state().board());

        for _ in 0..self.max_moves {
            if session.state().is_terminal() {
                break;
            }
            match session.play_engine_move() {
                Ok(Some(chess_move)) => {
                    let color = chess_move.piece.color;
                    println!("{} plays {}", color, chess_move.to_algebraic());
                    println!("{}", session.state().board());
                }
                Ok(None) => break,
                Err(err) => {
                    error!("engine move failed: {}", err);
                    break;
                }
            }
            thread::sleep(Duration::from_millis(self.delay_ms));
        }

        print_outcome(session.state());
    }
}
