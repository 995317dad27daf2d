//! Play command - play a game against the computer.

use std::io::{self, Write};
use std::path::PathBuf;

use log::{error, warn};
use structopt::StructOpt;
use wizard_chess::board::color::Color;
use wizard_chess::game::{GamePhase, GameSession};
use wizard_chess::input_handler::{read_move_input, MoveInput};

use super::util::{load_state, print_outcome, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: Color,
    #[structopt(long = "state", parse(from_os_str))]
    pub state: Option<PathBuf>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let human = self.color;
        let state = load_state(self.state.as_ref());
        let mut session = GameSession::from_state(state, self.engine.engine());
        if let Err(err) = session.start() {
            eprintln!("Failed to start game: {}", err);
            return;
        }

        println!("You are playing {}. Type `resign` or `quit` at any time.", human);
        let stdin = io::stdin();
        let mut input = stdin.lock();

        while session.phase() == GamePhase::Playing {
            println!("{}", session.state().board());

            if session.state().current_player() != human {
                match session.play_engine_move() {
                    Ok(Some(chess_move)) => {
                        println!("Engine plays {}", chess_move.to_algebraic());
                    }
                    Ok(None) => break,
                    Err(err) => {
                        error!("engine move failed: {}", err);
                        break;
                    }
                }
                continue;
            }

            if session.state().is_in_check() {
                println!("You are in check.");
            }
            print!("{} to move: ", human);
            if let Err(err) = io::stdout().flush() {
                warn!("failed to flush stdout: {}", err);
            }

            match read_move_input(&mut input) {
                Ok(MoveInput::Coordinate {
                    from,
                    to,
                    promotion,
                }) => {
                    let chess_move = match session.state().find_move(from, to, promotion) {
                        Some(chess_move) => chess_move,
                        None => {
                            println!("Illegal move: {}{}", from, to);
                            continue;
                        }
                    };
                    if let Err(err) = session.submit_move(&chess_move) {
                        println!("{}", err);
                    }
                }
                Ok(MoveInput::Resign) => {
                    if let Err(err) = session.resign(human) {
                        println!("{}", err);
                    }
                }
                Ok(MoveInput::Quit) => return,
                Err(err) => println!("{}", err),
            }
        }

        println!("{}", session.state().board());
        print_outcome(session.state());
    }
}
