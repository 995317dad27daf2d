//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, count_positions::CountPositionsArgs, play::PlayArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "wizard-chess",
    about = "Chess on a 10x10 board with a wizard on each side, and an alpha-beta engine to play it"
)]
pub enum WizardChess {
    #[structopt(
        name = "play",
        about = "Play a game against the computer, which searches at the given `--depth` (default: 4). Your color is chosen at random unless you specify `--color`. Enter moves as `f1f3`; append q, r, b, n or w to pick a promotion. A wizard's ranged attack is entered as the wizard's square followed by the target's square."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself at the given `--depth` (default: 4)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "best-move",
        about = "Print the engine's move for a position read from a JSON game state with `--state` (default: starting position)."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the legal move sequences of a given `--depth` (default: 3) and report the time it took."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for WizardChess {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            BestMove(cmd),
            CountPositions(cmd),
        }
    }
}
