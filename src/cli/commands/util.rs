//! Shared utilities for CLI commands.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use structopt::StructOpt;
use wizard_chess::chess_search::{SearchConfig, SearchEngine};
use wizard_chess::game::{GameError, GameState};

/// Search settings shared by every command that runs the engine.
#[derive(StructOpt, Debug)]
pub struct EngineArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(long = "time-ms", help = "Time budget per move in milliseconds")]
    pub time_ms: Option<u64>,
    #[structopt(
        long,
        default_value = "0.0",
        help = "Probability of playing a random legal move instead of searching"
    )]
    pub exploration: f64,
    #[structopt(long, help = "Seed for exploration moves")]
    pub seed: Option<u64>,
    #[structopt(long = "iterative-deepening")]
    pub iterative_deepening: bool,
}

impl EngineArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            time_budget: self.time_ms.map(Duration::from_millis),
            exploration_rate: self.exploration,
            iterative_deepening: self.iterative_deepening,
            ..SearchConfig::default()
        }
    }

    pub fn engine(&self) -> SearchEngine {
        match self.seed {
            Some(seed) => SearchEngine::with_seed(self.search_config(), seed),
            None => SearchEngine::new(self.search_config()),
        }
    }
}

fn read_state(path: &Path) -> Result<GameState, GameError> {
    let json = fs::read_to_string(path).map_err(|error| GameError::InvalidPosition {
        reason: format!("cannot read {}: {}", path.display(), error),
    })?;
    GameState::from_json(&json)
}

/// The state stored at `path`, or the initial position. Exits on a bad file.
pub(crate) fn load_state(path: Option<&PathBuf>) -> GameState {
    let path = match path {
        Some(path) => path,
        None => return GameState::new(),
    };

    match read_state(path) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Failed to load game state: {}", error);
            process::exit(1);
        }
    }
}

pub(crate) fn print_outcome(state: &GameState) {
    if let Some(color) = state.resigned() {
        println!("{} resigns.", color);
    }
    match state.winner() {
        Some(winner) if state.is_checkmate() => println!("Checkmate! {} wins.", winner),
        Some(winner) => println!("{} wins.", winner),
        None if state.is_stalemate() => println!("Stalemate. The game is a draw."),
        None => {}
    }
}
