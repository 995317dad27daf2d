//! The per-game search engine.
//!
//! Each `SearchEngine` owns its own transposition table and random source.
//! Create one per game and drop it with the game.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::alpha_beta_searcher::{SearchContext, DEFAULT_TABLE_CAPACITY};
use crate::board::color::Color;
use crate::chess_move::Move;
use crate::evaluate::EvaluationWeights;
use crate::game::GameState;

use super::implementation::{search_best_move, ChessEvaluator};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub depth: u8,
    pub time_budget: Option<Duration>,
    /// Probability of playing a uniformly random legal move instead of
    /// searching. Clamped to `0.0..=1.0`.
    pub exploration_rate: f64,
    pub iterative_deepening: bool,
    pub table_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            time_budget: None,
            exploration_rate: 0.0,
            iterative_deepening: false,
            table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }
}

/// What the last call to `get_best_move` did.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub best_move: Move,
    /// From the mover's point of view. `None` for an exploration move.
    pub score: Option<i16>,
    pub depth_reached: u8,
    pub nodes: usize,
    pub table_hits: usize,
    pub duration: Duration,
    pub timed_out: bool,
}

pub struct SearchEngine {
    config: SearchConfig,
    context: SearchContext<Move>,
    evaluator: ChessEvaluator,
    rng: StdRng,
    last_report: Option<SearchReport>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl SearchEngine {
    /// An engine seeded from OS entropy.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// An engine whose exploration moves are reproducible.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SearchConfig, rng: StdRng) -> Self {
        let context = SearchContext::new(config.depth.max(1))
            .with_time_budget(config.time_budget)
            .with_iterative_deepening(config.iterative_deepening)
            .with_table_capacity(config.table_capacity);

        Self {
            config,
            context,
            evaluator: ChessEvaluator::default(),
            rng,
            last_report: None,
        }
    }

    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.evaluator = ChessEvaluator::new(weights);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn weights(&self) -> &EvaluationWeights {
        self.evaluator.weights()
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    pub fn set_time_budget(&mut self, time_budget: Option<Duration>) {
        self.config.time_budget = time_budget;
    }

    /// Picks a move for `color` using the configured depth and time budget.
    pub fn get_best_move(&mut self, state: &GameState, color: Color) -> Option<Move> {
        let depth = self.config.depth;
        let time_budget = self.config.time_budget;
        self.search(state, color, depth, time_budget)
    }

    /// Picks a move for `color` searching `depth` plies (at least one).
    ///
    /// Returns `None` when the game is over, when `color` has no legal move,
    /// or when it is not `color`'s turn.
    pub fn search(
        &mut self,
        state: &GameState,
        color: Color,
        depth: u8,
        time_budget: Option<Duration>,
    ) -> Option<Move> {
        self.last_report = None;

        if state.is_terminal() {
            debug!("no search: game is over");
            return None;
        }
        if state.current_player() != color {
            warn!(
                "asked for a {} move but it is {}'s turn",
                color,
                state.current_player()
            );
            return None;
        }

        let legal = state.legal_moves();
        if legal.is_empty() {
            return None;
        }

        let rate = self.config.exploration_rate.clamp(0.0, 1.0);
        if rate > 0.0 && self.rng.gen_bool(rate) {
            let chess_move = *legal.choose(&mut self.rng)?;
            debug!("exploration move {}", chess_move);
            self.last_report = Some(SearchReport {
                best_move: chess_move,
                score: None,
                depth_reached: 0,
                nodes: 0,
                table_hits: 0,
                duration: Duration::ZERO,
                timed_out: false,
            });
            return Some(chess_move);
        }

        self.context.set_depth(depth.max(1));
        self.context.set_time_budget(time_budget);

        let outcome = match search_best_move(&mut self.context, state, &self.evaluator) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("search failed: {}", error);
                return None;
            }
        };

        let report = SearchReport {
            best_move: outcome.best_move,
            score: Some(outcome.score),
            depth_reached: outcome.depth_reached,
            nodes: self.context.searched_position_count(),
            table_hits: self.context.tt_hits(),
            duration: self.context.last_search_duration().unwrap_or_default(),
            timed_out: outcome.timed_out,
        };

        info!(
            "{} plays {} (score {}, depth {}, {} nodes in {:?}{})",
            color,
            report.best_move,
            outcome.score,
            report.depth_reached,
            report.nodes,
            report.duration,
            if report.timed_out { ", timed out" } else { "" }
        );

        self.last_report = Some(report);
        Some(outcome.best_move)
    }
}
