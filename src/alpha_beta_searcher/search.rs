//! Alpha-beta search algorithm implementation.
//!
//! # Core Algorithm
//!
//! Negamax with alpha-beta pruning: every score is from the point of view of
//! the side to move, and a child's score is negated on the way up. The window
//! `[alpha, beta]` holds the range of scores that can still change the
//! decision at the root; moves that fall outside it are pruned. Scores are
//! fail-soft, so a node may return a value outside the window it was given.
//!
//! # Transposition Table
//! Caches scores by position hash together with the depth they were searched
//! to, the bound type and the best move. An entry is only trusted for a score
//! when its depth is at least the remaining depth; otherwise its move is still
//! tried first. Mate scores are stored relative to their node and re-based on
//! the probing ply.
//!
//! # Time Budget
//! The deadline is checked between root moves and at the first plies of the
//! tree. When it passes, the subtree in progress is abandoned and the best
//! move among fully searched root moves is returned.
//!
//! # Iterative Deepening
//! Optional. Depths 1..=N are searched in turn, each iteration trying the
//! previous iteration's best move first. On timeout, the result of the last
//! completed iteration wins over a partial one.

use std::time::{Duration, Instant};

use log::{debug, trace};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::transposition_table::{BoundType, TranspositionTable, DEFAULT_TABLE_CAPACITY};
use super::{Evaluator, GameMove, MoveCollection, MoveGenerator, MoveOrderer, SearchState};

/// Larger than any score an evaluator may return.
pub const INF: i16 = i16::MAX;

/// Plies (counted from the root) at which the deadline is polled.
const DEADLINE_CHECK_MAX_PLY: u8 = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
}

/// Search configuration parameters.
#[derive(Clone, Debug)]
struct SearchConfig {
    depth: u8,
    time_budget: Option<Duration>,
    iterative_deepening: bool,
}

/// Statistics collected during search.
#[derive(Clone, Debug, Default)]
struct SearchStats {
    position_count: usize,
    tt_stores: usize,
    last_score: Option<i16>,
    last_duration: Option<Duration>,
    depth_reached: u8,
    timed_out: bool,
}

/// The outcome of a single call to `alpha_beta_search`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<M> {
    pub best_move: M,
    /// From the point of view of the side to move at the root.
    pub score: i16,
    /// Deepest fully completed iteration; 0 if the budget ran out before the
    /// first root move finished.
    pub depth_reached: u8,
    pub timed_out: bool,
}

pub struct SearchContext<M: Clone> {
    config: SearchConfig,
    stats: SearchStats,
    transposition_table: TranspositionTable<M>,
    deadline: Option<Instant>,
}

impl<M: Clone> SearchContext<M> {
    pub fn new(depth: u8) -> Self {
        Self {
            config: SearchConfig {
                depth,
                time_budget: None,
                iterative_deepening: false,
            },
            stats: SearchStats::default(),
            transposition_table: TranspositionTable::new(DEFAULT_TABLE_CAPACITY),
            deadline: None,
        }
    }

    pub fn with_time_budget(mut self, time_budget: Option<Duration>) -> Self {
        self.config.time_budget = time_budget;
        self
    }

    pub fn with_iterative_deepening(mut self, enabled: bool) -> Self {
        self.config.iterative_deepening = enabled;
        self
    }

    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.transposition_table = TranspositionTable::new(capacity);
        self
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    pub fn set_time_budget(&mut self, time_budget: Option<Duration>) {
        self.config.time_budget = time_budget;
    }

    pub fn search_depth(&self) -> u8 {
        self.config.depth
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.config.time_budget
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn last_score(&self) -> Option<i16> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub fn tt_hits(&self) -> usize {
        self.transposition_table.hits()
    }

    pub fn tt_size(&self) -> usize {
        self.transposition_table.size()
    }

    pub fn tt_stores(&self) -> usize {
        self.stats.tt_stores
    }

    /// Clears statistics and the transposition table. Every search starts
    /// from here so repeated searches of the same state agree.
    pub fn reset(&mut self) {
        self.stats = SearchStats::default();
        self.transposition_table.clear();
        self.deadline = None;
    }

    fn begin(&mut self, start: Instant) {
        self.reset();
        self.deadline = self.config.time_budget.map(|budget| start + budget);
    }

    /// Polls the deadline, latching `timed_out` once it has passed.
    fn out_of_time(&mut self) -> bool {
        if !self.stats.timed_out {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stats.timed_out = true;
                }
            }
        }
        self.stats.timed_out
    }

    fn store(
        &mut self,
        hash: u64,
        score: i16,
        depth: u8,
        ply: u8,
        bound: BoundType,
        best_move: Option<M>,
    ) {
        self.stats.tt_stores += 1;
        self.transposition_table
            .store(hash, score, depth, ply, bound, best_move);
    }
}

/// Moves `target` to the front of `moves`, keeping the rest in order.
fn move_to_front<M: PartialEq>(moves: &mut [M], target: &M) {
    if let Some(pos) = moves.iter().position(|m| m == target) {
        if pos > 0 {
            moves[0..=pos].rotate_right(1);
        }
    }
}

/// Searches for the best move for the side to move in `state`.
///
/// # Returns
///
/// - `Ok(outcome)` - The best move found; on timeout, the best move among the
///   root moves searched so far (or the first ordered move if none finished)
/// - `Err(SearchError::DepthTooLow)` - If search depth is < 1
/// - `Err(SearchError::NoAvailableMoves)` - If no legal moves available
#[must_use = "search returns the best move found"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta_search<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchOutcome<G::Move>, SearchError>
where
    S: SearchState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let target_depth = context.search_depth();
    debug!("alpha-beta search depth: {}", target_depth);

    if target_depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    let start = Instant::now();
    context.begin(start);
    context
        .transposition_table
        .set_mate_threshold(evaluator.mate_threshold());

    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }
    move_orderer.order_moves(candidates.as_mut(), state);

    let first_depth = if context.config.iterative_deepening {
        1
    } else {
        target_depth
    };

    let mut completed: Option<(G::Move, i16)> = None;
    let mut partial: Option<(G::Move, i16)> = None;
    let mut depth_reached = 0;

    for depth in first_depth..=target_depth {
        if let Some((ref previous_best, _)) = completed {
            move_to_front(candidates.as_mut(), previous_best);
        }

        let (best, finished) = search_root(
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            candidates.as_ref(),
            depth,
        );

        if finished {
            debug!("completed depth {} with {:?}", depth, best);
            completed = best;
            depth_reached = depth;
        } else {
            debug!("search budget exhausted during depth {}", depth);
            partial = best;
            break;
        }
    }

    let (best_move, score) = match completed.or(partial) {
        Some(result) => result,
        None => {
            let fallback = candidates.as_ref()[0].clone();
            (fallback, evaluator.evaluate(state, 0))
        }
    };

    let duration = start.elapsed();
    context.stats.last_score = Some(score);
    context.stats.last_duration = Some(duration);
    context.stats.depth_reached = depth_reached;

    Ok(SearchOutcome {
        best_move,
        score,
        depth_reached,
        timed_out: context.stats.timed_out,
    })
}

/// Scores every root move at `depth`. Returns the best fully searched move
/// and whether all root moves were searched.
fn search_root<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    candidates: &[G::Move],
    depth: u8,
) -> (Option<(G::Move, i16)>, bool)
where
    S: SearchState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let mut alpha = -INF;
    let beta = INF;
    let mut best: Option<(G::Move, i16)> = None;

    for game_move in candidates {
        if context.out_of_time() {
            return (best, false);
        }

        let child = game_move
            .apply(state)
            .expect("move application should succeed in search");
        let score = -alpha_beta_negamax(
            context,
            &child,
            move_generator,
            evaluator,
            move_orderer,
            depth - 1,
            1,
            -beta,
            -alpha,
        );

        // The subtree was cut short, so its score means nothing.
        if context.stats.timed_out {
            return (best, false);
        }

        trace!("root move {:?} scored {}", game_move, score);

        let improves = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if improves {
            best = Some((game_move.clone(), score));
        }
        alpha = alpha.max(score);
    }

    if let Some((ref best_move, best_score)) = best {
        context.store(
            state.position_hash(),
            best_score,
            depth,
            0,
            BoundType::Exact,
            Some(best_move.clone()),
        );
    }

    (best, true)
}

#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn alpha_beta_negamax<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    ply: u8,
    mut alpha: i16,
    beta: i16,
) -> i16
where
    S: SearchState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.stats.position_count += 1;

    if ply <= DEADLINE_CHECK_MAX_PLY && context.out_of_time() {
        return 0;
    }

    let hash = state.position_hash();
    let (cutoff, tt_move) = context
        .transposition_table
        .probe_with_move(hash, depth, ply, alpha, beta);
    if let Some(score) = cutoff {
        return score;
    }

    if depth == 0 {
        return evaluator.evaluate(state, ply);
    }

    let mut moves = move_generator.generate_moves(state);
    if moves.is_empty() {
        return evaluator.evaluate(state, ply);
    }

    move_orderer.order_moves(moves.as_mut(), state);
    if let Some(ref tt_move) = tt_move {
        move_to_front(moves.as_mut(), tt_move);
    }

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut best_move = None;

    for game_move in moves.as_ref() {
        let child = game_move
            .apply(state)
            .expect("move application should succeed in search");
        let score = -alpha_beta_negamax(
            context,
            &child,
            move_generator,
            evaluator,
            move_orderer,
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
        );

        if context.stats.timed_out {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(game_move.clone());
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    let bound = if best_score <= original_alpha {
        BoundType::Upper
    } else if best_score >= beta {
        BoundType::Lower
    } else {
        BoundType::Exact
    };
    context.store(hash, best_score, depth, ply, bound, best_move);

    best_score
}
