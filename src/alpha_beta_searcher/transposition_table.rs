//! Generic transposition table for caching search results.

use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct TTEntry<M: Clone> {
    pub score: i16,
    pub depth: u8,
    pub bound_type: BoundType,
    pub best_move: Option<M>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoundType {
    Exact,
    /// The true score is at least `score` (the node failed high).
    Lower,
    /// The true score is at most `score` (no move raised alpha).
    Upper,
}

pub const DEFAULT_TABLE_CAPACITY: usize = 1 << 20;

/// Owned by exactly one search context; entries from one game must never be
/// visible to another.
pub struct TranspositionTable<M: Clone> {
    table: FxHashMap<u64, TTEntry<M>>,
    capacity: usize,
    mate_threshold: i16,
    hits: usize,
    depth_rejected: usize,
    bound_rejected: usize,
    overwrites: usize,
    dropped: usize,
}

impl<M: Clone> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CAPACITY)
    }
}

impl<M: Clone> TranspositionTable<M> {
    /// `capacity` is the maximum number of entries; once full, new positions
    /// are not stored but existing ones are still replaced.
    pub fn new(capacity: usize) -> Self {
        Self {
            table: FxHashMap::default(),
            capacity: capacity.max(1),
            mate_threshold: i16::MAX,
            hits: 0,
            depth_rejected: 0,
            bound_rejected: 0,
            overwrites: 0,
            dropped: 0,
        }
    }

    /// Scores at or beyond `threshold` in magnitude are mate scores; see
    /// `Evaluator::mate_threshold`.
    pub fn set_mate_threshold(&mut self, threshold: i16) {
        self.mate_threshold = threshold;
    }

    /// `score` is relative to the root and `ply` is the node's distance from
    /// it.
    pub fn store(
        &mut self,
        hash: u64,
        score: i16,
        depth: u8,
        ply: u8,
        bound_type: BoundType,
        best_move: Option<M>,
    ) {
        let entry = TTEntry {
            score: score_to_table(score, ply, self.mate_threshold),
            depth,
            bound_type,
            best_move,
        };

        if let Some(existing) = self.table.get_mut(&hash) {
            self.overwrites += 1;
            *existing = entry;
            return;
        }

        if self.table.len() >= self.capacity {
            self.dropped += 1;
            return;
        }

        self.table.insert(hash, entry);
    }

    /// Probe TT and return both cutoff score (if applicable) and best move (if exists).
    /// An entry only yields a score when it was searched at least as deep as
    /// `depth` and its bound settles the `[alpha, beta]` window.
    pub fn probe_with_move(
        &mut self,
        hash: u64,
        depth: u8,
        ply: u8,
        alpha: i16,
        beta: i16,
    ) -> (Option<i16>, Option<M>) {
        let entry = match self.table.get(&hash) {
            Some(entry) => entry,
            None => return (None, None),
        };
        let best_move = entry.best_move.clone();

        if entry.depth < depth {
            self.depth_rejected += 1;
            return (None, best_move);
        }

        let score = score_from_table(entry.score, ply, self.mate_threshold);
        let usable = match entry.bound_type {
            BoundType::Exact => true,
            BoundType::Lower => score >= beta,
            BoundType::Upper => score <= alpha,
        };

        if usable {
            self.hits += 1;
            (Some(score), best_move)
        } else {
            self.bound_rejected += 1;
            (None, best_move)
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.depth_rejected = 0;
        self.bound_rejected = 0;
        self.overwrites = 0;
        self.dropped = 0;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn depth_rejected(&self) -> usize {
        self.depth_rejected
    }

    pub fn bound_rejected(&self) -> usize {
        self.bound_rejected
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Counts a mate distance from the node at `ply` instead of from the root.
fn score_to_table(score: i16, ply: u8, threshold: i16) -> i16 {
    if score >= threshold {
        score.saturating_add(ply as i16)
    } else if score <= -threshold {
        score.saturating_sub(ply as i16)
    } else {
        score
    }
}

fn score_from_table(score: i16, ply: u8, threshold: i16) -> i16 {
    if score >= threshold {
        score.saturating_sub(ply as i16)
    } else if score <= -threshold {
        score.saturating_add(ply as i16)
    } else {
        score
    }
}
