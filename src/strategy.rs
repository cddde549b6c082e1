//! Move-selection strategies and the contract a game host drives them through.

use cozy_chess::{Color, Move};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Outcome, Position};
use crate::config::{EngineConfig, StrategyKind};
use crate::error::SearchError;
use crate::search::eval::{Evaluator, Scoring};
use crate::search::tree::{SearchStats, Tree};

/// Remaining clock time per side, in milliseconds.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub white_ms: u64,
    pub black_ms: u64,
    pub white_inc_ms: u64,
    pub black_inc_ms: u64,
}

impl Clock {
    pub fn time_left(&self, color: Color) -> u64 {
        if color == Color::White { self.white_ms } else { self.black_ms }
    }
}

/// A move picker invoked once per turn by a game host.
///
/// `choose_move` has no default body: a strategy that cannot pick moves does
/// not compile. The lifecycle hooks are optional notifications and do nothing
/// unless overridden.
pub trait SearchStrategy {
    fn name(&self) -> &str;

    /// Picks a move for the side to move in `pos`. Fails with
    /// [`SearchError::NoLegalMove`] when the game is already over.
    fn choose_move(&mut self, pos: &Position, clock: &Clock, ponder: bool, draw_offered: bool) -> Result<Move, SearchError>;

    fn on_game_start(&mut self) {}
    fn on_move_played(&mut self, _mv: Move) {}
    fn on_game_end(&mut self, _outcome: Option<Outcome>) {}
}

fn ensure_playable(pos: &Position) -> Result<(), SearchError> {
    if pos.outcome().is_some() {
        return Err(SearchError::NoLegalMove { fen: pos.fen() });
    }
    Ok(())
}

/// Fixed-depth alpha-beta over a tree rebuilt from scratch on every call.
pub struct Minimax {
    depth: u32,
    evaluator: Box<dyn Evaluator>,
    scoring: Scoring,
    last_stats: Option<SearchStats>,
}

impl Minimax {
    /// `depth` is clamped to at least one ply so a move is always produced.
    pub fn new(depth: u32, evaluator: Box<dyn Evaluator>, scoring: Scoring) -> Self {
        Self { depth: depth.max(1), evaluator, scoring, last_stats: None }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.depth, config.eval.evaluator(), config.scoring())
    }

    pub fn depth(&self) -> u32 { self.depth }

    /// Counters of the most recent `choose_move` call.
    pub fn last_stats(&self) -> Option<SearchStats> { self.last_stats }
}

impl SearchStrategy for Minimax {
    fn name(&self) -> &str { "Minimax" }

    fn choose_move(&mut self, pos: &Position, clock: &Clock, ponder: bool, draw_offered: bool) -> Result<Move, SearchError> {
        ensure_playable(pos)?;
        // Fixed depth: the clock and flags do not influence the search.
        debug!(
            "time left {} ms, ponder {}, draw offered {}",
            clock.time_left(pos.side_to_move()), ponder, draw_offered
        );

        let mut tree = Tree::build(pos.clone(), self.depth, self.evaluator.as_ref(), self.scoring)?;
        tree.search(self.depth)?;
        let stats = tree.stats();
        self.last_stats = Some(stats);
        let best = tree.best_move().ok_or_else(|| SearchError::NoLegalMove { fen: pos.fen() })?;
        info!(
            "{} depth {} ({}): nodes {} leaves {} eval {:?} best {}",
            self.name(), self.depth, self.evaluator.name(),
            stats.total_nodes, stats.evaluated_leaves, stats.root_value, best
        );
        Ok(best)
    }
}

/// Uniformly random legal move from a seeded generator.
pub struct RandomMove {
    rng: SmallRng,
}

impl RandomMove {
    pub fn new(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }
}

impl SearchStrategy for RandomMove {
    fn name(&self) -> &str { "RandomMove" }

    fn choose_move(&mut self, pos: &Position, _clock: &Clock, _ponder: bool, _draw_offered: bool) -> Result<Move, SearchError> {
        ensure_playable(pos)?;
        let moves = pos.legal_moves();
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| SearchError::NoLegalMove { fen: pos.fen() })
    }
}

pub fn build_strategy(config: &EngineConfig) -> Box<dyn SearchStrategy> {
    match config.strategy {
        StrategyKind::Minimax => Box::new(Minimax::from_config(config)),
        StrategyKind::Random => Box::new(RandomMove::new(config.seed)),
    }
}
