use cozy_chess::{Board, Color, Piece};
use serde::{Deserialize, Serialize};

use crate::board::{Outcome, Position};
use crate::search::node::Node;

/// Evaluation score: positive favours White, negative favours Black.
pub type Score = i32;

pub const WIN_SCORE: Score = 1000;
pub const DRAW_SCORE: Score = 0;
pub const NEAR_WIN_PERCENT: Score = 95;

/// Upper bound on the magnitude of any heuristic score. The near-win band
/// must lie above it or the early cutoff would fire on ordinary positions.
pub const MAX_HEURISTIC: Score = 500;

const PAWN: Score = 1;
const KNIGHT: Score = 3;
const BISHOP: Score = 3;
const ROOK: Score = 5;
const QUEEN: Score = 9;

/// Static scorer for non-terminal leaves. Implementations must be pure,
/// flip sign when colours are swapped, and stay well inside the near-win band.
pub trait Evaluator {
    fn name(&self) -> &'static str;
    fn score(&self, pos: &Position) -> Score;
}

/// Terminal scores and the early-cutoff band derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoring {
    pub win_score: Score,
    pub near_win_percent: Score,
}

impl Default for Scoring {
    fn default() -> Self { Self { win_score: WIN_SCORE, near_win_percent: NEAR_WIN_PERCENT } }
}

impl Scoring {
    /// Scores beyond this are treated as won and end a sibling scan early.
    pub fn near_win(&self) -> Score {
        (i64::from(self.win_score) * i64::from(self.near_win_percent) / 100) as Score
    }

    pub fn terminal(&self, outcome: Outcome) -> Score {
        match outcome {
            Outcome::WhiteWins => self.win_score,
            Outcome::BlackWins => self.win_score.saturating_neg(),
            Outcome::Draw => DRAW_SCORE,
        }
    }
}

/// Leaf evaluation: terminal nodes get the fixed win/draw scores, everything
/// else goes through the heuristic.
pub fn evaluate(node: &Node, evaluator: &dyn Evaluator, scoring: &Scoring) -> Score {
    match node.outcome() {
        Some(outcome) => scoring.terminal(outcome),
        None => evaluator.score(node.position()),
    }
}

fn count_piece(board: &Board, color: Color, piece: Piece) -> Score {
    let bb = board.colors(color) & board.pieces(piece);
    bb.into_iter().count() as Score
}

/// Material balance in pawns (P=1, N=3, B=3, R=5, Q=9).
#[derive(Clone, Copy, Debug, Default)]
pub struct Material;

impl Evaluator for Material {
    fn name(&self) -> &'static str { "material" }

    fn score(&self, pos: &Position) -> Score {
        let board = pos.board();
        let w = Color::White;
        let b = Color::Black;
        (count_piece(board, w, Piece::Pawn) - count_piece(board, b, Piece::Pawn)) * PAWN
            + (count_piece(board, w, Piece::Knight) - count_piece(board, b, Piece::Knight)) * KNIGHT
            + (count_piece(board, w, Piece::Bishop) - count_piece(board, b, Piece::Bishop)) * BISHOP
            + (count_piece(board, w, Piece::Rook) - count_piece(board, b, Piece::Rook)) * ROOK
            + (count_piece(board, w, Piece::Queen) - count_piece(board, b, Piece::Queen)) * QUEEN
    }
}

/// Legal-move count of White minus that of Black. The side not to move is
/// counted after a null move; while in check that count is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mobility;

impl Evaluator for Mobility {
    fn name(&self) -> &'static str { "mobility" }

    fn score(&self, pos: &Position) -> Score {
        let own = pos.legal_moves_count() as Score;
        let other = pos.null_move().map_or(0, |p| p.legal_moves_count() as Score);
        if pos.side_to_move() == Color::White { own - other } else { other - own }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EvalKind {
    #[default]
    Material,
    Mobility,
}

impl EvalKind {
    pub fn evaluator(self) -> Box<dyn Evaluator> {
        match self {
            EvalKind::Material => Box::new(Material),
            EvalKind::Mobility => Box::new(Mobility),
        }
    }
}
