use thiserror::Error;

/// Failures surfaced by the position adapter and the search strategies.
///
/// None of these are retried: each one is either a contract violation by the
/// caller or a request made on a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    #[error("no legal move in position {fen}")]
    NoLegalMove { fen: String },

    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}
