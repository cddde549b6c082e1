// Fixed-depth alpha-beta tree search on top of cozy-chess
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;
pub mod strategy;
pub mod uci;

pub use board::{Outcome, Position};
pub use config::EngineConfig;
pub use error::SearchError;
pub use strategy::{build_strategy, Clock, Minimax, RandomMove, SearchStrategy};
