pub mod eval;
pub mod node;
pub mod order;
pub mod tree;

pub use eval::{EvalKind, Evaluator, Score, Scoring, WIN_SCORE};
pub use node::Node;
pub use tree::{SearchStats, Tree};
