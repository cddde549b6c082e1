use cozy_chess::{Color, Move};

use crate::board::{Outcome, Position};
use crate::error::SearchError;
use crate::search::eval::Score;

/// Value and best move written by one search pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRecord {
    pub pass: u32,
    pub value: Score,
    pub best_move: Option<Move>,
}

/// One vertex of the search tree. Owns its position and its subtree.
#[derive(Clone, Debug)]
pub struct Node {
    position: Position,
    incoming_move: Option<Move>,
    children: Vec<Node>,
    outcome: Option<Outcome>,
    gives_check: bool,
    is_capture: bool,
    record: Option<SearchRecord>,
}

impl Node {
    pub fn root(position: Position) -> Self {
        let outcome = position.outcome();
        Self {
            position,
            incoming_move: None,
            children: Vec::new(),
            outcome,
            gives_check: false,
            is_capture: false,
            record: None,
        }
    }

    /// Builds the child reached from `parent` by `mv`, classifying the move on the way.
    pub fn child(parent: &Position, mv: Move) -> Result<Self, SearchError> {
        let is_capture = parent.is_capture(mv);
        let position = parent.apply(mv)?;
        let gives_check = position.is_check();
        let outcome = position.outcome();
        Ok(Self {
            position,
            incoming_move: Some(mv),
            children: Vec::new(),
            outcome,
            gives_check,
            is_capture,
            record: None,
        })
    }

    pub fn position(&self) -> &Position { &self.position }
    pub fn incoming_move(&self) -> Option<Move> { self.incoming_move }
    pub fn children(&self) -> &[Node] { &self.children }
    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> { &mut self.children }
    pub fn outcome(&self) -> Option<Outcome> { self.outcome }
    pub fn is_terminal(&self) -> bool { self.outcome.is_some() }
    pub fn is_expanded(&self) -> bool { !self.children.is_empty() }
    pub fn gives_check(&self) -> bool { self.gives_check }
    pub fn is_capture(&self) -> bool { self.is_capture }
    pub fn white_to_move(&self) -> bool { self.position.side_to_move() == Color::White }

    /// The record written by `pass`, if this node was visited in that pass.
    pub fn record(&self, pass: u32) -> Option<SearchRecord> {
        self.record.filter(|r| r.pass == pass)
    }

    pub fn value(&self, pass: u32) -> Option<Score> { self.record(pass).map(|r| r.value) }

    pub fn best_move(&self, pass: u32) -> Option<Move> { self.record(pass).and_then(|r| r.best_move) }

    pub(crate) fn set_record(&mut self, record: SearchRecord) { self.record = Some(record); }

    /// Number of nodes in this subtree, self included.
    pub fn subtree_size(&self) -> u64 {
        1 + self.children.iter().map(Node::subtree_size).sum::<u64>()
    }
}
