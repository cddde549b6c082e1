use cozy_chess::Move;
use log::debug;

use crate::board::Position;
use crate::error::SearchError;
use crate::search::eval::{evaluate, Evaluator, Score, Scoring};
use crate::search::node::{Node, SearchRecord};
use crate::search::order::order;

const INF: Score = Score::MAX;

/// Counters reported after a search pass.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub total_nodes: u64,
    pub evaluated_leaves: u64,
    pub reached_depth: u32,
    pub root_value: Option<Score>,
}

/// Game tree rooted at one position. Levels are materialised on demand and
/// every `search`/`minimax` call is a new pass whose results are stored
/// tagged with the pass id.
pub struct Tree<'e> {
    root: Node,
    evaluator: &'e dyn Evaluator,
    scoring: Scoring,
    expanded_depth: u32,
    total_nodes: u64,
    evaluated_leaves: u64,
    reached_depth: u32,
    pass: u32,
}

impl<'e> Tree<'e> {
    pub fn new(position: Position, evaluator: &'e dyn Evaluator, scoring: Scoring) -> Self {
        Self {
            root: Node::root(position),
            evaluator,
            scoring,
            expanded_depth: 0,
            total_nodes: 1,
            evaluated_leaves: 0,
            reached_depth: 0,
            pass: 0,
        }
    }

    /// A tree with `depth` levels already materialised.
    pub fn build(position: Position, depth: u32, evaluator: &'e dyn Evaluator, scoring: Scoring) -> Result<Self, SearchError> {
        let mut tree = Self::new(position, evaluator, scoring);
        tree.expand_to_depth(depth)?;
        Ok(tree)
    }

    pub fn root(&self) -> &Node { &self.root }
    pub fn scoring(&self) -> Scoring { self.scoring }
    pub fn expanded_depth(&self) -> u32 { self.expanded_depth }
    pub fn total_nodes(&self) -> u64 { self.total_nodes }
    pub fn evaluated_leaves(&self) -> u64 { self.evaluated_leaves }
    pub fn reached_depth(&self) -> u32 { self.reached_depth }
    pub fn pass(&self) -> u32 { self.pass }

    /// Root value of the latest pass.
    pub fn root_value(&self) -> Option<Score> { self.root.value(self.pass) }

    /// Root best move of the latest pass.
    pub fn best_move(&self) -> Option<Move> { self.root.best_move(self.pass) }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            total_nodes: self.total_nodes,
            evaluated_leaves: self.evaluated_leaves,
            reached_depth: self.reached_depth,
            root_value: self.root_value(),
        }
    }

    /// Best moves of the latest pass, followed from the root.
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut node = &self.root;
        while let Some(mv) = node.best_move(self.pass) {
            pv.push(mv);
            match node.children().iter().find(|c| c.incoming_move() == Some(mv)) {
                Some(child) => node = child,
                None => break,
            }
        }
        pv
    }

    /// Materialises `levels` more levels below the current frontier.
    pub fn expand_to_depth(&mut self, levels: u32) -> Result<(), SearchError> {
        for _ in 0..levels {
            let added = expand_layer(&mut self.root)?;
            self.total_nodes += added;
            self.expanded_depth += 1;
            debug!("expanded level {}: +{} nodes ({} total)", self.expanded_depth, added, self.total_nodes);
        }
        Ok(())
    }

    /// Alpha-beta search to `depth` plies, expanding missing levels first.
    pub fn search(&mut self, depth: u32) -> Result<Score, SearchError> {
        self.run_pass(depth, true)
    }

    /// Plain minimax over the same tree: no window cutoffs, no near-win stop.
    pub fn minimax(&mut self, depth: u32) -> Result<Score, SearchError> {
        self.run_pass(depth, false)
    }

    fn run_pass(&mut self, depth: u32, prune: bool) -> Result<Score, SearchError> {
        if depth > self.expanded_depth {
            self.expand_to_depth(depth - self.expanded_depth)?;
        }
        self.pass += 1;
        let mut ctx = PassCtx {
            evaluator: self.evaluator,
            scoring: self.scoring,
            near_win: self.scoring.near_win(),
            pass: self.pass,
            prune,
            leaves: 0,
            reached: 0,
        };
        let value = ctx.alphabeta(&mut self.root, depth, 0, -INF, INF);
        self.evaluated_leaves = ctx.leaves;
        self.reached_depth = ctx.reached;
        debug!(
            "pass {} depth {} prune {}: value {} best {:?} leaves {} nodes {}",
            self.pass, depth, prune, value,
            self.best_move().map(|m| format!("{}", m)), self.evaluated_leaves, self.total_nodes
        );
        Ok(value)
    }

    /// Makes the child reached by `mv` the new root, keeping its subtree.
    /// Results of earlier passes become unreadable.
    pub fn advance_root(&mut self, mv: Move) -> Result<(), SearchError> {
        if !self.root.is_expanded() && !self.root.is_terminal() {
            self.expand_to_depth(1)?;
        }
        let idx = self.root.children().iter().position(|c| c.incoming_move() == Some(mv));
        let Some(idx) = idx else {
            return Err(SearchError::IllegalMove { mv: format!("{}", mv), fen: self.root.position().fen() });
        };
        let mut children = std::mem::take(self.root.children_mut());
        self.root = children.swap_remove(idx);
        self.expanded_depth = self.expanded_depth.saturating_sub(1);
        self.total_nodes = self.root.subtree_size();
        self.pass += 1;
        Ok(())
    }
}

/// Adds one level under every unexpanded, non-terminal node. Returns the
/// number of nodes created.
fn expand_layer(node: &mut Node) -> Result<u64, SearchError> {
    if node.is_terminal() { return Ok(0); }
    if node.is_expanded() {
        let mut added = 0;
        for child in node.children_mut().iter_mut() {
            added += expand_layer(child)?;
        }
        return Ok(added);
    }
    let children = {
        let parent = node.position();
        parent
            .legal_moves()
            .into_iter()
            .map(|mv| Node::child(parent, mv))
            .collect::<Result<Vec<_>, _>>()?
    };
    let added = children.len() as u64;
    *node.children_mut() = order(children);
    Ok(added)
}

struct PassCtx<'a> {
    evaluator: &'a dyn Evaluator,
    scoring: Scoring,
    near_win: Score,
    pass: u32,
    prune: bool,
    leaves: u64,
    reached: u32,
}

impl PassCtx<'_> {
    fn alphabeta(&mut self, node: &mut Node, depth: u32, ply: u32, mut alpha: Score, mut beta: Score) -> Score {
        if depth == 0 || node.is_terminal() || !node.is_expanded() {
            self.leaves += 1;
            self.reached = self.reached.max(ply);
            let value = evaluate(node, self.evaluator, &self.scoring);
            node.set_record(SearchRecord { pass: self.pass, value, best_move: None });
            return value;
        }

        let maximizing = node.white_to_move();
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move: Option<Move> = None;
        for child in node.children_mut().iter_mut() {
            let v = self.alphabeta(child, depth - 1, ply + 1, alpha, beta);
            if maximizing {
                // Strict comparison: the earliest child wins ties.
                if v > best || best_move.is_none() { best = v; best_move = child.incoming_move(); }
                alpha = alpha.max(best);
                if self.prune && (beta <= alpha || best > self.near_win) { break; }
            } else {
                if v < best || best_move.is_none() { best = v; best_move = child.incoming_move(); }
                beta = beta.min(best);
                if self.prune && (beta <= alpha || best < -self.near_win) { break; }
            }
        }
        node.set_record(SearchRecord { pass: self.pass, value: best, best_move });
        best
    }
}
