use crate::search::node::Node;

/// Ordering bucket of the move that produced a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveClass {
    Check,
    Capture,
    Quiet,
}

pub fn classify(node: &Node) -> MoveClass {
    if node.gives_check() {
        MoveClass::Check
    } else if node.is_capture() {
        MoveClass::Capture
    } else {
        MoveClass::Quiet
    }
}

/// Checks first, then captures, then quiet moves. Generation order is kept
/// inside each bucket.
pub fn order(children: Vec<Node>) -> Vec<Node> {
    let mut checks = Vec::new();
    let mut captures = Vec::new();
    let mut quiet = Vec::with_capacity(children.len());
    for child in children {
        match classify(&child) {
            MoveClass::Check => checks.push(child),
            MoveClass::Capture => captures.push(child),
            MoveClass::Quiet => quiet.push(child),
        }
    }
    checks.append(&mut captures);
    checks.append(&mut quiet);
    checks
}
