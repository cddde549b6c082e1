use crate::board::Position;
use crate::error::SearchError;

/// Leaf count of the legal move tree, walked through the position adapter.
pub fn perft(pos: &Position, depth: u32) -> Result<u64, SearchError> {
    if depth == 0 { return Ok(1); }
    let moves = pos.legal_moves();
    if depth == 1 { return Ok(moves.len() as u64); }
    let mut nodes = 0u64;
    for m in moves {
        nodes += perft(&pos.apply(m)?, depth - 1)?;
    }
    Ok(nodes)
}
