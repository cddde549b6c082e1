use cozy_chess::{Board as CozyBoard, Color, File, GameStatus, Move, Piece, Square};

use crate::error::SearchError;

/// Final result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Thin adapter over `cozy_chess::Board`. Applying a move never mutates
/// `self`; it returns the resulting position.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, SearchError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b })
            .map_err(|e| SearchError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn apply(&self, mv: Move) -> Result<Position, SearchError> {
        if !self.board.is_legal(mv) {
            return Err(SearchError::IllegalMove { mv: format!("{}", mv), fen: self.fen() });
        }
        let mut board = self.board.clone();
        board.play(mv);
        Ok(Self { board })
    }

    /// Standard UCI text. cozy-chess encodes castling as king-takes-rook
    /// (`e1h1`); this prints the king's destination instead (`e1g1`).
    pub fn move_to_uci(&self, mv: Move) -> String {
        let castles = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.colors(self.side_to_move()).has(mv.to);
        if castles {
            let file = if mv.to.file() as u8 > mv.from.file() as u8 { File::G } else { File::C };
            return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
        }
        format!("{}", mv)
    }

    /// Finds the legal move whose UCI text is `mv_uci`. Both castling
    /// notations are accepted.
    pub fn parse_move(&self, mv_uci: &str) -> Result<Move, SearchError> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == mv_uci || self.move_to_uci(m) == mv_uci { found = Some(m); break; }
            }
            found.is_some()
        });
        found.ok_or_else(|| SearchError::IllegalMove { mv: mv_uci.to_string(), fen: self.fen() })
    }

    /// True when the side to move is in check.
    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_capture(&self, mv: Move) -> bool {
        let opp = if self.side_to_move() == Color::White { Color::Black } else { Color::White };
        if self.board.colors(opp).has(mv.to) { return true; }
        // En passant lands on an empty square.
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            GameStatus::Ongoing => None,
            GameStatus::Drawn => Some(Outcome::Draw),
            // The side to move has been mated.
            GameStatus::Won => Some(if self.side_to_move() == Color::White {
                Outcome::BlackWins
            } else {
                Outcome::WhiteWins
            }),
        }
    }

    /// Passes the turn. `None` while in check.
    pub fn null_move(&self) -> Option<Position> {
        self.board.null_move().map(|board| Self { board })
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, SearchError> {
        Self::startpos().play_sequence(moves)
    }

    pub fn from_fen_and_moves(fen: &str, moves: &[String]) -> Result<Self, SearchError> {
        Self::from_fen(fen)?.play_sequence(moves)
    }

    fn play_sequence(self, moves: &[String]) -> Result<Self, SearchError> {
        let mut pos = self;
        for m in moves {
            let mv = pos.parse_move(m)?;
            pos = pos.apply(mv)?;
        }
        Ok(pos)
    }
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}
