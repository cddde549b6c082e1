use std::io::{self, BufRead, Write};

use log::warn;

use cozy_chess::Move;

use crate::board::cozy::Position;
use crate::error::SearchError;
use crate::strategy::{Clock, SearchStrategy};

/// Minimal UCI host around a strategy. Responses go to `out`.
pub struct UciEngine<W: Write> {
    pos: Position,
    strategy: Box<dyn SearchStrategy>,
    out: W,
}

impl<W: Write> UciEngine<W> {
    pub fn new(strategy: Box<dyn SearchStrategy>, out: W) -> Self {
        Self { pos: Position::startpos(), strategy, out }
    }

    pub fn position(&self) -> &Position { &self.pos }

    pub fn into_output(self) -> W { self.out }

    fn cmd_uci(&mut self) -> io::Result<()> {
        writeln!(self.out, "id name treebot {}", self.strategy.name())?;
        writeln!(self.out, "id author PieBot Team")?;
        writeln!(self.out, "uciok")
    }

    fn cmd_isready(&mut self) -> io::Result<()> { writeln!(self.out, "readyok") }

    fn cmd_ucinewgame(&mut self) {
        self.pos = Position::startpos();
        self.strategy.on_game_start();
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace().peekable();
        let base = match tokens.next() {
            Some("startpos") => Ok(Position::startpos()),
            Some("fen") => {
                // Up to 6 fields; GUIs may omit the move counters.
                let mut fen_fields: Vec<&str> = Vec::with_capacity(6);
                while let Some(field) = tokens.next_if(|t| *t != "moves") {
                    fen_fields.push(field);
                }
                if fen_fields.len() == 4 { fen_fields.extend(["0", "1"]); }
                Position::from_fen(&fen_fields.join(" "))
            }
            _ => return,
        };
        let moves: Vec<&str> = match tokens.next() {
            Some("moves") => tokens.collect(),
            _ => Vec::new(),
        };
        match base.and_then(|p| Self::play_moves(p, &moves)) {
            Ok((p, last)) => {
                self.pos = p;
                if let Some(mv) = last { self.strategy.on_move_played(mv); }
            }
            Err(e) => warn!("ignoring position command: {e}"),
        }
    }

    /// Plays `moves` from `pos`, returning the final position and the last move.
    fn play_moves(mut pos: Position, moves: &[&str]) -> Result<(Position, Option<Move>), SearchError> {
        let mut last = None;
        for m in moves {
            let mv = pos.parse_move(m)?;
            pos = pos.apply(mv)?;
            last = Some(mv);
        }
        Ok((pos, last))
    }

    fn cmd_go(&mut self, args: &str) -> io::Result<()> {
        let mut clock = Clock::default();
        let mut ponder = false;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            let mut value = || tokens.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
            match tok {
                "wtime" => clock.white_ms = value(),
                "btime" => clock.black_ms = value(),
                "winc" => clock.white_inc_ms = value(),
                "binc" => clock.black_inc_ms = value(),
                "ponder" => ponder = true,
                _ => {}
            }
        }
        match self.strategy.choose_move(&self.pos, &clock, ponder, false) {
            Ok(best) => {
                let uci = self.pos.move_to_uci(best);
                writeln!(self.out, "bestmove {}", uci)
            }
            Err(e) => {
                warn!("{e}");
                writeln!(self.out, "bestmove 0000")
            }
        }
    }

    /// Handles one input line. Returns `false` once the host asked to quit.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() { return Ok(true); }
        match line {
            "uci" => self.cmd_uci()?,
            "isready" => self.cmd_isready()?,
            "ucinewgame" => self.cmd_ucinewgame(),
            "quit" => {
                self.strategy.on_game_end(None);
                return Ok(false);
            }
            "go" => self.cmd_go("")?,
            _ => {
                if let Some(rest) = line.strip_prefix("position ") {
                    self.cmd_position(rest);
                } else if let Some(rest) = line.strip_prefix("go ") {
                    self.cmd_go(rest)?;
                }
            }
        }
        self.out.flush()?;
        Ok(true)
    }

    pub fn run_loop<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?)? { break; }
        }
        Ok(())
    }
}
