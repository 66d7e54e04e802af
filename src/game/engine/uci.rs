//! Child-process UCI engine wrapper.
//!
//! Speaks just enough UCI for this application: the identification
//! handshake, `Skill Level`, `position fen` + `go movetime`, and
//! `bestmove` parsing. Queries block until the engine answers; callers
//! run them on the async compute pool, never on the schedule.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use bevy::log::{debug, info};
use thiserror::Error;

use crate::rendering::pieces::PieceKind;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine binary could not be started at all.
    #[error("could not launch engine '{path}': {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine process closed its side of a pipe.
    #[error("engine closed its pipe")]
    PipeClosed,

    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The engine answered, but not with anything this crate can use.
    #[error("engine sent an unusable reply: {reply}")]
    MalformedReply { reply: String },

    /// A previous engine task panicked while holding the lock.
    #[error("engine worker poisoned by an earlier panic")]
    WorkerPoisoned,
}

/// A move as the engine names it: coordinates plus an optional
/// promotion piece, e.g. `e7e8q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    pub from: (u8, u8),
    pub to: (u8, u8),
    pub promote_to: Option<PieceKind>,
}

/// A running UCI engine process.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Starts the engine, runs the UCI handshake, and applies the skill
    /// option. Blocks until the engine reports ready.
    pub fn launch(path: &str, skill: u8) -> Result<Self, EngineError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Launch {
                path: path.to_string(),
                source,
            })?;
        let stdin = child.stdin.take().ok_or(EngineError::PipeClosed)?;
        let stdout = child.stdout.take().ok_or(EngineError::PipeClosed)?;

        let mut engine = Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
        };
        engine.send("uci")?;
        engine.read_until("uciok")?;
        // Stockfish convention; engines without the option ignore it.
        engine.send(&format!(
            "setoption name Skill Level value {}",
            skill.min(20)
        ))?;
        engine.send("isready")?;
        engine.read_until("readyok")?;
        info!("[ENGINE] '{path}' ready, skill level {}", skill.min(20));
        Ok(engine)
    }

    /// One search: position in, best move out. Blocks for roughly
    /// `movetime_ms`.
    pub fn bestmove(&mut self, fen: &str, movetime_ms: u64) -> Result<EngineMove, EngineError> {
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {movetime_ms}"))?;
        loop {
            let line = self.read_line()?;
            if let Some(reply) = line.strip_prefix("bestmove ") {
                return parse_bestmove(reply);
            }
        }
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        debug!("[ENGINE] >> {line}");
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            return Err(EngineError::PipeClosed);
        }
        Ok(buffer.trim().to_string())
    }

    /// Discards engine chatter until a line starting with `token`.
    fn read_until(&mut self, token: &str) -> Result<String, EngineError> {
        loop {
            let line = self.read_line()?;
            if line.starts_with(token) {
                return Ok(line);
            }
        }
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("quit");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Parses the payload of a `bestmove` line (`e2e4`, `e7e8q`,
/// `e2e4 ponder e7e5`).
pub fn parse_bestmove(reply: &str) -> Result<EngineMove, EngineError> {
    let token = reply.split_whitespace().next().unwrap_or_default();
    if token == "(none)" || token == "0000" || !token.is_ascii() || token.len() < 4 {
        return Err(EngineError::MalformedReply {
            reply: reply.to_string(),
        });
    }
    let malformed = || EngineError::MalformedReply {
        reply: reply.to_string(),
    };
    let from = parse_square(&token[0..2]).ok_or_else(malformed)?;
    let to = parse_square(&token[2..4]).ok_or_else(malformed)?;
    let promote_to = match token.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return Err(malformed()),
    };
    Ok(EngineMove {
        from,
        to,
        promote_to,
    })
}

/// `e4` → board coordinates (rank index, file index).
pub fn parse_square(text: &str) -> Option<(u8, u8)> {
    let mut bytes = text.bytes();
    let file = bytes.next()?;
    let rank = bytes.next()?;
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some((rank - b'1', file - b'a'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_parse_to_rank_file_coordinates() {
        assert_eq!(parse_square("a1"), Some((0, 0)));
        assert_eq!(parse_square("e2"), Some((1, 4)));
        assert_eq!(parse_square("h8"), Some((7, 7)));
    }

    #[test]
    fn junk_squares_are_rejected() {
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square(""), None);
        assert_eq!(parse_square("a"), None);
    }

    #[test]
    fn plain_bestmove_parses() {
        let mv = parse_bestmove("e2e4").unwrap();
        assert_eq!(mv.from, (1, 4));
        assert_eq!(mv.to, (3, 4));
        assert_eq!(mv.promote_to, None);
    }

    #[test]
    fn promotion_suffix_parses() {
        let mv = parse_bestmove("e7e8q").unwrap();
        assert_eq!(mv.from, (6, 4));
        assert_eq!(mv.to, (7, 4));
        assert_eq!(mv.promote_to, Some(PieceKind::Queen));

        let under = parse_bestmove("a2a1n").unwrap();
        assert_eq!(under.promote_to, Some(PieceKind::Knight));
    }

    #[test]
    fn ponder_tail_is_ignored() {
        let mv = parse_bestmove("g8f6 ponder d2d4").unwrap();
        assert_eq!(mv.from, (7, 6));
        assert_eq!(mv.to, (5, 5));
    }

    #[test]
    fn none_and_garbage_replies_error() {
        assert!(parse_bestmove("(none)").is_err());
        assert!(parse_bestmove("0000").is_err());
        assert!(parse_bestmove("e2").is_err());
        assert!(parse_bestmove("e2e4x").is_err());
        assert!(parse_bestmove("").is_err());
    }
}
