//! Move history and the undo/redo snapshot stacks.
//!
//! # Two parallel structures
//!
//! [`SnapshotStacks`] holds opaque position snapshots (text blobs from the
//! rules board) and is the *authority* for undo/redo: restoring a snapshot
//! reproduces the exact position including castling rights, the en passant
//! square, and the halfmove clock.
//!
//! [`MoveHistory`] holds the human-readable record ([`MoveRecord`] with
//! SAN text) shown in the notation panel. On undo a record moves to the
//! `redone` pile so redo can replay it; playing a fresh move clears that
//! pile, because the old future is no longer reachable.
//!
//! The two are always mutated together by the undo/redo systems; nothing
//! else writes them.

use bevy::prelude::*;

use crate::game::rules::PlayedMove;

/// One played move as shown in the notation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Fullmove number the move was played on.
    pub number: u32,
    pub played: PlayedMove,
}

/// The scrollable move list, plus the undone pile for redo.
#[derive(Resource, Default, Debug, Clone)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
    redone: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Appends a freshly played move and forgets any undone future.
    pub fn record(&mut self, number: u32, played: PlayedMove) {
        self.moves.push(MoveRecord { number, played });
        self.redone.clear();
    }

    /// Moves the latest record to the redo pile; returns it.
    pub fn take_back(&mut self) -> Option<MoveRecord> {
        let record = self.moves.pop()?;
        self.redone.push(record.clone());
        Some(record)
    }

    /// Moves the latest undone record back onto the list; returns it.
    pub fn replay(&mut self) -> Option<MoveRecord> {
        let record = self.redone.pop()?;
        self.moves.push(record.clone());
        Some(record)
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.redone.clear();
    }
}

/// Snapshot stacks backing undo and redo.
///
/// An entry on `undo` is the position *before* some played move; an entry
/// on `redo` is a position undo stepped away from.
#[derive(Resource, Default, Debug, Clone)]
pub struct SnapshotStacks {
    undo: Vec<String>,
    redo: Vec<String>,
}

impl SnapshotStacks {
    /// Called when a move is played: remembers the pre-move position and
    /// drops any redo future.
    pub fn push_played(&mut self, before: String) {
        self.undo.push(before);
        self.redo.clear();
    }

    /// Pops the undo target, parking the current position for redo.
    pub fn pop_for_undo(&mut self, current: String) -> Option<String> {
        let target = self.undo.pop()?;
        self.redo.push(current);
        Some(target)
    }

    /// Pops the redo target, parking the current position for undo.
    pub fn pop_for_redo(&mut self, current: String) -> Option<String> {
        let target = self.redo.pop()?;
        self.undo.push(current);
        Some(target)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
