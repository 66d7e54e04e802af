//! Bridge to the `shakmaty` rules library.
//!
//! All move legality, check detection and end-of-game predicates live behind
//! [`RulesBoard`]. The rest of the crate talks in plain `(x, y)` board
//! coordinates and, apart from the opaque [`Move`] tokens the board hands
//! out and takes back, never touches `shakmaty` types directly; the board
//! entity grid stays a dumb mirror of whatever this module reports.

pub mod board;

pub use board::{algebraic, PlayedMove, RulesBoard, RulesError, RulesResult};
pub use shakmaty::Move;
