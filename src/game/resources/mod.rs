//! Session-scoped resources.
//!
//! Everything here is reset by `start_game_session` when a fresh game
//! begins; a round trip through the settings screen leaves it untouched.

pub mod captured;
pub mod history;
pub mod journal;
pub mod promotion;
pub mod selection;
pub mod turn;
pub mod verdict;

pub use captured::CapturedPieces;
pub use history::{MoveHistory, MoveRecord, SnapshotStacks};
pub use journal::GameJournal;
pub use promotion::PendingPromotion;
pub use selection::Selection;
pub use turn::CurrentTurn;
pub use verdict::{GameVerdict, VerdictDialog};
