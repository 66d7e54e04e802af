//! Gameplay systems.
//!
//! # Layout
//!
//! - [`input`]: click observers, the selection state machine, keyboard
//!   shortcuts
//! - [`movement`]: [`movement::MoveExecution`] and the one function that
//!   plays a move and mirrors it onto the scene
//! - [`promotion`]: resolves the promotion dialog's choice
//! - [`undo_redo`]: snapshot-based take-back and replay
//! - [`verdict`]: end-of-game detection, resignation, statistics
//! - [`session`]: session reset on entry and on restart
//! - [`visual`]: piece glide animation and capture fades

pub mod input;
pub mod movement;
pub mod promotion;
pub mod session;
pub mod undo_redo;
pub mod verdict;
pub mod visual;

pub use input::{handle_board_clicks, keyboard_shortcuts, on_piece_clicked, on_square_clicked};
pub use movement::{execute_move, MoveExecution};
pub use promotion::resolve_promotion_choice;
pub use session::{handle_restart_requests, start_game_session};
pub use undo_redo::{handle_redo_requests, handle_undo_requests};
pub use verdict::{handle_resignations, position_verdict, scan_for_verdict};
pub use visual::{animate_piece_movement, fade_captured_pieces};
