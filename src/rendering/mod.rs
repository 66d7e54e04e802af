//! Scene rendering: the board grid, the pieces, and square highlights.
//!
//! Everything here is a dumb mirror of the rules board. Systems in this
//! module read game resources and draw; the only thing they ever send
//! back is a `BoardClicked` message from the click observers.

pub mod board;
pub mod effects;
pub mod pieces;
pub mod utils;

pub use board::BoardPlugin;
pub use pieces::PiecePlugin;
