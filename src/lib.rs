//! Tabia: a graphical chess board
//!
//! Bevy application organized as plugins:
//! - [`core`]: states, settings persistence, camera, crash reporting
//! - [`game`]: rules bridge, move execution, undo/redo, engine opponent
//! - [`rendering`]: board, pieces, and board-effect entities
//! - [`ui`]: in-game HUD, dialogs, and the Escape overlay
//! - [`states`]: main menu and settings screens

pub mod core;
pub mod game;
pub mod rendering;
pub mod states;
pub mod ui;
