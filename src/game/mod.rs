//! Gameplay: rules bridge, move execution, engine opponent, session state.
//!
//! # How a move happens
//!
//! 1. an observer on a square or piece emits a [`events::BoardClicked`]
//! 2. [`systems::handle_board_clicks`] runs the selection machine and,
//!    for a legal target, resolves a concrete move
//! 3. [`systems::execute_move`] plays it on the [`rules::RulesBoard`],
//!    mirrors the result onto the entities, and announces
//!    [`events::MoveApplied`]
//! 4. the verdict scan, the journal, and the engine scheduler react
//!
//! Promotions detour through [`resources::PendingPromotion`] and the
//! dialog; engine replies and hints arrive on the compute pool and are
//! validated like any other input before they touch the board.

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod rules;
pub mod system_sets;
pub mod systems;

pub use error::{GameError, GameResult};
pub use plugin::GamePlugin;
pub use system_sets::GameSystems;
