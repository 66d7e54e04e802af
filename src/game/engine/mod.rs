//! Computer opponent and hints via an external UCI engine.
//!
//! # Architecture
//!
//! The engine is a child process speaking UCI on stdin/stdout, wrapped in
//! [`uci::UciEngine`] and shared through an `Arc<Mutex<_>>` handle. All
//! talking happens on the async compute pool: a system spawns a task that
//! locks the engine, runs one blocking query, and returns; a paired
//! polling system applies the result on the main thread. The schedule
//! never blocks on the engine.
//!
//! # Degraded mode
//!
//! A missing or broken engine binary is not an error state the player has
//! to fix before playing: the computer opponent falls back to uniformly
//! random legal moves and hint requests report that no engine is
//! available. Fixing the path in the settings screen recovers without a
//! restart: the watcher drops the stale handle and the launcher retries.

pub mod resources;
pub mod systems;
pub mod uci;

use bevy::prelude::*;

use crate::core::states::GameState;
use crate::game::system_sets::GameSystems;
pub use resources::{EngineHandle, EngineHint, EngineUnavailable, OpponentMode};
pub use uci::{EngineError, EngineMove, UciEngine};

pub struct EnginePlugin;

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OpponentMode>()
            .init_resource::<EngineHint>()
            .register_type::<OpponentMode>();

        app.add_systems(
            Update,
            (
                systems::launch_engine_if_needed,
                systems::poll_engine_launch,
                systems::watch_engine_settings,
                systems::schedule_engine_move,
                systems::apply_engine_move,
                systems::spawn_hint_task,
                systems::apply_hint,
            )
                .chain()
                .in_set(GameSystems::Execution)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
