//! Core module: state machine and application infrastructure
//!
//! # Architecture
//!
//! - [`GameState`] drives the three application modes (menu, settings,
//!   gameplay); [`MenuState`] is a sub-state for menu navigation
//! - [`CorePlugin`] wires states, cleanup, settings persistence, the
//!   persistent camera, and the crash-reporting panic hook
//! - [`GameSettings`] / [`GameStatistics`] are the cross-state resources
//!
//! # Entity lifetimes
//!
//! State-scoped entities carry [`DespawnOnExit`]; the cleanup systems in
//! [`state_lifecycle`] despawn them. Game entities are scoped to `InGame`
//! but are only despawned when the main menu is re-entered, so a game can
//! visit the settings screen and come back intact.

pub mod camera;
pub mod error;
pub mod plugin;
pub mod resources;
pub mod settings_persistence;
pub mod state_lifecycle;
pub mod states;
pub mod window_config;

pub use plugin::CorePlugin;
pub use resources::*;
pub use states::*;
pub use window_config::WindowConfig;
