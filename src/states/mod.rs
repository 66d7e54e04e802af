//! State-specific plugins
//!
//! Each application state has its own plugin:
//! - OnEnter: setup systems (decor, camera placement)
//! - Update / EguiPrimaryContextPass: state-specific systems gated with
//!   `run_if(in_state(...))`
//! - OnExit: cleanup (automatic via `DespawnOnExit`)
//!
//! `main_menu` owns the Root and ModeSelect screens, `settings` the
//! preferences screen. The InGame state is handled by `GamePlugin` plus
//! the rendering and UI plugins.

pub mod main_menu;
pub mod settings;

pub use main_menu::MainMenuPlugin;
pub use settings::SettingsPlugin;
