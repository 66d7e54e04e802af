//! Core plugin: states, settings persistence, camera, crash reporting
//!
//! [`CorePlugin`] is the foundation every other plugin builds on. It owns
//! the state machine, the persistent camera, settings load/save, and a
//! panic hook that writes crash reports (including the active state) to
//! `logs/`. Add it before the domain plugins.

use bevy::prelude::*;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::{
    camera::{orbit_menu_camera, place_game_camera, place_menu_camera, setup_persistent_camera},
    settings_persistence::{load_settings_system, save_settings_system},
    state_lifecycle::{
        cleanup_in_game, cleanup_main_menu, cleanup_settings, log_menu_state_transitions,
        periodic_entity_audit, StateAuditTimer,
    },
    states::{log_game_state_system, validate_and_log_state_transitions},
    GameSettings, GameState, GameStatistics, MenuState, PreviousState, StateLoggerTimer,
    WindowConfig,
};

/// Global state tracker so the panic hook can report the active state
/// from outside the ECS
static PANIC_STATE_TRACKER: OnceLock<Mutex<PanicStateInfo>> = OnceLock::new();

#[derive(Debug, Clone, Default)]
struct PanicStateInfo {
    game_state: Option<GameState>,
    menu_state: Option<MenuState>,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WindowConfig>();

        app.init_state::<GameState>()
            .add_sub_state::<MenuState>()
            .init_resource::<PreviousState>()
            .init_resource::<StateLoggerTimer>()
            .init_resource::<StateAuditTimer>();

        // GameSettings itself is inserted by load_settings_system
        app.init_resource::<GameStatistics>();

        app.register_type::<WindowConfig>()
            .register_type::<PreviousState>()
            .register_type::<GameSettings>()
            .register_type::<GameStatistics>();

        app.add_systems(Startup, (load_settings_system, setup_persistent_camera));

        app.add_systems(
            Update,
            (
                log_game_state_system,
                validate_and_log_state_transitions,
                log_menu_state_transitions,
                periodic_entity_audit,
                update_panic_state_tracker,
                save_settings_system,
                orbit_menu_camera,
            ),
        );

        // Menu decor and settings entities go down when their state is left.
        // Game entities are torn down on RETURN TO the menu instead, so the
        // session survives a round trip through the settings screen.
        app.add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(OnExit(GameState::Settings), cleanup_settings)
            .add_systems(
                OnEnter(GameState::MainMenu),
                (cleanup_in_game, place_menu_camera),
            )
            .add_systems(OnEnter(GameState::InGame), place_game_camera);
    }

    fn finish(&self, _app: &mut App) {
        // Configured after all plugins are built, before the app runs
        setup_panic_hook();
        std::env::set_var("RUST_BACKTRACE", "full");
    }
}

/// Install a panic hook that prints a report and writes it under `logs/`
///
/// The report carries the panic message, location, active states, and a
/// backtrace, formatted ASCII-only so it reads cleanly in any terminal.
fn setup_panic_hook() {
    PANIC_STATE_TRACKER.get_or_init(|| Mutex::new(PanicStateInfo::default()));

    panic::set_hook(Box::new(|panic_info| {
        let panic_msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "<unknown>".to_string()
        };

        let location = if let Some(loc) = panic_info.location() {
            format!("{}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            "<unknown>".to_string()
        };

        let mut game_state_str = "<unknown>".to_string();
        let mut menu_state_str = "<not in menu>".to_string();
        if let Some(tracker) = PANIC_STATE_TRACKER.get() {
            if let Ok(state_info) = tracker.lock() {
                if let Some(game_state) = state_info.game_state {
                    game_state_str = format!("{:?}", game_state);
                }
                if let Some(menu_state) = state_info.menu_state {
                    menu_state_str = format!("{:?}", menu_state);
                }
            }
        }

        let backtrace = std::backtrace::Backtrace::capture();

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let panic_report = format!(
            "PANIC DETECTED [{}]\n\
            ============================================\n\
            Message: {}\n\
            Location: {}\n\
            GameState: {}\n\
            MenuState: {}\n\
            \n\
            Backtrace:\n\
            {}\n\
            ============================================\n",
            timestamp, panic_msg, location, game_state_str, menu_state_str, backtrace
        );

        eprintln!("\n{}", panic_report);

        let logs_dir = Path::new("logs");
        if !logs_dir.exists() {
            let _ = fs::create_dir_all(logs_dir);
        }

        let log_file = logs_dir.join(format!("crash_{}.log", timestamp));
        if let Ok(mut file) = OpenOptions::new().create(true).write(true).open(&log_file) {
            let _ = writeln!(file, "{}", panic_report);
            eprintln!("[PANIC] Crash log written to: {:?}", log_file);
        }
    }));
}

/// Keep the panic tracker in sync with the live state
fn update_panic_state_tracker(
    game_state: Option<Res<State<GameState>>>,
    menu_state: Option<Res<State<MenuState>>>,
) {
    if let Some(tracker) = PANIC_STATE_TRACKER.get() {
        if let Ok(mut state_info) = tracker.lock() {
            if let Some(game_state_res) = game_state {
                state_info.game_state = Some(*game_state_res.get());
            }
            if let Some(menu_state_res) = menu_state {
                state_info.menu_state = Some(*menu_state_res.get());
            }
        }
    }
}
