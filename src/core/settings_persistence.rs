//! Settings persistence
//!
//! Loads [`GameSettings`] from `settings.json` in the platform config
//! directory on startup and writes it back whenever the resource changes.
//! Both directions degrade gracefully: load failures fall back to defaults,
//! save failures are logged and gameplay continues.

use crate::core::error::CoreResult;
use crate::core::GameSettings;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the settings file path
///
/// Lives in the user's config directory (for example
/// `~/.config/tabia/settings.json` on Linux); falls back to the working
/// directory if the platform dirs cannot be resolved.
fn get_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "tabia", "Tabia") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from disk on startup
pub fn load_settings_system(mut commands: Commands) {
    let settings_path = get_settings_path();

    if settings_path.exists() {
        match fs::read_to_string(&settings_path) {
            Ok(contents) => match serde_json::from_str::<GameSettings>(&contents) {
                Ok(settings) => {
                    info!("[SETTINGS] Loaded settings from {:?}", settings_path);
                    commands.insert_resource(settings);
                    return;
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to parse {:?}: {}. Using defaults.",
                        settings_path, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to read {:?}: {}. Using defaults.",
                    settings_path, e
                );
            }
        }
    } else {
        info!(
            "[SETTINGS] No settings file at {:?}. Using defaults.",
            settings_path
        );
    }

    commands.insert_resource(GameSettings::default());
}

/// Serialize and write settings to the given path
fn write_settings(path: &Path, settings: &GameSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Save settings whenever the resource changes
pub fn save_settings_system(settings: Res<GameSettings>) {
    if !settings.is_changed() {
        return;
    }

    let settings_path = get_settings_path();
    match write_settings(&settings_path, settings.as_ref()) {
        Ok(()) => info!("[SETTINGS] Saved settings to {:?}", settings_path),
        Err(e) => error!("[SETTINGS] Failed to save {:?}: {}", settings_path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_reload_settings() {
        let dir = std::env::temp_dir().join("tabia-settings-test");
        let path = dir.join("settings.json");
        let _ = fs::remove_file(&path);

        let mut settings = GameSettings::default();
        settings.engine_movetime_ms = 1234;
        write_settings(&path, &settings).expect("settings should write");

        let contents = fs::read_to_string(&path).expect("settings file should exist");
        let restored: GameSettings =
            serde_json::from_str(&contents).expect("settings file should parse");
        assert_eq!(restored.engine_movetime_ms, 1234);

        let _ = fs::remove_file(&path);
    }
}
