//! Application state machine
//!
//! # State Flow
//!
//! ```text
//! [MainMenu] ⇄ [Settings] ⇄ [InGame]
//!      ⇅
//!  [InGame]
//! ```
//!
//! - **MainMenu**: mode selection, settings access, exit (starting state)
//! - **Settings**: preferences screen, returns to wherever it was opened from
//! - **InGame**: an active game on the board
//!
//! There is deliberately no terminal "game over" state: the end-of-game
//! dialog is rendered inside `InGame` so that undoing a move can resume a
//! finished game. The running game also survives a round trip through
//! `Settings`; its entities are torn down only when the menu comes back.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

/// Primary application state
#[derive(Clone, Copy, Resource, PartialEq, Eq, Hash, Debug, Default, States, Reflect)]
pub enum GameState {
    /// Main menu with mode selection (starting state)
    #[default]
    MainMenu,

    /// Preferences screen
    ///
    /// Reachable from the main menu and from the in-game overlay;
    /// [`PreviousState`] records where to return to.
    Settings,

    /// Active gameplay
    InGame,
}

/// Component marking entities to despawn when a specific state is left
///
/// Cleanup systems generated in [`super::state_lifecycle`] query for this
/// component and despawn the tagged entities. Entities tagged for
/// `GameState::InGame` are despawned when the main menu is re-entered, not
/// on every exit, so the game survives visiting the settings screen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DespawnOnExit<T>(pub T)
where
    T: States + Copy;

/// Sub-state for menu navigation within the main menu
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, SubStates)]
#[source(GameState = GameState::MainMenu)]
pub enum MenuState {
    /// Top-level menu screen
    Root,

    /// Opponent / color / strength selection before starting a game
    ModeSelect,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::Root
    }
}

/// Resource tracking which state the settings screen was opened from
///
/// The back button in settings returns here, so settings opened mid-game
/// resume the game rather than dropping to the menu.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct PreviousState {
    pub state: GameState,
}

impl Default for PreviousState {
    fn default() -> Self {
        Self {
            state: GameState::MainMenu,
        }
    }
}

/// Debug helper that prints the current state, toggled with F12
pub fn debug_current_gamestate(state: Res<State<GameState>>) {
    info!("[DEBUG] Current State: {:?}", state.get());
}

/// Timer for the periodic state logger
#[derive(Resource, Deref, DerefMut)]
pub struct StateLoggerTimer(pub Timer);

impl Default for StateLoggerTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(15.0, TimerMode::Repeating))
    }
}

/// Logs the current state (and menu sub-state) every 15 seconds
pub fn log_game_state_system(
    state: Res<State<GameState>>,
    menu_state: Option<Res<State<MenuState>>>,
    mut timer: ResMut<StateLoggerTimer>,
    time: Res<Time>,
) {
    if timer.tick(time.delta()).just_finished() {
        let current_state = state.get();
        let mut state_info = format!("State: {:?}", current_state);

        if *current_state == GameState::MainMenu {
            if let Some(menu_state_res) = menu_state {
                state_info.push_str(&format!(" | Menu: {:?}", menu_state_res.get()));
            }
        }

        info!("[STATE] {}", state_info);
    }
}

/// Returns true if the transition is one the application ever performs
///
/// Anything outside this table indicates a wiring bug worth logging loudly.
fn is_valid_state_transition(from: GameState, to: GameState) -> bool {
    match (from, to) {
        (GameState::MainMenu, GameState::Settings) => true,
        (GameState::MainMenu, GameState::InGame) => true,

        // Settings returns to whichever state opened it
        (GameState::Settings, GameState::MainMenu) => true,
        (GameState::Settings, GameState::InGame) => true,

        (GameState::InGame, GameState::Settings) => true,
        (GameState::InGame, GameState::MainMenu) => true,

        // Self-transitions are no-ops
        (from, to) if from == to => true,

        _ => false,
    }
}

/// Validates and logs every state transition
pub fn validate_and_log_state_transitions(
    mut transition_events: MessageReader<StateTransitionEvent<GameState>>,
) {
    for event in transition_events.read() {
        match (event.exited, event.entered) {
            (Some(exited), Some(entered)) => {
                if is_valid_state_transition(exited, entered) {
                    info!("[TRANSITION] {:?} -> {:?}", exited, entered);
                } else {
                    error!(
                        "[TRANSITION] INVALID: {:?} -> {:?} (state may be inconsistent)",
                        exited, entered
                    );
                }
            }
            (Some(exited), None) => {
                debug!("[TRANSITION] Exit: {:?}", exited);
            }
            (None, Some(entered)) => {
                debug!("[TRANSITION] Enter: {:?}", entered);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_default() {
        let state = GameState::default();
        assert_eq!(state, GameState::MainMenu, "app should start at main menu");
    }

    #[test]
    fn test_game_state_variants_distinct() {
        assert_ne!(GameState::MainMenu, GameState::Settings);
        assert_ne!(GameState::Settings, GameState::InGame);
        assert_ne!(GameState::InGame, GameState::MainMenu);
    }

    #[test]
    fn test_menu_state_default() {
        assert_eq!(MenuState::default(), MenuState::Root);
    }

    #[test]
    fn test_previous_state_default() {
        let prev = PreviousState::default();
        assert_eq!(prev.state, GameState::MainMenu);
    }

    #[test]
    fn test_settings_round_trip_transitions_are_valid() {
        assert!(is_valid_state_transition(
            GameState::InGame,
            GameState::Settings
        ));
        assert!(is_valid_state_transition(
            GameState::Settings,
            GameState::InGame
        ));
        assert!(is_valid_state_transition(
            GameState::Settings,
            GameState::MainMenu
        ));
    }

    #[test]
    fn test_self_transition_is_valid() {
        assert!(is_valid_state_transition(
            GameState::InGame,
            GameState::InGame
        ));
    }
}
