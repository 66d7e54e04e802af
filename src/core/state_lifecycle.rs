//! State-scoped entity cleanup and lifecycle auditing
//!
//! Entities tagged with [`DespawnOnExit`] are despawned by the systems
//! generated here. Cleanup for `InGame` runs when the main menu is
//! re-entered rather than on `OnExit(InGame)`, which is what lets a running
//! game survive the settings screen.

use super::{DespawnOnExit, GameState, MenuState};
use bevy::prelude::*;

/// Create a cleanup system for one state
///
/// `State::get()` already holds the NEW state while `OnExit` schedules run,
/// so each state needs its own function with the target baked in.
macro_rules! create_cleanup_system {
    ($name:ident, $state:expr) => {
        pub fn $name(
            query: Query<(Entity, Option<&Name>, &DespawnOnExit<GameState>)>,
            mut commands: Commands,
        ) {
            let target_state = $state;
            let mut despawned_count = 0;

            for (entity, name, despawn_marker) in query.iter() {
                if despawn_marker.0 == target_state {
                    let entity_name = name.map(|n| n.as_str()).unwrap_or("unnamed");
                    debug!(
                        "[STATE_LIFECYCLE] Despawning {:?}: {} (marked for {:?})",
                        entity, entity_name, target_state
                    );
                    commands.entity(entity).despawn();
                    despawned_count += 1;
                }
            }

            if despawned_count > 0 {
                info!(
                    "[STATE_LIFECYCLE] Despawned {} entities scoped to {:?}",
                    despawned_count, target_state
                );
            }
        }
    };
}

create_cleanup_system!(cleanup_main_menu, GameState::MainMenu);
create_cleanup_system!(cleanup_settings, GameState::Settings);
create_cleanup_system!(cleanup_in_game, GameState::InGame);

/// Log menu sub-state transitions
pub fn log_menu_state_transitions(menu_state: Option<Res<State<MenuState>>>) {
    if let Some(state) = menu_state {
        if state.is_changed() {
            info!("[STATE_LIFECYCLE] Menu SubState: {:?}", state.get());
        }
    }
}

/// Timer for the periodic entity audit
#[derive(Resource, Deref, DerefMut)]
pub struct StateAuditTimer(pub Timer);

impl Default for StateAuditTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(10.0, TimerMode::Repeating))
    }
}

/// Periodically logs entity counts to catch leaks across transitions
pub fn periodic_entity_audit(
    mut timer: ResMut<StateAuditTimer>,
    time: Res<Time>,
    all_entities: Query<Entity>,
    despawn_markers: Query<&DespawnOnExit<GameState>>,
    state: Res<State<GameState>>,
) {
    if timer.tick(time.delta()).just_finished() {
        let total_entities = all_entities.iter().count();
        let entities_with_markers = despawn_markers.iter().count();
        let persistent_entities = total_entities - entities_with_markers;

        info!(
            "[STATE_AUDIT] {:?} | Total: {} entities | {} persistent | {} state-scoped",
            state.get(),
            total_entities,
            persistent_entities,
            entities_with_markers
        );
    }
}
