//! Persistent camera shared by every state
//!
//! A single `Camera3d` is spawned at startup and survives all state
//! transitions, so the egui context never loses its primary camera. Each
//! state repositions it on entry: the menu gets a slow orbit around the
//! decorative scene, the game a fixed view from behind White.

use super::GameState;
use bevy::prelude::*;

/// Marker for the one camera the application uses
#[derive(Component)]
pub struct PrimaryCamera;

/// Focus point of the menu's decorative scene
const MENU_FOCUS: Vec3 = Vec3::new(0.0, 1.2, 0.0);
const MENU_ORBIT_RADIUS: f32 = 9.0;
const MENU_ORBIT_HEIGHT: f32 = 3.5;
const MENU_ORBIT_SPEED: f32 = 0.15;

/// Center of the board: squares span 0..8 on x (ranks) and z (files)
const BOARD_FOCUS: Vec3 = Vec3::new(3.5, 0.0, 3.5);

pub fn setup_persistent_camera(mut commands: Commands) {
    let entity = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, MENU_ORBIT_HEIGHT, MENU_ORBIT_RADIUS)
                .looking_at(MENU_FOCUS, Vec3::Y),
            PrimaryCamera,
            Name::new("Primary Camera"),
        ))
        .id();
    info!("[CAMERA] Persistent camera spawned: {:?}", entity);
}

/// Point the camera at the menu scene when the menu is entered
pub fn place_menu_camera(mut camera: Query<&mut Transform, With<PrimaryCamera>>) {
    for mut transform in camera.iter_mut() {
        *transform = Transform::from_xyz(0.0, MENU_ORBIT_HEIGHT, MENU_ORBIT_RADIUS)
            .looking_at(MENU_FOCUS, Vec3::Y);
    }
}

/// Point the camera down at the board from behind White's side
pub fn place_game_camera(mut camera: Query<&mut Transform, With<PrimaryCamera>>) {
    for mut transform in camera.iter_mut() {
        *transform = Transform::from_xyz(-4.5, 8.5, 3.5).looking_at(BOARD_FOCUS, Vec3::Y);
    }
}

/// Slow orbit around the menu scene, active only while in the menu
pub fn orbit_menu_camera(
    time: Res<Time>,
    state: Res<State<GameState>>,
    mut camera: Query<&mut Transform, With<PrimaryCamera>>,
) {
    if *state.get() != GameState::MainMenu {
        return;
    }

    let angle = time.elapsed_secs() * MENU_ORBIT_SPEED;
    for mut transform in camera.iter_mut() {
        let position = Vec3::new(
            angle.sin() * MENU_ORBIT_RADIUS,
            MENU_ORBIT_HEIGHT,
            angle.cos() * MENU_ORBIT_RADIUS,
        );
        *transform = Transform::from_translation(position).looking_at(MENU_FOCUS, Vec3::Y);
    }
}
