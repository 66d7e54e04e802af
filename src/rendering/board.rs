//! The 8x8 board: squares, coordinate labels, and the game light.
//!
//! Squares are batch-collected and spawned in one pass, each with a
//! click observer. Board entities are scoped to `InGame` but survive a
//! settings round trip; the spawn systems skip when the grid already
//! stands.

use bevy::picking::pointer::PointerInteraction;
use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::core::states::{DespawnOnExit, GameState};
use crate::game::system_sets::GameSystems;
use crate::game::systems::on_square_clicked;
use crate::rendering::effects::{
    update_check_highlight, update_last_move_highlight, update_move_hint_dots,
    update_suggestion_highlight, EffectMeshes,
};
use crate::rendering::utils::{apply_board_theme, BoardSquare, SquareMaterials};

/// Label text floating at the board edge, e.g. "A" or "5".
#[derive(Component)]
pub struct CoordinateLabel;

/// Spawns the 64 squares, unless the grid already stands.
pub(crate) fn create_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<SquareMaterials>,
    existing: Query<(), With<BoardSquare>>,
) {
    if !existing.is_empty() {
        return;
    }

    let square_mesh = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));

    let squares: Vec<_> = (0..8u8)
        .flat_map(|x| {
            let mesh = square_mesh.clone();
            let light = materials.light.clone();
            let dark = materials.dark.clone();

            (0..8u8).map(move |y| {
                let square = BoardSquare { x, y };
                let material = if square.is_light() {
                    light.clone()
                } else {
                    dark.clone()
                };
                (
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(x as f32, 0., y as f32),
                    PointerInteraction::default(),
                    Pickable::default(),
                    Name::new(format!("Square {}", square.algebraic())),
                    DespawnOnExit(GameState::InGame),
                    square,
                )
            })
        })
        .collect();

    for bundle in squares {
        commands.spawn(bundle).observe(on_square_clicked);
    }
    info!("[BOARD] spawned the 8x8 grid");
}

/// Rank numbers along the a/h files, file letters along both home ranks.
pub(crate) fn create_coordinate_labels(
    mut commands: Commands,
    existing: Query<(), With<CoordinateLabel>>,
) {
    if !existing.is_empty() {
        return;
    }

    let font = TextFont {
        font_size: 24.0,
        ..default()
    };
    let color = TextColor(Color::srgb(0.85, 0.82, 0.75));
    // Text2d glyphs are sized in pixels; scaled down for world space and
    // laid flat on the board plane.
    let flat = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
    let scale = Vec3::splat(0.02);

    let mut spawn_label = |text: String, translation: Vec3, name: String| {
        commands.spawn((
            Text2d::new(text),
            font.clone(),
            color,
            TextLayout::default(),
            Transform::from_translation(translation)
                .with_rotation(flat)
                .with_scale(scale),
            CoordinateLabel,
            DespawnOnExit(GameState::InGame),
            Name::new(name),
        ));
    };

    for rank in 0..8u8 {
        let text = (rank + 1).to_string();
        let x = rank as f32;
        spawn_label(
            text.clone(),
            Vec3::new(x, 0.01, -0.75),
            format!("Label rank {} (a-side)", rank + 1),
        );
        spawn_label(
            text,
            Vec3::new(x, 0.01, 7.75),
            format!("Label rank {} (h-side)", rank + 1),
        );
    }
    for file in 0..8u8 {
        let text = ((b'A' + file) as char).to_string();
        let z = file as f32;
        spawn_label(
            text.clone(),
            Vec3::new(-0.75, 0.01, z),
            format!("Label file {} (white side)", (b'A' + file) as char),
        );
        spawn_label(
            text,
            Vec3::new(7.75, 0.01, z),
            format!("Label file {} (black side)", (b'A' + file) as char),
        );
    }
}

/// One shadowing point light above the board center.
pub(crate) fn create_board_light(
    mut commands: Commands,
    existing: Query<(), (With<PointLight>, With<DespawnOnExit<GameState>>)>,
) {
    if !existing.is_empty() {
        return;
    }
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            intensity: 2_000_000.0,
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(3.5, 9.0, 3.5),
        Name::new("Board Light"),
        DespawnOnExit(GameState::InGame),
    ));
}

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SquareMaterials>()
            .init_resource::<EffectMeshes>()
            .register_type::<BoardSquare>();

        app.add_systems(
            OnEnter(GameState::InGame),
            (create_board, create_coordinate_labels, create_board_light),
        );

        // Theme repaints run in every state: the settings screen edits
        // the theme while the squares still exist.
        app.add_systems(Update, apply_board_theme);

        app.add_systems(
            Update,
            (
                update_move_hint_dots,
                update_last_move_highlight,
                update_check_highlight,
                update_suggestion_highlight,
            )
                .in_set(GameSystems::Visual),
        );
    }
}
