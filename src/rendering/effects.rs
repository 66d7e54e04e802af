//! Square highlight overlays: hint dots, last move, check, suggestion.
//!
//! All four layers work the same way: every frame the layer's marker
//! children are despawned and respawned on whichever squares currently
//! qualify. The board holds at most a few dozen overlay quads, so a
//! rebuild is cheaper to reason about than incremental patching.

use bevy::prelude::*;

use crate::core::resources::GameSettings;
use crate::game::engine::resources::EngineHint;
use crate::game::resources::{MoveHistory, Selection};
use crate::game::rules::RulesBoard;
use crate::rendering::utils::{BoardSquare, SquareMaterials};

/// A legal destination of the selected piece.
#[derive(Component)]
pub struct MoveHintDot;

/// Origin or destination of the most recent move.
#[derive(Component)]
pub struct LastMoveHighlight;

/// The checked king's square.
#[derive(Component)]
pub struct CheckHighlight;

/// Origin or destination of the engine's suggested move.
#[derive(Component)]
pub struct HintArrowSquare;

/// Shared overlay meshes; the layers spawn dozens of these per frame.
#[derive(Resource)]
pub struct EffectMeshes {
    pub dot: Handle<Mesh>,
    pub quad: Handle<Mesh>,
}

impl FromWorld for EffectMeshes {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world
            .get_resource_mut::<Assets<Mesh>>()
            .expect("Assets<Mesh> should be initialized before EffectMeshes");
        Self {
            dot: meshes.add(Circle::new(0.17)),
            quad: meshes.add(Plane3d::default().mesh().size(0.95, 0.95)),
        }
    }
}

/// Circle meshes lie in the XY plane; this lays them on the board.
fn flat() -> Quat {
    Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Dots on the selected piece's legal destinations.
pub fn update_move_hint_dots(
    mut commands: Commands,
    settings: Res<GameSettings>,
    selection: Res<Selection>,
    squares: Query<(Entity, &BoardSquare)>,
    dots: Query<Entity, With<MoveHintDot>>,
    materials: Res<SquareMaterials>,
    meshes: Res<EffectMeshes>,
) {
    for entity in &dots {
        commands.entity(entity).despawn();
    }
    if !settings.show_hints || selection.square.is_none() {
        return;
    }
    for (entity, square) in &squares {
        if selection.is_target((square.x, square.y)) {
            commands.entity(entity).with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.dot.clone()),
                    MeshMaterial3d(materials.hint.clone()),
                    Transform::from_xyz(0., 0.02, 0.).with_rotation(flat()),
                    MoveHintDot,
                    Name::new("Move Hint Dot"),
                ));
            });
        }
    }
}

/// Tint on the origin and destination of the most recent move.
pub fn update_last_move_highlight(
    mut commands: Commands,
    settings: Res<GameSettings>,
    history: Res<MoveHistory>,
    squares: Query<(Entity, &BoardSquare)>,
    highlights: Query<Entity, With<LastMoveHighlight>>,
    materials: Res<SquareMaterials>,
    meshes: Res<EffectMeshes>,
) {
    for entity in &highlights {
        commands.entity(entity).despawn();
    }
    if !settings.highlight_last_move {
        return;
    }
    let Some(record) = history.last_move() else {
        return;
    };
    let (from, to) = (record.played.from, record.played.to);
    for (entity, square) in &squares {
        let here = (square.x, square.y);
        if here == from || here == to {
            commands.entity(entity).with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.quad.clone()),
                    MeshMaterial3d(materials.last_move.clone()),
                    Transform::from_xyz(0., 0.01, 0.),
                    LastMoveHighlight,
                    Name::new("Last Move Highlight"),
                ));
            });
        }
    }
}

/// Frame on the checked king while the side to move is in check.
pub fn update_check_highlight(
    mut commands: Commands,
    rules: Res<RulesBoard>,
    squares: Query<(Entity, &BoardSquare)>,
    frames: Query<Entity, With<CheckHighlight>>,
    materials: Res<SquareMaterials>,
    meshes: Res<EffectMeshes>,
) {
    for entity in &frames {
        commands.entity(entity).despawn();
    }
    if !rules.is_check() {
        return;
    }
    let Some(king) = rules.king_square(rules.turn()) else {
        return;
    };
    for (entity, square) in &squares {
        if (square.x, square.y) == king {
            commands.entity(entity).with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.quad.clone()),
                    MeshMaterial3d(materials.check.clone()),
                    Transform::from_xyz(0., 0.012, 0.),
                    CheckHighlight,
                    Name::new("Check Highlight"),
                ));
            });
        }
    }
}

/// Tint on the engine suggestion's origin and destination. The applied
/// hint also selects the origin piece, so its legal-move dots show too;
/// this layer singles out the recommended pair.
pub fn update_suggestion_highlight(
    mut commands: Commands,
    hint: Res<EngineHint>,
    squares: Query<(Entity, &BoardSquare)>,
    marks: Query<Entity, With<HintArrowSquare>>,
    materials: Res<SquareMaterials>,
    meshes: Res<EffectMeshes>,
) {
    for entity in &marks {
        commands.entity(entity).despawn();
    }
    let Some(suggestion) = hint.suggestion else {
        return;
    };
    for (entity, square) in &squares {
        let here = (square.x, square.y);
        if here == suggestion.from || here == suggestion.to {
            commands.entity(entity).with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.quad.clone()),
                    MeshMaterial3d(materials.suggestion.clone()),
                    Transform::from_xyz(0., 0.014, 0.),
                    HintArrowSquare,
                    Name::new("Suggested Move"),
                ));
            });
        }
    }
}
