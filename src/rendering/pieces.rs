//! Piece entities and their primitive-mesh models.
//!
//! # Models
//!
//! Pieces are stacked Bevy primitives (cylinders, spheres, cones, boxes)
//! sharing one white and one black material; there are no model files to
//! load. Each piece is a root entity carrying the [`Piece`] data and the
//! click observer, with the visual parts as plain mesh children.
//!
//! # Lifecycle
//!
//! The set is spawned from the rules board on entering the game and
//! rebuilt wholesale when a `BoardRefreshRequested` message arrives
//! (undo, redo, promotion, restart). The visual layer never diffs a
//! position; it mirrors whatever the rules board reports.

use bevy::ecs::system::EntityCommands;
use bevy::picking::pointer::PointerInteraction;
use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::core::states::{DespawnOnExit, GameState};
use crate::game::components::{FadingCapture, HasMoved};
use crate::game::events::BoardRefreshRequested;
use crate::game::rules::{algebraic, RulesBoard};
use crate::game::system_sets::GameSystems;
use crate::game::systems::{on_piece_clicked, start_game_session};

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn label(&self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }

    pub fn opposite(&self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

/// What a piece is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum PieceKind {
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn label(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// A piece on the board. `x` is the rank index (0 = White's home rank),
/// `y` the file index; the glide animation moves the transform toward
/// whatever these say.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
    pub x: u8,
    pub y: u8,
}

/// Mesh handles for the piece parts, built once from primitives.
#[derive(Resource)]
pub struct PieceMeshes {
    pub base: Handle<Mesh>,
    pub pawn_column: Handle<Mesh>,
    pub pawn_head: Handle<Mesh>,
    pub column: Handle<Mesh>,
    pub tall_column: Handle<Mesh>,
    pub rook_crown: Handle<Mesh>,
    pub knight_head: Handle<Mesh>,
    pub bishop_mitre: Handle<Mesh>,
    pub queen_orb: Handle<Mesh>,
    pub crown_spike: Handle<Mesh>,
    pub cross_post: Handle<Mesh>,
    pub cross_beam: Handle<Mesh>,
}

impl FromWorld for PieceMeshes {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world
            .get_resource_mut::<Assets<Mesh>>()
            .expect("Assets<Mesh> should be initialized before PieceMeshes");
        Self {
            base: meshes.add(Cylinder::new(0.28, 0.10)),
            pawn_column: meshes.add(Cylinder::new(0.13, 0.32)),
            pawn_head: meshes.add(Sphere::new(0.16)),
            column: meshes.add(Cylinder::new(0.15, 0.48)),
            tall_column: meshes.add(Cylinder::new(0.16, 0.64)),
            rook_crown: meshes.add(Cuboid::new(0.36, 0.12, 0.36)),
            knight_head: meshes.add(Cuboid::new(0.30, 0.32, 0.18)),
            bishop_mitre: meshes.add(Cone::new(0.17, 0.34)),
            queen_orb: meshes.add(Sphere::new(0.15)),
            crown_spike: meshes.add(Cone::new(0.12, 0.18)),
            cross_post: meshes.add(Cuboid::new(0.07, 0.26, 0.07)),
            cross_beam: meshes.add(Cuboid::new(0.20, 0.07, 0.07)),
        }
    }
}

/// One material per side, shared by every piece part.
#[derive(Resource)]
pub struct PieceMaterials {
    pub white: Handle<StandardMaterial>,
    pub black: Handle<StandardMaterial>,
}

impl PieceMaterials {
    pub fn for_color(&self, color: PieceColor) -> Handle<StandardMaterial> {
        match color {
            PieceColor::White => self.white.clone(),
            PieceColor::Black => self.black.clone(),
        }
    }
}

impl FromWorld for PieceMaterials {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world
            .get_resource_mut::<Assets<StandardMaterial>>()
            .expect("Assets<StandardMaterial> should be initialized before PieceMaterials");
        Self {
            white: materials.add(StandardMaterial {
                base_color: Color::srgb(0.93, 0.91, 0.85),
                perceptual_roughness: 0.35,
                ..default()
            }),
            black: materials.add(StandardMaterial {
                base_color: Color::srgb(0.13, 0.12, 0.14),
                perceptual_roughness: 0.30,
                ..default()
            }),
        }
    }
}

/// Spawns the piece set from the rules board.
///
/// A no-op when pieces already stand: coming back from the settings
/// screen must not duplicate the set.
pub fn spawn_pieces(
    mut commands: Commands,
    rules: Res<RulesBoard>,
    meshes: Res<PieceMeshes>,
    materials: Res<PieceMaterials>,
    existing: Query<(), With<Piece>>,
) {
    if !existing.is_empty() {
        return;
    }
    let set = rules.pieces();
    for (square, color, kind) in &set {
        spawn_piece_at(&mut commands, &meshes, &materials, *color, *kind, *square);
    }
    info!("[PIECES] spawned {} pieces", set.len());
}

/// Despawns every piece entity (fading captures included) and respawns
/// the set from the rules board.
pub fn refresh_pieces(
    mut requests: MessageReader<BoardRefreshRequested>,
    mut commands: Commands,
    rules: Res<RulesBoard>,
    meshes: Res<PieceMeshes>,
    materials: Res<PieceMaterials>,
    stale: Query<Entity, Or<(With<Piece>, With<FadingCapture>)>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    for entity in &stale {
        commands.entity(entity).despawn();
    }
    let set = rules.pieces();
    for (square, color, kind) in &set {
        spawn_piece_at(&mut commands, &meshes, &materials, *color, *kind, *square);
    }
    info!("[PIECES] rebuilt {} pieces from the rules board", set.len());
}

/// Spawns one piece with its visual parts and click observer.
pub fn spawn_piece_at(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    materials: &PieceMaterials,
    color: PieceColor,
    kind: PieceKind,
    position: (u8, u8),
) {
    let material = materials.for_color(color);
    match kind {
        PieceKind::Pawn => spawn_pawn(commands, meshes, material, color, position),
        PieceKind::Knight => spawn_knight(commands, meshes, material, color, position),
        PieceKind::Bishop => spawn_bishop(commands, meshes, material, color, position),
        PieceKind::Rook => spawn_rook(commands, meshes, material, color, position),
        PieceKind::Queen => spawn_queen(commands, meshes, material, color, position),
        PieceKind::King => spawn_king(commands, meshes, material, color, position),
    }
}

/// Root bundle shared by every piece: transform, picking, identity.
fn spawn_piece_root<'a>(
    commands: &'a mut Commands,
    color: PieceColor,
    kind: PieceKind,
    position: (u8, u8),
) -> EntityCommands<'a> {
    let translation = Vec3::new(position.0 as f32, 0., position.1 as f32);
    let mut root = commands.spawn((
        Transform::from_translation(translation).with_rotation(piece_rotation(color)),
        Visibility::Inherited,
        PointerInteraction::default(),
        Pickable::default(),
        Name::new(piece_name(color, kind, position)),
        DespawnOnExit(GameState::InGame),
        Piece {
            color,
            kind,
            x: position.0,
            y: position.1,
        },
        HasMoved::default(),
    ));
    root.observe(on_piece_clicked);
    root
}

/// Black pieces face the other way.
fn piece_rotation(color: PieceColor) -> Quat {
    match color {
        PieceColor::White => Quat::IDENTITY,
        PieceColor::Black => Quat::from_rotation_y(std::f32::consts::PI),
    }
}

/// Entity name shown in logs, e.g. "White Knight b1".
fn piece_name(color: PieceColor, kind: PieceKind, position: (u8, u8)) -> String {
    format!("{} {} {}", color.label(), kind.label(), algebraic(position))
}

macro_rules! piece_part {
    ($parent:expr, $mesh:expr, $material:expr, $transform:expr) => {
        $parent.spawn((
            Mesh3d($mesh),
            MeshMaterial3d($material),
            $transform,
            Pickable::default(),
        ));
    };
}

fn spawn_pawn(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::Pawn, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.pawn_column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.26, 0.)
        );
        piece_part!(
            parent,
            meshes.pawn_head.clone(),
            material,
            Transform::from_xyz(0., 0.52, 0.)
        );
    });
}

fn spawn_rook(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::Rook, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.34, 0.)
        );
        piece_part!(
            parent,
            meshes.rook_crown.clone(),
            material,
            Transform::from_xyz(0., 0.64, 0.)
        );
    });
}

fn spawn_knight(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::Knight, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.34, 0.)
        );
        // The muzzle leans toward the opposing side.
        piece_part!(
            parent,
            meshes.knight_head.clone(),
            material,
            Transform::from_xyz(0.05, 0.68, 0.)
                .with_rotation(Quat::from_rotation_z(-0.45))
        );
    });
}

fn spawn_bishop(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::Bishop, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.34, 0.)
        );
        piece_part!(
            parent,
            meshes.bishop_mitre.clone(),
            material,
            Transform::from_xyz(0., 0.72, 0.)
        );
    });
}

fn spawn_queen(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::Queen, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.tall_column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.42, 0.)
        );
        piece_part!(
            parent,
            meshes.queen_orb.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.84, 0.)
        );
        piece_part!(
            parent,
            meshes.crown_spike.clone(),
            material,
            Transform::from_xyz(0., 1.02, 0.)
        );
    });
}

fn spawn_king(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    color: PieceColor,
    position: (u8, u8),
) {
    spawn_piece_root(commands, color, PieceKind::King, position).with_children(|parent| {
        piece_part!(
            parent,
            meshes.base.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.05, 0.)
        );
        piece_part!(
            parent,
            meshes.tall_column.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.42, 0.)
        );
        piece_part!(
            parent,
            meshes.cross_post.clone(),
            material.clone(),
            Transform::from_xyz(0., 0.90, 0.)
        );
        piece_part!(
            parent,
            meshes.cross_beam.clone(),
            material,
            Transform::from_xyz(0., 0.93, 0.)
        );
    });
}

pub struct PiecePlugin;

impl Plugin for PiecePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PieceMeshes>()
            .init_resource::<PieceMaterials>()
            .register_type::<Piece>();

        // The session reset must see the rules board before the spawn
        // reads it.
        app.add_systems(
            OnEnter(GameState::InGame),
            spawn_pieces.after(start_game_session),
        );
        app.add_systems(Update, refresh_pieces.in_set(GameSystems::Visual));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_pieces_face_the_other_way() {
        assert_eq!(piece_rotation(PieceColor::White), Quat::IDENTITY);
        let flipped = piece_rotation(PieceColor::Black);
        let forward = flipped * Vec3::X;
        assert!(
            (forward - Vec3::NEG_X).length() < 1e-5,
            "black's forward should be white's backward, got {forward:?}"
        );
    }

    #[test]
    fn piece_names_read_like_the_board() {
        assert_eq!(
            piece_name(PieceColor::White, PieceKind::Knight, (0, 1)),
            "White Knight b1"
        );
        assert_eq!(
            piece_name(PieceColor::Black, PieceKind::Queen, (7, 3)),
            "Black Queen d8"
        );
    }

    #[test]
    fn labels_cover_every_kind() {
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];
        for kind in kinds {
            assert!(!kind.label().is_empty());
        }
        assert_eq!(PieceColor::White.label(), "White");
        assert_eq!(PieceColor::Black.label(), "Black");
    }
}
