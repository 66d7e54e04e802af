//! Piece motion and capture fades.

use bevy::prelude::*;

use crate::game::components::FadingCapture;
use crate::rendering::pieces::Piece;

/// World units per second, as an exponential approach factor.
const PIECE_MOVE_SPEED: f32 = 10.0;

/// Glides every piece toward the square its data says it stands on.
///
/// Captured entities lose their `Piece` data and drop out of this query,
/// so they stay put while they fade.
pub fn animate_piece_movement(
    time: Res<Time>,
    mut pieces: Query<(&mut Transform, &Piece)>,
) {
    for (mut transform, piece) in &mut pieces {
        let target = Vec3::new(piece.x as f32, 0., piece.y as f32);
        let direction = target - transform.translation;
        if direction.length() > 0.1 {
            transform.translation += direction * (PIECE_MOVE_SPEED * time.delta_secs());
        } else {
            transform.translation = target;
        }
    }
}

/// Shrinks captured pieces, then despawns them.
pub fn fade_captured_pieces(
    time: Res<Time>,
    mut commands: Commands,
    mut fading: Query<(Entity, &mut FadingCapture, &mut Transform)>,
) {
    for (entity, mut fade, mut transform) in &mut fading {
        fade.timer.tick(time.delta());
        if fade.timer.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        transform.scale = Vec3::splat(fade.timer.fraction_remaining().max(0.01));
    }
}
