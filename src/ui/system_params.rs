//! System parameter groups for UI systems
//!
//! The HUD reads most of the gameplay state at once; grouping the
//! resources into a SystemParam keeps the system signature readable and
//! the borrow set in one place.

use crate::game::engine::resources::{EngineUnavailable, OpponentMode, PendingEngineMove};
use crate::game::events::{HintRequested, RedoRequested, ResignRequested, UndoRequested};
use crate::game::resources::{
    CapturedPieces, CurrentTurn, GameJournal, GameVerdict, MoveHistory, SnapshotStacks,
};
use crate::game::rules::RulesBoard;
use crate::ui::overlay::OverlayState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Everything the in-game HUD reads and writes.
///
/// `thinking` and `engine_down` are `Option` because the corresponding
/// resources exist only while an engine task is in flight or after a
/// launch failure.
#[derive(SystemParam)]
pub struct HudParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub turn: Res<'w, CurrentTurn>,
    pub rules: Res<'w, RulesBoard>,
    pub captured: Res<'w, CapturedPieces>,
    pub stacks: Res<'w, SnapshotStacks>,
    pub history: Res<'w, MoveHistory>,
    pub journal: Res<'w, GameJournal>,
    pub verdict: Res<'w, GameVerdict>,
    pub mode: Res<'w, OpponentMode>,
    pub thinking: Option<Res<'w, PendingEngineMove>>,
    pub engine_down: Option<Res<'w, EngineUnavailable>>,
    pub overlay: ResMut<'w, OverlayState>,
    pub actions: HudActions<'w>,
}

/// The message writers behind the HUD buttons.
#[derive(SystemParam)]
pub struct HudActions<'w> {
    pub undo: MessageWriter<'w, UndoRequested>,
    pub redo: MessageWriter<'w, RedoRequested>,
    pub hint: MessageWriter<'w, HintRequested>,
    pub resign: MessageWriter<'w, ResignRequested>,
}
