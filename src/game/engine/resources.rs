//! Resources for the engine bridge.
//!
//! The `Pending*` resources double as state flags: their presence means a
//! task is in flight, and the schedule checks for them instead of a
//! separate status enum. Removing one drops the task.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::Task;

use crate::game::engine::uci::{EngineError, EngineMove, UciEngine};
use crate::rendering::pieces::PieceColor;

/// Who the human is playing against.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub enum OpponentMode {
    #[default]
    HumanVsHuman,
    VsEngine { engine_color: PieceColor },
}

impl OpponentMode {
    /// Is `color` played by the engine in this mode?
    pub fn engine_drives(&self, color: PieceColor) -> bool {
        matches!(self, Self::VsEngine { engine_color } if *engine_color == color)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HumanVsHuman => "Human vs Human",
            Self::VsEngine {
                engine_color: PieceColor::White,
            } => "Engine plays White",
            Self::VsEngine {
                engine_color: PieceColor::Black,
            } => "Engine plays Black",
        }
    }
}

/// Shared handle to the running engine process.
///
/// Tasks clone the `Arc` and lock it for the duration of one query; the
/// handle being a resource lets the settings watcher retire an engine by
/// simply removing it.
#[derive(Resource, Clone)]
pub struct EngineHandle(pub Arc<Mutex<UciEngine>>);

/// Engine process being launched on the compute pool.
#[derive(Resource)]
pub struct PendingEngineLaunch(pub Task<Result<UciEngine, EngineError>>);

/// Engine reply being computed for the side it plays.
#[derive(Resource)]
pub struct PendingEngineMove(pub Task<Result<EngineMove, EngineError>>);

/// Hint being computed for the human.
#[derive(Resource)]
pub struct PendingHint(pub Task<Result<EngineMove, EngineError>>);

/// The last hint the engine produced, shown until the next move.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct EngineHint {
    pub suggestion: Option<EngineMove>,
}

/// Present when the engine could not be launched; the computer opponent
/// is running on random legal moves.
#[derive(Resource, Debug, Clone)]
pub struct EngineUnavailable {
    pub reason: String,
}

/// The settings the running engine was launched with, for drift
/// detection.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct EngineRuntimeConfig {
    pub path: String,
    pub skill: u8,
}
