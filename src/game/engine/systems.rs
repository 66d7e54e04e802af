//! Engine scheduling: launch, queries, polling, and the degraded path.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool};
use futures_lite::future;
use rand::Rng;

use crate::core::resources::GameSettings;
use crate::game::engine::resources::{
    EngineHandle, EngineHint, EngineRuntimeConfig, EngineUnavailable, OpponentMode,
    PendingEngineLaunch, PendingEngineMove, PendingHint,
};
use crate::game::engine::uci::{EngineError, UciEngine};
use crate::game::events::HintRequested;
use crate::game::resources::{GameJournal, GameVerdict, PendingPromotion, Selection};
use crate::game::rules::{algebraic, Move, RulesBoard};
use crate::game::systems::movement::{execute_move, MoveExecution};

/// Thinking budget for hints, independent of the opponent's move time.
/// A hint should come back fast.
const HINT_MOVETIME_MS: u64 = 600;

/// Starts the engine process on the compute pool when none is running.
pub fn launch_engine_if_needed(
    mut commands: Commands,
    settings: Res<GameSettings>,
    handle: Option<Res<EngineHandle>>,
    launching: Option<Res<PendingEngineLaunch>>,
    unavailable: Option<Res<EngineUnavailable>>,
) {
    if handle.is_some() || launching.is_some() || unavailable.is_some() {
        return;
    }
    let path = settings.engine_path.trim().to_string();
    if path.is_empty() {
        commands.insert_resource(EngineUnavailable {
            reason: "no engine path configured".to_string(),
        });
        return;
    }
    info!("[ENGINE] launching '{path}'...");
    let skill = settings.engine_skill;
    let task = AsyncComputeTaskPool::get().spawn(async move { UciEngine::launch(&path, skill) });
    commands.insert_resource(PendingEngineLaunch(task));
}

pub fn poll_engine_launch(
    mut commands: Commands,
    settings: Res<GameSettings>,
    task: Option<ResMut<PendingEngineLaunch>>,
) {
    let Some(mut task) = task else {
        return;
    };
    if !task.0.is_finished() {
        return;
    }
    match block_on(future::poll_once(&mut task.0)) {
        Some(Ok(engine)) => {
            commands.insert_resource(EngineHandle(Arc::new(Mutex::new(engine))));
            commands.insert_resource(EngineRuntimeConfig {
                path: settings.engine_path.clone(),
                skill: settings.engine_skill,
            });
            commands.remove_resource::<PendingEngineLaunch>();
        }
        Some(Err(err)) => {
            warn!("[ENGINE] launch failed: {err}");
            commands.insert_resource(EngineUnavailable {
                reason: err.to_string(),
            });
            commands.remove_resource::<PendingEngineLaunch>();
        }
        None => {
            warn!("[ENGINE] launch task reported finished but yielded nothing");
        }
    }
}

/// Retires the engine when the settings it was launched with change, and
/// lets a failed launch retry after any settings edit.
pub fn watch_engine_settings(
    mut commands: Commands,
    settings: Res<GameSettings>,
    config: Option<Res<EngineRuntimeConfig>>,
    unavailable: Option<Res<EngineUnavailable>>,
) {
    if !settings.is_changed() {
        return;
    }
    if unavailable.is_some() {
        commands.remove_resource::<EngineUnavailable>();
    }
    let Some(config) = config else {
        return;
    };
    if config.path != settings.engine_path || config.skill != settings.engine_skill {
        info!("[ENGINE] settings changed; restarting the engine");
        commands.remove_resource::<EngineHandle>();
        commands.remove_resource::<EngineRuntimeConfig>();
        // An in-flight query keeps its own Arc clone; its reply will be
        // validated against the board like any other.
    }
}

/// Asks the engine for its move when it is the engine's turn. With no
/// engine available, plays a random legal move instead.
pub fn schedule_engine_move(
    mut commands: Commands,
    mode: Res<OpponentMode>,
    verdict: Res<GameVerdict>,
    promotion: Res<PendingPromotion>,
    settings: Res<GameSettings>,
    handle: Option<Res<EngineHandle>>,
    unavailable: Option<Res<EngineUnavailable>>,
    pending: Option<Res<PendingEngineMove>>,
    mut selection: ResMut<Selection>,
    mut exec: MoveExecution,
) {
    if pending.is_some() || verdict.is_over() || promotion.is_active() {
        return;
    }
    if !mode.engine_drives(exec.rules.turn()) {
        return;
    }

    if let Some(handle) = handle {
        let fen = exec.rules.snapshot();
        let movetime = settings.engine_movetime_ms;
        let engine = handle.0.clone();
        let task = AsyncComputeTaskPool::get().spawn(async move {
            let mut engine = engine.lock().map_err(|_| EngineError::WorkerPoisoned)?;
            engine.bestmove(&fen, movetime)
        });
        commands.insert_resource(PendingEngineMove(task));
        info!("[ENGINE] thinking ({movetime} ms)...");
        return;
    }

    if unavailable.is_some() {
        // Degraded mode: keep the game going on random legal moves.
        let Some(mv) = random_legal_move(&exec.rules) else {
            return;
        };
        selection.clear();
        if let Err(err) = execute_move("engine (random)", &mut exec, &mv) {
            error!("[ENGINE] random fallback failed: {err}");
        }
    }
    // Otherwise the launch is still in progress; try again next frame.
}

/// Applies a finished engine reply, falling back to a random legal move
/// when the reply is unusable.
pub fn apply_engine_move(
    mut commands: Commands,
    task: Option<ResMut<PendingEngineMove>>,
    mode: Res<OpponentMode>,
    verdict: Res<GameVerdict>,
    mut selection: ResMut<Selection>,
    mut exec: MoveExecution,
) {
    let Some(mut task) = task else {
        return;
    };
    if !task.0.is_finished() {
        return;
    }
    let Some(result) = block_on(future::poll_once(&mut task.0)) else {
        warn!("[ENGINE] move task reported finished but yielded nothing");
        return;
    };
    commands.remove_resource::<PendingEngineMove>();

    if verdict.is_over() || !mode.engine_drives(exec.rules.turn()) {
        info!("[ENGINE] reply discarded; the position moved on");
        return;
    }

    let resolved = match result {
        Ok(reply) => match exec.rules.resolve_move(reply.from, reply.to, reply.promote_to) {
            Ok(mv) => Some(mv),
            Err(err) => {
                warn!("[ENGINE] suggested an illegal move ({err}); playing a random legal move");
                None
            }
        },
        Err(err) => {
            warn!("[ENGINE] query failed ({err}); playing a random legal move");
            None
        }
    };
    let mv = match resolved.or_else(|| random_legal_move(&exec.rules)) {
        Some(mv) => mv,
        None => {
            warn!("[ENGINE] no legal move to play");
            return;
        }
    };

    selection.clear();
    if let Err(err) = execute_move("engine", &mut exec, &mv) {
        error!("[ENGINE] failed to apply the engine's move: {err}");
    }
}

/// Sends a hint query when the player asks for one.
pub fn spawn_hint_task(
    mut requests: MessageReader<HintRequested>,
    mut commands: Commands,
    rules: Res<RulesBoard>,
    verdict: Res<GameVerdict>,
    promotion: Res<PendingPromotion>,
    handle: Option<Res<EngineHandle>>,
    unavailable: Option<Res<EngineUnavailable>>,
    pending: Option<Res<PendingHint>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    if verdict.is_over() || promotion.is_active() || pending.is_some() {
        return;
    }
    let Some(handle) = handle else {
        match unavailable {
            Some(reason) => info!("[HINT] no engine available: {}", reason.reason),
            None => info!("[HINT] engine still starting; ask again in a moment"),
        }
        return;
    };

    let fen = rules.snapshot();
    let engine = handle.0.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move {
        let mut engine = engine.lock().map_err(|_| EngineError::WorkerPoisoned)?;
        engine.bestmove(&fen, HINT_MOVETIME_MS)
    });
    commands.insert_resource(PendingHint(task));
    info!("[HINT] asking the engine...");
}

/// Publishes a finished hint: selects the suggested origin piece,
/// lights the move on the board, and journals the suggestion.
pub fn apply_hint(
    mut commands: Commands,
    task: Option<ResMut<PendingHint>>,
    rules: Res<RulesBoard>,
    verdict: Res<GameVerdict>,
    mut selection: ResMut<Selection>,
    mut hint: ResMut<EngineHint>,
    mut journal: ResMut<GameJournal>,
) {
    let Some(mut task) = task else {
        return;
    };
    if !task.0.is_finished() {
        return;
    }
    let Some(result) = block_on(future::poll_once(&mut task.0)) else {
        warn!("[HINT] task reported finished but yielded nothing");
        return;
    };
    commands.remove_resource::<PendingHint>();
    if verdict.is_over() {
        return;
    }

    match result {
        Ok(reply) => match rules.resolve_move(reply.from, reply.to, reply.promote_to) {
            Ok(_) => {
                journal.log_suggestion(rules.turn(), reply.from, reply.to);
                selection.select(
                    reply.from,
                    rules.turn(),
                    rules.legal_targets_from(reply.from),
                );
                hint.suggestion = Some(reply);
                info!(
                    "[HINT] {} -> {}",
                    algebraic(reply.from),
                    algebraic(reply.to)
                );
            }
            Err(err) => warn!("[HINT] engine suggestion is not legal here: {err}"),
        },
        Err(err) => warn!("[HINT] query failed: {err}"),
    }
}

fn random_legal_move(rules: &RulesBoard) -> Option<Move> {
    let legal = rules.legal_moves();
    if legal.is_empty() {
        return None;
    }
    let mut rng = rand::rng();
    Some(legal[rng.random_range(0..legal.len())].clone())
}
