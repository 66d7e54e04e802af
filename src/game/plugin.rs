//! Gameplay plugin: resources, messages, and the system schedule.

use bevy::prelude::*;

use crate::core::states::GameState;
use crate::game::engine::EnginePlugin;
use crate::game::events::{
    BoardClicked, BoardRefreshRequested, HintRequested, MoveApplied, PromotionChoice,
    RedoRequested, ResignRequested, RestartRequested, UndoRequested,
};
use crate::game::resources::{
    CapturedPieces, CurrentTurn, GameJournal, GameVerdict, MoveHistory, PendingPromotion,
    Selection, SnapshotStacks, VerdictDialog,
};
use crate::game::rules::RulesBoard;
use crate::game::system_sets::GameSystems;
use crate::game::systems::{
    animate_piece_movement, fade_captured_pieces, handle_board_clicks, handle_redo_requests,
    handle_resignations, handle_restart_requests, handle_undo_requests, keyboard_shortcuts,
    resolve_promotion_choice, scan_for_verdict, start_game_session,
};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RulesBoard>()
            .init_resource::<Selection>()
            .init_resource::<CurrentTurn>()
            .init_resource::<CapturedPieces>()
            .init_resource::<MoveHistory>()
            .init_resource::<SnapshotStacks>()
            .init_resource::<GameJournal>()
            .init_resource::<PendingPromotion>()
            .init_resource::<GameVerdict>()
            .init_resource::<VerdictDialog>();

        app.register_type::<CurrentTurn>().register_type::<GameVerdict>();

        app.add_message::<BoardClicked>()
            .add_message::<MoveApplied>()
            .add_message::<PromotionChoice>()
            .add_message::<BoardRefreshRequested>()
            .add_message::<UndoRequested>()
            .add_message::<RedoRequested>()
            .add_message::<HintRequested>()
            .add_message::<ResignRequested>()
            .add_message::<RestartRequested>();

        app.configure_sets(
            Update,
            (
                GameSystems::Input,
                GameSystems::Execution,
                GameSystems::Visual,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(OnEnter(GameState::InGame), start_game_session);

        app.add_systems(Update, keyboard_shortcuts.in_set(GameSystems::Input));

        // One chain so a click, its consequences, and the verdict scan
        // land in the same frame.
        app.add_systems(
            Update,
            (
                handle_board_clicks,
                resolve_promotion_choice,
                handle_undo_requests,
                handle_redo_requests,
                handle_restart_requests,
                handle_resignations,
                scan_for_verdict,
            )
                .chain()
                .in_set(GameSystems::Execution),
        );

        app.add_systems(
            Update,
            (animate_piece_movement, fade_captured_pieces).in_set(GameSystems::Visual),
        );

        app.add_plugins(EnginePlugin);
    }
}
