//! Game Flow Integration Tests
//!
//! Drives the full gameplay schedule headlessly, covering:
//! - Session setup on entering the game
//! - The click selection machine and move execution
//! - Captures, undo/redo, promotion, resignation
//! - Verdict detection and session restart
//! - The random-move opponent when no engine is available

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use tabia::core::{GameSettings, GameState, GameStatistics};
use tabia::game::components::HasMoved;
use tabia::game::engine::{EngineHint, EngineUnavailable, OpponentMode};
use tabia::game::events::{
    BoardClicked, HintRequested, PromotionChoice, RedoRequested, ResignRequested,
    RestartRequested, UndoRequested,
};
use tabia::game::resources::{
    CapturedPieces, CurrentTurn, GameJournal, GameVerdict, MoveHistory, PendingPromotion,
    Selection, SnapshotStacks,
};
use tabia::game::rules::RulesBoard;
use tabia::game::GamePlugin;
use tabia::rendering::pieces::{Piece, PieceColor, PieceKind};
use tabia::ui::OverlayState;

/// Headless app with the full gameplay schedule and no rendering or egui.
///
/// The engine command is left empty so no process is ever spawned; the
/// computer opponent runs on random legal moves instead.
fn game_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<OverlayState>();
    app.init_resource::<GameStatistics>();
    app.insert_resource(GameSettings {
        engine_path: String::new(),
        ..Default::default()
    });
    app.add_plugins(GamePlugin);
    app
}

fn enter_game(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Spawns bare piece entities mirroring the rules board, standing in for
/// the mesh spawner (which needs a GPU).
fn spawn_piece_entities(app: &mut App) {
    let pieces = app.world().resource::<RulesBoard>().pieces();
    for ((x, y), color, kind) in pieces {
        app.world_mut().spawn((
            Piece { color, kind, x, y },
            HasMoved::default(),
            Transform::from_xyz(x as f32, 0., y as f32),
        ));
    }
}

/// A primary-button click on the square at `(x, y)`.
fn click(app: &mut App, x: u8, y: u8) {
    app.world_mut().write_message(BoardClicked { x, y });
    app.update();
}

/// Plays a move as two clicks: select the origin, then the target.
fn click_move(app: &mut App, from: (u8, u8), to: (u8, u8)) {
    click(app, from.0, from.1);
    click(app, to.0, to.1);
}

/// The piece entity standing on `square`, if any.
fn entity_at(app: &mut App, square: (u8, u8)) -> Option<(PieceColor, PieceKind)> {
    let mut query = app.world_mut().query::<&Piece>();
    query
        .iter(app.world())
        .find(|piece| (piece.x, piece.y) == square)
        .map(|piece| (piece.color, piece.kind))
}

// ============================================================================
// Session Setup
// ============================================================================

#[test]
fn entering_the_game_starts_a_fresh_session() {
    let mut app = game_app();
    enter_game(&mut app);

    let turn = app.world().resource::<CurrentTurn>();
    assert_eq!(turn.color, PieceColor::White);
    assert_eq!(turn.move_number, 1);

    assert_eq!(*app.world().resource::<GameVerdict>(), GameVerdict::Playing);
    assert!(app.world().resource::<MoveHistory>().is_empty());
    assert!(!app.world().resource::<SnapshotStacks>().can_undo());

    let journal = app.world().resource::<GameJournal>();
    assert_eq!(journal.lines().len(), 1);
    assert!(journal.lines()[0].contains("New game started"));
}

// ============================================================================
// Selection and Move Execution
// ============================================================================

#[test]
fn clicking_a_piece_selects_it_with_its_targets() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    // e2 pawn: single and double push
    click(&mut app, 1, 4);
    {
        let selection = app.world().resource::<Selection>();
        assert_eq!(selection.square, Some((1, 4)));
        assert!(selection.is_target((2, 4)));
        assert!(selection.is_target((3, 4)));
    }

    // A second click on the same square deselects
    click(&mut app, 1, 4);
    assert!(app.world().resource::<Selection>().square.is_none());

    // Opponent pieces cannot be picked up
    click(&mut app, 6, 4);
    assert!(app.world().resource::<Selection>().square.is_none());
}

#[test]
fn a_click_pair_plays_the_move_and_flips_the_turn() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    click_move(&mut app, (1, 4), (3, 4)); // e4

    let turn = app.world().resource::<CurrentTurn>();
    assert_eq!(turn.color, PieceColor::Black);

    let history = app.world().resource::<MoveHistory>();
    assert_eq!(history.len(), 1);
    assert_eq!(history.last_move().unwrap().played.san, "e4");

    assert!(app.world().resource::<SnapshotStacks>().can_undo());
    assert!(app.world().resource::<Selection>().square.is_none());

    // The entity mirror followed the move
    assert_eq!(
        entity_at(&mut app, (3, 4)),
        Some((PieceColor::White, PieceKind::Pawn))
    );
    assert_eq!(entity_at(&mut app, (1, 4)), None);
}

#[test]
fn captures_remove_the_victim_and_feed_the_capture_list() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    click_move(&mut app, (1, 4), (3, 4)); // e4
    click_move(&mut app, (6, 3), (4, 3)); // d5
    click_move(&mut app, (3, 4), (4, 3)); // exd5

    let captured = app.world().resource::<CapturedPieces>();
    assert_eq!(captured.by_white, vec![PieceKind::Pawn]);
    assert!(captured.by_black.is_empty());
    assert_eq!(captured.material_advantage(), 1);

    // Only the capturing pawn stands on d5 now; the victim lost its
    // piece data the moment the capture landed.
    assert_eq!(
        entity_at(&mut app, (4, 3)),
        Some((PieceColor::White, PieceKind::Pawn))
    );

    let journal = app.world().resource::<GameJournal>();
    let last = journal.lines().last().unwrap();
    assert!(last.contains("exd5"), "line was: {last}");
    assert!(last.contains("takes Pawn"));
}

// ============================================================================
// Undo / Redo
// ============================================================================

#[test]
fn undo_restores_the_position_before_the_move() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    click_move(&mut app, (1, 4), (3, 4)); // e4

    app.world_mut().write_message(UndoRequested);
    app.update();

    assert_eq!(
        app.world().resource::<RulesBoard>().snapshot(),
        RulesBoard::default().snapshot(),
        "undo must reproduce the starting position exactly"
    );
    assert_eq!(
        app.world().resource::<CurrentTurn>().color,
        PieceColor::White
    );
    assert!(app.world().resource::<MoveHistory>().is_empty());

    let stacks = app.world().resource::<SnapshotStacks>();
    assert!(!stacks.can_undo());
    assert!(stacks.can_redo());
}

#[test]
fn redo_replays_the_undone_move() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    click_move(&mut app, (1, 4), (3, 4)); // e4
    app.world_mut().write_message(UndoRequested);
    app.update();

    app.world_mut().write_message(RedoRequested);
    app.update();

    assert_eq!(
        app.world().resource::<CurrentTurn>().color,
        PieceColor::Black
    );
    let history = app.world().resource::<MoveHistory>();
    assert_eq!(history.len(), 1);
    assert_eq!(history.last_move().unwrap().played.san, "e4");

    let stacks = app.world().resource::<SnapshotStacks>();
    assert!(stacks.can_undo());
    assert!(!stacks.can_redo());
}

#[test]
fn undo_with_nothing_to_take_back_is_harmless() {
    let mut app = game_app();
    enter_game(&mut app);

    app.world_mut().write_message(UndoRequested);
    app.update();

    assert_eq!(
        app.world().resource::<CurrentTurn>().color,
        PieceColor::White
    );
    assert_eq!(*app.world().resource::<GameVerdict>(), GameVerdict::Playing);
}

#[test]
fn undo_reopens_a_finished_game() {
    //! Stepping out of a mate puts the verdict back to Playing so the
    //! position can be explored.
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    play_scholars_mate(&mut app);
    assert!(app.world().resource::<GameVerdict>().is_over());

    app.world_mut().write_message(UndoRequested);
    app.update();

    assert_eq!(*app.world().resource::<GameVerdict>(), GameVerdict::Playing);
    assert_eq!(app.world().resource::<MoveHistory>().len(), 6);
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn promotion_detours_through_the_dialog() {
    let mut app = game_app();
    enter_game(&mut app);

    // White pawn one step from the last rank
    app.world_mut()
        .resource_mut::<RulesBoard>()
        .restore("8/4P2k/8/8/8/8/8/4K3 w - - 0 1")
        .unwrap();
    spawn_piece_entities(&mut app);

    click_move(&mut app, (6, 4), (7, 4));

    // The move is parked, not played
    assert!(app.world().resource::<PendingPromotion>().is_active());
    assert!(app.world().resource::<MoveHistory>().is_empty());
    assert_eq!(
        app.world().resource::<CurrentTurn>().color,
        PieceColor::White
    );

    // Clicks are ignored while the dialog is up
    click(&mut app, 0, 4);
    assert!(app.world().resource::<Selection>().square.is_none());

    // The dialog reports a choice; the full move plays in one step
    app.world_mut().write_message(PromotionChoice {
        kind: PieceKind::Queen,
    });
    app.update();

    assert!(!app.world().resource::<PendingPromotion>().is_active());
    let history = app.world().resource::<MoveHistory>();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history.last_move().unwrap().played.promotion,
        Some(PieceKind::Queen)
    );
    assert_eq!(
        app.world().resource::<RulesBoard>().piece_at((7, 4)),
        Some((PieceColor::White, PieceKind::Queen))
    );
}

// ============================================================================
// Verdicts
// ============================================================================

/// Scholar's mate as click pairs; leaves White the winner.
fn play_scholars_mate(app: &mut App) {
    click_move(app, (1, 4), (3, 4)); // e4
    click_move(app, (6, 4), (4, 4)); // e5
    click_move(app, (0, 5), (3, 2)); // Bc4
    click_move(app, (7, 1), (5, 2)); // Nc6
    click_move(app, (0, 3), (4, 7)); // Qh5
    click_move(app, (7, 6), (5, 5)); // Nf6
    click_move(app, (4, 7), (6, 5)); // Qxf7#
}

#[test]
fn checkmate_is_detected_on_the_mating_move() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    play_scholars_mate(&mut app);

    assert_eq!(
        *app.world().resource::<GameVerdict>(),
        GameVerdict::WhiteWinsByCheckmate
    );
    assert_eq!(app.world().resource::<MoveHistory>().len(), 7);

    let stats = app.world().resource::<GameStatistics>();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.white_wins, 1);

    let journal = app.world().resource::<GameJournal>();
    assert!(journal.lines().last().unwrap().contains("Checkmate"));

    // The finished position takes no more clicks
    click(&mut app, 7, 3);
    assert!(app.world().resource::<Selection>().square.is_none());
}

#[test]
fn resignation_ends_the_game_for_the_side_to_move() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    // White is to move and resigns
    app.world_mut().write_message(ResignRequested);
    app.update();

    assert_eq!(
        *app.world().resource::<GameVerdict>(),
        GameVerdict::BlackWinsByResignation
    );
    let stats = app.world().resource::<GameStatistics>();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.black_wins, 1);

    // A second resignation of a finished game changes nothing
    app.world_mut().write_message(ResignRequested);
    app.update();
    assert_eq!(app.world().resource::<GameStatistics>().games_played, 1);
}

// ============================================================================
// Restart
// ============================================================================

#[test]
fn restart_resets_the_session_but_keeps_statistics() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    click_move(&mut app, (1, 4), (3, 4)); // e4
    app.world_mut().write_message(ResignRequested);
    app.update();
    assert!(app.world().resource::<GameVerdict>().is_over());

    app.world_mut().write_message(RestartRequested);
    app.update();

    assert_eq!(*app.world().resource::<GameVerdict>(), GameVerdict::Playing);
    assert!(app.world().resource::<MoveHistory>().is_empty());
    assert!(!app.world().resource::<SnapshotStacks>().can_undo());
    assert_eq!(
        app.world().resource::<RulesBoard>().snapshot(),
        RulesBoard::default().snapshot()
    );

    let turn = app.world().resource::<CurrentTurn>();
    assert_eq!(turn.color, PieceColor::White);
    assert_eq!(turn.move_number, 1);

    // A fresh journal, but the session statistics carry across games
    assert_eq!(app.world().resource::<GameJournal>().lines().len(), 1);
    assert_eq!(app.world().resource::<GameStatistics>().games_played, 1);
}

// ============================================================================
// Engine Fallback
// ============================================================================

#[test]
fn the_computer_answers_with_a_random_move_when_no_engine_exists() {
    let mut app = game_app();
    app.insert_resource(OpponentMode::VsEngine {
        engine_color: PieceColor::Black,
    });
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    // Give the launcher a frame to conclude there is no engine
    app.update();
    app.update();
    assert!(app.world().get_resource::<EngineUnavailable>().is_some());

    click_move(&mut app, (1, 4), (3, 4)); // e4
    for _ in 0..3 {
        app.update();
    }

    // The fallback replied; it is White's move again
    assert_eq!(app.world().resource::<MoveHistory>().len(), 2);
    assert_eq!(
        app.world().resource::<CurrentTurn>().color,
        PieceColor::White
    );
    assert_eq!(
        app.world().resource::<RulesBoard>().turn(),
        PieceColor::White
    );
}

#[test]
fn hint_requests_without_an_engine_are_declined() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);
    app.update();
    app.update();

    app.world_mut().write_message(HintRequested);
    app.update();

    assert!(app.world().resource::<EngineHint>().suggestion.is_none());
    assert!(app.world().resource::<Selection>().square.is_none());
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn clicks_are_ignored_while_the_pause_overlay_is_open() {
    let mut app = game_app();
    enter_game(&mut app);
    spawn_piece_entities(&mut app);

    app.world_mut().resource_mut::<OverlayState>().open = true;
    click(&mut app, 1, 4);
    assert!(app.world().resource::<Selection>().square.is_none());

    app.world_mut().resource_mut::<OverlayState>().open = false;
    click(&mut app, 1, 4);
    assert_eq!(app.world().resource::<Selection>().square, Some((1, 4)));
}
