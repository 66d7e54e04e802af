//! Main menu plugin
//!
//! Two sub-screens driven by [`MenuState`]:
//! - **Root**: title, Play, Settings, Exit, and the session statistics
//! - **ModeSelect**: opponent and color choice before starting a game
//!
//! Behind the egui panel sits a small decorative scene (an oversized king
//! and pawn on a dais) that the persistent camera slowly orbits. All
//! decor is tagged `DespawnOnExit(GameState::MainMenu)`.

use crate::core::{DespawnOnExit, GameState, GameStatistics, MenuState, PreviousState};
use crate::game::engine::OpponentMode;
use crate::rendering::pieces::PieceColor;
use crate::ui::styles::*;
use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

/// Plugin for main menu state
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::MainMenu), spawn_menu_decor)
            .add_systems(
                EguiPrimaryContextPass,
                main_menu_ui_wrapper.run_if(in_state(GameState::MainMenu)),
            );
    }
}

/// Wrapper for main_menu_ui that handles Result
fn main_menu_ui_wrapper(
    contexts: EguiContexts,
    next_state: ResMut<NextState<GameState>>,
    menu_state: Option<Res<State<MenuState>>>,
    next_menu_state: ResMut<NextState<MenuState>>,
    previous_state: ResMut<PreviousState>,
    mode: ResMut<OpponentMode>,
    stats: Res<GameStatistics>,
    exit: MessageWriter<AppExit>,
) {
    let _ = main_menu_ui(
        contexts,
        next_state,
        menu_state,
        next_menu_state,
        previous_state,
        mode,
        stats,
        exit,
    );
}

#[allow(clippy::too_many_arguments)]
fn main_menu_ui(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    menu_state: Option<Res<State<MenuState>>>,
    mut next_menu_state: ResMut<NextState<MenuState>>,
    mut previous_state: ResMut<PreviousState>,
    mut mode: ResMut<OpponentMode>,
    stats: Res<GameStatistics>,
    mut exit: MessageWriter<AppExit>,
) -> Result<(), bevy::ecs::query::QuerySingleError> {
    let ctx = contexts.ctx_mut()?;

    let screen = menu_state
        .map(|state| *state.get())
        .unwrap_or(MenuState::Root);

    egui::SidePanel::left("main_menu_panel")
        .resizable(false)
        .exact_width(380.0)
        .frame(
            egui::Frame::default()
                .fill(ColorUtils::with_alpha(UiColors::BG_DARK, 235))
                .inner_margin(30.0),
        )
        .show(ctx, |ui| match screen {
            MenuState::Root => root_screen(
                ui,
                &mut next_state,
                &mut next_menu_state,
                &mut previous_state,
                &stats,
                &mut exit,
            ),
            MenuState::ModeSelect => {
                mode_select_screen(ui, &mut next_state, &mut next_menu_state, &mut mode)
            }
        });

    Ok(())
}

/// Top-level menu screen
fn root_screen(
    ui: &mut egui::Ui,
    next_state: &mut NextState<GameState>,
    next_menu_state: &mut NextState<MenuState>,
    previous_state: &mut PreviousState,
    stats: &GameStatistics,
    exit: &mut MessageWriter<AppExit>,
) {
    ui.vertical_centered(|ui| {
        Layout::section_space(ui);

        ui.label(
            egui::RichText::new("TABIA")
                .size(TextSize::XL)
                .color(UiColors::ACCENT_GOLD)
                .strong(),
        );
        ui.label(TextStyle::caption("chess on the desk"));

        Layout::section_space(ui);

        if menu_entry(ui, "PLAY", 26.0).clicked() {
            next_menu_state.set(MenuState::ModeSelect);
        }

        Layout::item_space(ui);

        if menu_entry(ui, "SETTINGS", 22.0).clicked() {
            previous_state.state = GameState::MainMenu;
            next_state.set(GameState::Settings);
        }

        Layout::item_space(ui);

        if menu_entry(ui, "EXIT", 18.0).clicked() {
            info!("[MAIN_MENU] Exit requested");
            exit.write(AppExit::Success);
        }

        Layout::section_space(ui);

        if stats.games_played > 0 {
            StyledPanel::card().show(ui, |ui| {
                ui.label(TextStyle::accent("This session"));
                Layout::small_space(ui);
                ui.label(TextStyle::body(format!(
                    "Games: {}   White: {}   Black: {}   Draws: {}",
                    stats.games_played, stats.white_wins, stats.black_wins, stats.draws
                )));
                ui.label(TextStyle::caption(format!(
                    "Average length {:.0} moves, longest {}",
                    stats.average_moves(),
                    stats.longest_game
                )));
            });
        }
    });
}

/// Opponent / color selection screen
fn mode_select_screen(
    ui: &mut egui::Ui,
    next_state: &mut NextState<GameState>,
    next_menu_state: &mut NextState<MenuState>,
    mode: &mut OpponentMode,
) {
    ui.vertical_centered(|ui| {
        Layout::section_space(ui);

        ui.heading(TextStyle::heading("New Game", TextSize::LG));
        Layout::small_space(ui);
        ui.label(TextStyle::body("Choose your opponent"));

        Layout::section_space(ui);

        if StyledButton::primary(ui, "Human vs Human").clicked() {
            start_game(OpponentMode::HumanVsHuman, mode, next_state);
        }

        Layout::item_space(ui);

        if StyledButton::secondary(ui, "Play White vs Engine").clicked() {
            start_game(
                OpponentMode::VsEngine {
                    engine_color: PieceColor::Black,
                },
                mode,
                next_state,
            );
        }

        Layout::item_space(ui);

        if StyledButton::secondary(ui, "Play Black vs Engine").clicked() {
            start_game(
                OpponentMode::VsEngine {
                    engine_color: PieceColor::White,
                },
                mode,
                next_state,
            );
        }

        Layout::section_space(ui);

        if StyledButton::secondary(ui, "Back").clicked() {
            next_menu_state.set(MenuState::Root);
        }

        Layout::item_space(ui);
        ui.label(TextStyle::caption(
            "Without a working engine the computer plays random legal moves",
        ));
    });
}

fn start_game(
    chosen: OpponentMode,
    mode: &mut OpponentMode,
    next_state: &mut NextState<GameState>,
) {
    info!("[MAIN_MENU] Starting game: {}", chosen.label());
    *mode = chosen;
    next_state.set(GameState::InGame);
}

/// A clickable all-caps label, the menu's signature look
fn menu_entry(ui: &mut egui::Ui, text: &str, size: f32) -> egui::Response {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(size)
                .color(egui::Color32::from_rgb(200, 200, 200)),
        )
        .sense(egui::Sense::click()),
    )
}

/// Decorative scene the menu camera orbits: a dais with an oversized
/// king and pawn, one light.
fn spawn_menu_decor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.16, 0.14, 0.13),
        perceptual_roughness: 0.7,
        ..default()
    });
    let ivory = materials.add(StandardMaterial {
        base_color: Color::srgb(0.91, 0.88, 0.81),
        perceptual_roughness: 0.4,
        ..default()
    });

    // Dais
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(3.2, 0.4))),
        MeshMaterial3d(dark.clone()),
        Transform::from_xyz(0.0, -0.2, 0.0),
        DespawnOnExit(GameState::MainMenu),
        Name::new("Menu Dais"),
    ));

    // King: base, column, crown cross
    let king = commands
        .spawn((
            Transform::from_xyz(-0.8, 0.0, 0.3),
            Visibility::default(),
            DespawnOnExit(GameState::MainMenu),
            Name::new("Menu King"),
        ))
        .id();
    commands.entity(king).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.75, 0.5))),
            MeshMaterial3d(ivory.clone()),
            Transform::from_xyz(0.0, 0.25, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.42, 2.2))),
            MeshMaterial3d(ivory.clone()),
            Transform::from_xyz(0.0, 1.5, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.16, 0.7, 0.16))),
            MeshMaterial3d(ivory.clone()),
            Transform::from_xyz(0.0, 2.95, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.5, 0.16, 0.16))),
            MeshMaterial3d(ivory.clone()),
            Transform::from_xyz(0.0, 3.0, 0.0),
        ));
    });

    // Pawn: base and head
    let pawn = commands
        .spawn((
            Transform::from_xyz(1.1, 0.0, -0.5),
            Visibility::default(),
            DespawnOnExit(GameState::MainMenu),
            Name::new("Menu Pawn"),
        ))
        .id();
    commands.entity(pawn).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.55, 0.4))),
            MeshMaterial3d(dark.clone()),
            Transform::from_xyz(0.0, 0.2, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.3, 1.0))),
            MeshMaterial3d(dark.clone()),
            Transform::from_xyz(0.0, 0.9, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes.add(Sphere::new(0.42))),
            MeshMaterial3d(dark),
            Transform::from_xyz(0.0, 1.7, 0.0),
        ));
    });

    commands.spawn((
        PointLight {
            intensity: 1_500_000.0,
            range: 50.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 7.0, 3.0),
        DespawnOnExit(GameState::MainMenu),
        Name::new("Menu Light"),
    ));

    info!("[MAIN_MENU] Decor scene spawned");
}
