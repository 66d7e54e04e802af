//! In-game HUD
//!
//! Two pieces of chrome around the board:
//! - a top bar with the turn indicator, check warning, engine status,
//!   and the menu button
//! - a floating side panel with the captured pieces, the action buttons
//!   (undo/redo/hint/resign), and the tail of the session journal
//!
//! Every button goes through a message rather than touching game state
//! directly, so the keyboard shortcuts and the HUD share one code path.
//!
//! UI systems return `Result<(), QuerySingleError>` because the egui
//! context can be briefly unavailable during state transitions; the
//! wrapper functions swallow that case.

use crate::game::events::{HintRequested, RedoRequested, ResignRequested, UndoRequested};
use crate::rendering::pieces::{PieceColor, PieceKind};
use crate::ui::styles::*;
use crate::ui::system_params::HudParams;
use bevy_egui::egui;

/// Wrapper for [`game_hud`] that handles Result
pub fn game_hud_wrapper(params: HudParams) {
    let _ = game_hud(params);
}

/// Renders the top bar and the side panel.
///
/// Skipped entirely while the Escape overlay is open, so the overlay
/// covers the whole screen.
fn game_hud(mut params: HudParams) -> Result<(), bevy::ecs::query::QuerySingleError> {
    if params.overlay.open {
        return Ok(());
    }
    let ctx = params.contexts.ctx_mut()?;

    // === TOP BAR: mode, turn, status, menu ===

    egui::TopBottomPanel::top("game_top_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.set_min_height(40.0);

            ui.horizontal(|ui| {
                ui.set_width(ui.available_width());

                // Left: opponent mode
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.add_space(10.0);
                    ui.label(TextStyle::caption(params.mode.label()));
                });

                // Center: turn indicator and status line
                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), 0.0),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        if !params.verdict.is_over() {
                            let turn_text = format!(
                                "{} to move  (move {})",
                                params.turn.label(),
                                params.turn.move_number
                            );
                            let turn_color = match params.turn.color {
                                PieceColor::White => UiColors::TEXT_PRIMARY,
                                PieceColor::Black => UiColors::TEXT_SECONDARY,
                            };
                            ui.colored_label(turn_color, egui::RichText::new(turn_text).size(18.0));

                            if params.rules.is_check() {
                                ui.colored_label(UiColors::DANGER, "CHECK!");
                            } else if params.thinking.is_some() {
                                let time = ui.input(|i| i.time);
                                let dots = (time * 3.0) as i64 % 4;
                                let text =
                                    format!("Engine is thinking{}", ".".repeat(dots as usize));
                                ui.colored_label(UiColors::INFO, text);
                            }
                        } else {
                            ui.colored_label(
                                UiColors::ACCENT_GOLD,
                                egui::RichText::new(params.verdict.headline()).size(18.0),
                            );
                        }
                    },
                );

                // Right: menu button (same overlay as Escape)
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(10.0);
                    if ui.button("Menu").clicked() {
                        params.overlay.open = true;
                    }
                });
            });
            ui.add_space(5.0);
        });

    // === SIDE PANEL: captures, actions, journal ===

    egui::Window::new("game_side_panel")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 60.0])
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_OVERLAY)
                .corner_radius(10.0)
                .inner_margin(15.0)
                .stroke(egui::Stroke::new(1.0, UiColors::BORDER)),
        )
        .show(ctx, |ui| {
            ui.set_width(220.0);

            ui.label(
                egui::RichText::new("CAPTURED")
                    .size(12.0)
                    .color(UiColors::TEXT_TERTIARY),
            );
            Layout::small_space(ui);
            ui.label(TextStyle::body(format!(
                "White took  {}",
                captured_line(PieceColor::White, &params.captured.by_white)
            )));
            ui.label(TextStyle::body(format!(
                "Black took  {}",
                captured_line(PieceColor::Black, &params.captured.by_black)
            )));
            Layout::small_space(ui);
            ui.label(material_text(params.captured.material_advantage()));

            Layout::small_space(ui);
            ui.separator();
            Layout::small_space(ui);

            let game_over = params.verdict.is_over();

            ui.horizontal(|ui| {
                ui.add_enabled_ui(params.stacks.can_undo(), |ui| {
                    if StyledButton::small(ui, "Undo").clicked() {
                        params.actions.undo.write(UndoRequested);
                    }
                });
                ui.add_enabled_ui(params.stacks.can_redo(), |ui| {
                    if StyledButton::small(ui, "Redo").clicked() {
                        params.actions.redo.write(RedoRequested);
                    }
                });
            });
            Layout::small_space(ui);
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!game_over, |ui| {
                    if StyledButton::small(ui, "Hint").clicked() {
                        params.actions.hint.write(HintRequested);
                    }
                    if StyledButton::small(ui, "Resign").clicked() {
                        params.actions.resign.write(ResignRequested);
                    }
                });
            });

            if let Some(down) = &params.engine_down {
                Layout::small_space(ui);
                ui.label(TextStyle::warning("Engine offline, playing random moves"))
                    .on_hover_text(&down.reason);
            }

            Layout::small_space(ui);
            ui.separator();
            Layout::small_space(ui);

            ui.label(
                egui::RichText::new(format!(
                    "JOURNAL  ({} entries, {} moves)",
                    params.journal.lines().len(),
                    params.history.len()
                ))
                .size(12.0)
                .color(UiColors::TEXT_TERTIARY),
            );
            Layout::small_space(ui);
            egui::ScrollArea::vertical()
                .max_height(150.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in params.journal.lines() {
                        ui.label(TextStyle::caption(line));
                    }
                });
        });

    Ok(())
}

/// Figurine glyph for a piece of the given color.
fn figurine(color: PieceColor, kind: PieceKind) -> &'static str {
    match (color, kind) {
        (PieceColor::White, PieceKind::King) => "♔",
        (PieceColor::White, PieceKind::Queen) => "♕",
        (PieceColor::White, PieceKind::Rook) => "♖",
        (PieceColor::White, PieceKind::Bishop) => "♗",
        (PieceColor::White, PieceKind::Knight) => "♘",
        (PieceColor::White, PieceKind::Pawn) => "♙",
        (PieceColor::Black, PieceKind::King) => "♚",
        (PieceColor::Black, PieceKind::Queen) => "♛",
        (PieceColor::Black, PieceKind::Rook) => "♜",
        (PieceColor::Black, PieceKind::Bishop) => "♝",
        (PieceColor::Black, PieceKind::Knight) => "♞",
        (PieceColor::Black, PieceKind::Pawn) => "♟",
    }
}

/// One capture list as figurines; what `captor` took is the other color.
fn captured_line(captor: PieceColor, taken: &[PieceKind]) -> String {
    if taken.is_empty() {
        return "-".to_string();
    }
    taken
        .iter()
        .map(|kind| figurine(captor.opposite(), *kind))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Material balance line, signed for the side that is ahead.
fn material_text(advantage: i32) -> egui::RichText {
    match advantage.signum() {
        1 => TextStyle::accent(format!("White ahead +{advantage}")),
        -1 => TextStyle::accent(format!("Black ahead +{}", -advantage)),
        _ => TextStyle::caption("Material even"),
    }
}
