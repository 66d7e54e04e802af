//! Pawn promotion dialog
//!
//! Opens while a promotion move is parked in [`PendingPromotion`]. The
//! move executor holds the move until the choice comes back as a
//! [`PromotionChoice`] message; every other input stands down meanwhile.

use crate::game::events::PromotionChoice;
use crate::game::resources::PendingPromotion;
use crate::rendering::pieces::{PieceColor, PieceKind};
use crate::ui::styles::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Renders the promotion choice dialog.
pub fn promotion_ui_system(
    mut contexts: EguiContexts,
    pending: Res<PendingPromotion>,
    mut choices: MessageWriter<PromotionChoice>,
) {
    if !pending.is_active() {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(color) = pending.color else {
        return;
    };

    // Dim the board behind the dialog
    egui::Area::new(egui::Id::new("promotion_overlay"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .show(ctx, |ui| {
            let screen_rect = ui.ctx().screen_rect();
            ui.painter().rect_filled(
                screen_rect,
                0.0,
                ColorUtils::with_alpha(egui::Color32::BLACK, 180),
            );
        });

    egui::Window::new("Promote Pawn")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_MID)
                .corner_radius(12.0)
                .inner_margin(20.0)
                .stroke(egui::Stroke::new(2.0, UiColors::BORDER)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} pawn promotes to:", color.label()))
                        .size(20.0)
                        .color(UiColors::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    for (kind, symbol) in promotion_symbols(color) {
                        let button = egui::Button::new(
                            egui::RichText::new(symbol)
                                .size(48.0)
                                .color(UiColors::TEXT_PRIMARY),
                        )
                        .min_size(egui::vec2(70.0, 70.0))
                        .fill(UiColors::BG_DARK);

                        if ui.add(button).on_hover_text(kind.label()).clicked() {
                            info!("[PROMOTION] Player chose {}", kind.label());
                            choices.write(PromotionChoice { kind });
                        }
                        ui.add_space(5.0);
                    }
                });
            });
        });
}

/// The four promotion targets with glyphs of the promoting side.
fn promotion_symbols(color: PieceColor) -> [(PieceKind, &'static str); 4] {
    match color {
        PieceColor::White => [
            (PieceKind::Queen, "♕"),
            (PieceKind::Rook, "♖"),
            (PieceKind::Bishop, "♗"),
            (PieceKind::Knight, "♘"),
        ],
        PieceColor::Black => [
            (PieceKind::Queen, "♛"),
            (PieceKind::Rook, "♜"),
            (PieceKind::Bishop, "♝"),
            (PieceKind::Knight, "♞"),
        ],
    }
}
