//! Styled UI component builders
//!
//! Provides helper functions to create consistently styled UI components.

use super::colors::UiColors;
use super::typography::{TextSize, TextStyle};
use bevy_egui::egui;

/// Helper functions for creating styled buttons
pub struct StyledButton;

impl StyledButton {
    /// Create a primary action button (gold accent)
    pub fn primary(ui: &mut egui::Ui, text: impl Into<String>) -> egui::Response {
        let button = egui::Button::new(
            egui::RichText::new(text.into())
                .size(20.0)
                .color(egui::Color32::from_rgb(0, 0, 0)),
        )
        .fill(UiColors::ACCENT_GOLD)
        .stroke(egui::Stroke::new(
            2.0,
            egui::Color32::from_rgb(255, 255, 255),
        ))
        .min_size(egui::vec2(300.0, 60.0));

        ui.add(button)
    }

    /// Create a secondary action button
    pub fn secondary(ui: &mut egui::Ui, text: impl Into<String>) -> egui::Response {
        let button = egui::Button::new(TextStyle::button(text, TextSize::SM))
            .fill(UiColors::BG_LIGHT)
            .stroke(egui::Stroke::new(1.0, UiColors::BORDER))
            .min_size(egui::vec2(180.0, 40.0));

        ui.add(button)
    }

    /// Create a small button for less important actions
    pub fn small(ui: &mut egui::Ui, text: impl Into<String>) -> egui::Response {
        let button = egui::Button::new(TextStyle::button(text, TextSize::BODY))
            .fill(UiColors::BG_MID)
            .stroke(egui::Stroke::new(1.0, UiColors::BORDER))
            .min_size(egui::vec2(90.0, 32.0));

        ui.add(button)
    }

    /// Create a danger button (red, for destructive actions)
    pub fn danger(ui: &mut egui::Ui, text: impl Into<String>) -> egui::Response {
        let button = egui::Button::new(TextStyle::button(text, TextSize::SM))
            .fill(UiColors::DANGER)
            .stroke(egui::Stroke::NONE)
            .min_size(egui::vec2(150.0, 40.0));

        ui.add(button)
    }
}

/// Helper functions for creating styled panels
pub struct StyledPanel;

impl StyledPanel {
    /// Create a main content panel
    pub fn main() -> egui::Frame {
        egui::Frame {
            fill: UiColors::BG_DARK,
            stroke: egui::Stroke::new(2.0, UiColors::BORDER),
            inner_margin: egui::Margin::same(20),
            outer_margin: egui::Margin::same(10),
            shadow: egui::epaint::Shadow {
                offset: [0, 4],
                blur: 12,
                spread: 0,
                color: egui::Color32::from_black_alpha(100),
            },
            ..Default::default()
        }
    }

    /// Create a card-style panel (for nested content)
    pub fn card() -> egui::Frame {
        egui::Frame {
            fill: UiColors::BG_MID,
            stroke: egui::Stroke::new(1.0, UiColors::BORDER),
            inner_margin: egui::Margin::same(15),
            outer_margin: egui::Margin::same(5),
            shadow: egui::epaint::Shadow {
                offset: [0, 2],
                blur: 6,
                spread: 0,
                color: egui::Color32::from_black_alpha(60),
            },
            ..Default::default()
        }
    }

    /// Create an overlay panel (semi-transparent, for modals)
    pub fn overlay() -> egui::Frame {
        egui::Frame {
            fill: UiColors::BG_OVERLAY,
            stroke: egui::Stroke::NONE,
            inner_margin: egui::Margin::same(30),
            outer_margin: egui::Margin::ZERO,
            shadow: egui::epaint::Shadow {
                offset: [0, 8],
                blur: 24,
                spread: 0,
                color: egui::Color32::from_black_alpha(150),
            },
            ..Default::default()
        }
    }
}

/// Helper functions for spacing and layout
pub struct Layout;

impl Layout {
    /// Standard spacing between sections
    pub const SECTION_SPACING: f32 = 30.0;

    /// Standard spacing between items
    pub const ITEM_SPACING: f32 = 15.0;

    /// Small spacing
    pub const SMALL_SPACING: f32 = 8.0;

    /// Add section spacing
    pub fn section_space(ui: &mut egui::Ui) {
        ui.add_space(Self::SECTION_SPACING);
    }

    /// Add item spacing
    pub fn item_space(ui: &mut egui::Ui) {
        ui.add_space(Self::ITEM_SPACING);
    }

    /// Add small spacing
    pub fn small_space(ui: &mut egui::Ui) {
        ui.add_space(Self::SMALL_SPACING);
    }
}
