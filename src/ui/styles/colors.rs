//! Color palette for the UI
//!
//! Dark backgrounds, gold accents, and a small set of status colors.
//! Board square colors are NOT here: those follow the board theme from
//! the settings and live on materials, not egui widgets.
//!
//! Colors are defined as egui::Color32 for direct use in UI code.

use bevy_egui::egui;

/// Primary UI color palette
pub struct UiColors;

impl UiColors {
    // === Background Colors ===

    /// Primary dark background (main panels)
    pub const BG_DARK: egui::Color32 = egui::Color32::from_rgb(20, 20, 25);

    /// Secondary background (nested panels, dialogs)
    pub const BG_MID: egui::Color32 = egui::Color32::from_rgb(30, 30, 35);

    /// Tertiary background (buttons, cards)
    pub const BG_LIGHT: egui::Color32 = egui::Color32::from_rgb(40, 40, 45);

    /// Overlay background (semi-transparent)
    pub const BG_OVERLAY: egui::Color32 = egui::Color32::from_black_alpha(220);

    // === Accent Colors ===

    /// Primary accent (gold - headlines and the primary button)
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

    /// Warning color (orange - degraded engine notice)
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 150, 0);

    /// Error/danger color (red - check warning, destructive buttons)
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);

    /// Info color (blue - engine thinking indicator)
    pub const INFO: egui::Color32 = egui::Color32::from_rgb(70, 130, 220);

    // === Text Colors ===

    /// Primary text (headings, important text)
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Secondary text (body text)
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(200, 200, 205);

    /// Tertiary text (less important, hints)
    pub const TEXT_TERTIARY: egui::Color32 = egui::Color32::from_rgb(150, 150, 155);

    /// Border color
    pub const BORDER: egui::Color32 = egui::Color32::from_rgb(60, 60, 65);
}

/// Color helpers
pub struct ColorUtils;

impl ColorUtils {
    /// Create a semi-transparent version of a color
    ///
    /// Used for the dim layer behind modal dialogs.
    pub fn with_alpha(color: egui::Color32, alpha: u8) -> egui::Color32 {
        let [r, g, b, _] = color.to_array();
        egui::Color32::from_rgba_premultiplied(r, g, b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha() {
        let color = UiColors::ACCENT_GOLD;
        let transparent = ColorUtils::with_alpha(color, 128);
        assert_eq!(transparent.a(), 128);
    }
}
