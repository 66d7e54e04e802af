//! Core resources shared across states
//!
//! [`GameSettings`] holds every user preference, including the UCI engine
//! configuration; it is loaded from and saved to disk by
//! [`super::settings_persistence`]. [`GameStatistics`] accumulates results
//! for the session.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// User preferences, persisted as JSON between sessions
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct GameSettings {
    /// Overlay legal destinations while a piece is selected
    pub show_hints: bool,

    /// Highlight the origin and destination of the most recent move
    pub highlight_last_move: bool,

    /// Board color scheme
    pub board_theme: BoardTheme,

    /// Path or command name of the UCI engine executable
    ///
    /// Looked up on `PATH` when not absolute. An empty or missing binary is
    /// not an error: the computer opponent falls back to random legal moves
    /// and hint requests report that no engine is available.
    pub engine_path: String,

    /// UCI `Skill Level` option (0-20), applied if the engine supports it
    pub engine_skill: u8,

    /// Thinking time per engine query, in milliseconds
    pub engine_movetime_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            show_hints: true,
            highlight_last_move: true,
            board_theme: BoardTheme::Walnut,
            engine_path: "stockfish".to_string(),
            engine_skill: 10,
            engine_movetime_ms: 2000,
        }
    }
}

/// Board color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum BoardTheme {
    /// Cream and dark brown
    Walnut,
    /// Cream and green, the common vinyl-board look
    Tournament,
    /// Light and dark gray
    Slate,
}

impl BoardTheme {
    pub fn name(&self) -> &'static str {
        match self {
            BoardTheme::Walnut => "Walnut",
            BoardTheme::Tournament => "Tournament",
            BoardTheme::Slate => "Slate",
        }
    }

    /// Returns (light_square_color, dark_square_color)
    pub fn colors(&self) -> (Color, Color) {
        match self {
            BoardTheme::Walnut => (
                Color::srgb_u8(239, 223, 197),
                Color::srgb_u8(90, 61, 41),
            ),
            BoardTheme::Tournament => (
                Color::srgb(0.93, 0.93, 0.82),
                Color::srgb(0.46, 0.59, 0.34),
            ),
            BoardTheme::Slate => (
                Color::srgb(0.85, 0.85, 0.88),
                Color::srgb(0.35, 0.37, 0.42),
            ),
        }
    }
}

/// Session statistics, shown on the menu and updated when a game ends
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct GameStatistics {
    pub games_played: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub total_moves: u32,
    pub longest_game: u32,
    pub shortest_game: u32,
}

impl GameStatistics {
    pub fn record_game(
        &mut self,
        winner: Option<crate::rendering::pieces::PieceColor>,
        moves: u32,
    ) {
        use crate::rendering::pieces::PieceColor;

        self.games_played += 1;
        self.total_moves += moves;

        match winner {
            Some(PieceColor::White) => self.white_wins += 1,
            Some(PieceColor::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }

        if self.games_played == 1 {
            self.longest_game = moves;
            self.shortest_game = moves;
        } else {
            self.longest_game = self.longest_game.max(moves);
            self.shortest_game = self.shortest_game.min(moves);
        }
    }

    pub fn average_moves(&self) -> f32 {
        if self.games_played > 0 {
            self.total_moves as f32 / self.games_played as f32
        } else {
            0.0
        }
    }

    pub fn win_rate_white(&self) -> f32 {
        if self.games_played > 0 {
            self.white_wins as f32 / self.games_played as f32 * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::pieces::PieceColor;

    #[test]
    fn test_settings_default() {
        let settings = GameSettings::default();
        assert!(settings.show_hints);
        assert!(settings.highlight_last_move);
        assert_eq!(settings.board_theme, BoardTheme::Walnut);
        assert_eq!(settings.engine_skill, 10);
        assert_eq!(settings.engine_movetime_ms, 2000);
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let mut settings = GameSettings::default();
        settings.show_hints = false;
        settings.board_theme = BoardTheme::Slate;
        settings.engine_skill = 20;

        let json = serde_json::to_string(&settings).expect("settings should serialize");
        let restored: GameSettings =
            serde_json::from_str(&json).expect("settings should deserialize");

        assert!(!restored.show_hints);
        assert_eq!(restored.board_theme, BoardTheme::Slate);
        assert_eq!(restored.engine_skill, 20);
    }

    #[test]
    fn test_theme_colors_differ() {
        for theme in [BoardTheme::Walnut, BoardTheme::Tournament, BoardTheme::Slate] {
            let (light, dark) = theme.colors();
            assert_ne!(light, dark, "{} theme needs contrast", theme.name());
        }
    }

    #[test]
    fn test_statistics_record_win_and_draw() {
        let mut stats = GameStatistics::default();
        stats.record_game(Some(PieceColor::White), 40);
        stats.record_game(None, 60);

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.white_wins, 1);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.total_moves, 100);
        assert_eq!(stats.longest_game, 60);
        assert_eq!(stats.shortest_game, 40);
        assert!((stats.average_moves() - 50.0).abs() < f32::EPSILON);
        assert!((stats.win_rate_white() - 50.0).abs() < f32::EPSILON);
    }
}
