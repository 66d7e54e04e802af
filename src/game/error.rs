//! Error types for the gameplay layer.

use thiserror::Error;

use crate::game::rules::RulesError;

/// Errors surfaced by move execution and session plumbing.
#[derive(Error, Debug)]
pub enum GameError {
    /// The rules library rejected a move or a snapshot.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// A board scan expected a piece entity that is not there.
    #[error("no piece entity found on square ({x}, {y})")]
    PieceNotFound { x: u8, y: u8 },

    /// The engine bridge failed; the message carries the engine error text.
    #[error("engine failure: {message}")]
    Engine { message: String },
}

/// Convenience alias for gameplay results.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_not_found_names_the_square() {
        //! The message carries the board coordinates, for log grepping.
        let err = GameError::PieceNotFound { x: 3, y: 4 };
        assert_eq!(err.to_string(), "no piece entity found on square (3, 4)");
    }

    #[test]
    fn rules_errors_convert_with_question_mark() {
        //! RulesError lifts into GameError via From, keeping its text.
        fn inner() -> GameResult<()> {
            Err(RulesError::FenParse {
                message: "bad field".into(),
            })?;
            Ok(())
        }
        let err = inner().unwrap_err();
        assert!(err.to_string().contains("bad field"));
    }
}
