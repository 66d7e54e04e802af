//! ECS components attached to board and piece entities.

pub mod piece;

pub use piece::{FadingCapture, HasMoved};
