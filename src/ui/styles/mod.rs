//! UI styling system
//!
//! Provides a centralized theme system with consistent colors, typography,
//! and component styles across all UI screens.

pub mod colors;
pub mod components;
pub mod typography;

pub use colors::*;
pub use components::*;
pub use typography::*;
