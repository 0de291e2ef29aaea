//! Image rendering for nonogram test fixtures.
//!
//! - Empty annotated grids from constraint sets ([`grid`])
//! - Filled/crossed cell overlays on existing grids ([`overlay`])
//! - Clue font resolution with a built-in fallback face ([`font`])

pub mod bitmap_font;
pub mod canvas;
pub mod font;
pub mod grid;
pub mod overlay;

pub use font::{ClueFace, FontError};
pub use grid::GridRenderer;
pub use overlay::{OverlayEditor, OverlayOutcome};
