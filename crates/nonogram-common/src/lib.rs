//! Common types shared by the nonogram fixture renderer and its tools.
//!
//! The pixel geometry in [`layout`] is the single mapping from cell indices to
//! image coordinates; both the grid renderer and the overlay editor go
//! through it.

pub mod constraints;
pub mod error;
pub mod layout;
pub mod marking;
pub mod sidecar;

pub use constraints::ConstraintSet;
pub use error::{FixtureError, FixtureResult};
pub use layout::{CellBounds, GridGeometry, LayoutConfig};
pub use marking::{CellCoord, CellMarking, MarkKind, MarkingSet};
pub use sidecar::{suggested_solution_path, LayoutRecord};
