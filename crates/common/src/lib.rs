//! Common: shared types and pure math for the isometric voxel editor.
//!
//! # Invariants
//! - Everything here is plain data or a total function; nothing holds mutable state.
//! - Grid cells are integer coordinates; continuous points are floored, never rounded.

pub mod math;
mod types;

pub use math::{floor_cell, rotate_2d};
pub use types::{ColorError, Cursor, Face, GridSize, Hsl, Voxel};
