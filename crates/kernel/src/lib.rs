//! Voxel Kernel: the authoritative dense voxel grid.
//!
//! # Invariants
//! - The linear index `x + size.x * (y + size.y * z)` is a bijection onto `[0, volume)`.
//! - Grid size is fixed for the grid's lifetime.
//! - Out-of-range coordinates fail fast; they are never clamped.

pub mod grid;

pub use grid::{GridError, VoxelGrid};
