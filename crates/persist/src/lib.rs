//! Persistence: plain JSON map files.
//!
//! # Invariants
//! - A map's `data` array holds exactly `size.x * size.y * size.z` entries in
//!   linear-index order.
//! - A map is validated completely before any grid is built; a rejected file
//!   never yields a partial grid.

mod map;

pub use map::{MapError, MapFile, load_grid};
