//! Authoring: the editor session, its interaction state machine and cursor resolution.
//!
//! # Invariants
//! - Exactly one editing mode is active; releases restore the mode that preceded them.
//! - Interactive edits never fail: out-of-bounds adds and removes are skipped.
//! - The cursor is re-resolved on every pointer move and after every placement.

pub mod config;
pub mod cursor;
pub mod editor;
pub mod mode;

pub use config::{ConfigError, EditorConfig};
pub use cursor::{CursorResolver, placeable_cell};
pub use editor::EditorSession;
pub use mode::{EditMode, ModeStack};
