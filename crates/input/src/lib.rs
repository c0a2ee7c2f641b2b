//! Input binding: raw pointer/keyboard events and input scripts mapped to editor actions.
//!
//! # Invariants
//! - Every raw event maps to at most one action.
//! - The editor consumes actions, never raw events.

pub mod action;
mod binding;
mod script;

pub use action::{Action, Key};
pub use binding::{RawInput, translate};
pub use script::{ScriptError, parse_script};
