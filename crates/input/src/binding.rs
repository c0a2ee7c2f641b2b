use glam::DVec2;
use isovox_common::Hsl;

use crate::action::{Action, Key};

/// An input event as delivered by the host window or canvas.
///
/// Mouse buttons use DOM numbering: 0 primary, 1 middle, 2 secondary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    MouseMove { x: f64, y: f64 },
    MouseDown { button: u8 },
    MouseUp { button: u8 },
    Wheel { delta_y: f64 },
    KeyDown(String),
    KeyUp(String),
    ColorPicked(Hsl),
}

/// Map a raw event onto the editor's action vocabulary.
///
/// The secondary button and multi-character key names the editor has no
/// binding for yield `None`.
pub fn translate(raw: &RawInput) -> Option<Action> {
    let action = match raw {
        RawInput::MouseMove { x, y } => Action::PointerMove(DVec2::new(*x, *y)),
        RawInput::MouseDown { button: 0 } => Action::PrimaryDown,
        RawInput::MouseDown { button: 1 } => Action::MiddleDown,
        RawInput::MouseUp { button: 0 } => Action::PrimaryUp,
        RawInput::MouseUp { button: 1 } => Action::MiddleUp,
        RawInput::MouseDown { button } | RawInput::MouseUp { button } => {
            tracing::trace!(button, "unbound mouse button");
            return None;
        }
        RawInput::Wheel { delta_y } => Action::Wheel(*delta_y),
        RawInput::KeyDown(name) => Action::KeyDown(bound_key(name)?),
        RawInput::KeyUp(name) => Action::KeyUp(bound_key(name)?),
        RawInput::ColorPicked(color) => Action::PaintColor(*color),
    };
    Some(action)
}

fn bound_key(name: &str) -> Option<Key> {
    match Key::from_name(name) {
        Key::Other(name) => {
            tracing::trace!(%name, "unbound key");
            None
        }
        key => Some(key),
    }
}
