use glam::DVec2;
use isovox_common::Hsl;

/// Keys the editor reacts to. Anything else maps to [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Hold to pan with the primary button.
    Space,
    /// Hold to rotate with the primary button.
    Shift,
    /// Hold to remove with the primary button.
    Alt,
    Plus,
    Minus,
    ArrowUp,
    ArrowDown,
    Char(char),
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name (`" "`, `"Shift"`, `"ArrowUp"`, `"z"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" => Self::Space,
            "Shift" => Self::Shift,
            "Alt" => Self::Alt,
            "+" | "Plus" => Self::Plus,
            "-" | "Minus" => Self::Minus,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(name.to_owned()),
                }
            }
        }
    }

    /// Grid-level step bound to this key: `+1` for ArrowUp/`z`, `-1` for ArrowDown/`s`.
    pub fn level_step(&self) -> Option<i32> {
        match self {
            Self::ArrowUp | Self::Char('z') => Some(1),
            Self::ArrowDown | Self::Char('s') => Some(-1),
            _ => None,
        }
    }
}

/// A semantic editor trigger.
///
/// Each variant corresponds to exactly one entry point of the editor's
/// command interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pointer moved to a screen position, in pixels.
    PointerMove(DVec2),
    PrimaryDown,
    PrimaryUp,
    MiddleDown,
    MiddleUp,
    /// Wheel scrolled by `delta_y` (positive scrolls down / zooms out).
    Wheel(f64),
    KeyDown(Key),
    KeyUp(Key),
    /// Active paint color changed.
    PaintColor(Hsl),
}
