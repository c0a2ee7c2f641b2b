//! Line-based input scripts for driving an editor session headlessly.
//!
//! ```text
//! # comments and blank lines are ignored
//! move 640 380
//! keydown Shift
//! down primary
//! move 700 380
//! up primary
//! keyup Shift
//! wheel -300
//! color 120 100 50
//! ```
//!
//! Key names follow [`Key::from_name`]; use `Space` for the space bar.

use glam::DVec2;
use isovox_common::{ColorError, Hsl};

use crate::action::{Action, Key};

/// Errors from parsing an input script. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` is missing an argument")]
    MissingArgument { line: usize, command: String },
    #[error("line {line}: `{command}` has unexpected trailing arguments")]
    TrailingArguments { line: usize, command: String },
    #[error("line {line}: invalid number `{value}`")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unknown button `{name}` (expected primary or middle)")]
    UnknownButton { line: usize, name: String },
    #[error("line {line}: {source}")]
    Color { line: usize, source: ColorError },
}

/// Parse a whole script into actions, failing on the first bad line.
pub fn parse_script(src: &str) -> Result<Vec<Action>, ScriptError> {
    let mut actions = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        actions.push(parse_line(line, text)?);
    }
    tracing::debug!(count = actions.len(), "input script parsed");
    Ok(actions)
}

fn parse_line(line: usize, text: &str) -> Result<Action, ScriptError> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default();
    let mut arg = || {
        words.next().ok_or_else(|| ScriptError::MissingArgument {
            line,
            command: command.to_owned(),
        })
    };

    let action = match command {
        "move" => {
            let x = number(line, arg()?)?;
            let y = number(line, arg()?)?;
            Action::PointerMove(DVec2::new(x, y))
        }
        "down" | "up" => {
            let name = arg()?;
            match (command, name) {
                ("down", "primary") => Action::PrimaryDown,
                ("up", "primary") => Action::PrimaryUp,
                ("down", "middle") => Action::MiddleDown,
                ("up", "middle") => Action::MiddleUp,
                _ => {
                    return Err(ScriptError::UnknownButton {
                        line,
                        name: name.to_owned(),
                    });
                }
            }
        }
        "wheel" => Action::Wheel(number(line, arg()?)?),
        "keydown" => Action::KeyDown(Key::from_name(arg()?)),
        "keyup" => Action::KeyUp(Key::from_name(arg()?)),
        "color" => {
            let h = number(line, arg()?)?;
            let s = number(line, arg()?)?;
            let l = number(line, arg()?)?;
            Action::PaintColor(color(line, h, s, l)?)
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_owned(),
            });
        }
    };

    if words.next().is_some() {
        return Err(ScriptError::TrailingArguments {
            line,
            command: command.to_owned(),
        });
    }
    Ok(action)
}

fn number(line: usize, value: &str) -> Result<f64, ScriptError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidNumber {
            line,
            value: value.to_owned(),
        })
}

fn color(line: usize, h: f64, s: f64, l: f64) -> Result<Hsl, ScriptError> {
    let invalid = |v: f64| ScriptError::InvalidNumber {
        line,
        value: v.to_string(),
    };
    // components are whole numbers; 12.7 is an error, not 12
    let whole = |v: f64| {
        if v.fract() == 0.0 {
            Ok(v as i64)
        } else {
            Err(invalid(v))
        }
    };
    let h = u16::try_from(whole(h)?).map_err(|_| invalid(h))?;
    let s = u8::try_from(whole(s)?).map_err(|_| invalid(s))?;
    let l = u8::try_from(whole(l)?).map_err(|_| invalid(l))?;
    Hsl::new(h, s, l).map_err(|source| ScriptError::Color { line, source })
}
