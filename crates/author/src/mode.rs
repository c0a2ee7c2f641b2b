use std::fmt;

/// Editing modes of the interaction state machine.
///
/// `Can*` modes are armed by holding a modifier; the matching active mode
/// starts when the primary button goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    Idle,
    CanDrag,
    Dragging,
    CanRotate,
    Rotating,
    CanRemove,
    Removing,
    Adding,
}

impl EditMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::CanDrag => "CAN_DRAG",
            Self::Dragging => "DRAGGING",
            Self::CanRotate => "CAN_ROTATE",
            Self::Rotating => "ROTATING",
            Self::CanRemove => "CAN_REMOVE",
            Self::Removing => "REMOVING",
            Self::Adding => "ADDING",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bounded stack of editing modes with `Idle` as a permanent base.
///
/// The deepest chain the transition table can build is
/// `Idle -> CanRotate -> Rotating`; the bound only guards against a host
/// that drops release events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    stack: Vec<EditMode>,
}

impl ModeStack {
    pub const MAX_DEPTH: usize = 8;

    pub fn new() -> Self {
        let mut stack = Vec::with_capacity(Self::MAX_DEPTH);
        stack.push(EditMode::Idle);
        Self { stack }
    }

    /// The active mode.
    pub fn current(&self) -> EditMode {
        self.stack.last().copied().unwrap_or(EditMode::Idle)
    }

    /// The mode directly below the active one, if any.
    pub fn previous(&self) -> Option<EditMode> {
        self.stack.iter().rev().nth(1).copied()
    }

    /// Number of modes on the stack, base included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Make `mode` active, remembering the current one.
    pub fn push(&mut self, mode: EditMode) {
        if self.stack.len() >= Self::MAX_DEPTH {
            tracing::warn!(%mode, "mode stack full, replacing top");
            self.stack.pop();
        }
        self.stack.push(mode);
    }

    /// Return to the previous mode. The base `Idle` is never popped.
    pub fn pop(&mut self) -> Option<EditMode> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Pop every mode in `family` off the top, landing on whatever was
    /// active before the first of them was pushed.
    pub fn unwind(&mut self, family: &[EditMode]) {
        while self.stack.len() > 1 && family.contains(&self.current()) {
            self.stack.pop();
        }
    }

    /// Drop everything back to `Idle`.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let s = ModeStack::new();
        assert_eq!(s.current(), EditMode::Idle);
        assert_eq!(s.previous(), None);
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn push_pop_restores_previous() {
        let mut s = ModeStack::new();
        s.push(EditMode::CanRotate);
        s.push(EditMode::Rotating);
        assert_eq!(s.previous(), Some(EditMode::CanRotate));
        assert_eq!(s.pop(), Some(EditMode::Rotating));
        assert_eq!(s.current(), EditMode::CanRotate);
    }

    #[test]
    fn base_is_never_popped() {
        let mut s = ModeStack::new();
        assert_eq!(s.pop(), None);
        assert_eq!(s.current(), EditMode::Idle);
    }

    #[test]
    fn unwind_stops_below_family() {
        let mut s = ModeStack::new();
        s.push(EditMode::CanRemove);
        s.push(EditMode::Removing);
        s.unwind(&[EditMode::CanRemove, EditMode::Removing]);
        assert_eq!(s.current(), EditMode::Idle);
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn unwind_leaves_other_modes() {
        let mut s = ModeStack::new();
        s.push(EditMode::CanRotate);
        s.unwind(&[EditMode::CanDrag, EditMode::Dragging]);
        assert_eq!(s.current(), EditMode::CanRotate);
    }

    #[test]
    fn depth_is_bounded() {
        let mut s = ModeStack::new();
        for _ in 0..20 {
            s.push(EditMode::Adding);
        }
        assert_eq!(s.depth(), ModeStack::MAX_DEPTH);
        s.reset();
        assert_eq!(s.current(), EditMode::Idle);
    }

    #[test]
    fn labels() {
        assert_eq!(EditMode::CanDrag.to_string(), "CAN_DRAG");
        assert_eq!(EditMode::Removing.label(), "REMOVING");
    }
}
