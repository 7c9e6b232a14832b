//! Immutable keystroke snapshots and propagation phases.

/// Snapshot of a single physical key press.
///
/// Produced once per native `keydown` by the embedding host and never
/// mutated.  The policy only ever inspects it; it carries no DOM handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// DOM `KeyboardEvent.key` value, e.g. `"Enter"` or `"a"`.
    pub key: String,
    /// Shift modifier held.
    pub shift: bool,
    /// Ctrl modifier held.
    pub ctrl: bool,
    /// Meta (Cmd/Win/Super) modifier held.
    pub meta: bool,
    /// Alt (Option) modifier held.
    pub alt: bool,
    /// `false` for synthetic events dispatched from script.  Untrusted
    /// events are never acted on, which is what keeps the engine's own
    /// synthetic key sequences from being re-intercepted.
    pub is_trusted: bool,
    /// `true` while an IME composition session is active.
    pub is_composing: bool,
}

impl KeyPress {
    /// Creates a trusted, modifier-free press of `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
            ctrl: false,
            meta: false,
            alt: false,
            is_trusted: true,
            is_composing: false,
        }
    }

    /// Creates a trusted, modifier-free Enter press.
    pub fn enter() -> Self {
        Self::new("Enter")
    }

    /// Returns a copy with the Shift modifier set.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Returns a copy with the Ctrl modifier set.
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Returns a copy with the Meta modifier set.
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Returns a copy with the Alt modifier set.
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Returns a copy marked as synthetic (script-dispatched).
    pub fn untrusted(mut self) -> Self {
        self.is_trusted = false;
        self
    }

    /// Returns a copy marked as part of an IME composition session.
    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }

    /// Whether this is the Enter key.
    pub fn is_enter(&self) -> bool {
        self.key == "Enter"
    }

    /// Whether no modifier key at all is held.
    pub fn has_no_modifiers(&self) -> bool {
        !self.shift && !self.ctrl && !self.meta && !self.alt
    }
}

/// Which DOM propagation stage delivered the event to the listener.
///
/// Capture-phase listeners run before the page's own handlers on the target;
/// bubble-phase listeners run after.  The two-phase send protocol in
/// [`resolve_key_action`](crate::resolve_key_action) depends on this
/// distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Capture,
    Bubble,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
