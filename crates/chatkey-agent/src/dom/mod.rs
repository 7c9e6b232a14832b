//! DOM abstraction consumed by the adapters and the dispatch engine.
//!
//! The engine never touches a real DOM directly.  Everything it needs from
//! the page — attribute reads, tree walks, synthetic event dispatch, caret
//! edits — goes through the [`DomNode`] trait, so the same adapter code runs
//! against the embedding host's real elements and against the deterministic
//! [`mock::MockDom`] used by every test in this crate.
//!
//! Action methods deliberately return nothing (or a bare success flag): per
//! the error model, a missing target or refused command degrades to a silent
//! no-op, never an error that could escape the keystroke path.

pub mod mock;
pub mod query;
pub mod selector;

/// Stage of a synthetic keyboard sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticKeyKind {
    KeyDown,
    KeyPress,
    KeyUp,
}

/// A synthetic keyboard event to dispatch on a node.
///
/// Synthetic events are untrusted by construction on every real DOM, which
/// is exactly why the resolver's trust gate never re-intercepts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticKey {
    pub kind: SyntheticKeyKind,
    pub key: String,
    pub shift: bool,
}

impl SyntheticKey {
    /// A plain Enter event of the given kind.
    pub fn enter(kind: SyntheticKeyKind) -> Self {
        Self {
            kind,
            key: "Enter".to_string(),
            shift: false,
        }
    }

    /// A Shift+Enter event of the given kind — the near-universal "soft
    /// break" chord that rich-text editors watch for.
    pub fn shift_enter(kind: SyntheticKeyKind) -> Self {
        Self {
            kind,
            key: "Enter".to_string(),
            shift: true,
        }
    }
}

/// A synthetic mouse event to dispatch on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    MouseDown,
    MouseUp,
}

/// One element handle in the abstracted DOM.
///
/// Handles are cheap to clone and compare by identity, like the element
/// references they stand in for.
pub trait DomNode: Clone + PartialEq + std::fmt::Debug {
    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Canonical (uppercase) tag name, e.g. `"TEXTAREA"`.
    fn tag_name(&self) -> String;

    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether the element participates in an editable-content region.
    fn is_content_editable(&self) -> bool;

    /// Parent element, if any.
    fn parent(&self) -> Option<Self>;

    /// Child elements in document order.
    fn children(&self) -> Vec<Self>;

    /// Hostname of the owning document's location.
    fn document_hostname(&self) -> String;

    // ── Actions ───────────────────────────────────────────────────────────────

    /// Dispatches a synthetic keyboard event on this node.
    fn dispatch_key(&self, event: &SyntheticKey);

    /// Dispatches a synthetic mouse event on this node.
    fn dispatch_mouse(&self, event: MouseEventKind);

    /// Activates the element the way a user click would.
    fn click(&self);

    /// Replaces the current selection of a plain text control (textarea)
    /// with `text`, leaving the caret after it.
    fn replace_selection(&self, text: &str);

    /// Fires a synthetic `input` notification so the page's own state
    /// management observes a buffer edit made through [`replace_selection`].
    ///
    /// [`replace_selection`]: DomNode::replace_selection
    fn notify_input(&self);

    /// Inserts `text` at the caret of an editable-content region through the
    /// document's editing command, returning `false` when the command is
    /// unavailable or refused.  Successful insertion is already observable
    /// to the page; no separate notification is needed.
    fn insert_text_at_caret(&self, text: &str) -> bool;

    /// Submits this element as a form, returning `false` when the element
    /// is not a submittable form.
    fn request_submit(&self) -> bool;

    /// Fires an untyped, parameterless broadcast event on the owning
    /// document.  Fire-and-forget: no acknowledgment, no payload.
    fn emit_page_signal(&self, name: &str);
}
