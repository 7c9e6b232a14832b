//! Bridge to a cooperating script in the page's own execution context.
//!
//! Some editor frameworks (Discord's Slate, notably) discard untrusted
//! keyboard events outright, so no synthetic sequence dispatched from the
//! engine's isolated context can ever produce a soft break.  The only way in
//! is the page's own JavaScript context, where the editor's internal API is
//! reachable.
//!
//! The two contexts share nothing.  Their entire contract is one
//! fire-and-forget broadcast: the adapter emits [`SOFT_BREAK_SIGNAL`] on the
//! document, and the in-page half — modeled here by [`SoftBreakResponder`] —
//! hears it, finds the editor root, and asks the editor to insert one soft
//! break.  No payload, no acknowledgment, no shared state.

use tracing::trace;

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

/// Name of the broadcast event meaning "insert one soft break now".
pub const SOFT_BREAK_SIGNAL: &str = "__chatkey_insert_newline";

/// Access to a page editor's internal soft-break API.
///
/// The in-page implementation digs the live editor instance out of the
/// framework internals behind `root`; tests substitute a recorder.
pub trait EditorApi<D: DomNode> {
    /// Inserts one soft break via the editor owning `root`.  Returns
    /// `false` when no live editor instance is reachable.
    fn insert_soft_break(&self, root: &D) -> bool;
}

/// The in-page half of the soft-break bridge.
pub struct SoftBreakResponder<A> {
    editor_root: Vec<Selector>,
    api: A,
}

impl<A> SoftBreakResponder<A> {
    pub fn new(api: A) -> Self {
        Self {
            editor_root: parse_static_list(&["[role=\"textbox\"][data-slate-editor]"]),
            api,
        }
    }
}

impl<A> SoftBreakResponder<A> {
    /// Handles one received [`SOFT_BREAK_SIGNAL`].
    ///
    /// Locates the editor root under `document_root` and asks the editor to
    /// insert a soft break.  A page without an editor (or an editor whose
    /// internals are unreachable) makes this a silent no-op; the signal
    /// carries no reply channel to report anything over.
    pub fn on_signal<D: DomNode>(&self, document_root: &D) -> bool
    where
        A: EditorApi<D>,
    {
        let Some(editor) = query::query_first_of(document_root, &self.editor_root) else {
            trace!("soft-break signal with no editor root present");
            return false;
        };
        self.api.insert_soft_break(&editor)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
