//! Claude adapter.
//!
//! The composer is a TipTap/ProseMirror editor.  ProseMirror honors
//! synthetic Shift+Enter sequences for soft breaks, so no page bridge is
//! needed here.  Trusted key semantics only surface on the window, hence the
//! window listener target.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode, MouseEventKind};

use super::{custom_rules_verdict, dispatch_soft_break_sequence, ListenerTarget, SiteAdapter};

/// Parent levels to climb when hunting for the send button.
const SEND_BUTTON_MAX_HOPS: usize = 10;

pub struct ClaudeAdapter {
    editor: Vec<Selector>,
    send_buttons: Vec<Selector>,
}

impl ClaudeAdapter {
    pub fn new() -> Self {
        Self {
            editor: parse_static_list(&[".tiptap.ProseMirror"]),
            // Exact labels first (English and Japanese UI), substrings last.
            send_buttons: parse_static_list(&[
                "button[aria-label=\"メッセージを送信\"]",
                "button[aria-label=\"Send message\"]",
                "button[aria-label*=\"送信\"]",
                "button[aria-label*=\"Send\"]",
            ]),
        }
    }
}

impl Default for ClaudeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for ClaudeAdapter {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "claude.ai")
    }

    fn listener_target(&self) -> ListenerTarget {
        ListenerTarget::Window
    }

    fn convention(&self) -> NativeSendKey {
        NativeSendKey::Enter
    }

    fn is_editable(&self, element: Option<&D>, config: Option<&DomainConfig>) -> bool {
        let Some(element) = element else {
            return false;
        };
        if let Some(verdict) = custom_rules_verdict(element, config) {
            return verdict;
        }
        query::closest_any(element, &self.editor)
            .is_some_and(|editor| editor.is_content_editable())
    }

    fn insert_newline(&self, target: &D) {
        dispatch_soft_break_sequence(target);
    }

    fn trigger_send(&self, target: &D) {
        let Some(start) = target.parent() else {
            return;
        };
        if let Some(button) = query::search_ancestors(&start, &self.send_buttons, SEND_BUTTON_MAX_HOPS)
        {
            // The button's handler checks for a real press, not just a click.
            button.dispatch_mouse(MouseEventKind::MouseDown);
            button.dispatch_mouse(MouseEventKind::MouseUp);
            button.click();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
