//! Slack adapter.
//!
//! The composer is a Quill editor (`.ql-editor`).  The send button carries a
//! stable `data-qa` hook and usually lives in one of a few known composer
//! containers; the bounded ancestor climb is only the backstop for layouts
//! where it does not.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

use super::{custom_rules_verdict, dispatch_soft_break_sequence, SiteAdapter};

/// Parent levels to climb when the composer containers yield nothing.
const SEND_BUTTON_MAX_HOPS: usize = 10;

pub struct SlackAdapter {
    editor: Vec<Selector>,
    containers: Vec<Selector>,
    send_button: Vec<Selector>,
}

impl SlackAdapter {
    pub fn new() -> Self {
        Self {
            editor: parse_static_list(&[".ql-editor"]),
            containers: parse_static_list(&[
                ".c-texty_input_unstyled__container",
                ".c-message_kit__editor",
                "[data-qa=\"message_editor\"]",
            ]),
            send_button: parse_static_list(&["button[data-qa=\"texty_send_button\"]"]),
        }
    }
}

impl Default for SlackAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for SlackAdapter {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "slack.com")
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
        // Known composer containers first: the button sits inside, or (for
        // the unstyled input container) one level above.
        if let Some(container) = query::closest_any(target, &self.containers) {
            if let Some(button) = query::query_first_of(&container, &self.send_button) {
                button.click();
                return;
            }
            if let Some(parent) = container.parent() {
                if let Some(button) = query::query_first_of(&parent, &self.send_button) {
                    button.click();
                    return;
                }
            }
        }

        if let Some(start) = target.parent() {
            if let Some(button) =
                query::search_ancestors(&start, &self.send_button, SEND_BUTTON_MAX_HOPS)
            {
                button.click();
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
