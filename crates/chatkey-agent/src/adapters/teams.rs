//! Microsoft Teams adapter.
//!
//! The composer is a contenteditable ARIA textbox.  Teams processes
//! untrusted key sequences, so when no send button can be located the
//! adapter falls back to replaying a plain Enter sequence on the composer.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

use super::{
    custom_rules_verdict, dispatch_plain_enter_sequence, dispatch_soft_break_sequence, SiteAdapter,
};

/// Parent levels to climb when hunting for the send button.
const SEND_BUTTON_MAX_HOPS: usize = 10;

pub struct TeamsAdapter {
    textbox: Vec<Selector>,
    send_buttons: Vec<Selector>,
}

impl TeamsAdapter {
    pub fn new() -> Self {
        Self {
            textbox: parse_static_list(&["[role=\"textbox\"]"]),
            send_buttons: parse_static_list(&[
                "button[aria-label=\"Send\"]",
                "button[aria-label=\"送信\"]",
                "button[data-tid=\"newMessageCommands-send\"]",
                "button[aria-label*=\"Send\"]",
                "button[aria-label*=\"送信\"]",
            ]),
        }
    }
}

impl Default for TeamsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for TeamsAdapter {
    fn name(&self) -> &'static str {
        "teams"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "teams.microsoft.com")
            || chatkey_core::hostname_matches_domain(hostname, "teams.live.com")
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
        if element.is_content_editable() && element.attribute("role").as_deref() == Some("textbox")
        {
            return true;
        }
        query::closest_any(element, &self.textbox)
            .is_some_and(|textbox| textbox.is_content_editable())
    }

    fn insert_newline(&self, target: &D) {
        dispatch_soft_break_sequence(target);
    }

    fn trigger_send(&self, target: &D) {
        if let Some(start) = target.parent() {
            if let Some(button) =
                query::search_ancestors(&start, &self.send_buttons, SEND_BUTTON_MAX_HOPS)
            {
                button.click();
                return;
            }
        }
        dispatch_plain_enter_sequence(target);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
