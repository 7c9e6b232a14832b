//! Discord adapter.
//!
//! Discord's composer is a Slate editor exposed as a contenteditable ARIA
//! textbox.  Slate ignores untrusted `KeyboardEvent`s entirely, so the soft
//! break cannot be faked with a synthetic Shift+Enter; instead the adapter
//! broadcasts the page signal that the cooperating in-page script (see
//! [`crate::infrastructure::page_bridge`]) answers by calling the editor's
//! own soft-break API.  Sending is the mirror image: Discord *does* process
//! untrusted Enter keydowns through its React handler, so a single synthetic
//! keydown on the textbox submits the message.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode, SyntheticKey, SyntheticKeyKind};
use crate::infrastructure::page_bridge::SOFT_BREAK_SIGNAL;

use super::{custom_rules_verdict, SiteAdapter};

pub struct DiscordAdapter {
    textbox: Vec<Selector>,
}

impl DiscordAdapter {
    pub fn new() -> Self {
        Self {
            textbox: parse_static_list(&["[role=\"textbox\"]"]),
        }
    }

    fn closest_textbox<D: DomNode>(&self, element: &D) -> Option<D> {
        query::closest_any(element, &self.textbox)
    }
}

impl Default for DiscordAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for DiscordAdapter {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "discord.com")
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
        self.closest_textbox(element)
            .is_some_and(|textbox| textbox.is_content_editable())
    }

    fn insert_newline(&self, target: &D) {
        target.emit_page_signal(SOFT_BREAK_SIGNAL);
    }

    fn trigger_send(&self, target: &D) {
        // The target may be a child of the textbox; dispatch on the textbox
        // itself so Discord's handler sees the key where it listens.
        let textbox = self.closest_textbox(target).unwrap_or_else(|| target.clone());
        textbox.dispatch_key(&SyntheticKey::enter(SyntheticKeyKind::KeyDown));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
