//! Catch-all adapter for sites without a dedicated one.
//!
//! Unknown sites get the conservative convention: plain Enter becomes a soft
//! break and Ctrl/Cmd+Enter is left for the site's own send handling.  The
//! editable test is necessarily heuristic — there is no site-specific markup
//! to key on — so it leans on ARIA roles plus a keyword scan of
//! aria-label/id/class.  The keyword list is best-effort and includes the
//! Japanese UI terms the supported sites actually use; it is intentionally
//! not broadened, since every new keyword changes behavior on sites nobody
//! has tested.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

use super::{custom_rules_verdict, dispatch_plain_enter_sequence, SiteAdapter};

/// Parent levels to climb when hunting for a send control.  Lower than the
/// dedicated adapters: with a generic selector list, a deep climb is more
/// likely to hit an unrelated button than to help.
const SEND_BUTTON_MAX_HOPS: usize = 7;

/// Hosts where interception is never safe regardless of configuration:
/// both remap Enter for document editing, not chat.
const SUPPRESSED_HOSTS: [&str; 2] = ["docs.google.com", "mail.google.com"];

/// Accessible-name/id/class fragments that mark a chat-style composer.
const COMPOSER_KEYWORDS: [&str; 11] = [
    "message", "chat", "compose", "reply", "comment", "post", "write", "prompt",
    "メッセージ", "チャット", "コメント",
];

pub struct FallbackAdapter {
    form: Vec<Selector>,
    send_candidates: Vec<Selector>,
}

impl FallbackAdapter {
    pub fn new() -> Self {
        Self {
            form: parse_static_list(&["form"]),
            send_candidates: parse_static_list(&[
                "button[type=\"submit\"]",
                "button[aria-label*=\"Send\"]",
                "button[aria-label*=\"送信\"]",
                "[data-testid*=\"send\"]",
                "[data-testid*=\"submit\"]",
                "button[class*=\"send\"]",
                "div[role=\"button\"][aria-label*=\"送信\"]",
                "div[role=\"button\"][aria-label*=\"Send\"]",
                "div[role=\"button\"][class*=\"send\"]",
                "button[title*=\"Send\"]",
                "button[title*=\"送信\"]",
                "div[role=\"button\"][aria-label=\"Send message\"]",
                "div[role=\"button\"][aria-label=\"メッセージを送信\"]",
                "button[aria-label=\"メッセージを送信\"]",
                "button[jsname=\"SoqoBf\"]",
                "div[aria-label=\"Press Enter to send\"]",
                "div[aria-label=\"Send\"]",
            ]),
        }
    }

    fn has_composer_keyword<D: DomNode>(element: &D) -> bool {
        let haystacks = [
            element.attribute("aria-label"),
            element.attribute("id"),
            element.attribute("class"),
        ];
        haystacks.iter().flatten().any(|value| {
            let value = value.to_lowercase();
            COMPOSER_KEYWORDS
                .iter()
                .any(|keyword| value.contains(&keyword.to_lowercase()))
        })
    }
}

impl Default for FallbackAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for FallbackAdapter {
    fn name(&self) -> &'static str {
        "default"
    }

    fn matches(&self, _hostname: &str) -> bool {
        true
    }

    fn convention(&self) -> NativeSendKey {
        NativeSendKey::CtrlEnter
    }

    fn is_editable(&self, element: Option<&D>, config: Option<&DomainConfig>) -> bool {
        let Some(element) = element else {
            return false;
        };

        if SUPPRESSED_HOSTS.contains(&element.document_hostname().as_str()) {
            return false;
        }
        if let Some(verdict) = custom_rules_verdict(element, config) {
            return verdict;
        }

        let tag = element.tag_name();
        if tag == "INPUT" {
            return false;
        }
        let role = element.attribute("role");
        if role.as_deref() == Some("searchbox") {
            return false;
        }
        if element.attribute("aria-multiline").as_deref() == Some("false") {
            return false;
        }
        if tag == "TEXTAREA" {
            return true;
        }

        if element.is_content_editable()
            && (role.as_deref() == Some("textbox") || Self::has_composer_keyword(element))
        {
            return true;
        }

        false
    }

    fn insert_newline(&self, target: &D) {
        if target.tag_name() == "TEXTAREA" {
            target.replace_selection("\n");
            target.notify_input();
        } else if target.is_content_editable() {
            // The editing command already makes the insertion observable to
            // the page; when it is refused there is nothing safe left to try.
            let _ = target.insert_text_at_caret("\n");
        }
    }

    fn trigger_send(&self, target: &D) {
        if let Some(form) = query::closest_any(target, &self.form) {
            if form.request_submit() {
                return;
            }
        }

        if let Some(start) = target.parent() {
            if let Some(button) =
                query::search_ancestors(&start, &self.send_candidates, SEND_BUTTON_MAX_HOPS)
            {
                button.click();
                return;
            }
        }

        dispatch_plain_enter_sequence(target);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
