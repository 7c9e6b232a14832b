//! ChatGPT adapter.
//!
//! The composer has shipped as a plain `<textarea>` (`#prompt-textarea`) and
//! as a ProseMirror contenteditable, sometimes both within one release
//! cycle, so the editable test accepts every shape seen in the wild.  The
//! newline strategy follows the shape: caret edit + input notification for
//! the textarea, synthetic Shift+Enter for the rich editor.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

use super::{custom_rules_verdict, dispatch_soft_break_sequence, SiteAdapter};

/// Parent levels to climb when hunting for the send button.
const SEND_BUTTON_MAX_HOPS: usize = 10;

pub struct ChatGptAdapter {
    editor: Vec<Selector>,
    form: Vec<Selector>,
    send_buttons: Vec<Selector>,
}

impl ChatGptAdapter {
    pub fn new() -> Self {
        Self {
            editor: parse_static_list(&[".ProseMirror"]),
            form: parse_static_list(&["form"]),
            send_buttons: parse_static_list(&[
                "button[data-testid=\"send-button\"]",
                "button[aria-label=\"Send prompt\"]",
                "button[aria-label=\"プロンプトを送信する\"]",
                "button[aria-label*=\"Send\"]",
                "button[aria-label*=\"送信\"]",
            ]),
        }
    }
}

impl Default for ChatGptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for ChatGptAdapter {
    fn name(&self) -> &'static str {
        "chatgpt"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "chatgpt.com")
            || chatkey_core::hostname_matches_domain(hostname, "openai.com")
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

        if element.tag_name() == "TEXTAREA" {
            return true;
        }

        if element.is_content_editable() {
            let id = element.attribute("id");
            let role = element.attribute("role");
            if id.as_deref() == Some("prompt-textarea") || role.as_deref() == Some("textbox") {
                return true;
            }
            if query::closest_any(element, &self.editor)
                .is_some_and(|editor| editor.is_content_editable())
            {
                return true;
            }
        }

        false
    }

    fn insert_newline(&self, target: &D) {
        if target.tag_name() == "TEXTAREA" {
            target.replace_selection("\n");
            target.notify_input();
        } else {
            dispatch_soft_break_sequence(target);
        }
    }

    fn trigger_send(&self, target: &D) {
        let start = query::closest_any(target, &self.form).or_else(|| target.parent());
        if let Some(start) = start {
            if let Some(button) =
                query::search_ancestors(&start, &self.send_buttons, SEND_BUTTON_MAX_HOPS)
            {
                button.click();
                return;
            }
        }

        // No button anywhere near: submit the composer form directly.
        if let Some(form) = query::closest_any(target, &self.form) {
            form.request_submit();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
