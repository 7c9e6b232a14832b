//! Grok adapter.
//!
//! Same TipTap/ProseMirror composer as Claude, but the send control is a
//! plain submit button inside the composer form, so the climb starts at the
//! nearest form when there is one.

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::selector::{parse_static_list, Selector};
use crate::dom::{query, DomNode};

use super::{custom_rules_verdict, dispatch_soft_break_sequence, SiteAdapter};

/// Parent levels to climb when hunting for the submit button.
const SEND_BUTTON_MAX_HOPS: usize = 10;

pub struct GrokAdapter {
    editor: Vec<Selector>,
    form: Vec<Selector>,
    send_buttons: Vec<Selector>,
}

impl GrokAdapter {
    pub fn new() -> Self {
        Self {
            editor: parse_static_list(&[".tiptap.ProseMirror"]),
            form: parse_static_list(&["form"]),
            send_buttons: parse_static_list(&[
                "button[type=\"submit\"][aria-label]",
                "button[aria-label=\"送信\"]",
                "button[aria-label=\"Send\"]",
                "button[type=\"submit\"]",
            ]),
        }
    }
}

impl Default for GrokAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomNode> SiteAdapter<D> for GrokAdapter {
    fn name(&self) -> &'static str {
        "grok"
    }

    fn matches(&self, hostname: &str) -> bool {
        chatkey_core::hostname_matches_domain(hostname, "grok.com")
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
        let start = query::closest_any(target, &self.form).or_else(|| target.parent());
        let Some(start) = start else {
            return;
        };
        if let Some(button) =
            query::search_ancestors(&start, &self.send_buttons, SEND_BUTTON_MAX_HOPS)
        {
            button.click();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ListenerTarget;
    use crate::dom::mock::{MockDom, MockNode};

    fn adapter() -> GrokAdapter {
        GrokAdapter::new()
    }

    #[test]
    fn test_matches_grok_hostnames() {
        let adapter = adapter();
        assert!(SiteAdapter::<MockNode>::matches(&adapter, "grok.com"));
        assert!(!SiteAdapter::<MockNode>::matches(&adapter, "grokish.com"));
    }

    #[test]
    fn test_detects_prosemirror_editor() {
        let dom = MockDom::new("grok.com");
        let editor = dom
            .root()
            .append("div")
            .with_attr("class", "tiptap ProseMirror")
            .editable();
        assert!(adapter().is_editable(Some(&editor), None));
        assert!(!adapter().is_editable(None::<&MockNode>, None));
    }

    #[test]
    fn test_insert_newline_dispatches_shift_enter_sequence() {
        let dom = MockDom::new("grok.com");
        let editor = dom
            .root()
            .append("div")
            .with_attr("class", "tiptap ProseMirror")
            .editable();
        adapter().insert_newline(&editor);
        assert_eq!(editor.events().len(), 3);
    }

    #[test]
    fn test_trigger_send_clicks_submit_button_in_form() {
        let dom = MockDom::new("grok.com");
        let form = dom.root().append("form");
        let editor = form
            .append("div")
            .with_attr("class", "tiptap ProseMirror")
            .editable();
        let button = form.append("button").with_attr("type", "submit");

        adapter().trigger_send(&editor);
        assert_eq!(button.clicks(), 1);
    }

    #[test]
    fn test_trigger_send_prefers_labeled_submit_over_bare_submit() {
        let dom = MockDom::new("grok.com");
        let form = dom.root().append("form");
        let editor = form
            .append("div")
            .with_attr("class", "tiptap ProseMirror")
            .editable();
        let bare = form.append("button").with_attr("type", "submit");
        let labeled = form
            .append("button")
            .with_attr("type", "submit")
            .with_attr("aria-label", "Send");

        adapter().trigger_send(&editor);
        assert_eq!(labeled.clicks(), 1);
        assert_eq!(bare.clicks(), 0);
    }

    #[test]
    fn test_trigger_send_without_form_climbs_from_parent() {
        let dom = MockDom::new("grok.com");
        let wrapper = dom.root().append("div");
        let editor = wrapper
            .append("div")
            .with_attr("class", "tiptap ProseMirror")
            .editable();
        let button = wrapper
            .append("button")
            .with_attr("aria-label", "Send");

        adapter().trigger_send(&editor);
        assert_eq!(button.clicks(), 1);
    }

    #[test]
    fn test_adapter_properties() {
        let adapter = adapter();
        assert_eq!(SiteAdapter::<MockNode>::name(&adapter), "grok");
        assert_eq!(
            SiteAdapter::<MockNode>::listener_target(&adapter),
            ListenerTarget::Document
        );
        assert_eq!(
            SiteAdapter::<MockNode>::convention(&adapter),
            NativeSendKey::Enter
        );
    }
}
