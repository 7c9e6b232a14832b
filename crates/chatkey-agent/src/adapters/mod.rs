//! Per-site adapters and the adapter registry.
//!
//! Every supported site renders its compose box with different markup — a
//! plain `<textarea>`, an ARIA textbox with contenteditable, or a specific
//! rich-text framework's root class — and differs in how a soft break can be
//! inserted and how its send action can be triggered programmatically.  The
//! [`SiteAdapter`] trait is the seam that keeps all of that site knowledge
//! out of the generic keystroke policy.
//!
//! Adapters are a fixed, closed set: constructed once at startup, stateless,
//! never mutated, selected exactly once per page by the [`AdapterRegistry`].

use std::sync::Arc;

use chatkey_core::{DomainConfig, NativeSendKey};

use crate::dom::query;
use crate::dom::selector;
use crate::dom::{DomNode, SyntheticKey, SyntheticKeyKind};

pub mod chatgpt;
pub mod claude;
pub mod discord;
pub mod fallback;
pub mod grok;
pub mod slack;
pub mod teams;

pub use chatgpt::ChatGptAdapter;
pub use claude::ClaudeAdapter;
pub use discord::DiscordAdapter;
pub use fallback::FallbackAdapter;
pub use grok::GrokAdapter;
pub use slack::SlackAdapter;
pub use teams::TeamsAdapter;

/// Which event target the host must attach the capture-phase listener to.
///
/// Most sites surface trusted key semantics on the document; a few only do
/// so on the owning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    Document,
    Window,
}

/// Site-specific knowledge behind one capability interface.
///
/// Implementations must be pure in `matches` and side-effect-free in
/// `is_editable`; `insert_newline` and `trigger_send` perform their effect
/// through the [`DomNode`] handle and degrade to silent no-ops when the
/// page shape offers no usable target.
pub trait SiteAdapter<D: DomNode> {
    /// Unique adapter key, e.g. `"discord"`.
    fn name(&self) -> &'static str;

    /// Whether this adapter owns pages on `hostname`.
    fn matches(&self, hostname: &str) -> bool;

    /// Where the capture-phase listener belongs.
    fn listener_target(&self) -> ListenerTarget {
        ListenerTarget::Document
    }

    /// The site's native "send" key binding.
    fn convention(&self) -> NativeSendKey;

    /// Whether `element` is (or is nested inside) this site's composition
    /// surface.  `None` is always a negative result.
    fn is_editable(&self, element: Option<&D>, config: Option<&DomainConfig>) -> bool;

    /// Inserts exactly one soft line break at the current caret without
    /// submitting the message.
    fn insert_newline(&self, target: &D);

    /// Submits the message composed in `target` through the site's own
    /// mechanism.  Never constructs network requests itself.
    fn trigger_send(&self, target: &D);
}

// ── Shared adapter building blocks ────────────────────────────────────────────

/// Applies the user's custom exclude/target selector lists.
///
/// Checked before any site-specific structural test: an exclude match on the
/// element or any ancestor rejects outright; a target match on the element
/// accepts outright; otherwise the adapter's own test decides.
pub(crate) fn custom_rules_verdict<D: DomNode>(
    element: &D,
    config: Option<&DomainConfig>,
) -> Option<bool> {
    let config = config?;
    if let Some(excludes) = &config.custom_excludes {
        let selectors = selector::parse_list_lossy(excludes);
        if query::closest_any(element, &selectors).is_some() {
            return Some(false);
        }
    }
    if let Some(targets) = &config.custom_targets {
        let selectors = selector::parse_list_lossy(targets);
        if query::matches_any(element, &selectors) {
            return Some(true);
        }
    }
    None
}

/// Dispatches the synthetic Shift+Enter keydown/keypress/keyup sequence that
/// rich-text editors interpret as "insert soft break".
pub(crate) fn dispatch_soft_break_sequence<D: DomNode>(target: &D) {
    for kind in [
        SyntheticKeyKind::KeyDown,
        SyntheticKeyKind::KeyPress,
        SyntheticKeyKind::KeyUp,
    ] {
        target.dispatch_key(&SyntheticKey::shift_enter(kind));
    }
}

/// Dispatches a plain synthetic Enter keydown/keypress/keyup sequence, used
/// as a last-resort send trigger on sites that honor untrusted key events.
pub(crate) fn dispatch_plain_enter_sequence<D: DomNode>(target: &D) {
    for kind in [
        SyntheticKeyKind::KeyDown,
        SyntheticKeyKind::KeyPress,
        SyntheticKeyKind::KeyUp,
    ] {
        target.dispatch_key(&SyntheticKey::enter(kind));
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Fixed, ordered adapter list with first-match-wins dispatch by hostname.
///
/// The catch-all adapter is a separate field rather than a list entry, so
/// [`AdapterRegistry::get`] is total by construction: no hostname can ever
/// fail to resolve.
pub struct AdapterRegistry<D: DomNode> {
    specific: Vec<Arc<dyn SiteAdapter<D>>>,
    fallback: Arc<dyn SiteAdapter<D>>,
}

impl<D: DomNode + 'static> AdapterRegistry<D> {
    /// The standard adapter set in its canonical order.
    ///
    /// The supported hostname patterns do not overlap today, but the order
    /// is part of the contract and preserved defensively.
    pub fn standard() -> Self {
        Self {
            specific: vec![
                Arc::new(DiscordAdapter::new()),
                Arc::new(ClaudeAdapter::new()),
                Arc::new(SlackAdapter::new()),
                Arc::new(GrokAdapter::new()),
                Arc::new(ChatGptAdapter::new()),
                Arc::new(TeamsAdapter::new()),
            ],
            fallback: Arc::new(FallbackAdapter::new()),
        }
    }

    /// Resolves the adapter for `hostname`.  Never fails.
    pub fn get(&self, hostname: &str) -> Arc<dyn SiteAdapter<D>> {
        for adapter in &self.specific {
            if adapter.matches(hostname) {
                return Arc::clone(adapter);
            }
        }
        Arc::clone(&self.fallback)
    }

    /// All adapters in dispatch order, catch-all last.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn SiteAdapter<D>>> {
        self.specific.iter().chain(std::iter::once(&self.fallback))
    }
}

impl<D: DomNode + 'static> Default for AdapterRegistry<D> {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
