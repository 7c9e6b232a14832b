//! Deterministic in-memory DOM for tests.
//!
//! [`MockDom`] holds a single document tree plus the action log every
//! adapter effect leaves behind: synthetic key/mouse events per node, click
//! and submit counts, caret edits, and document-level page signals.  Tests
//! build a page shape with the fluent helpers and assert on the records.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{DomNode, MouseEventKind, SyntheticKey};

/// One action observed on a mock node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    Key(SyntheticKey),
    Mouse(MouseEventKind),
    Input,
}

#[derive(Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    content_editable: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Plain text control buffer (textarea semantics).
    value: String,
    caret: usize,
    /// Editable-content buffer fed by `insert_text_at_caret`.
    rich_text: String,
    /// Whether the document's editing command is available for this node.
    accepts_insert_text: bool,
    events: Vec<RecordedEvent>,
    clicks: usize,
    submits: usize,
}

struct DomTree {
    hostname: String,
    nodes: Vec<NodeData>,
    signals: Vec<String>,
}

/// An in-memory document.
#[derive(Clone)]
pub struct MockDom {
    inner: Rc<RefCell<DomTree>>,
}

impl MockDom {
    /// Creates a document with an empty `BODY` root for `hostname`.
    pub fn new(hostname: &str) -> Self {
        let root = NodeData {
            tag: "BODY".to_string(),
            accepts_insert_text: true,
            ..NodeData::default()
        };
        Self {
            inner: Rc::new(RefCell::new(DomTree {
                hostname: hostname.to_string(),
                nodes: vec![root],
                signals: Vec::new(),
            })),
        }
    }

    /// The document root element.
    pub fn root(&self) -> MockNode {
        MockNode {
            dom: self.clone(),
            id: 0,
        }
    }

    /// Page signals broadcast on this document so far, in order.
    pub fn signals(&self) -> Vec<String> {
        self.inner.borrow().signals.clone()
    }
}

impl fmt::Debug for MockDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.inner.borrow();
        write!(f, "MockDom({}, {} nodes)", tree.hostname, tree.nodes.len())
    }
}

/// Handle to one element of a [`MockDom`].
#[derive(Clone)]
pub struct MockNode {
    dom: MockDom,
    id: usize,
}

impl MockNode {
    // ── Tree construction ─────────────────────────────────────────────────────

    /// Appends a child element and returns its handle.
    pub fn append(&self, tag: &str) -> MockNode {
        let mut tree = self.dom.inner.borrow_mut();
        let id = tree.nodes.len();
        tree.nodes.push(NodeData {
            tag: tag.to_ascii_uppercase(),
            parent: Some(self.id),
            accepts_insert_text: true,
            ..NodeData::default()
        });
        tree.nodes[self.id].children.push(id);
        drop(tree);
        MockNode {
            dom: self.dom.clone(),
            id,
        }
    }

    /// Sets an attribute, returning the handle for chaining.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.dom.inner.borrow_mut().nodes[self.id]
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Marks the element as content-editable, returning the handle.
    pub fn editable(self) -> Self {
        self.dom.inner.borrow_mut().nodes[self.id].content_editable = true;
        self
    }

    /// Seeds a plain text control with `text`, placing the caret at the end.
    pub fn with_value(self, text: &str) -> Self {
        let mut tree = self.dom.inner.borrow_mut();
        let node = &mut tree.nodes[self.id];
        node.value = text.to_string();
        node.caret = text.len();
        drop(tree);
        self
    }

    /// Makes `insert_text_at_caret` report failure, modeling an editor that
    /// refuses the document editing command.
    pub fn refuse_insert_text(self) -> Self {
        self.dom.inner.borrow_mut().nodes[self.id].accepts_insert_text = false;
        self
    }

    // ── Inspection ────────────────────────────────────────────────────────────

    /// Current plain text control buffer.
    pub fn value(&self) -> String {
        self.dom.inner.borrow().nodes[self.id].value.clone()
    }

    /// Text inserted through the editable-content path.
    pub fn rich_text(&self) -> String {
        self.dom.inner.borrow().nodes[self.id].rich_text.clone()
    }

    /// Actions recorded on this node, in order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.dom.inner.borrow().nodes[self.id].events.clone()
    }

    /// Number of user-style click activations.
    pub fn clicks(&self) -> usize {
        self.dom.inner.borrow().nodes[self.id].clicks
    }

    /// Number of form submissions requested on this node.
    pub fn submits(&self) -> usize {
        self.dom.inner.borrow().nodes[self.id].submits
    }

    /// The owning document.
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }
}

impl PartialEq for MockNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dom.inner, &other.dom.inner) && self.id == other.id
    }
}

impl fmt::Debug for MockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.dom.inner.borrow();
        write!(f, "<{}#{}>", tree.nodes[self.id].tag, self.id)
    }
}

impl DomNode for MockNode {
    fn tag_name(&self) -> String {
        self.dom.inner.borrow().nodes[self.id].tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.inner.borrow().nodes[self.id].attrs.get(name).cloned()
    }

    fn is_content_editable(&self) -> bool {
        self.dom.inner.borrow().nodes[self.id].content_editable
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.dom.inner.borrow().nodes[self.id].parent?;
        Some(MockNode {
            dom: self.dom.clone(),
            id: parent,
        })
    }

    fn children(&self) -> Vec<Self> {
        self.dom.inner.borrow().nodes[self.id]
            .children
            .iter()
            .map(|&id| MockNode {
                dom: self.dom.clone(),
                id,
            })
            .collect()
    }

    fn document_hostname(&self) -> String {
        self.dom.inner.borrow().hostname.clone()
    }

    fn dispatch_key(&self, event: &SyntheticKey) {
        self.dom.inner.borrow_mut().nodes[self.id]
            .events
            .push(RecordedEvent::Key(event.clone()));
    }

    fn dispatch_mouse(&self, event: MouseEventKind) {
        self.dom.inner.borrow_mut().nodes[self.id]
            .events
            .push(RecordedEvent::Mouse(event));
    }

    fn click(&self) {
        self.dom.inner.borrow_mut().nodes[self.id].clicks += 1;
    }

    fn replace_selection(&self, text: &str) {
        let mut tree = self.dom.inner.borrow_mut();
        let node = &mut tree.nodes[self.id];
        let caret = node.caret.min(node.value.len());
        node.value.insert_str(caret, text);
        node.caret = caret + text.len();
    }

    fn notify_input(&self) {
        self.dom.inner.borrow_mut().nodes[self.id]
            .events
            .push(RecordedEvent::Input);
    }

    fn insert_text_at_caret(&self, text: &str) -> bool {
        let mut tree = self.dom.inner.borrow_mut();
        let node = &mut tree.nodes[self.id];
        if !node.accepts_insert_text {
            return false;
        }
        node.rich_text.push_str(text);
        node.events.push(RecordedEvent::Input);
        true
    }

    fn request_submit(&self) -> bool {
        let mut tree = self.dom.inner.borrow_mut();
        let node = &mut tree.nodes[self.id];
        if node.tag != "FORM" {
            return false;
        }
        node.submits += 1;
        true
    }

    fn emit_page_signal(&self, name: &str) {
        self.dom.inner.borrow_mut().signals.push(name.to_string());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::SyntheticKeyKind;

    #[test]
    fn test_tree_construction_links_parents_and_children() {
        let dom = MockDom::new("example.com");
        let child = dom.root().append("div");
        let grandchild = child.append("p");

        assert_eq!(grandchild.parent(), Some(child.clone()));
        assert_eq!(child.parent(), Some(dom.root()));
        assert_eq!(dom.root().children(), vec![child]);
    }

    #[test]
    fn test_tag_names_are_canonical_uppercase() {
        let dom = MockDom::new("example.com");
        assert_eq!(dom.root().append("textarea").tag_name(), "TEXTAREA");
    }

    #[test]
    fn test_replace_selection_inserts_at_caret() {
        let dom = MockDom::new("example.com");
        let textarea = dom.root().append("textarea").with_value("test");
        textarea.replace_selection("\n");
        assert_eq!(textarea.value(), "test\n");

        // A second insertion lands after the first.
        textarea.replace_selection("\n");
        assert_eq!(textarea.value(), "test\n\n");
    }

    #[test]
    fn test_insert_text_at_caret_respects_refusal() {
        let dom = MockDom::new("example.com");
        let accepting = dom.root().append("div").editable();
        let refusing = dom.root().append("div").editable().refuse_insert_text();

        assert!(accepting.insert_text_at_caret("\n"));
        assert_eq!(accepting.rich_text(), "\n");
        assert_eq!(accepting.events(), vec![RecordedEvent::Input]);

        assert!(!refusing.insert_text_at_caret("\n"));
        assert_eq!(refusing.rich_text(), "");
        assert!(refusing.events().is_empty());
    }

    #[test]
    fn test_request_submit_only_works_on_forms() {
        let dom = MockDom::new("example.com");
        let form = dom.root().append("form");
        let div = dom.root().append("div");

        assert!(form.request_submit());
        assert_eq!(form.submits(), 1);
        assert!(!div.request_submit());
    }

    #[test]
    fn test_page_signals_accumulate_on_the_document() {
        let dom = MockDom::new("example.com");
        let el = dom.root().append("div");
        el.emit_page_signal("one");
        el.emit_page_signal("two");
        assert_eq!(dom.signals(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_recorded_key_events_keep_order_and_shape() {
        let dom = MockDom::new("example.com");
        let el = dom.root().append("div");
        el.dispatch_key(&SyntheticKey::shift_enter(SyntheticKeyKind::KeyDown));
        el.dispatch_key(&SyntheticKey::shift_enter(SyntheticKeyKind::KeyUp));

        let events = el.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            RecordedEvent::Key(SyntheticKey::shift_enter(SyntheticKeyKind::KeyDown))
        );
    }
}
