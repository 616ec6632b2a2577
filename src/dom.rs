//! In-memory HTML document tree.
//!
//! Documents are parsed with html5ever into a `markup5ever_rcdom` tree. The
//! tree is reference counted: a [`Handle`] is a cheap clone of a node pointer
//! and stays valid after the node is detached.
//!
//! # Traversal vs. mutation
//!
//! Every "find" helper walks the tree and returns owned handles
//! (`Vec<Handle>` or `Option<Handle>`). Callers resolve what they want to
//! change first and mutate afterwards, so no `RefCell` borrow of a
//! `children` vector is ever held across a mutation.
//!
//! The free functions in this module ([`attr`], [`set_attr`],
//! [`replace_node`], ...) are the only places that touch `RefCell`s directly.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{Attribute, LocalName, Namespace, QualName, parse_document, parse_fragment};
use markup5ever_rcdom::{Node, NodeData, RcDom, SerializableHandle};
use std::cell::RefCell;
use std::rc::Rc;

pub use markup5ever_rcdom::Handle;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed, mutable HTML document.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse a full HTML document. html5ever never fails: malformed markup is
    /// recovered the way browsers recover it, including implied `html`,
    /// `head` and `body` elements.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// The document node (parent of the doctype and `<html>`).
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// Serialize the whole document back to HTML text.
    pub fn to_html(&self) -> String {
        let mut bytes = Vec::new();
        let handle: SerializableHandle = self.dom.document.clone().into();
        // Writing into a Vec cannot fail.
        let _ = serialize(&mut bytes, &handle, SerializeOpts::default());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// All elements in document order, optionally restricted to a set of tag
    /// names.
    pub fn elements(&self, tags: &[&str]) -> Vec<Handle> {
        elements_under(&self.dom.document, tags)
    }

    /// First element in document order whose tag is one of `tags`.
    pub fn first_element(&self, tags: &[&str]) -> Option<Handle> {
        first_element_under(&self.dom.document, tags)
    }

    pub fn body(&self) -> Option<Handle> {
        self.first_element(&["body"])
    }

    /// Return the `<body>` element, creating one when the tree has none.
    ///
    /// The second value is `true` when a body had to be created.
    pub fn ensure_body(&self) -> (Handle, bool) {
        if let Some(body) = self.body() {
            return (body, false);
        }
        let body = create_element("body", &[]);
        let host = self
            .first_element(&["html"])
            .unwrap_or_else(|| self.dom.document.clone());
        append_child(&host, &body);
        (body, true)
    }
}

/// A parsed HTML fragment, as the parser sees it inside a `context` element.
///
/// Stray end tags in the source cannot close anything outside the fragment,
/// and serialization always emits balanced markup.
pub struct Fragment {
    dom: RcDom,
}

impl Fragment {
    pub fn parse(html: &str, context: &str) -> Self {
        let dom = parse_fragment(RcDom::default(), Default::default(), html_name(context), Vec::new())
            .one(html);
        Self { dom }
    }

    /// The synthetic element that holds the fragment's top-level nodes.
    pub fn root(&self) -> Handle {
        self.dom
            .document
            .children
            .borrow()
            .first()
            .cloned()
            .unwrap_or_else(|| self.dom.document.clone())
    }

    /// Serialize the fragment's nodes, without the synthetic root.
    pub fn to_html(&self) -> String {
        let mut bytes = Vec::new();
        let handle: SerializableHandle = self.root().into();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        let _ = serialize(&mut bytes, &handle, opts);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

fn html_name(tag: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag))
}

/// Elements below `node` (exclusive) in document order, filtered by tag name
/// when `tags` is non-empty.
pub fn elements_under(node: &Handle, tags: &[&str]) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(node, tags, &mut found);
    found
}

fn collect_elements(node: &Handle, tags: &[&str], found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let Some(name) = tag_name(child) {
            if tags.is_empty() || tags.contains(&name) {
                found.push(child.clone());
            }
        }
        collect_elements(child, tags, found);
    }
}

pub fn first_element_under(node: &Handle, tags: &[&str]) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if tag_name(child).is_some_and(|name| tags.contains(&name)) {
            return Some(child.clone());
        }
        if let Some(found) = first_element_under(child, tags) {
            return Some(found);
        }
    }
    None
}

/// Local tag name of an element node; `None` for text, comments, etc.
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Attribute value, or the empty string when absent.
pub fn attr_or_empty(node: &Handle, name: &str) -> String {
    attr(node, name).unwrap_or_default()
}

pub fn has_attr(node: &Handle, name: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs.borrow().iter().any(|a| &*a.name.local == name),
        _ => false,
    }
}

/// Set (or overwrite) an attribute. No-op on non-element nodes.
pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|a| &*a.name.local == name) {
            Some(existing) => existing.value = StrTendril::from_slice(value),
            None => attrs.push(new_attribute(name, value)),
        }
    }
}

/// Remove an attribute, returning whether it was present.
pub fn remove_attr(node: &Handle, name: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            let mut attrs = attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(|a| &*a.name.local != name);
            attrs.len() != before
        }
        _ => false,
    }
}

/// Text of all descendant text nodes, each trimmed, joined with nothing.
pub fn stripped_text(node: &Handle) -> String {
    let mut text = String::new();
    push_stripped_text(node, &mut text);
    text
}

fn push_stripped_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(contents.borrow().trim());
    }
    for child in node.children.borrow().iter() {
        push_stripped_text(child, out);
    }
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

fn push_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        push_text(child, out);
    }
}

fn new_attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
        value: StrTendril::from_slice(value),
    }
}

/// Create a detached HTML element with the given attributes.
pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    Node::new(NodeData::Element {
        name: html_name(tag),
        attrs: RefCell::new(
            attrs
                .iter()
                .map(|(name, value)| new_attribute(name, value))
                .collect(),
        ),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

fn index_in_parent(parent: &Handle, node: &Handle) -> Option<usize> {
    parent
        .children
        .borrow()
        .iter()
        .position(|c| Rc::ptr_eq(c, node))
}

/// Remove `node` from its parent. Returns the former parent.
pub fn detach(node: &Handle) -> Option<Handle> {
    let parent = parent(node)?;
    parent
        .children
        .borrow_mut()
        .retain(|c| !Rc::ptr_eq(c, node));
    node.parent.set(None);
    Some(parent)
}

/// Insert `child` into `parent` at `index` (clamped to the child count),
/// detaching it from any previous parent first.
pub fn insert_child(parent: &Handle, index: usize, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    let mut children = parent.children.borrow_mut();
    let index = index.min(children.len());
    children.insert(index, child.clone());
}

pub fn append_child(parent: &Handle, child: &Handle) {
    let len = parent.children.borrow().len();
    insert_child(parent, len, child);
}

pub fn prepend_child(parent: &Handle, child: &Handle) {
    insert_child(parent, 0, child);
}

/// Insert `new` immediately before `reference`. Fails (returns `false`) when
/// `reference` is detached.
pub fn insert_before(reference: &Handle, new: &Handle) -> bool {
    let Some(parent) = parent(reference) else {
        return false;
    };
    detach(new);
    match index_in_parent(&parent, reference) {
        Some(index) => {
            insert_child(&parent, index, new);
            true
        }
        None => false,
    }
}

/// Put `new` where `old` was. `old` ends up detached.
pub fn replace_node(old: &Handle, new: &Handle) -> bool {
    if !insert_before(old, new) {
        return false;
    }
    detach(old);
    true
}

/// Drop every child of `node`.
pub fn clear_children(node: &Handle) {
    let removed: Vec<Handle> = node.children.borrow_mut().drain(..).collect();
    for child in removed {
        child.parent.set(None);
    }
}
