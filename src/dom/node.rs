// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::element::Element;

/// Shared node storage of one document
pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// Void elements never have children and serialize without a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children serialize without escaping
const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements that drop one leading newline when parsed
const NEWLINE_EATING_ELEMENTS: [&str; 3] = ["pre", "textarea", "listing"];

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document (fragment root) node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
}

/// Element namespace as assigned by the tree builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

/// Internal node data
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name (for elements; lowercase in HTML, case-adjusted in foreign content)
    pub tag_name: Option<String>,
    /// Element namespace
    pub namespace: Namespace,
    /// Text content (for text/comment nodes)
    pub text_content: Option<String>,
    /// Attributes (for elements), kept sorted so serialization is stable
    pub attributes: BTreeMap<String, String>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn blank(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            namespace: Namespace::Html,
            text_content: None,
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into().to_lowercase()),
            ..Self::blank(NodeType::Element)
        }
    }

    /// Create element data in a foreign namespace; names keep their case
    pub fn foreign(tag_name: impl Into<String>, namespace: Namespace) -> Self {
        if namespace == Namespace::Html {
            return Self::element(tag_name);
        }
        Self {
            tag_name: Some(tag_name.into()),
            namespace,
            ..Self::blank(NodeType::Element)
        }
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Text)
        }
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Comment)
        }
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::blank(NodeType::Document)
    }

    /// Stored attribute name matching `name` ASCII case-insensitively
    fn attribute_key(&self, name: &str) -> Option<String> {
        self.attributes
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn is_html(&self, tags: &[&str]) -> bool {
        self.namespace == Namespace::Html
            && self
                .tag_name
                .as_deref()
                .map(|t| tags.contains(&t))
                .unwrap_or(false)
    }
}

/// Point `child_id` at its new parent
fn set_parent(nodes: &mut HashMap<NodeId, NodeData>, child_id: NodeId, parent: Option<NodeId>) {
    if let Some(child) = nodes.get_mut(&child_id) {
        child.parent = parent;
    }
}

/// Detach `child_id` from its current parent, if any
fn detach(nodes: &mut HashMap<NodeId, NodeData>, child_id: NodeId) {
    let old_parent = nodes.get(&child_id).and_then(|d| d.parent);
    if let Some(pid) = old_parent {
        if let Some(parent) = nodes.get_mut(&pid) {
            parent.children.retain(|&id| id != child_id);
        }
    }
    set_parent(nodes, child_id, None);
}

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Reference to document's node storage
    nodes: NodeStore,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, nodes: NodeStore) -> Self {
        Self { id, nodes }
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name
    pub fn local_name(&self) -> Option<String> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.tag_name.clone())
    }

    /// Get text content
    pub fn text_content(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        collect_text(&nodes, self.id, &mut out);
        out
    }

    /// Set text content (replaces all children with a text node)
    pub fn set_text_content(&self, content: impl Into<String>) {
        let content = content.into();
        let mut nodes = self.nodes.write();

        let Some(node) = nodes.get_mut(&self.id) else {
            return;
        };
        if node.node_type == NodeType::Text {
            node.text_content = Some(content);
            return;
        }
        let old_children = std::mem::take(&mut node.children);

        let text_id = NodeId::new();
        let mut text_data = NodeData::text(content);
        text_data.parent = Some(self.id);
        nodes.insert(text_id, text_data);
        if let Some(parent) = nodes.get_mut(&self.id) {
            parent.children.push(text_id);
        }
        for id in old_children {
            if let Some(child) = nodes.get_mut(&id) {
                child.parent = None;
            }
        }
    }

    /// Get the element namespace
    pub fn namespace(&self) -> Namespace {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.namespace)
            .unwrap_or_default()
    }

    /// Get an attribute value; names match ASCII case-insensitively
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let nodes = self.nodes.read();
        let node = nodes.get(&self.id)?;
        let key = node.attribute_key(name)?;
        node.attributes.get(&key).cloned()
    }

    /// Set an attribute value, keeping the stored spelling of an existing name
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            let key = match node.attribute_key(&name) {
                Some(key) => key,
                None if node.namespace == Namespace::Html => name.to_lowercase(),
                None => name,
            };
            node.attributes.insert(key, value.into());
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            if let Some(key) = node.attribute_key(name) {
                node.attributes.remove(&key);
            }
        }
    }

    /// Get all attributes
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.clone())
            .unwrap_or_default()
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| Node::new(id, self.nodes.clone()))
    }

    /// Get child nodes
    pub fn children(&self) -> Vec<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&id| Node::new(id, self.nodes.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Descendant elements in document order, this node excluded
    pub fn descendant_elements(&self) -> Vec<Element> {
        let nodes = self.nodes.read();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = nodes
            .get(&self.id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(id) = stack.pop() {
            let Some(node) = nodes.get(&id) else {
                continue;
            };
            if node.node_type != NodeType::Element {
                continue;
            }
            found.push(Element {
                node: Node::new(id, self.nodes.clone()),
            });
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    /// Append a child node, moving it from its old parent
    pub fn append_child(&self, child: &Node) {
        let mut nodes = self.nodes.write();
        detach(&mut nodes, child.id);
        if let Some(parent_data) = nodes.get_mut(&self.id) {
            parent_data.children.push(child.id);
            set_parent(&mut nodes, child.id, Some(self.id));
        }
    }

    /// Insert `child` before `reference`; appends when `reference` is not a child
    pub fn insert_before(&self, child: &Node, reference: Option<&Node>) {
        let mut nodes = self.nodes.write();
        detach(&mut nodes, child.id);
        if let Some(parent_data) = nodes.get_mut(&self.id) {
            let pos = reference
                .and_then(|r| parent_data.children.iter().position(|&id| id == r.id))
                .unwrap_or(parent_data.children.len());
            parent_data.children.insert(pos, child.id);
            set_parent(&mut nodes, child.id, Some(self.id));
        }
    }

    /// Insert `child` as the first child
    pub fn prepend_child(&self, child: &Node) {
        let first = self
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.children.first().copied())
            .map(|id| Node::new(id, self.nodes.clone()));
        self.insert_before(child, first.as_ref());
    }

    /// Remove this node from its parent
    pub fn detach(&self) {
        detach(&mut self.nodes.write(), self.id);
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        if let Some(node) = nodes.get(&self.id) {
            let raw = is_raw_text(node);
            for &id in &node.children {
                serialize_node(&nodes, id, raw, &mut out);
            }
        }
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn collect_text(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };
    match node.node_type {
        NodeType::Text => out.push_str(node.text_content.as_deref().unwrap_or("")),
        NodeType::Element | NodeType::Document => {
            for &child_id in &node.children {
                collect_text(nodes, child_id, out);
            }
        }
        NodeType::Comment => {}
    }
}

fn is_raw_text(node: &NodeData) -> bool {
    node.is_html(&RAW_TEXT_ELEMENTS)
}

/// Whether the first child is text starting with a newline the parser would eat
fn starts_with_newline(nodes: &HashMap<NodeId, NodeData>, node: &NodeData) -> bool {
    node.children
        .first()
        .and_then(|id| nodes.get(id))
        .filter(|child| child.node_type == NodeType::Text)
        .and_then(|child| child.text_content.as_deref())
        .map(|text| text.starts_with('\n'))
        .unwrap_or(false)
}

/// Serialize a node to HTML, appending to `out`
fn serialize_node(
    nodes: &HashMap<NodeId, NodeData>,
    node_id: NodeId,
    raw_parent: bool,
    out: &mut String,
) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };
    match node.node_type {
        NodeType::Text => {
            let text = node.text_content.as_deref().unwrap_or("");
            if raw_parent {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text_content.as_deref().unwrap_or(""));
            out.push_str("-->");
        }
        NodeType::Element => {
            let tag = node.tag_name.as_deref().unwrap_or("div");
            out.push('<');
            out.push_str(tag);
            for (k, v) in &node.attributes {
                out.push(' ');
                out.push_str(k);
                if !v.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(v));
                    out.push('"');
                }
            }
            out.push('>');

            if node.is_html(&VOID_ELEMENTS) {
                return;
            }
            if node.is_html(&NEWLINE_EATING_ELEMENTS) && starts_with_newline(nodes, node) {
                out.push('\n');
            }
            let raw = is_raw_text(node);
            for &id in &node.children {
                serialize_node(nodes, id, raw, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeType::Document => {
            for &id in &node.children {
                serialize_node(nodes, id, false, out);
            }
        }
    }
}

/// Escape text node content
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML special characters in attribute values
fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_root() -> (NodeStore, Node) {
        let store: NodeStore = Arc::new(RwLock::new(HashMap::new()));
        let id = NodeId::new();
        store.write().insert(id, NodeData::element("div"));
        let root = Node::new(id, store.clone());
        (store, root)
    }

    fn new_node(store: &NodeStore, data: NodeData) -> Node {
        let id = NodeId::new();
        store.write().insert(id, data);
        Node::new(id, store.clone())
    }

    #[test]
    fn test_node_id() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_node_data() {
        let element = NodeData::element("DIV");
        assert_eq!(element.tag_name, Some("div".to_string()));
        assert_eq!(element.node_type, NodeType::Element);

        let text = NodeData::text("Hello");
        assert_eq!(text.text_content, Some("Hello".to_string()));
        assert_eq!(text.node_type, NodeType::Text);
    }

    #[test]
    fn test_insert_before_and_prepend() {
        let (store, root) = store_with_root();
        let a = new_node(&store, NodeData::element("p"));
        let b = new_node(&store, NodeData::element("p"));
        let c = new_node(&store, NodeData::element("p"));
        root.append_child(&b);
        root.insert_before(&a, Some(&b));
        root.prepend_child(&c);

        assert_eq!(root.children(), vec![c.clone(), a.clone(), b.clone()]);
        assert_eq!(a.parent(), Some(root.clone()));

        // Moving a node out of its old parent
        b.append_child(&c);
        assert_eq!(root.children(), vec![a, b.clone()]);
        assert_eq!(c.parent(), Some(b));
    }

    #[test]
    fn test_detach_and_serialize() {
        let (store, root) = store_with_root();
        let text = new_node(&store, NodeData::text("a < b & c"));
        let em = new_node(&store, NodeData::element("em"));
        root.append_child(&text);
        root.append_child(&em);
        em.set_attribute("title", "\"quoted\"");

        assert_eq!(
            root.inner_html(),
            "a &lt; b &amp; c<em title=\"&quot;quoted&quot;\"></em>"
        );

        em.detach();
        assert_eq!(root.inner_html(), "a &lt; b &amp; c");
        assert!(em.parent().is_none());
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let (store, root) = store_with_root();
        let style = new_node(&store, NodeData::element("style"));
        let css = new_node(&store, NodeData::text("a > b { color: red }"));
        root.append_child(&style);
        style.append_child(&css);
        assert_eq!(root.inner_html(), "<style>a > b { color: red }</style>");
    }

    #[test]
    fn test_void_element() {
        let (store, root) = store_with_root();
        let br = new_node(&store, NodeData::element("br"));
        root.append_child(&br);
        assert_eq!(root.inner_html(), "<br>");
    }

    #[test]
    fn test_html_attribute_names_lowercased() {
        let (store, root) = store_with_root();
        let span = new_node(&store, NodeData::element("span"));
        root.append_child(&span);
        span.set_attribute("ID", "s");

        assert_eq!(span.get_attribute("Id").as_deref(), Some("s"));
        assert!(span.get_attribute("class").is_none());
        assert_eq!(root.inner_html(), "<span id=\"s\"></span>");
    }

    #[test]
    fn test_foreign_style_is_escaped_and_keeps_case() {
        let (store, root) = store_with_root();
        let svg = new_node(&store, NodeData::foreign("svg", Namespace::Svg));
        let style = new_node(&store, NodeData::foreign("style", Namespace::Svg));
        let css = new_node(&store, NodeData::text("a > b"));
        root.append_child(&svg);
        svg.append_child(&style);
        style.append_child(&css);

        svg.set_attribute("viewBox", "0 0 1 1");
        svg.set_attribute("VIEWBOX", "0 0 2 2");
        assert_eq!(svg.get_attribute("viewbox").as_deref(), Some("0 0 2 2"));
        assert_eq!(svg.attributes().len(), 1);
        assert_eq!(
            root.inner_html(),
            "<svg viewBox=\"0 0 2 2\"><style>a &gt; b</style></svg>"
        );

        svg.remove_attribute("viewbox");
        assert!(svg.get_attribute("viewBox").is_none());
    }

    #[test]
    fn test_pre_keeps_leading_newline() {
        let (store, root) = store_with_root();
        let pre = new_node(&store, NodeData::element("pre"));
        let text = new_node(&store, NodeData::text("\nx"));
        root.append_child(&pre);
        pre.append_child(&text);
        assert_eq!(root.inner_html(), "<pre>\n\nx</pre>");

        text.detach();
        assert_eq!(root.inner_html(), "<pre></pre>");
    }

    #[test]
    fn test_descendant_elements_skip_text() {
        let (store, root) = store_with_root();
        let p = new_node(&store, NodeData::element("p"));
        let b = new_node(&store, NodeData::element("b"));
        root.append_child(&new_node(&store, NodeData::text("t")));
        root.append_child(&p);
        p.append_child(&b);

        let found: Vec<Node> = root.descendant_elements().into_iter().map(|e| e.node).collect();
        assert_eq!(found, vec![p, b]);
    }
}
