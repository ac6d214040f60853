// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use std::collections::BTreeMap;

use super::node::{Node, NodeId, NodeStore, NodeType};

/// Element node with extended operations
#[derive(Debug, Clone)]
pub struct Element {
    /// Inner node reference
    pub node: Node,
}

impl Element {
    /// Create a new element from a node
    pub fn new(node: Node) -> Option<Self> {
        if node.node_type() == NodeType::Element {
            Some(Self { node })
        } else {
            None
        }
    }

    /// Create element from node ID
    pub(crate) fn from_id(id: NodeId, nodes: NodeStore) -> Option<Self> {
        Self::new(Node::new(id, nodes))
    }

    /// Get the tag name (uppercase, like browsers)
    pub fn tag_name(&self) -> String {
        self.local_name().to_uppercase()
    }

    /// Get local name
    pub fn local_name(&self) -> String {
        self.node.local_name().unwrap_or_default()
    }

    /// Get class list as vector
    pub fn class_list(&self) -> Vec<String> {
        self.node
            .get_attribute("class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Check if element has a class
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    /// Add a class
    pub fn add_class(&self, class: &str) {
        let mut classes = self.class_list();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.node.set_attribute("class", classes.join(" "));
        }
    }

    /// Get the raw inline style attribute
    pub fn style_attribute(&self) -> Option<String> {
        self.node.get_attribute("style")
    }

    /// Get all attributes
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.node.attributes()
    }

    /// Get child elements (only element nodes)
    pub fn children(&self) -> Vec<Element> {
        self.node
            .children()
            .into_iter()
            .filter_map(Element::new)
            .collect()
    }

    /// Get first child element
    pub fn first_element_child(&self) -> Option<Element> {
        self.node.children().into_iter().find_map(Element::new)
    }

    /// Remove this element (and its subtree) from the tree
    pub fn remove(&self) {
        self.node.detach();
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn first(html: &str, tag: &str) -> (crate::dom::Document, Element) {
        let doc = parse_fragment(html).unwrap();
        let element = doc
            .root()
            .descendant_elements()
            .into_iter()
            .find(|e| e.local_name() == tag)
            .unwrap();
        (doc, element)
    }

    #[test]
    fn test_element_class_list() {
        let (_doc, div) = first("<div class=\"foo bar baz\">test</div>", "div");
        let classes = div.class_list();
        assert!(classes.contains(&"foo".to_string()));
        assert!(classes.contains(&"bar".to_string()));
        assert!(classes.contains(&"baz".to_string()));

        div.add_class("qux");
        div.add_class("foo");
        assert_eq!(div.get_attribute("class").as_deref(), Some("foo bar baz qux"));
    }

    #[test]
    fn test_parent_and_remove() {
        let (doc, em) = first("<section><div><em>x</em></div></section><p>y</p>", "em");
        let section = em
            .parent()
            .and_then(|div| div.parent())
            .and_then(Element::new)
            .unwrap();
        assert_eq!(section.local_name(), "section");

        section.remove();
        assert_eq!(doc.to_html(), "<p>y</p>");
    }

    #[test]
    fn test_first_element_child_skips_text() {
        let (_doc, div) = first("<div> text <span>a</span><b>b</b></div>", "div");
        let first = div.first_element_child().unwrap();
        assert_eq!(first.tag_name(), "SPAN");
        assert_eq!(div.children().len(), 2);
    }
}
