// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation
//!
//! A document here is a fragment root: its children are the top-level
//! nodes of the parsed content, with no implied `<html>`/`<body>`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::element::Element;
use super::node::{Node, NodeData, NodeId, NodeStore};

/// HTML fragment document
#[derive(Debug, Clone)]
pub struct Document {
    /// Root node ID
    root_id: NodeId,
    /// Node storage
    pub(crate) nodes: NodeStore,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        Node::new(self.root_id, self.nodes.clone())
    }

    /// Top-level element children
    pub fn children(&self) -> Vec<Element> {
        self.root()
            .children()
            .into_iter()
            .filter_map(Element::new)
            .collect()
    }

    /// Create a new detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::element(tag));
        Element {
            node: Node::new(id, self.nodes.clone()),
        }
    }

    /// Deep copy into independent storage; mutations on either side are not shared
    pub fn deep_clone(&self) -> Document {
        let copy: HashMap<NodeId, NodeData> = self.nodes.read().clone();
        Document {
            root_id: self.root_id,
            nodes: Arc::new(RwLock::new(copy)),
        }
    }

    /// Serialize the document content
    pub fn to_html(&self) -> String {
        self.root().inner_html()
    }

    /// Get all text content
    pub fn text_content(&self) -> String {
        self.root().text_content()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
