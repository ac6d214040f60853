// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML fragment parser using html5ever
//!
//! Content is parsed as inert markup in a `<body>` context: scripts are
//! never run, and the tree builder applies the same recovery rules a
//! browser would when assigning `innerHTML`.

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{Namespace as ElementNamespace, NodeData, NodeId};
use crate::error::{Error, Result};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Parse an HTML fragment into a Document whose root holds the top-level nodes
pub fn parse_fragment(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );

    let dom = html5ever::parse_fragment(RcDom::default(), opts, context, Vec::new())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let doc = Document::new();
    let converter = DomConverter::new(&doc);
    converter.convert(&dom.document);
    Ok(doc)
}

/// Converts html5ever DOM to our DOM
struct DomConverter<'a> {
    doc: &'a Document,
}

impl<'a> DomConverter<'a> {
    fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    fn convert(self, handle: &Handle) {
        let root_id = self.doc.root().id;

        // Fragment parsing yields document -> <html> -> content
        for child in handle.children.borrow().iter() {
            let is_html_wrapper = matches!(
                child.data,
                RcNodeData::Element { ref name, .. } if &*name.local == "html"
            );
            if is_html_wrapper {
                for inner in child.children.borrow().iter() {
                    self.convert_node(inner, root_id);
                }
            } else {
                self.convert_node(child, root_id);
            }
        }
    }

    fn convert_node(&self, handle: &Handle, parent_id: NodeId) {
        let mut node_data = match handle.data {
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => return,
            RcNodeData::Text { ref contents } => NodeData::text(contents.borrow().to_string()),
            RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
            RcNodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let namespace = element_namespace(&name.ns);
                let mut data = NodeData::foreign(name.local.to_string(), namespace);
                // Names arrive lowercased or case-adjusted (`viewBox`) by the tokenizer
                for attr in attrs.borrow().iter() {
                    let attr_name = match attr.name.prefix {
                        Some(ref prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    data.attributes.insert(attr_name, attr.value.to_string());
                }
                data
            }
        };

        node_data.parent = Some(parent_id);
        let node_id = NodeId::new();
        {
            let mut nodes = self.doc.nodes.write();
            nodes.insert(node_id, node_data);
            if let Some(parent) = nodes.get_mut(&parent_id) {
                parent.children.push(node_id);
            }
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, node_id);
        }
    }
}

fn element_namespace(ns: &Namespace) -> ElementNamespace {
    match &**ns {
        SVG_NAMESPACE => ElementNamespace::Svg,
        MATHML_NAMESPACE => ElementNamespace::MathMl,
        _ => ElementNamespace::Html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn find(doc: &Document, tag: &str) -> Option<Element> {
        doc.root()
            .descendant_elements()
            .into_iter()
            .find(|e| e.local_name() == tag)
    }

    #[test]
    fn test_parse_simple_fragment() {
        let doc = parse_fragment("<p>Hello</p><p>World</p>").unwrap();
        assert_eq!(doc.children().len(), 2);
        assert_eq!(doc.to_html(), "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_fragment("<div ID=\"test\" class=\"foo bar\">content</div>").unwrap();
        let div = find(&doc, "div").unwrap();
        assert_eq!(div.get_attribute("id"), Some("test".to_string()));
        assert!(div.has_class("foo"));
        assert_eq!(div.namespace(), ElementNamespace::Html);
    }

    #[test]
    fn test_no_implied_body() {
        let doc = parse_fragment("plain <b>text</b>").unwrap();
        assert!(find(&doc, "body").is_none());
        assert!(find(&doc, "html").is_none());
        assert_eq!(doc.text_content(), "plain text");
    }

    #[test]
    fn test_script_is_inert_markup() {
        let doc = parse_fragment("<script>document.write('<b>x</b>')</script>").unwrap();
        let script = find(&doc, "script").unwrap();
        assert_eq!(script.text_content(), "document.write('<b>x</b>')");
        assert!(find(&doc, "b").is_none());
    }

    #[test]
    fn test_unclosed_markup_recovers() {
        let doc = parse_fragment("<section><h4>Title<p>body").unwrap();
        let section = find(&doc, "section").unwrap();
        let tags: Vec<String> = section
            .descendant_elements()
            .iter()
            .map(|e| e.local_name())
            .collect();
        assert_eq!(tags, vec!["h4", "p"]);
    }

    #[test]
    fn test_foreign_content_keeps_namespace_and_case() {
        let doc = parse_fragment(
            "<svg viewBox=\"0 0 10 10\"><foreignObject></foreignObject></svg><math><mi>x</mi></math>",
        )
        .unwrap();
        let svg = find(&doc, "svg").unwrap();
        assert_eq!(svg.namespace(), ElementNamespace::Svg);
        assert_eq!(svg.get_attribute("viewBox").as_deref(), Some("0 0 10 10"));
        assert!(find(&doc, "foreignObject").is_some());
        assert_eq!(find(&doc, "mi").unwrap().namespace(), ElementNamespace::MathMl);
        assert_eq!(
            doc.to_html(),
            "<svg viewBox=\"0 0 10 10\"><foreignObject></foreignObject></svg><math><mi>x</mi></math>"
        );
    }

    #[test]
    fn test_leading_newline_survives_round_trip() {
        for html in ["<pre>\n\nx</pre>", "<textarea>\n\nx</textarea>", "<listing>\n\nx</listing>"] {
            let once = parse_fragment(html).unwrap().to_html();
            let twice = parse_fragment(&once).unwrap().to_html();
            assert_eq!(once, twice, "round trip changed {}", html);
        }
        let doc = parse_fragment("<pre>\n\nx</pre>").unwrap();
        assert_eq!(find(&doc, "pre").unwrap().text_content(), "\nx");
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_fragment("").unwrap();
        assert!(doc.to_html().is_empty());
    }
}
