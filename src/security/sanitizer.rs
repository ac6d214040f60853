// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML sanitizer for host-supplied content
//!
//! Removes everything that can run script or pull in another document:
//! executable and embedding elements, inline event handlers, and
//! `javascript:` / `data:text/html` URLs. The input is parsed as inert
//! markup and re-serialized deterministically. Markup that the tree
//! builder would restructure on a second parse is cleaned again until the
//! output stops changing, so sanitizing twice gives the same string as
//! sanitizing once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::url_policy::{is_dangerous_url, is_url_attribute};
use crate::dom::{parse_fragment, Document, Element, Node, NodeType};

/// Elements removed together with their content
pub const BLOCKED_ELEMENTS: [&str; 16] = [
    "script", "noscript", "template", "iframe", "frame", "frameset", "object", "embed", "applet",
    "link", "meta", "base", "plaintext", "xmp", "noembed", "noframes",
];

/// Clean/serialize/re-parse rounds before falling back to text
const MAX_PASSES: usize = 4;

/// What the sanitizer removed from one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    /// Tag names of removed elements, in document order
    pub removed_elements: Vec<String>,
    /// Removed attributes as `(tag, attribute)`
    pub removed_attributes: Vec<(String, String)>,
    /// Number of removed comments
    pub removed_comments: usize,
}

impl SanitizeReport {
    /// Whether the input was already clean
    pub fn is_clean(&self) -> bool {
        self.removed_elements.is_empty()
            && self.removed_attributes.is_empty()
            && self.removed_comments == 0
    }
}

/// HTML sanitizer
#[derive(Debug, Clone)]
pub struct Sanitizer {
    blocked: HashSet<&'static str>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Create a sanitizer with the default element blocklist
    pub fn new() -> Self {
        Self {
            blocked: BLOCKED_ELEMENTS.iter().copied().collect(),
        }
    }

    /// Sanitize an HTML string. Empty input yields an empty string.
    pub fn sanitize(&self, raw: &str) -> String {
        self.sanitize_with_report(raw).0
    }

    /// Sanitize and report what was removed
    pub fn sanitize_with_report(&self, raw: &str) -> (String, SanitizeReport) {
        let mut report = SanitizeReport::default();
        if raw.is_empty() {
            return (String::new(), report);
        }

        let Some(mut current) = self.clean_pass(raw, &mut report) else {
            return (String::new(), report);
        };
        let mut settled = false;
        for _ in 1..MAX_PASSES {
            let Some(next) = self.clean_pass(&current, &mut report) else {
                return (String::new(), report);
            };
            if next == current {
                settled = true;
                break;
            }
            debug!("Sanitized markup changed on re-parse, cleaning again");
            current = next;
        }
        if !settled {
            warn!(passes = MAX_PASSES, "Markup did not settle, keeping its text only");
            current = text_only(&current);
        }

        if !report.is_clean() {
            debug!(
                elements = report.removed_elements.len(),
                attributes = report.removed_attributes.len(),
                comments = report.removed_comments,
                "Sanitizer removed unsafe content"
            );
        }

        (current, report)
    }

    /// Parse, clean and serialize once; `None` when the markup cannot be parsed
    fn clean_pass(&self, html: &str, report: &mut SanitizeReport) -> Option<String> {
        match parse_fragment(html) {
            Ok(doc) => {
                self.clean_document(&doc, report);
                Some(doc.to_html())
            }
            Err(e) => {
                warn!("Discarding content that failed to parse: {}", e);
                None
            }
        }
    }

    /// Sanitize a loosely typed host value; anything but a string yields `""`
    pub fn sanitize_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.sanitize(s),
            _ => String::new(),
        }
    }

    /// Clean a parsed document in place
    pub fn clean_document(&self, doc: &Document, report: &mut SanitizeReport) {
        let mut stack: Vec<Node> = doc.root().children();
        stack.reverse();

        while let Some(node) = stack.pop() {
            match node.node_type() {
                NodeType::Comment => {
                    node.detach();
                    report.removed_comments += 1;
                }
                NodeType::Element => {
                    let Some(element) = Element::new(node) else {
                        continue;
                    };
                    let tag = element.local_name();
                    if self.blocked.contains(tag.as_str()) {
                        element.remove();
                        report.removed_elements.push(tag);
                        continue;
                    }

                    self.clean_attributes(&element, &tag, report);
                    if tag == "style" {
                        neutralize_stylesheet(&element);
                    }

                    let mut children = element.node.children();
                    children.reverse();
                    stack.extend(children);
                }
                NodeType::Text | NodeType::Document => {}
            }
        }
    }

    fn clean_attributes(&self, element: &Element, tag: &str, report: &mut SanitizeReport) {
        for (name, value) in element.attributes() {
            let event_handler = name
                .get(..2)
                .map(|prefix| prefix.eq_ignore_ascii_case("on"))
                .unwrap_or(false);
            let bad_url = is_url_attribute(&name) && is_dangerous_url(&value);
            if event_handler || bad_url {
                element.remove_attribute(&name);
                report.removed_attributes.push((tag.to_string(), name));
            }
        }
    }
}

/// Keep markup out of stylesheet text by escaping `<` as a CSS escape
fn neutralize_stylesheet(style: &Element) {
    let css = style.text_content();
    if css.contains('<') {
        style.set_text_content(css.replace('<', "\\3c "));
    }
}

/// Escaped text content of `html`, dropping all markup
fn text_only(html: &str) -> String {
    let text = parse_fragment(html)
        .map(|doc| doc.text_content())
        .unwrap_or_default();
    let doc = Document::new();
    if !text.is_empty() {
        doc.root().set_text_content(text);
    }
    doc.to_html()
}

/// Sanitize with the default sanitizer
pub fn sanitize(raw: &str) -> String {
    Sanitizer::new().sanitize(raw)
}

/// Sanitize a host value with the default sanitizer
pub fn sanitize_value(value: &Value) -> String {
    Sanitizer::new().sanitize_value(value)
}
