// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Layout preparation
//!
//! Rewrites sanitized content so it paginates under a print renderer:
//! the outer card loses its page-spanning border, shadow and background,
//! each section carries its own framing and avoids page breaks, and a
//! scoped stylesheet carries the page margins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::style::InlineStyle;
use super::stylesheet::PrintStylesheet;
use crate::dom::{parse_fragment, Document, Element};
use crate::error::{Error, Result};

/// Default left/right page margin in millimetres
pub const DEFAULT_MARGIN_LR: f64 = 10.0;
/// Default top/bottom page margin in millimetres
pub const DEFAULT_MARGIN_TB: f64 = 15.0;

const SECTION_GAP: &str = "30px";
const LAST_SECTION_GAP: &str = "25px";

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMargins {
    /// Left and right margin
    pub left_right: f64,
    /// Top and bottom margin
    pub top_bottom: f64,
}

impl PageMargins {
    /// Create margins
    pub fn new(left_right: f64, top_bottom: f64) -> Self {
        Self {
            left_right,
            top_bottom,
        }
    }

    /// Renderer margin array: `[top, left, bottom, right]`
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.top_bottom,
            self.left_right,
            self.top_bottom,
            self.left_right,
        ]
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_LR, DEFAULT_MARGIN_TB)
    }
}

/// Layout preparation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Class of the wrapper element
    pub root_class: String,
    /// Class added to the primary container
    pub container_class: String,
    /// Tags treated as sections
    pub section_tags: Vec<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            root_class: "folio-root".to_string(),
            container_class: "folio-container".to_string(),
            section_tags: vec!["section".to_string()],
        }
    }
}

/// A document ready for the renderer
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    document: Document,
    root: Element,
    stylesheet: String,
    margins: PageMargins,
    section_count: usize,
}

impl PreparedDocument {
    /// Serialize the prepared document (root container included)
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    /// Underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Root container element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Injected stylesheet text
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Margins the document was prepared with
    pub fn margins(&self) -> PageMargins {
        self.margins
    }

    /// Number of styled sections
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Deep copy for the preview surface; edits on the copy do not reach this document
    pub fn clone_for_preview(&self) -> PreparedDocument {
        let document = self.document.deep_clone();
        let root = Element::from_id(self.root.id, document.nodes.clone())
            .unwrap_or_else(|| document.create_element("div"));
        PreparedDocument {
            document,
            root,
            stylesheet: self.stylesheet.clone(),
            margins: self.margins,
            section_count: self.section_count,
        }
    }
}

/// Elements found by the single walk over the content
#[derive(Default)]
struct Landmarks {
    shadowed: Option<Element>,
    sections: Vec<Element>,
    headings: Vec<Element>,
}

/// Prepares sanitized content for pagination
#[derive(Debug, Clone, Default)]
pub struct LayoutPreparer {
    options: LayoutOptions,
}

impl LayoutPreparer {
    /// Create a preparer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preparer with custom options
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Get the options
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Build a prepared document from sanitized HTML
    pub fn prepare(&self, sanitized: &str, margins: PageMargins) -> Result<PreparedDocument> {
        let document = parse_fragment(sanitized)
            .map_err(|e| Error::preparation(format!("cannot parse content: {}", e)))?;

        let root = document.create_element("div");
        root.set_attribute("class", self.options.root_class.as_str());
        for child in document.root().children() {
            root.append_child(&child);
        }
        document.root().append_child(&root);

        let landmarks = self.walk(&root);

        let container = landmarks
            .shadowed
            .clone()
            .or_else(|| root.first_element_child());
        if let Some(container) = &container {
            self.flatten_container(container);
        }

        let section_count = landmarks.sections.len();
        for (index, section) in landmarks.sections.iter().enumerate() {
            let gap = if index + 1 < section_count {
                SECTION_GAP
            } else {
                LAST_SECTION_GAP
            };
            frame_section(section, gap);
        }
        for heading in &landmarks.headings {
            edit_style(heading, |style| {
                style.set("page-break-after", "avoid");
                style.set("break-after", "avoid");
            });
        }

        let stylesheet = PrintStylesheet::pagination(
            format!(".{}", self.options.root_class),
            margins,
            &self.options.container_class,
            &self.options.section_tags,
        )
        .render();
        let style = document.create_element("style");
        style.set_text_content(stylesheet.as_str());
        root.prepend_child(&style);

        let container_tag = container.as_ref().map(|c| c.local_name()).unwrap_or_default();
        debug!(
            sections = section_count,
            headings = landmarks.headings.len(),
            container = %container_tag,
            "Prepared document layout"
        );

        Ok(PreparedDocument {
            document,
            root,
            stylesheet,
            margins,
            section_count,
        })
    }

    /// One pre-order pass collecting the shadowed container, sections and headings
    fn walk(&self, root: &Element) -> Landmarks {
        let mut landmarks = Landmarks::default();

        for element in root.descendant_elements() {
            let tag = element.local_name();

            if landmarks.shadowed.is_none() && declares_box_shadow(&element) {
                landmarks.shadowed = Some(element.clone());
            }
            if self.options.section_tags.iter().any(|t| *t == tag) {
                landmarks.sections.push(element.clone());
            } else if is_heading(&tag) {
                landmarks.headings.push(element);
            }
        }

        landmarks
    }

    fn flatten_container(&self, container: &Element) {
        edit_style(container, |style| {
            style.remove_where(|p| {
                p.starts_with("border") || p == "box-shadow" || p.starts_with("background")
            });
            if !style.has_prefix("padding") {
                style.set("padding", "0");
            }
        });
        container.add_class(&self.options.container_class);
    }
}

/// Prepare with default options
pub fn prepare(sanitized: &str, margins: PageMargins) -> Result<PreparedDocument> {
    LayoutPreparer::new().prepare(sanitized, margins)
}

fn declares_box_shadow(element: &Element) -> bool {
    element
        .style_attribute()
        .map(|s| InlineStyle::parse(&s).contains("box-shadow"))
        .unwrap_or(false)
}

fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn frame_section(section: &Element, gap: &str) {
    edit_style(section, |style| {
        style.set("background-color", "#f9f9f9");
        style.set("border", "1px solid #ddd");
        style.set("padding", "20px");
        style.set("margin-bottom", gap);
        style.set("border-radius", "4px");
        style.set("page-break-inside", "avoid");
        style.set("break-inside", "avoid");
    });
}

fn edit_style<F>(element: &Element, edit: F)
where
    F: FnOnce(&mut InlineStyle),
{
    let mut style = InlineStyle::parse(&element.style_attribute().unwrap_or_default());
    edit(&mut style);
    if style.is_empty() {
        element.remove_attribute("style");
    } else {
        element.set_attribute("style", style.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(prepared: &PreparedDocument, tags: &[&str]) -> Vec<Element> {
        prepared
            .root()
            .descendant_elements()
            .into_iter()
            .filter(|e| tags.contains(&e.local_name().as_str()))
            .collect()
    }

    fn container(prepared: &PreparedDocument) -> Element {
        prepared
            .root()
            .descendant_elements()
            .into_iter()
            .find(|e| e.has_class("folio-container"))
            .unwrap()
    }

    #[test]
    fn test_box_shadow_container_with_two_sections() {
        let input =
            "<div style='box-shadow:0 0 1px'><section>A</section><section>B</section></div>";
        let prepared = prepare(input, PageMargins::default()).unwrap();

        let container = container(&prepared);
        let style = InlineStyle::parse(&container.style_attribute().unwrap_or_default());
        assert!(!style.contains("box-shadow"));
        assert!(!style.has_prefix("border"));
        assert_eq!(style.get("padding"), Some("0"));

        assert_eq!(prepared.section_count(), 2);
        let sections = tagged(&prepared, &["section"]);
        assert_eq!(sections.len(), 2);
        for section in &sections {
            let style = InlineStyle::parse(&section.style_attribute().unwrap());
            assert_eq!(style.get("background-color"), Some("#f9f9f9"));
            assert_eq!(style.get("border"), Some("1px solid #ddd"));
            assert_eq!(style.get("padding"), Some("20px"));
            assert_eq!(style.get("border-radius"), Some("4px"));
            assert_eq!(style.get("page-break-inside"), Some("avoid"));
            assert_eq!(style.get("break-inside"), Some("avoid"));
        }
        assert_eq!(
            InlineStyle::parse(&sections[0].style_attribute().unwrap()).get("margin-bottom"),
            Some("30px")
        );
        assert_eq!(
            InlineStyle::parse(&sections[1].style_attribute().unwrap()).get("margin-bottom"),
            Some("25px")
        );

        assert!(prepared.stylesheet().contains("margin: 15mm 10mm"));
        let html = prepared.to_html();
        assert!(html.starts_with("<div class=\"folio-root\"><style>@page"));
    }

    #[test]
    fn test_first_child_is_container_without_shadow() {
        let prepared = prepare(
            "text <article style=\"border: 2px solid; background: red; padding: 5px\">x</article><p>y</p>",
            PageMargins::new(5.0, 5.0),
        )
        .unwrap();
        let article = tagged(&prepared, &["article"]).remove(0);
        assert!(article.has_class("folio-container"));
        assert_eq!(article.style_attribute().as_deref(), Some("padding: 5px;"));
        assert!(!tagged(&prepared, &["p"])[0].has_class("folio-container"));
    }

    #[test]
    fn test_nested_shadow_wins_over_first_child() {
        let prepared = prepare(
            "<header>h</header><main><div style=\"box-shadow: 0 1px 2px #000\">card</div></main>",
            PageMargins::default(),
        )
        .unwrap();
        let card = container(&prepared);
        assert_eq!(card.text_content(), "card");
        assert!(tagged(&prepared, &["header"])[0].class_list().is_empty());
    }

    #[test]
    fn test_headings_avoid_break_after() {
        let prepared = prepare(
            "<div><h2>Title</h2><section><h4>Sub</h4><p>t</p></section></div>",
            PageMargins::default(),
        )
        .unwrap();
        let headings = tagged(&prepared, &["h2", "h4"]);
        assert_eq!(headings.len(), 2);
        for heading in headings {
            let style = InlineStyle::parse(&heading.style_attribute().unwrap());
            assert_eq!(style.get("page-break-after"), Some("avoid"));
            assert_eq!(style.get("break-after"), Some("avoid"));
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = String::from("<section style=\"color: blue\">A</section>");
        let before = input.clone();
        let _ = prepare(&input, PageMargins::default()).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_custom_section_tags() {
        let preparer = LayoutPreparer::with_options(LayoutOptions {
            section_tags: vec!["fieldset".to_string(), "section".to_string()],
            ..Default::default()
        });
        let prepared = preparer
            .prepare(
                "<div><fieldset>a</fieldset><section>b</section></div>",
                PageMargins::default(),
            )
            .unwrap();
        assert_eq!(prepared.section_count(), 2);
        assert!(prepared.stylesheet().contains(".folio-root fieldset"));
    }

    #[test]
    fn test_clone_for_preview_is_independent() {
        let prepared = prepare("<section>A</section>", PageMargins::default()).unwrap();
        let preview = prepared.clone_for_preview();
        preview.root().set_attribute("class", "changed");

        assert!(prepared.to_html().starts_with("<div class=\"folio-root\">"));
        assert!(preview.to_html().starts_with("<div class=\"changed\">"));
        assert_eq!(preview.section_count(), 1);
    }

    #[test]
    fn test_empty_content_still_prepares() {
        let prepared = prepare("", PageMargins::default()).unwrap();
        assert_eq!(prepared.section_count(), 0);
        assert!(prepared.to_html().contains("<style>"));
    }

    #[test]
    fn test_margins_array() {
        assert_eq!(PageMargins::new(10.0, 15.0).as_array(), [15.0, 10.0, 15.0, 10.0]);
    }
}
