// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scoped print stylesheet
//!
//! Rules are prefixed with the root container selector so they never apply
//! outside the prepared document. The `@page` rule is the only global rule.

use super::PageMargins;

/// A style rule under the scope selector
#[derive(Debug, Clone)]
struct ScopedRule {
    selectors: Vec<String>,
    declarations: Vec<(&'static str, String)>,
}

/// Builder for the print stylesheet injected into a prepared document
#[derive(Debug, Clone)]
pub struct PrintStylesheet {
    scope: String,
    margins: PageMargins,
    rules: Vec<ScopedRule>,
}

impl PrintStylesheet {
    /// Create an empty stylesheet scoped under `scope` (e.g. `.folio-root`)
    pub fn new(scope: impl Into<String>, margins: PageMargins) -> Self {
        Self {
            scope: scope.into(),
            margins,
            rules: Vec::new(),
        }
    }

    /// Standard pagination rules for the given container class and section tags
    pub fn pagination(
        scope: impl Into<String>,
        margins: PageMargins,
        container_class: &str,
        section_tags: &[String],
    ) -> Self {
        let sections: Vec<String> = section_tags.to_vec();
        let last_sections: Vec<String> = section_tags
            .iter()
            .map(|t| format!("{}:last-child", t))
            .collect();
        let section_blocks: Vec<String> =
            section_tags.iter().map(|t| format!("{} > div", t)).collect();
        let headings: Vec<String> = (1..=6).map(|n| format!("h{}", n)).collect();

        Self::new(scope, margins)
            .rule(
                vec![format!(".{}", container_class)],
                &[("padding", "0"), ("margin", "0")],
            )
            .rule(
                sections,
                &[
                    ("background-color", "#f9f9f9 !important"),
                    ("border", "1px solid #ddd !important"),
                    ("padding", "20px !important"),
                    ("margin-bottom", "25px !important"),
                    ("border-radius", "4px"),
                    ("page-break-inside", "avoid"),
                    ("break-inside", "avoid"),
                    ("display", "block"),
                ],
            )
            .rule(last_sections, &[("margin-bottom", "0 !important")])
            .rule(
                headings,
                &[("page-break-after", "avoid"), ("break-after", "avoid")],
            )
            .rule(
                vec!["h4".to_string()],
                &[("margin-top", "0"), ("margin-bottom", "15px")],
            )
            .rule(
                section_blocks,
                &[("page-break-inside", "avoid"), ("break-inside", "avoid")],
            )
    }

    /// Add a rule; selectors are scoped when rendered
    pub fn rule(mut self, selectors: Vec<String>, declarations: &[(&'static str, &str)]) -> Self {
        if selectors.is_empty() {
            return self;
        }
        self.rules.push(ScopedRule {
            selectors,
            declarations: declarations
                .iter()
                .map(|(p, v)| (*p, v.to_string()))
                .collect(),
        });
        self
    }

    /// Render the stylesheet text
    pub fn render(&self) -> String {
        let mut css = format!(
            "@page {{ margin: {}mm {}mm; background-color: white; }}\n",
            self.margins.top_bottom, self.margins.left_right
        );
        for rule in &self.rules {
            let selector = rule
                .selectors
                .iter()
                .map(|s| format!("{} {}", self.scope, s))
                .collect::<Vec<_>>()
                .join(", ");
            let body = rule
                .declarations
                .iter()
                .map(|(p, v)| format!("{}: {};", p, v))
                .collect::<Vec<_>>()
                .join(" ");
            css.push_str(&format!("{} {{ {} }}\n", selector, body));
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rule_uses_margins() {
        let css = PrintStylesheet::new(".folio-root", PageMargins::new(12.5, 20.0)).render();
        assert_eq!(
            css,
            "@page { margin: 20mm 12.5mm; background-color: white; }\n"
        );
    }

    #[test]
    fn test_rules_are_scoped() {
        let css = PrintStylesheet::pagination(
            ".folio-root",
            PageMargins::default(),
            "folio-container",
            &["section".to_string()],
        )
        .render();

        assert!(css.starts_with("@page { margin: 15mm 10mm;"));
        assert!(css.contains(".folio-root .folio-container { padding: 0; margin: 0; }"));
        assert!(css.contains(".folio-root section:last-child {"));
        assert!(css.contains(".folio-root h1, .folio-root h2, .folio-root h3"));
        assert!(css.contains(".folio-root section > div {"));

        for line in css.lines().skip(1) {
            assert!(line.starts_with(".folio-root "), "unscoped rule: {}", line);
        }
    }
}
