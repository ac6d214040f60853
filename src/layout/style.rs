// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inline style declarations
//!
//! Parses a `style` attribute into an ordered list of declarations that
//! can be edited and written back. Semicolons inside quotes or
//! parentheses (`url(data:image/png;base64,...)`) do not split.

use std::fmt;

/// One `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, lowercase
    pub property: String,
    /// Raw value, trimmed
    pub value: String,
}

/// Ordered inline style declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    /// Parse a style attribute value. Malformed declarations are skipped.
    pub fn parse(style: &str) -> Self {
        let declarations = split_declarations(style)
            .into_iter()
            .filter_map(|decl| {
                let (property, value) = decl.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some(Declaration {
                    property,
                    value: value.to_string(),
                })
            })
            .collect();
        Self { declarations }
    }

    /// Get the value of a property (last declaration wins)
    pub fn get(&self, property: &str) -> Option<&str> {
        let property = property.to_ascii_lowercase();
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Check if a property is declared
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Check if any property starts with `prefix` (`padding` matches `padding-top`)
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.declarations.iter().any(|d| d.property.starts_with(prefix))
    }

    /// Set a property, replacing an existing declaration in place
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.declarations.iter().position(|d| d.property == property) {
            Some(pos) => {
                self.declarations[pos].value = value.to_string();
                let mut seen = false;
                self.declarations.retain(|d| {
                    if d.property != property {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.declarations.push(Declaration {
                property,
                value: value.to_string(),
            }),
        }
    }

    /// Remove every declaration whose property matches, returning how many were removed
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.declarations.len();
        self.declarations.retain(|d| !predicate(&d.property));
        before - self.declarations.len()
    }

    /// All declarations in order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if there are no declarations
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", d.property, d.value)?;
        }
        Ok(())
    }
}

/// Split on top-level semicolons
fn split_declarations(style: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&style[start..]);
    parts
}
