// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Widget configuration

use serde::{Deserialize, Serialize};

use crate::layout::LayoutOptions;

/// Banner shown above the HTML approximation
pub const DEFAULT_BANNER: &str = "HTML Preview (PDF will be formatted differently)";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Rasterization scale passed to the renderer
    pub scale: f64,
    /// Compress the produced PDF
    pub compress: bool,
    /// Let the renderer load cross-origin images
    pub use_cors: bool,
    /// Render text glyph by glyph
    pub letter_rendering: bool,
    /// Selectors the renderer must not split across pages
    pub pagebreak_avoid: Vec<String>,
    /// Layout preparation options
    pub layout: LayoutOptions,
    /// Approximation banner text
    pub banner: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            compress: true,
            use_cors: true,
            letter_rendering: true,
            pagebreak_avoid: vec![
                "tr".to_string(),
                "td".to_string(),
                "div[style*=\"margin-bottom\"]".to_string(),
            ],
            layout: LayoutOptions::default(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Create a new widget config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set raster scale; non-positive or non-finite values are ignored
    pub fn scale(mut self, scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    /// Enable/disable PDF compression
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enable/disable cross-origin image loading
    pub fn use_cors(mut self, enabled: bool) -> Self {
        self.use_cors = enabled;
        self
    }

    /// Enable/disable per-letter rendering
    pub fn letter_rendering(mut self, enabled: bool) -> Self {
        self.letter_rendering = enabled;
        self
    }

    /// Add a page-break avoid selector
    pub fn avoid_break(mut self, selector: impl Into<String>) -> Self {
        self.pagebreak_avoid.push(selector.into());
        self
    }

    /// Replace the section tags
    pub fn section_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layout.section_tags = tags.into_iter().map(|t| t.into().to_lowercase()).collect();
        self
    }

    /// Set the approximation banner
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}
