// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rendering engine contract
//!
//! The widget does not rasterize HTML itself. A host-provided [`Renderer`]
//! turns a [`PreparedDocument`] into a PDF, either saving it for the user
//! or returning the bytes for the preview surface.

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::config::WidgetConfig;
use crate::error::{Error, Result};
use crate::host::{GenerationRequest, Orientation, PaperSize};
use crate::layout::PreparedDocument;

/// MIME type of rendered artifacts
pub const PDF_MIME: &str = "application/pdf";

/// Engine document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSettings {
    pub format: PaperSize,
    pub orientation: Orientation,
    /// Unit of all lengths, always `mm`
    pub unit: String,
    pub compress: bool,
}

/// Engine rasterization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSettings {
    pub scale: f64,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub letter_rendering: bool,
}

/// Engine page-break settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagebreakSettings {
    /// Break modes, in priority order
    pub mode: Vec<String>,
    /// Selectors never split across pages
    pub avoid: Vec<String>,
}

/// Configuration handed to the rendering engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// `[top, left, bottom, right]` in mm
    pub margin: [f64; 4],
    pub filename: String,
    #[serde(rename = "jsPDF")]
    pub pdf: PdfSettings,
    #[serde(rename = "html2canvas")]
    pub raster: RasterSettings,
    pub pagebreak: PagebreakSettings,
}

impl RenderOptions {
    /// Build engine options for a request
    pub fn new(request: &GenerationRequest, config: &WidgetConfig) -> Self {
        Self {
            margin: request.margins().as_array(),
            filename: request.filename.clone(),
            pdf: PdfSettings {
                format: request.paper_size,
                orientation: request.orientation,
                unit: "mm".to_string(),
                compress: config.compress,
            },
            raster: RasterSettings {
                scale: config.scale,
                use_cors: config.use_cors,
                letter_rendering: config.letter_rendering,
            },
            pagebreak: PagebreakSettings {
                mode: vec!["css".to_string(), "legacy".to_string()],
                avoid: config.pagebreak_avoid.clone(),
            },
        }
    }

    /// Page width and height in mm
    pub fn page_size_mm(&self) -> (f64, f64) {
        self.pdf.format.page_size_mm(self.pdf.orientation)
    }

    /// Pretty JSON for the engine
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A rendered PDF held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    data: Bytes,
}

impl RenderedArtifact {
    /// Wrap rendered bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Raw bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the artifact is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `data:application/pdf;base64,...` URI
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            PDF_MIME,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// Rendering engine used by the widget
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render and hand the file to the user (download)
    async fn save(&self, options: &RenderOptions, document: &PreparedDocument) -> Result<()>;

    /// Render and return the bytes (preview)
    async fn render(
        &self,
        options: &RenderOptions,
        document: &PreparedDocument,
    ) -> Result<RenderedArtifact>;
}

/// Renderer for contexts without an engine; every call fails
#[derive(Debug, Clone, Default)]
pub struct UnavailableRenderer;

#[async_trait]
impl Renderer for UnavailableRenderer {
    async fn save(&self, _options: &RenderOptions, _document: &PreparedDocument) -> Result<()> {
        Err(Error::pdf("no rendering engine available"))
    }

    async fn render(
        &self,
        _options: &RenderOptions,
        _document: &PreparedDocument,
    ) -> Result<RenderedArtifact> {
        Err(Error::pdf("no rendering engine available"))
    }
}
