// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Folio - Embeddable HTML to PDF Widget Core
//!
//! Takes a block of untrusted HTML from a host application and turns it
//! into something a print renderer can paginate: sanitized, restyled so
//! backgrounds and borders stay local to each section, and wrapped with a
//! scoped stylesheet that carries the page margins. The widget then drives
//! a host-provided rendering engine for download or on-screen preview.
//!
//! ## Features
//!
//! - Sanitizer: strips scripts, embeds, event handlers and script URLs
//! - Layout preparation: per-section framing and page-break hints
//! - Host parameters: lenient parsing with documented fallbacks
//! - Environment detection: host markers first, heuristics second
//! - Orchestration: one cycle at a time, controls always re-enabled
//! - Preview surface: revocable artifact handles, HTML fallback
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio::{HostEnvironment, HostParameters, UnavailableRenderer, Widget, WidgetConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = HostParameters::with_content("<section><h4>Report</h4></section>");
//!     let env = HostEnvironment::new().body_class("web-collect");
//!     let widget = Widget::from_host(
//!         &params,
//!         &env,
//!         Arc::new(UnavailableRenderer),
//!         WidgetConfig::default(),
//!     );
//!
//!     widget.preview().await?;
//!     println!("{:?}", widget.surface_content());
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod host;
pub mod layout;
pub mod security;
pub mod widget;

// Re-exports for convenience

// DOM
pub use dom::{parse_fragment, Document, Element, Node};

// Errors
pub use error::{Error, ErrorContext, Result};

// Host
pub use host::{
    classify, EnvironmentProfile, GenerationRequest, HostEnvironment, HostKind, HostParameters,
    Orientation, PaperSize,
};

// Layout
pub use layout::{prepare, LayoutOptions, LayoutPreparer, PageMargins, PreparedDocument};

// Security
pub use security::{sanitize, sanitize_value, SanitizeReport, Sanitizer};

// Widget
pub use widget::{
    ArtifactStore, Control, ControlState, GenerationSession, Mode, Phase, PresentationSurface,
    PreviewHandle, RenderOptions, RenderedArtifact, Renderer, StatusLine, SurfaceContent,
    UnavailableRenderer, Widget, WidgetConfig,
};

/// Folio version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
