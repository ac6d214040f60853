// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The document-generation widget
//!
//! - Orchestrator driving download and preview cycles
//! - Renderer contract and engine options
//! - Preview surface with revocable artifact handles
//! - Controls, status line and session state

mod artifact;
mod config;
mod controls;
mod orchestrator;
mod renderer;
mod session;
mod surface;

pub use artifact::{ArtifactStats, ArtifactStore, HandleId, PreviewHandle};
pub use config::{WidgetConfig, DEFAULT_BANNER};
pub use controls::{Control, ControlState, StatusLine};
pub use orchestrator::{Widget, DOWNLOAD_SUCCESS};
pub use renderer::{
    PagebreakSettings, PdfSettings, RasterSettings, RenderOptions, RenderedArtifact, Renderer,
    UnavailableRenderer, PDF_MIME,
};
pub use session::{GenerationSession, Mode, Phase};
pub use surface::{PresentationSurface, SurfaceContent};
