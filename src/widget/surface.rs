// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Preview presentation surface
//!
//! Shows either a rendered PDF (through a revocable handle) or an HTML
//! approximation of the prepared document. The surface owns the handle
//! of whatever it displays and revokes it before showing anything else.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::artifact::{ArtifactStore, HandleId, PreviewHandle};
use crate::layout::PreparedDocument;

const FRAME_STYLE: &str = "width: 100%; max-height: 500px; overflow-y: auto; \
    border: 1px solid #ddd; padding: 20px; background-color: white; \
    font-family: Arial, sans-serif;";

const BANNER_STYLE: &str = "background-color: #f0f0f0; padding: 10px; margin-bottom: 15px; \
    border-radius: 4px; font-size: 14px; color: #666; text-align: center;";

/// What the surface displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SurfaceContent {
    /// Rendered PDF
    Artifact { handle: HandleId },
    /// HTML approximation inside a preview frame
    Approximation { banner: String, html: String },
}

/// Preview surface
#[derive(Debug)]
pub struct PresentationSurface {
    store: Arc<ArtifactStore>,
    banner: String,
    content: Option<SurfaceContent>,
    held: Option<PreviewHandle>,
    visible: bool,
}

impl PresentationSurface {
    /// Create a hidden, empty surface
    pub fn new(store: Arc<ArtifactStore>, banner: impl Into<String>) -> Self {
        Self {
            store,
            banner: banner.into(),
            content: None,
            held: None,
            visible: false,
        }
    }

    /// Display a rendered artifact, taking ownership of its handle
    pub fn show_artifact(&mut self, handle: PreviewHandle) {
        self.release();
        self.content = Some(SurfaceContent::Artifact {
            handle: handle.id(),
        });
        self.held = Some(handle);
        self.visible = true;
    }

    /// Display an HTML approximation built from a copy of `document`
    pub fn show_approximation(&mut self, document: &PreparedDocument) {
        self.release();
        let html = approximation_html(document, &self.banner);
        self.content = Some(SurfaceContent::Approximation {
            banner: self.banner.clone(),
            html,
        });
        self.visible = true;
    }

    /// Drop the displayed content, keeping visibility unchanged
    pub fn clear(&mut self) {
        self.release();
        self.content = None;
    }

    /// Hide the surface and release its handle; returns whether a handle was released
    pub fn close(&mut self) -> bool {
        let released = self.release();
        self.content = None;
        self.visible = false;
        released
    }

    /// Whether the surface is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current content
    pub fn content(&self) -> Option<&SurfaceContent> {
        self.content.as_ref()
    }

    /// Handle of the displayed artifact
    pub fn active_handle(&self) -> Option<HandleId> {
        self.held.as_ref().map(|h| h.id())
    }

    /// Data URI of the displayed artifact
    pub fn artifact_uri(&self) -> Option<String> {
        self.active_handle().and_then(|id| self.store.data_uri(id))
    }

    fn release(&mut self) -> bool {
        match self.held.take() {
            Some(handle) => {
                debug!(handle = %handle.id(), "Releasing preview");
                self.store.revoke(handle);
                true
            }
            None => false,
        }
    }
}

impl Drop for PresentationSurface {
    fn drop(&mut self) {
        self.release();
    }
}

/// Frame a preview copy of the document under the banner
fn approximation_html(document: &PreparedDocument, banner: &str) -> String {
    let preview = document.clone_for_preview();
    let doc = preview.document();

    let frame = doc.create_element("div");
    frame.set_attribute("class", "folio-preview");
    frame.set_attribute("style", FRAME_STYLE);

    let header = doc.create_element("div");
    header.set_attribute("class", "folio-preview-banner");
    header.set_attribute("style", BANNER_STYLE);
    header.set_text_content(banner);

    frame.append_child(&header);
    frame.append_child(preview.root());
    doc.root().append_child(&frame);

    doc.to_html()
}
