// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Generation orchestrator
//!
//! [`Widget`] runs one generation cycle at a time: sanitize, prepare, hand
//! the document to the renderer, then report the outcome on the status
//! line or the preview surface. Controls are disabled while a cycle is in
//! flight and re-enabled by a drop guard however the cycle ends, including
//! when the future is dropped before completion.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::artifact::{ArtifactStore, PreviewHandle};
use super::config::WidgetConfig;
use super::controls::{ControlState, StatusLine};
use super::renderer::{RenderOptions, Renderer};
use super::session::{GenerationSession, Mode, Phase};
use super::surface::{PresentationSurface, SurfaceContent};
use crate::error::{Error, Result};
use crate::host::{classify, EnvironmentProfile, GenerationRequest, HostEnvironment, HostParameters};
use crate::layout::{LayoutPreparer, PreparedDocument};
use crate::security::Sanitizer;

/// Message shown after a successful download
pub const DOWNLOAD_SUCCESS: &str = "PDF downloaded successfully!";

struct WidgetState {
    session: GenerationSession,
    controls: ControlState,
    status: StatusLine,
    surface: PresentationSurface,
    /// Preview closed while its cycle was still running
    preview_dismissed: bool,
}

impl WidgetState {
    fn sync_preview(&mut self) {
        self.session.active_preview = self.surface.active_handle();
    }
}

/// Re-enables controls when a cycle ends, however it ends
struct BusyGuard<'a> {
    state: &'a Mutex<WidgetState>,
    finished: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(state: &'a Mutex<WidgetState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    /// Record the outcome; the lock is released before the guard drops
    fn finish<F>(&mut self, update: F)
    where
        F: FnOnce(&mut WidgetState),
    {
        let mut state = self.state.lock();
        update(&mut state);
        self.finished = true;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.controls.enable_all();
        if !self.finished && state.session.is_busy() {
            warn!("Generation cycle abandoned before completion");
            state.session.reset();
            state.sync_preview();
        }
    }
}

/// The document-generation widget
pub struct Widget {
    request: GenerationRequest,
    profile: EnvironmentProfile,
    renderer: Arc<dyn Renderer>,
    sanitizer: Sanitizer,
    preparer: LayoutPreparer,
    options: RenderOptions,
    store: Arc<ArtifactStore>,
    state: Mutex<WidgetState>,
}

impl Widget {
    /// Create a widget with default configuration
    pub fn new(
        request: GenerationRequest,
        profile: EnvironmentProfile,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self::with_config(request, profile, renderer, WidgetConfig::default())
    }

    /// Create a widget with custom configuration
    pub fn with_config(
        request: GenerationRequest,
        profile: EnvironmentProfile,
        renderer: Arc<dyn Renderer>,
        config: WidgetConfig,
    ) -> Self {
        let store = Arc::new(ArtifactStore::new());
        let options = RenderOptions::new(&request, &config);
        let state = WidgetState {
            session: GenerationSession::new(),
            controls: ControlState::new(),
            status: StatusLine::default(),
            surface: PresentationSurface::new(store.clone(), config.banner.clone()),
            preview_dismissed: false,
        };

        Self {
            request,
            profile,
            renderer,
            sanitizer: Sanitizer::new(),
            preparer: LayoutPreparer::with_options(config.layout.clone()),
            options,
            store,
            state: Mutex::new(state),
        }
    }

    /// Build from raw host inputs
    pub fn from_host(
        params: &HostParameters,
        env: &HostEnvironment,
        renderer: Arc<dyn Renderer>,
        config: WidgetConfig,
    ) -> Self {
        Self::with_config(
            GenerationRequest::from_parameters(params),
            classify(env),
            renderer,
            config,
        )
    }

    /// Generate the PDF and hand it to the user
    pub async fn download(&self) -> Result<()> {
        self.run(Mode::Download).await
    }

    /// Generate a preview on the presentation surface
    pub async fn preview(&self) -> Result<()> {
        self.run(Mode::Preview).await
    }

    /// Download while the preview is shown; the preview stays open
    pub async fn download_from_preview(&self) -> Result<()> {
        self.run(Mode::Download).await
    }

    /// Hide the preview and release its artifact. Safe to call repeatedly.
    ///
    /// A preview still being generated is discarded when it completes.
    pub fn close_preview(&self) {
        let mut state = self.state.lock();
        let released = state.surface.close();
        if state.session.is_busy() {
            if state.session.mode == Some(Mode::Preview) {
                state.preview_dismissed = true;
            }
        } else {
            state.session.reset();
        }
        state.sync_preview();
        debug!(released, "Preview closed");
    }

    async fn run(&self, mode: Mode) -> Result<()> {
        let sanitized = {
            let mut state = self.state.lock();
            if state.session.is_busy() {
                debug!(?mode, "Request refused while busy");
                return Err(Error::Busy);
            }
            state.status.clear();

            let sanitized = self.sanitizer.sanitize(&self.request.content);
            if sanitized.trim().is_empty() {
                let err = Error::NoContent;
                state.session.reject(mode)?;
                state.status.set_error(err.user_message());
                info!(?mode, "Nothing to generate");
                return Err(err);
            }

            state.session.begin(mode)?;
            state.controls.begin_busy();
            state.preview_dismissed = false;
            if mode == Mode::Preview {
                state.surface.clear();
                state.sync_preview();
            }
            sanitized
        };
        info!(?mode, filename = %self.request.filename, "Generation started");

        let mut guard = BusyGuard::new(&self.state);

        let prepared = match self
            .preparer
            .prepare(&sanitized, self.request.margins())
        {
            Ok(prepared) => prepared,
            Err(err) => {
                error!("Failed to prepare document: {}", err);
                guard.finish(|state| {
                    state.status.set_error(err.user_message());
                    state.session.fail();
                });
                return Err(err);
            }
        };

        match mode {
            Mode::Download => self.save(&mut guard, &prepared).await,
            Mode::Preview => {
                self.show_preview(&mut guard, &prepared).await;
                Ok(())
            }
        }
    }

    async fn save(&self, guard: &mut BusyGuard<'_>, prepared: &PreparedDocument) -> Result<()> {
        match self.renderer.save(&self.options, prepared).await {
            Ok(()) => {
                let message = match self.profile.host_kind.download_hint() {
                    Some(hint) => format!("{} {}", DOWNLOAD_SUCCESS, hint),
                    None => DOWNLOAD_SUCCESS.to_string(),
                };
                info!(filename = %self.options.filename, "PDF downloaded");
                guard.finish(|state| {
                    state.status.set_result(message);
                    state.session.succeed();
                });
                Ok(())
            }
            Err(err) => {
                let err = if err.is_renderer_error() {
                    err
                } else {
                    Error::pdf(err.to_string())
                };
                error!("PDF generation failed: {}", err);
                guard.finish(|state| {
                    state.status.set_error(err.user_message());
                    state.session.fail();
                });
                Err(err)
            }
        }
    }

    async fn show_preview(&self, guard: &mut BusyGuard<'_>, prepared: &PreparedDocument) {
        if self.profile.is_constrained_host {
            debug!(kind = ?self.profile.host_kind, "Constrained host, showing HTML preview");
            self.present(guard, prepared, None);
            return;
        }

        match self.renderer.render(&self.options, prepared).await {
            Ok(artifact) => {
                let handle = self.store.issue(artifact);
                self.present(guard, prepared, Some(handle));
            }
            Err(err) => {
                warn!("PDF preview failed, falling back to HTML: {}", err);
                self.present(guard, prepared, None);
            }
        }
    }

    /// Show the artifact, or the approximation without one, unless the user closed the preview
    fn present(
        &self,
        guard: &mut BusyGuard<'_>,
        prepared: &PreparedDocument,
        handle: Option<PreviewHandle>,
    ) {
        guard.finish(|state| {
            if state.preview_dismissed {
                if let Some(handle) = handle {
                    self.store.revoke(handle);
                }
                state.preview_dismissed = false;
                state.session.reset();
                debug!("Preview closed before it was ready, discarding");
            } else {
                match handle {
                    Some(handle) => state.surface.show_artifact(handle),
                    None => state.surface.show_approximation(prepared),
                }
                state.session.succeed();
            }
            state.sync_preview();
        });
    }

    /// The resolved request
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// The environment classification
    pub fn profile(&self) -> EnvironmentProfile {
        self.profile
    }

    /// Options passed to the renderer
    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// Store holding preview artifacts
    pub fn artifact_store(&self) -> &Arc<ArtifactStore> {
        &self.store
    }

    /// Current control state
    pub fn controls(&self) -> ControlState {
        self.state.lock().controls.clone()
    }

    /// Current status line
    pub fn status(&self) -> StatusLine {
        self.state.lock().status.clone()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.state.lock().session.phase
    }

    /// Snapshot of the session
    pub fn session(&self) -> GenerationSession {
        self.state.lock().session.clone()
    }

    /// Whether the preview surface is shown
    pub fn is_preview_visible(&self) -> bool {
        self.state.lock().surface.is_visible()
    }

    /// What the preview surface displays
    pub fn surface_content(&self) -> Option<SurfaceContent> {
        self.state.lock().surface.content().cloned()
    }

    /// Data URI of the previewed PDF, when one is shown
    pub fn preview_uri(&self) -> Option<String> {
        self.state.lock().surface.artifact_uri()
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("request", &self.request)
            .field("profile", &self.profile)
            .field("phase", &self.phase())
            .finish()
    }
}
