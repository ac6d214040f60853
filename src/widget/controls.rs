// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Widget controls and status line

use std::collections::BTreeSet;

use serde::Serialize;

/// User-facing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    /// Generate and download
    Create,
    /// Generate a preview
    Preview,
    /// Download from the preview surface
    DownloadFromPreview,
    /// Close the preview surface
    ClosePreview,
}

impl Control {
    /// Controls that start a generation cycle
    pub const TRIGGERS: [Control; 3] = [
        Control::Create,
        Control::Preview,
        Control::DownloadFromPreview,
    ];
}

/// Enabled state of the controls plus the loading indicator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlState {
    disabled: BTreeSet<Control>,
    loading: bool,
}

impl ControlState {
    /// All controls enabled, not loading
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable every trigger and show the loading indicator
    pub fn begin_busy(&mut self) {
        self.disabled.extend(Control::TRIGGERS);
        self.loading = true;
    }

    /// Re-enable every disabled control and hide the loading indicator
    pub fn enable_all(&mut self) {
        self.disabled.clear();
        self.loading = false;
    }

    /// Check if a control accepts input
    pub fn is_enabled(&self, control: Control) -> bool {
        !self.disabled.contains(&control)
    }

    /// Check if every control is enabled
    pub fn all_enabled(&self) -> bool {
        self.disabled.is_empty()
    }

    /// Check if the loading indicator is shown
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Result and error messages shown under the controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLine {
    pub result: Option<String>,
    pub error: Option<String>,
}

impl StatusLine {
    /// Clear both messages
    pub fn clear(&mut self) {
        self.result = None;
        self.error = None;
    }

    /// Show a result message
    pub fn set_result(&mut self, message: impl Into<String>) {
        self.error = None;
        self.result = Some(message.into());
    }

    /// Show an error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_disables_triggers_only() {
        let mut controls = ControlState::new();
        controls.begin_busy();
        assert!(controls.is_loading());
        assert!(!controls.is_enabled(Control::Create));
        assert!(!controls.is_enabled(Control::Preview));
        assert!(controls.is_enabled(Control::ClosePreview));

        controls.enable_all();
        assert!(controls.all_enabled());
        assert!(!controls.is_loading());
    }

    #[test]
    fn test_status_line() {
        let mut status = StatusLine::default();
        status.set_result("done");
        status.set_error("Error: boom");
        assert_eq!(status.result, None);
        assert_eq!(status.error.as_deref(), Some("Error: boom"));
        status.clear();
        assert_eq!(status, StatusLine::default());
    }
}
