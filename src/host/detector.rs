// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host environment detection
//!
//! Decides whether the widget runs inside a constrained embedded host,
//! where a rendered PDF preview may not display, or in an ordinary
//! browser. Classes the host puts on its body element are authoritative;
//! user agent and window size are only consulted when no marker is present.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body class set by the Android host
pub const ANDROID_MARKER: &str = "android-collect";
/// Body class set by the iOS host
pub const IOS_MARKER: &str = "ios-collect";
/// Body class set by the web host
pub const WEB_MARKER: &str = "web-collect";

lazy_static! {
    /// Android WebView user agents carry a standalone `wv` token
    static ref WV_TOKEN: Regex = Regex::new(r"\bwv\b").expect("valid regex");
}

/// Observable facts about the execution context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEnvironment {
    /// Classes on the host's body element
    #[serde(default)]
    pub body_classes: Vec<String>,
    /// User agent string
    #[serde(default)]
    pub user_agent: String,
    /// Outer window size, when known
    #[serde(default)]
    pub outer_size: Option<(u32, u32)>,
}

impl HostEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a body class
    pub fn body_class(mut self, class: impl Into<String>) -> Self {
        self.body_classes.push(class.into());
        self
    }

    /// Set the outer window size
    pub fn outer_size(mut self, width: u32, height: u32) -> Self {
        self.outer_size = Some((width, height));
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.body_classes
            .iter()
            .flat_map(|c| c.split_whitespace())
            .any(|c| c == class)
    }
}

/// Kind of host the widget runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// Android app (marker)
    Android,
    /// iOS app (marker)
    Ios,
    /// Web host (marker)
    Web,
    /// Unmarked embedded webview (heuristic)
    WebView,
    /// Ordinary browser
    Browser,
}

impl HostKind {
    /// Where to look for a downloaded file, if the host has a known answer
    pub fn download_hint(&self) -> Option<&'static str> {
        match self {
            HostKind::Android => Some("Check your Downloads folder or device storage."),
            HostKind::Ios => Some("Check the Files app on your device."),
            HostKind::Web => Some("Check your browser's download location."),
            HostKind::WebView | HostKind::Browser => None,
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProfile {
    /// Rendered previews may not display; use the HTML approximation
    pub is_constrained_host: bool,
    pub host_kind: HostKind,
}

impl EnvironmentProfile {
    /// Profile of an ordinary browser
    pub fn browser() -> Self {
        Self {
            is_constrained_host: false,
            host_kind: HostKind::Browser,
        }
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self::browser()
    }
}

/// Classify the environment
pub fn classify(env: &HostEnvironment) -> EnvironmentProfile {
    let profile = if env.has_class(ANDROID_MARKER) {
        EnvironmentProfile {
            is_constrained_host: true,
            host_kind: HostKind::Android,
        }
    } else if env.has_class(IOS_MARKER) {
        EnvironmentProfile {
            is_constrained_host: true,
            host_kind: HostKind::Ios,
        }
    } else if env.has_class(WEB_MARKER) {
        EnvironmentProfile {
            is_constrained_host: false,
            host_kind: HostKind::Web,
        }
    } else if looks_like_webview(env) {
        EnvironmentProfile {
            is_constrained_host: true,
            host_kind: HostKind::WebView,
        }
    } else {
        EnvironmentProfile::browser()
    };

    debug!(
        kind = ?profile.host_kind,
        constrained = profile.is_constrained_host,
        "Classified host environment"
    );
    profile
}

fn looks_like_webview(env: &HostEnvironment) -> bool {
    env.user_agent.contains("WebView")
        || WV_TOKEN.is_match(&env.user_agent)
        || env.outer_size == Some((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_ANDROID_WV: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7 Build/TQ3A; wv) \
        AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/120.0 Mobile Safari/537.36";
    const DESKTOP_CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    #[test]
    fn test_markers() {
        let android = classify(&HostEnvironment::new().body_class("theme android-collect"));
        assert_eq!(android.host_kind, HostKind::Android);
        assert!(android.is_constrained_host);

        let ios = classify(&HostEnvironment::new().body_class(IOS_MARKER));
        assert_eq!(ios.host_kind, HostKind::Ios);
        assert!(ios.is_constrained_host);

        let web = classify(&HostEnvironment::new().body_class(WEB_MARKER));
        assert_eq!(web.host_kind, HostKind::Web);
        assert!(!web.is_constrained_host);
    }

    #[test]
    fn test_marker_beats_heuristics() {
        let env = HostEnvironment::new()
            .body_class(WEB_MARKER)
            .user_agent(CHROME_ANDROID_WV)
            .outer_size(0, 0);
        assert_eq!(classify(&env).host_kind, HostKind::Web);
        assert!(!classify(&env).is_constrained_host);
    }

    #[test]
    fn test_heuristics() {
        let wv = classify(&HostEnvironment::new().user_agent(CHROME_ANDROID_WV));
        assert_eq!(wv.host_kind, HostKind::WebView);
        assert!(wv.is_constrained_host);

        let named = classify(&HostEnvironment::new().user_agent("SomeApp WebView/1.0"));
        assert_eq!(named.host_kind, HostKind::WebView);

        let zero = classify(&HostEnvironment::new().user_agent(DESKTOP_CHROME).outer_size(0, 0));
        assert!(zero.is_constrained_host);

        let browser = classify(&HostEnvironment::new().user_agent(DESKTOP_CHROME).outer_size(1280, 800));
        assert_eq!(browser, EnvironmentProfile::browser());
    }

    #[test]
    fn test_wv_must_be_a_token() {
        let env = HostEnvironment::new().user_agent("Mozilla/5.0 (X11) Firefox/wvx");
        assert_eq!(classify(&env).host_kind, HostKind::Browser);
        let env = HostEnvironment::new().user_agent("Mozilla/5.0 (X11) wvfoo");
        assert_eq!(classify(&env).host_kind, HostKind::Browser);
    }

    #[test]
    fn test_download_hints() {
        assert_eq!(
            HostKind::Android.download_hint(),
            Some("Check your Downloads folder or device storage.")
        );
        assert_eq!(HostKind::Ios.download_hint(), Some("Check the Files app on your device."));
        assert_eq!(
            HostKind::Web.download_hint(),
            Some("Check your browser's download location.")
        );
        assert_eq!(HostKind::Browser.download_hint(), None);
        assert_eq!(HostKind::WebView.download_hint(), None);
    }
}
