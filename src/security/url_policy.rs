// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL attribute policy
//!
//! Decides whether a URL-valued attribute can execute script when followed
//! or loaded. Parsing follows the WHATWG URL rules browsers use, so
//! `" java\tscript:..."` is recognised the same way a browser would.

use url::Url;

/// Schemes that run script when navigated to
const SCRIPT_SCHEMES: [&str; 2] = ["javascript", "vbscript"];

/// Attributes whose value is a URL the browser may follow or load
pub const URL_ATTRIBUTES: [&str; 7] = [
    "href",
    "src",
    "action",
    "formaction",
    "poster",
    "background",
    "xlink:href",
];

/// Check whether an attribute carries a URL
pub fn is_url_attribute(name: &str) -> bool {
    URL_ATTRIBUTES.iter().any(|a| a.eq_ignore_ascii_case(name))
}

/// Check whether a URL value is a script or HTML-document injection vector
pub fn is_dangerous_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            let scheme = url.scheme();
            if SCRIPT_SCHEMES.contains(&scheme) {
                return true;
            }
            scheme == "data" && is_html_media_type(url.path())
        }
        // Relative references cannot change scheme, but fall back to the
        // browser's leniency in case the value is a malformed absolute URL
        Err(_) => is_dangerous_normalized(value),
    }
}

fn is_html_media_type(data_path: &str) -> bool {
    data_path
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("text/html")
}

/// Strip ASCII whitespace and control characters, then compare prefixes
fn is_dangerous_normalized(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();

    SCRIPT_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(&format!("{}:", scheme)))
        || normalized.starts_with("data:text/html")
}
