// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content security
//!
//! - HTML sanitization of host-supplied content
//! - URL attribute policy (script and HTML-document URLs)

mod sanitizer;
mod url_policy;

pub use sanitizer::{sanitize, sanitize_value, SanitizeReport, Sanitizer, BLOCKED_ELEMENTS};
pub use url_policy::{is_dangerous_url, is_url_attribute, URL_ATTRIBUTES};
