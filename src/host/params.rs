// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host parameters and the generation request built from them
//!
//! The host passes loosely typed values: numbers may arrive as strings,
//! anything may be missing. [`GenerationRequest::from_parameters`] resolves
//! them once into validated values with documented fallbacks.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::paper::{Orientation, PaperSize};
use crate::error::{ErrorContext, Result};
use crate::layout::{PageMargins, DEFAULT_MARGIN_LR, DEFAULT_MARGIN_TB};

/// Filename used when the host supplies none
pub const DEFAULT_FILENAME: &str = "document.pdf";

/// Largest accepted margin in millimetres
pub const MAX_MARGIN_MM: f64 = 100.0;

/// Raw host inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostParameters {
    /// HTML content
    #[serde(default)]
    pub content: Value,
    /// Left/right margin in mm
    #[serde(default)]
    pub marginslr: Value,
    /// Top/bottom margin in mm
    #[serde(default)]
    pub marginstb: Value,
    /// Output file name
    #[serde(default)]
    pub filename: Value,
    /// Paper format name
    #[serde(default)]
    pub paper_size: Value,
    /// `portrait` or `landscape`
    #[serde(default)]
    pub orientation: Value,
}

impl HostParameters {
    /// Create parameters with only content set
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Value::String(content.into()),
            ..Default::default()
        }
    }

    /// Parse from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(&format!("reading parameters from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Replace the content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Value::String(content.into());
        self
    }
}

/// A validated generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Raw, unsanitized HTML
    pub content: String,
    /// Left/right margin in mm
    pub margin_left_right: f64,
    /// Top/bottom margin in mm
    pub margin_top_bottom: f64,
    /// Output file name, always ending in `.pdf`
    pub filename: String,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
}

impl GenerationRequest {
    /// Resolve host parameters, applying fallbacks for invalid values
    pub fn from_parameters(params: &HostParameters) -> Self {
        let request = Self {
            content: match &params.content {
                Value::String(s) => s.clone(),
                _ => String::new(),
            },
            margin_left_right: resolve_margin(&params.marginslr, DEFAULT_MARGIN_LR),
            margin_top_bottom: resolve_margin(&params.marginstb, DEFAULT_MARGIN_TB),
            filename: resolve_filename(&params.filename),
            paper_size: params
                .paper_size
                .as_str()
                .map(PaperSize::parse_or_default)
                .unwrap_or_default(),
            orientation: params
                .orientation
                .as_str()
                .map(Orientation::parse_or_default)
                .unwrap_or_default(),
        };
        debug!(
            filename = %request.filename,
            paper = %request.paper_size,
            orientation = %request.orientation,
            margin_lr = request.margin_left_right,
            margin_tb = request.margin_top_bottom,
            "Resolved generation request"
        );
        request
    }

    /// Page margins of this request
    pub fn margins(&self) -> PageMargins {
        PageMargins::new(self.margin_left_right, self.margin_top_bottom)
    }
}

/// Numeric (number or numeric string), finite and within `[0, 100]`, else `default`
pub fn resolve_margin(value: &Value, default: f64) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|m| m.is_finite() && (0.0..=MAX_MARGIN_MM).contains(m))
        .unwrap_or(default)
}

const PDF_EXTENSION: &str = ".pdf";
/// File name length limit shared by common filesystems
const MAX_FILENAME_BYTES: usize = 255;

/// Safe file name ending in exactly one `.pdf`
pub fn resolve_filename(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return DEFAULT_FILENAME.to_string();
    };
    let name = sanitize_filename::sanitize(raw.trim());
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(".pdf") {
        return DEFAULT_FILENAME.to_string();
    }
    if name.to_ascii_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        let stem = truncate_stem(name, MAX_FILENAME_BYTES - PDF_EXTENSION.len());
        format!("{}{}", stem, PDF_EXTENSION)
    }
}

/// Longest prefix of `stem` within `max` bytes, cut on a char boundary
fn truncate_stem(stem: &str, max: usize) -> &str {
    if stem.len() <= max {
        return stem;
    }
    let mut end = max;
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem[..end].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::from_parameters(&HostParameters::default());
        assert_eq!(request.content, "");
        assert_eq!(request.margin_left_right, 10.0);
        assert_eq!(request.margin_top_bottom, 15.0);
        assert_eq!(request.filename, "document.pdf");
        assert_eq!(request.paper_size, PaperSize::A(4));
        assert_eq!(request.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_margins() {
        assert_eq!(resolve_margin(&json!(12.5), 10.0), 12.5);
        assert_eq!(resolve_margin(&json!(" 20 "), 10.0), 20.0);
        assert_eq!(resolve_margin(&json!(0), 10.0), 0.0);
        assert_eq!(resolve_margin(&json!(100), 10.0), 100.0);
        assert_eq!(resolve_margin(&json!(-1), 10.0), 10.0);
        assert_eq!(resolve_margin(&json!(100.5), 15.0), 15.0);
        assert_eq!(resolve_margin(&json!("abc"), 10.0), 10.0);
        assert_eq!(resolve_margin(&json!("NaN"), 10.0), 10.0);
        assert_eq!(resolve_margin(&json!("inf"), 10.0), 10.0);
        assert_eq!(resolve_margin(&json!(true), 15.0), 15.0);
        assert_eq!(resolve_margin(&json!(null), 15.0), 15.0);
        assert_eq!(resolve_margin(&json!([5]), 15.0), 15.0);
    }

    #[test]
    fn test_filenames() {
        assert_eq!(resolve_filename(&json!("report")), "report.pdf");
        assert_eq!(resolve_filename(&json!("report.pdf")), "report.pdf");
        assert_eq!(resolve_filename(&json!("Report.PDF")), "Report.PDF");
        assert_eq!(resolve_filename(&json!("report.pdf.txt")), "report.pdf.txt.pdf");
        assert_eq!(resolve_filename(&json!("")), "document.pdf");
        assert_eq!(resolve_filename(&json!("   ")), "document.pdf");
        assert_eq!(resolve_filename(&json!(7)), "document.pdf");
        assert_eq!(resolve_filename(&json!(null)), "document.pdf");

        let traversal = resolve_filename(&json!("../../etc/passwd"));
        assert!(!traversal.contains('/'));
        assert!(traversal.ends_with(".pdf"));
    }

    #[test]
    fn test_long_filename_fits_limit() {
        let long = resolve_filename(&json!("x".repeat(300)));
        assert_eq!(long.len(), 255);
        assert!(long.ends_with("xxx.pdf"));

        let wide = resolve_filename(&json!("é".repeat(200)));
        assert!(wide.len() <= 255, "{} bytes", wide.len());
        assert!(wide.starts_with('é'));
        assert!(wide.ends_with("é.pdf"));

        let exact = "y".repeat(251);
        assert_eq!(resolve_filename(&json!(exact.clone())), format!("{}.pdf", exact));
    }

    #[test]
    fn test_filename_ends_in_one_pdf() {
        for raw in ["a", "a.pdf", "a.PdF", "a.pdf.pdf", "a/b\\c", "con"] {
            let name = resolve_filename(&json!(raw));
            let lower = name.to_ascii_lowercase();
            assert!(lower.ends_with(".pdf"), "{}", name);
            if !raw.to_ascii_lowercase().ends_with(".pdf.pdf") {
                assert!(!lower.ends_with(".pdf.pdf"), "{}", name);
            }
        }
    }

    #[test]
    fn test_from_json() {
        let params = HostParameters::from_json(
            r#"{"content": "<p>x</p>", "marginslr": "5", "marginstb": 250,
                "filename": "out", "paperSize": "LEGAL", "orientation": "Landscape"}"#,
        )
        .unwrap();
        let request = GenerationRequest::from_parameters(&params);
        assert_eq!(request.content, "<p>x</p>");
        assert_eq!(request.margin_left_right, 5.0);
        assert_eq!(request.margin_top_bottom, 15.0);
        assert_eq!(request.filename, "out.pdf");
        assert_eq!(request.paper_size, PaperSize::Legal);
        assert_eq!(request.orientation, Orientation::Landscape);
        assert_eq!(request.margins(), PageMargins::new(5.0, 15.0));
    }

    #[test]
    fn test_invalid_enums_fall_back() {
        let params = HostParameters {
            paper_size: json!("a42"),
            orientation: json!(3),
            ..HostParameters::with_content("x")
        };
        let request = GenerationRequest::from_parameters(&params);
        assert_eq!(request.paper_size, PaperSize::A(4));
        assert_eq!(request.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"content": "<b>hi</b>", "filename": "memo"}}"#).unwrap();

        let params = HostParameters::load(file.path()).unwrap();
        assert_eq!(params.content, json!("<b>hi</b>"));
        assert_eq!(params.marginslr, Value::Null);

        assert!(HostParameters::load("/nonexistent/params.json").is_err());
    }
}
