// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the folio widget
//!
//! Request errors (no content, busy), preparation and renderer failures,
//! and ambient I/O, serialization and configuration failures.

use thiserror::Error;

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the folio widget
#[derive(Error, Debug)]
pub enum Error {
    /// Content was empty after sanitization
    #[error("No content to generate a PDF from")]
    NoContent,

    /// A generation cycle is already running
    #[error("A PDF is already being generated")]
    Busy,

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Layout preparation failed
    #[error("Failed to prepare document: {0}")]
    Preparation(String),

    /// The rendering engine rejected the request
    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a preparation error
    pub fn preparation<S: Into<String>>(msg: S) -> Self {
        Error::Preparation(msg.into())
    }

    /// Create a renderer error
    pub fn pdf<S: Into<String>>(msg: S) -> Self {
        Error::PdfGeneration(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from the rendering engine
    pub fn is_renderer_error(&self) -> bool {
        matches!(self, Error::PdfGeneration(_))
    }

    /// Text shown to the user in the error area
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::PdfGeneration(reason) => Error::PdfGeneration(format!("{}: {}", msg, reason)),
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}
