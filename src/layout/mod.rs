// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Print layout preparation
//!
//! Turns sanitized content into a [`PreparedDocument`] whose styling
//! survives pagination.

mod preparer;
mod style;
mod stylesheet;

pub use preparer::{
    prepare, LayoutOptions, LayoutPreparer, PageMargins, PreparedDocument, DEFAULT_MARGIN_LR,
    DEFAULT_MARGIN_TB,
};
pub use style::{Declaration, InlineStyle};
pub use stylesheet::PrintStylesheet;
