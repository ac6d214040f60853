// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host integration
//!
//! Everything the embedding host provides: loosely typed parameters, paper
//! format names, and the environment signals used to pick a preview strategy.

mod detector;
mod paper;
mod params;

pub use detector::{
    classify, EnvironmentProfile, HostEnvironment, HostKind, ANDROID_MARKER, IOS_MARKER,
    WEB_MARKER,
};
pub use paper::{Orientation, PaperSize};
pub use params::{
    resolve_filename, resolve_margin, GenerationRequest, HostParameters, DEFAULT_FILENAME,
    MAX_MARGIN_MM,
};
