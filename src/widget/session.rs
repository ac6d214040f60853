// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Generation session state
//!
//! `Idle -> Busy -> {Succeeded, Failed} -> Idle`. A finished session
//! accepts a new request directly; only `Busy` refuses one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::artifact::HandleId;
use crate::error::{Error, Result};

/// What a cycle produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Download,
    Preview,
}

/// Where a cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Busy,
    Succeeded,
    Failed,
}

/// State of the current or last generation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSession {
    pub mode: Option<Mode>,
    pub phase: Phase,
    /// Handle of the artifact on the preview surface
    pub active_preview: Option<HandleId>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Cycles started so far
    pub cycle: u64,
}

impl GenerationSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a cycle is in flight
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Busy
    }

    /// Enter `Busy` for a new cycle
    pub fn begin(&mut self, mode: Mode) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self.mode = Some(mode);
        self.phase = Phase::Busy;
        self.cycle += 1;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        Ok(())
    }

    /// Fail a request before it becomes busy
    pub fn reject(&mut self, mode: Mode) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self.mode = Some(mode);
        self.phase = Phase::Failed;
        self.started_at = None;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// Finish the cycle successfully
    pub fn succeed(&mut self) {
        self.finish(Phase::Succeeded);
    }

    /// Finish the cycle with an error
    pub fn fail(&mut self) {
        self.finish(Phase::Failed);
    }

    /// Back to idle; the cycle counter is kept
    pub fn reset(&mut self) {
        self.mode = None;
        self.phase = Phase::Idle;
        self.active_preview = None;
        self.started_at = None;
        self.finished_at = None;
    }

    /// Duration of the last finished cycle
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    fn finish(&mut self, phase: Phase) {
        if self.is_busy() {
            self.phase = phase;
            self.finished_at = Some(Utc::now());
        }
    }
}
