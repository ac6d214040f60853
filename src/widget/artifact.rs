// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Revocable handles to rendered artifacts
//!
//! A preview keeps its PDF alive through a [`PreviewHandle`]. Handles are
//! not `Clone`: revoking consumes the handle, so a handle can be released
//! at most once.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use super::renderer::RenderedArtifact;

/// Identifier of an issued handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HandleId(u64);

impl HandleId {
    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "folio-artifact:{}", self.0)
    }
}

/// Owned reference to a live artifact
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: HandleId,
}

impl PreviewHandle {
    /// Handle identifier
    pub fn id(&self) -> HandleId {
        self.id
    }
}

/// Artifact statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactStats {
    /// Handles issued so far
    pub issued: u64,
    /// Handles revoked so far
    pub revoked: u64,
    /// Handles currently live
    pub live: usize,
}

/// Holds rendered artifacts until their handle is revoked
#[derive(Debug, Default)]
pub struct ArtifactStore {
    artifacts: DashMap<HandleId, RenderedArtifact>,
    next_id: AtomicU64,
    revoked: AtomicU64,
}

impl ArtifactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep an artifact alive and return its handle
    pub fn issue(&self, artifact: RenderedArtifact) -> PreviewHandle {
        let id = HandleId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        debug!(handle = %id, bytes = artifact.len(), "Issued preview handle");
        self.artifacts.insert(id, artifact);
        PreviewHandle { id }
    }

    /// Look up a live artifact
    pub fn get(&self, id: HandleId) -> Option<RenderedArtifact> {
        self.artifacts.get(&id).map(|a| a.value().clone())
    }

    /// Data URI of a live artifact
    pub fn data_uri(&self, id: HandleId) -> Option<String> {
        self.artifacts.get(&id).map(|a| a.to_data_uri())
    }

    /// Release an artifact
    pub fn revoke(&self, handle: PreviewHandle) {
        if self.artifacts.remove(&handle.id).is_some() {
            self.revoked.fetch_add(1, Ordering::Relaxed);
            debug!(handle = %handle.id, "Revoked preview handle");
        }
    }

    /// Check if a handle is still live
    pub fn is_live(&self, id: HandleId) -> bool {
        self.artifacts.contains_key(&id)
    }

    /// Number of live handles
    pub fn live_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Current statistics
    pub fn stats(&self) -> ArtifactStats {
        ArtifactStats {
            issued: self.next_id.load(Ordering::Relaxed),
            revoked: self.revoked.load(Ordering::Relaxed),
            live: self.artifacts.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn artifact() -> RenderedArtifact {
        RenderedArtifact::new(Bytes::from_static(b"%PDF-1.7"))
    }

    #[test]
    fn test_issue_and_revoke() {
        let store = ArtifactStore::new();
        let first = store.issue(artifact());
        let second = store.issue(artifact());
        assert_ne!(first.id(), second.id());
        assert_eq!(store.live_count(), 2);

        let id = first.id();
        assert!(store.data_uri(id).unwrap().starts_with("data:application/pdf;base64,"));
        store.revoke(first);
        assert!(!store.is_live(id));
        assert!(store.get(id).is_none());

        assert_eq!(
            store.stats(),
            ArtifactStats {
                issued: 2,
                revoked: 1,
                live: 1
            }
        );
    }

    #[test]
    fn test_handle_display() {
        let store = ArtifactStore::new();
        let handle = store.issue(artifact());
        assert_eq!(handle.id().to_string(), "folio-artifact:1");
        assert_eq!(handle.id().as_u64(), 1);
    }
}
