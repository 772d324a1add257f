//! Transient store of generated Markdown outputs.
//!
//! Holds the most recent artifacts in memory so each one can be downloaded under
//! its fixed file name. Bounded: inserting past capacity evicts the oldest entry.
//! Nothing survives a restart.

pub mod handlers;

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// The four kinds of generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Analysis,
    AtsKeywords,
    ImprovedSection,
    CoverLetter,
}

impl ArtifactKind {
    /// Download file name for this kind of output.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Analysis => "resume_analysis.md",
            ArtifactKind::AtsKeywords => "ats_keywords.md",
            ArtifactKind::ImprovedSection => "improved_section.md",
            ArtifactKind::CoverLetter => "cover_letter.md",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub id: Uuid,
    pub kind: ArtifactKind,
    pub markdown: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ArtifactStore {
    inner: Arc<RwLock<VecDeque<Artifact>>>,
    capacity: usize,
}

impl ArtifactStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub async fn insert(&self, kind: ArtifactKind, markdown: String) -> Artifact {
        let artifact = Artifact {
            id: Uuid::new_v4(),
            kind,
            markdown,
            created_at: Utc::now(),
        };

        let mut artifacts = self.inner.write().await;
        while artifacts.len() >= self.capacity {
            if let Some(evicted) = artifacts.pop_front() {
                debug!("Evicting artifact {} ({:?})", evicted.id, evicted.kind);
            }
        }
        artifacts.push_back(artifact.clone());

        artifact
    }

    pub async fn get(&self, id: Uuid) -> Option<Artifact> {
        self.inner
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
