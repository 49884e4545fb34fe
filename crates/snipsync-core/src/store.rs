//! SnippetStore trait abstraction for the remote knowledge base.
//!
//! Implementations:
//! - `RecordingStore` - In-memory fake that records calls, for testing
//! - `HttpStore` (in snipsync-daemon) - The real service over reqwest
//!
//! Stores are purely request/response: no entity state is retained between
//! calls. Every operation is a single attempt with no retry.

use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

use crate::entity::Snippet;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Remote snippet store abstraction.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Fetch every snippet in the given knowledge base.
    async fn list(&self, project_id: &str) -> Result<Vec<Snippet>>;

    /// Create a new snippet. The returned record carries the assigned id.
    async fn create(&self, project_id: &str, mergecode: &str, content: &str) -> Result<Snippet>;

    /// Replace the content of an existing snippet. The snippet value carries
    /// the id, project id and mergecode needed to rebuild the upload body.
    async fn update(&self, snippet: &Snippet, content: &str) -> Result<()>;
}

#[async_trait]
impl<T: SnippetStore + Send + Sync> SnippetStore for std::sync::Arc<T> {
    async fn list(&self, project_id: &str) -> Result<Vec<Snippet>> {
        (**self).list(project_id).await
    }

    async fn create(&self, project_id: &str, mergecode: &str, content: &str) -> Result<Snippet> {
        (**self).create(project_id, mergecode, content).await
    }

    async fn update(&self, snippet: &Snippet, content: &str) -> Result<()> {
        (**self).update(snippet, content).await
    }
}

/// A call observed by the `RecordingStore`, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List {
        project_id: String,
    },
    Create {
        project_id: String,
        mergecode: String,
        content: String,
    },
    Update {
        id: String,
        content: String,
    },
}

/// In-memory snippet store for testing.
///
/// Behaves like the real service (create assigns an id, list returns the
/// current records for a project) and records every call so tests can assert
/// exactly which operations the reconciler issued.
#[derive(Default)]
pub struct RecordingStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    snippets: Vec<Snippet>,
    calls: Vec<StoreCall>,
    next_id: u64,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a snippet, as if it already existed remotely.
    pub fn seed(&self, snippet: Snippet) {
        self.state.lock().unwrap().snippets.push(snippet);
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Current remote records for a project.
    pub fn snippets(&self, project_id: &str) -> Vec<Snippet> {
        self.state
            .lock()
            .unwrap()
            .snippets
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SnippetStore for RecordingStore {
    async fn list(&self, project_id: &str) -> Result<Vec<Snippet>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::List {
            project_id: project_id.to_string(),
        });
        Ok(state
            .snippets
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create(&self, project_id: &str, mergecode: &str, content: &str) -> Result<Snippet> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Create {
            project_id: project_id.to_string(),
            mergecode: mergecode.to_string(),
            content: content.to_string(),
        });

        state.next_id += 1;
        let snippet = Snippet {
            id: format!("gen-{}", state.next_id),
            project_id: project_id.to_string(),
            name: mergecode.to_string(),
            mergecode: mergecode.to_string(),
            status: "active".to_string(),
            current_version: crate::entity::SnippetVersion {
                en: content.to_string(),
            },
            ..Default::default()
        };
        state.snippets.push(snippet.clone());
        Ok(snippet)
    }

    async fn update(&self, snippet: &Snippet, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Update {
            id: snippet.id.clone(),
            content: content.to_string(),
        });

        match state.snippets.iter_mut().find(|s| s.id == snippet.id) {
            Some(existing) => {
                existing.current_version.en = content.to_string();
                Ok(())
            }
            None => Err(StoreError::Status {
                status: 404,
                body: format!("no snippet with id {}", snippet.id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_store_create_assigns_id() {
        let store = RecordingStore::new();
        let created = store.create("P", "intro", "<p>Hi</p>").await.unwrap();
        assert!(!created.id.is_empty());

        let listed = store.list("P").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].content(), "<p>Hi</p>");
    }

    #[tokio::test]
    async fn test_recording_store_update_unknown_id_fails() {
        let store = RecordingStore::new();
        let ghost = Snippet {
            id: "missing".into(),
            ..Default::default()
        };
        let err = store.update(&ghost, "content").await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
    }
}
