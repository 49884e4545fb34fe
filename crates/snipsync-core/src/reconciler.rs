//! Reconciler: maps file-change notifications to remote store operations.
//!
//! The reconciler owns the snippet index for its lifetime. A change event is
//! resolved against the index by (project id, mergecode): a hit becomes an
//! update of the indexed record, a miss becomes a create followed by a full
//! re-sync so the store-assigned id lands in the index. Events are expected
//! to arrive strictly sequentially; nothing here is safe to run concurrently
//! with itself.

use thiserror::Error;
use tracing::{debug, info};

use crate::entity::mergecode_from_path;
use crate::fs::{FileSystem, FsError};
use crate::index::SnippetIndex;
use crate::mirror::mirror_snapshot;
use crate::store::{SnippetStore, StoreError};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Session state for one knowledge base: the store, the local mirror and the
/// in-memory index, constructed once at startup.
pub struct Reconciler<S: SnippetStore, F: FileSystem> {
    store: S,
    fs: F,
    project_id: String,
    index: SnippetIndex,
}

impl<S: SnippetStore, F: FileSystem> Reconciler<S, F> {
    pub fn new(store: S, fs: F, project_id: impl Into<String>) -> Self {
        Self {
            store,
            fs,
            project_id: project_id.into(),
            index: SnippetIndex::new(),
        }
    }

    /// The current index snapshot.
    pub fn index(&self) -> &SnippetIndex {
        &self.index
    }

    /// Fetch the store's full listing, replace the index with it and mirror
    /// every snippet to disk. Runs at startup and after every create.
    pub async fn full_sync(&mut self) -> Result<()> {
        let snippets = self.store.list(&self.project_id).await?;
        info!("Fetched {} snippet(s)", snippets.len());

        self.index.load(snippets);
        mirror_snapshot(&self.fs, self.index.all()).await?;
        Ok(())
    }

    /// Handle one change notification for a root-relative path.
    ///
    /// Issues exactly one remote operation: an update when the index knows
    /// the (project id, mergecode) pair, otherwise a create followed by a
    /// full re-sync. Content equality is not checked; every write event
    /// uploads, which is idempotent because uploads are full-content
    /// replaces. Between a create and the completion of its re-sync, another
    /// event for the same file would take the create path again and produce
    /// a duplicate remote record; callers must process events sequentially
    /// so that window stays closed.
    pub async fn on_file_changed(&mut self, path: &str) -> Result<()> {
        let Some(mergecode) = mergecode_from_path(path) else {
            debug!("Ignoring non-snippet path: {}", path);
            return Ok(());
        };

        let bytes = self.fs.read(path).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        if let Some(snippet) = self.index.find(&self.project_id, mergecode) {
            info!("Syncing: {}", path);
            self.store.update(snippet, &content).await?;
        } else {
            info!("Syncing: {} (new snippet)", path);
            self.store
                .create(&self.project_id, mergecode, &content)
                .await?;

            info!("Re-Syncing snippets...");
            self.full_sync().await?;
        }

        Ok(())
    }
}
