//! snipsync-core: Sync logic for mirroring a remote snippet knowledge base.
//!
//! This crate provides the core functionality for:
//! - The snippet entity model and its wire representation
//! - The in-memory snippet index (whole-snapshot replacement only)
//! - Mirroring remote snippets into a local HTML file tree
//! - Reconciling local file changes into remote create/update operations
//! - SnippetStore and FileSystem trait abstractions

pub mod entity;
pub mod fs;
pub mod index;
pub mod mirror;
pub mod reconciler;
pub mod store;

pub use entity::{mergecode_from_path, Snippet, SnippetListing, SnippetVersion};
pub use fs::{FileSystem, FsError, InMemoryFs};
pub use index::SnippetIndex;
pub use reconciler::{Reconciler, SyncError};
pub use store::{RecordingStore, SnippetStore, StoreCall, StoreError};
