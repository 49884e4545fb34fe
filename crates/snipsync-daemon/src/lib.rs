//! snipsync-daemon library: Exposes internal modules for testing.
//!
//! This is a thin library layer over the daemon components,
//! allowing integration tests to access internal types.

pub mod config;
pub mod native_fs;
pub mod remote;
pub mod watcher;

// Re-export key types for convenience
pub use config::SyncConfig;
pub use native_fs::NativeFs;
pub use remote::HttpStore;
pub use watcher::FileWatcher;
