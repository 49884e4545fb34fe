//! File watcher with debouncing for the local mirror.
//!
//! Uses notify-debouncer-mini so bursts of writes to the same file collapse
//! into one event per watch cycle. Only `.html` files under the sync root are
//! reported; everything else never reaches the reconciler.

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Watch cycle length. Matches the remote-store granularity the rest of the
/// system assumes.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Channel capacity between the watcher thread and the listener. When the
/// listener is stuck in a slow upload, the watcher thread blocks here, which
/// throttles event intake instead of queueing without limit.
const EVENT_QUEUE: usize = 16;

/// File watcher that monitors the sync root.
pub struct FileWatcher {
    /// Sync root path
    root: PathBuf,
    /// Debouncer handle (must keep alive)
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Receiver for root-relative changed paths
    event_rx: mpsc::Receiver<String>,
}

impl FileWatcher {
    /// Create a new watcher over the sync root.
    pub fn new(root: PathBuf) -> Result<Self> {
        // Canonicalize the path to resolve symlinks. On macOS, /var/folders/...
        // is actually /private/var/folders/..., and FSEvents needs the real path.
        let root = root.canonicalize().unwrap_or(root);

        // Tokio channel for async event delivery. The callback runs on the
        // debouncer's own thread, so a blocking send is safe there.
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE);
        let root_clone = root.clone();

        let mut debouncer = new_debouncer(
            DEBOUNCE_WINDOW,
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        if let Some(path) = Self::process_event(&event.path, &root_clone) {
                            if event_tx.blocking_send(path).is_err() {
                                // Receiver dropped
                                return;
                            }
                        }
                    }
                }
                Err(e) => {
                    error!("File watcher error: {}", e);
                }
            },
        )?;

        debouncer.watcher().watch(&root, RecursiveMode::Recursive)?;

        Ok(Self {
            root,
            _debouncer: debouncer,
            event_rx,
        })
    }

    /// Filter a raw event path down to a root-relative snippet path, or
    /// `None` if the reconciler should never see it.
    fn process_event(path: &Path, root: &Path) -> Option<String> {
        let relative = path.strip_prefix(root).ok()?;
        let relative_str = relative.to_str()?;

        // Skip hidden files and directories
        if relative_str.starts_with('.') || relative_str.contains("/.") {
            return None;
        }

        // Only snippet files are watched
        if !relative_str.ends_with(".html") {
            return None;
        }

        // Deletions are not propagated
        if !path.exists() {
            debug!("Ignoring vanished file: {}", relative_str);
            return None;
        }

        debug!("File event: {}", relative_str);
        Some(relative_str.to_string())
    }

    /// Get the receiver for changed paths.
    pub fn event_rx(&mut self) -> &mut mpsc::Receiver<String> {
        &mut self.event_rx
    }

    /// Get the watched root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
