//! snipsync: Mirrors a remote snippet knowledge base into a local HTML tree
//! and uploads local edits back to the matching remote record.
//!
//! On startup every snippet is downloaded into `<root>/<project>/<mergecode>.html`.
//! After that, the watcher feeds file changes to the reconciler one at a time:
//! a known file becomes an update, an unknown one becomes a create followed by
//! a full re-sync. Any store or filesystem failure is fatal.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use snipsync_daemon::config::SyncConfig;
use snipsync_daemon::native_fs::NativeFs;
use snipsync_daemon::remote::HttpStore;
use snipsync_daemon::watcher::FileWatcher;

use snipsync_core::Reconciler;

#[derive(Parser, Debug)]
#[command(name = "snipsync")]
#[command(about = "Snippet knowledge base sync daemon")]
#[command(version)]
struct Args {
    /// Root directory of the local mirror
    #[arg(short, long, default_value = "kbs")]
    root: PathBuf,

    /// API key (prompted for when omitted)
    #[arg(long, env = "SNIPSYNC_API_KEY")]
    api_key: Option<String>,

    /// Knowledge base id (prompted for when omitted)
    #[arg(long, env = "SNIPSYNC_PROJECT_ID")]
    project_id: Option<String>,

    /// Knowledge base API url (prompted for when omitted)
    #[arg(long, env = "SNIPSYNC_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging - respects RUST_LOG env var, defaults to info (or debug with --verbose)
    let default_filter = if args.verbose {
        "debug,snipsync_daemon=debug"
    } else {
        "info,snipsync_daemon=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("snipsync {}", env!("CARGO_PKG_VERSION"));

    let config = SyncConfig::acquire(args.root, args.api_key, args.project_id, args.base_url)?;
    info!("Mirror root: {:?}", config.root);
    info!("Knowledge base: {}", config.project_id);

    tokio::fs::create_dir_all(&config.root).await?;

    let store = HttpStore::new(config.base_url.clone(), config.api_key.clone())?;
    let fs = NativeFs::new(config.root.clone());
    let mut reconciler = Reconciler::new(store, fs, config.project_id.clone());

    // Populate the index and the mirror before watching for edits.
    reconciler.full_sync().await?;
    info!("Initial sync complete");

    let mut watcher = FileWatcher::new(config.root.clone())?;
    info!("Watching {:?} for changes. Press Ctrl+C to stop.", watcher.root());

    // Events are processed strictly sequentially: an in-flight upload or
    // re-sync blocks the loop, which is what keeps create-vs-update decisions
    // consistent with the index.
    loop {
        tokio::select! {
            Some(path) = watcher.event_rx().recv() => {
                info!("{}", path);
                if let Err(e) = reconciler.on_file_changed(&path).await {
                    error!("Sync failed for {}: {}", path, e);
                    return Err(e.into());
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
