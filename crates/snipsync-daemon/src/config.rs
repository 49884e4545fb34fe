//! Session configuration: credentials, knowledge base and sync root.
//!
//! Values missing from the command line are asked for interactively, the API
//! key through a hidden prompt. Everything ends up in one `SyncConfig` value
//! constructed at startup and threaded through the rest of the daemon.

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use std::path::PathBuf;
use url::Url;

/// Default knowledge base API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://app.knowledgeowl.com";

/// Resolved session configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Root of the local mirror
    pub root: PathBuf,
    /// API key for basic auth
    pub api_key: String,
    /// Active knowledge base id
    pub project_id: String,
    /// Normalized API base URL (no trailing slash)
    pub base_url: String,
}

impl SyncConfig {
    /// Build a config from CLI-provided values, prompting for the missing
    /// ones.
    pub fn acquire(
        root: PathBuf,
        api_key: Option<String>,
        project_id: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => Password::new()
                .with_prompt("What is your API key?")
                .interact()
                .context("Failed to read API key")?,
        };

        let project_id = match project_id {
            Some(id) => id,
            None => Input::new()
                .with_prompt("What is your knowledge base id?")
                .interact_text()
                .context("Failed to read knowledge base id")?,
        };

        let base_url = match base_url {
            Some(url) => url,
            None => Input::new()
                .with_prompt("What is the url to your knowledge base API?")
                .default(DEFAULT_BASE_URL.to_string())
                .interact_text()
                .context("Failed to read base url")?,
        };

        let base_url = normalize_base_url(&base_url)?;

        Ok(Self {
            root,
            api_key,
            project_id,
            base_url,
        })
    }
}

/// Trim surrounding whitespace and trailing slashes, and require a URL the
/// HTTP client can actually use.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let cleaned = raw.trim().trim_end_matches('/').to_string();
    Url::parse(&cleaned).with_context(|| format!("Invalid base url: {cleaned:?}"))?;
    Ok(cleaned)
}
