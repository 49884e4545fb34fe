//! Snippet entity model and wire representation.
//!
//! A snippet is a remote content record keyed by knowledge-base (project) id
//! and mergecode. The mergecode doubles as the local filename stem: a snippet
//! maps to `<project_id>/<mergecode>.html` under the sync root.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// File extension for mirrored snippet files.
pub const HTML_EXT: &str = ".html";

/// A single snippet record as the remote store represents it.
///
/// `id` is assigned by the store and is empty for records that have not been
/// created remotely yet. Within one knowledge base, `mergecode` identifies at
/// most one snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snippet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mergecode: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub current_version: SnippetVersion,
}

impl Snippet {
    /// Root-relative path of the local mirror file for this snippet.
    pub fn rel_path(&self) -> String {
        format!("{}/{}{}", self.project_id, self.mergecode, HTML_EXT)
    }

    /// The synchronized content body.
    pub fn content(&self) -> &str {
        &self.current_version.en
    }
}

/// The versioned content body of a snippet. Only the `en` variant is synced.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SnippetVersion {
    #[serde(default)]
    pub en: String,
}

impl<'de> Deserialize<'de> for SnippetVersion {
    /// The service normally sends `current_version` as an object, but has
    /// been observed to send an empty array instead when no version exists.
    /// Tolerate exactly that shape; any other mismatch is a decode error.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Version {
                #[serde(default)]
                en: String,
            },
            List(Vec<()>),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Version { en } => Ok(SnippetVersion { en }),
            Wire::List(items) if items.is_empty() => Ok(SnippetVersion::default()),
            Wire::List(_) => Err(de::Error::custom(
                "current_version must be an object or an empty array",
            )),
        }
    }
}

/// Listing envelope returned by the snippet collection endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SnippetListing {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub page_stats: PageStats,
    #[serde(default)]
    pub data: Vec<Snippet>,
}

/// Pagination stats reported alongside a listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageStats {
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// Derive the mergecode from a root-relative file path.
///
/// Returns `None` for paths that do not name an `.html` file, or whose stem
/// is empty.
pub fn mergecode_from_path(path: &str) -> Option<&str> {
    let name = std::path::Path::new(path).file_name()?.to_str()?;
    let stem = name.strip_suffix(HTML_EXT)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem)
}
