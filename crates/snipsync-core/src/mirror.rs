//! Local mirror: writes remote snippet content into the sync root.

use tracing::info;

use crate::entity::Snippet;
use crate::fs::{FileSystem, Result};

/// Write every snippet's content to `<project_id>/<mergecode>.html`.
///
/// Existing files are unconditionally overwritten: the remote store is
/// authoritative at sync time. Parent directories are created by the
/// filesystem's `write`.
pub async fn mirror_snapshot<F: FileSystem>(fs: &F, snippets: &[Snippet]) -> Result<()> {
    for snippet in snippets {
        let path = snippet.rel_path();
        fs.write(&path, snippet.content().as_bytes()).await?;
        info!("Downloading: {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SnippetVersion;
    use crate::fs::InMemoryFs;

    fn snippet(project_id: &str, mergecode: &str, content: &str) -> Snippet {
        Snippet {
            project_id: project_id.into(),
            mergecode: mergecode.into(),
            current_version: SnippetVersion { en: content.into() },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mirror_writes_exact_content() {
        let fs = InMemoryFs::new();
        let snippets = vec![
            snippet("P", "intro", "<p>Hi</p>"),
            snippet("P", "outro", "<p>Bye</p>"),
        ];

        mirror_snapshot(&fs, &snippets).await.unwrap();

        assert_eq!(fs.read("P/intro.html").await.unwrap(), b"<p>Hi</p>");
        assert_eq!(fs.read("P/outro.html").await.unwrap(), b"<p>Bye</p>");
    }

    #[tokio::test]
    async fn test_mirror_overwrites_local_edits() {
        let fs = InMemoryFs::new();
        fs.write("P/intro.html", b"<p>local edit</p>").await.unwrap();

        mirror_snapshot(&fs, &[snippet("P", "intro", "<p>Hi</p>")])
            .await
            .unwrap();

        assert_eq!(fs.read("P/intro.html").await.unwrap(), b"<p>Hi</p>");
    }

    #[tokio::test]
    async fn test_mirror_is_idempotent() {
        let fs = InMemoryFs::new();
        let snippets = vec![snippet("P", "intro", "<p>Hi</p>")];

        mirror_snapshot(&fs, &snippets).await.unwrap();
        let first = fs.read("P/intro.html").await.unwrap();

        mirror_snapshot(&fs, &snippets).await.unwrap();
        let second = fs.read("P/intro.html").await.unwrap();

        assert_eq!(first, second);
    }
}
