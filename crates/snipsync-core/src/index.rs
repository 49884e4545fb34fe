//! In-memory index of known remote snippets.
//!
//! The index is a whole snapshot of the store's listing for the active
//! knowledge base. It is only ever replaced wholesale (`load`), never
//! partially mutated, so readers always see a fully-formed result set.

use crate::entity::Snippet;

/// Snapshot of the snippets known to exist remotely.
#[derive(Debug, Default)]
pub struct SnippetIndex {
    entries: Vec<Snippet>,
}

impl SnippetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire index with a freshly fetched listing.
    pub fn load(&mut self, entries: Vec<Snippet>) {
        self.entries = entries;
    }

    /// Look up a snippet by exact (project id, mergecode) equality.
    pub fn find(&self, project_id: &str, mergecode: &str) -> Option<&Snippet> {
        self.entries
            .iter()
            .find(|s| s.project_id == project_id && s.mergecode == mergecode)
    }

    /// The current snapshot, in listing order.
    pub fn all(&self) -> &[Snippet] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: &str, project_id: &str, mergecode: &str) -> Snippet {
        Snippet {
            id: id.into(),
            project_id: project_id.into(),
            mergecode: mergecode.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_matches_both_fields() {
        let mut index = SnippetIndex::new();
        index.load(vec![
            snippet("1", "P", "intro"),
            snippet("2", "P", "outro"),
            snippet("3", "Q", "intro"),
        ]);

        assert_eq!(index.find("P", "intro").unwrap().id, "1");
        assert_eq!(index.find("Q", "intro").unwrap().id, "3");
        assert!(index.find("P", "missing").is_none());
        assert!(index.find("R", "intro").is_none());
    }

    #[test]
    fn test_load_replaces_snapshot() {
        let mut index = SnippetIndex::new();
        index.load(vec![snippet("1", "P", "intro")]);
        assert_eq!(index.len(), 1);

        index.load(vec![snippet("2", "P", "outro")]);
        assert_eq!(index.len(), 1);
        assert!(index.find("P", "intro").is_none());
        assert_eq!(index.find("P", "outro").unwrap().id, "2");
    }
}
