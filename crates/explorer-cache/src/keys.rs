//! Cache key builders for all explorer cache entries.
//!
//! Centralising key construction keeps the writers in the service layer and
//! the invalidation patterns in agreement.

use explorer_core::types::FolderId;

/// Prefix applied to all explorer cache keys.
const PREFIX: &str = "explorer";

// ── Folder keys ────────────────────────────────────────────

/// Cache key for the full folder tree.
pub fn folder_tree() -> String {
    format!("{PREFIX}:folder-tree")
}

/// Cache key for a folder entity by ID.
pub fn folder_by_id(folder_id: FolderId) -> String {
    format!("{PREFIX}:folder:{folder_id}")
}

/// Cache key for the direct contents of a folder.
pub fn folder_contents(folder_id: FolderId) -> String {
    format!("{PREFIX}:folder-contents:{folder_id}")
}

/// Pattern matching every folder-by-id entry.
pub fn folder_by_id_pattern() -> String {
    format!("{PREFIX}:folder:*")
}

/// Pattern matching every folder-contents entry.
pub fn folder_contents_pattern() -> String {
    format!("{PREFIX}:folder-contents:*")
}

// ── Search keys ────────────────────────────────────────────

/// Cache key for search results. The term is expected to be normalized
/// (trimmed, lowercased) by the caller.
pub fn folder_search(term: &str) -> String {
    format!("{PREFIX}:search:{term}")
}

/// Pattern matching every cached search result.
pub fn folder_search_pattern() -> String {
    format!("{PREFIX}:search:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_keys() {
        assert_eq!(folder_tree(), "explorer:folder-tree");
        assert_eq!(folder_by_id(FolderId(7)), "explorer:folder:7");
        assert_eq!(folder_contents(FolderId(7)), "explorer:folder-contents:7");
    }

    #[test]
    fn test_patterns_cover_their_keys() {
        let by_id = folder_by_id_pattern();
        assert!(folder_by_id(FolderId(12)).starts_with(by_id.trim_end_matches('*')));
        assert!(!folder_contents(FolderId(12)).starts_with(by_id.trim_end_matches('*')));

        let search = folder_search_pattern();
        assert!(folder_search("docs").starts_with(search.trim_end_matches('*')));
    }
}
