//! Folder search ranking.

use explorer_entity::folder::Folder;

/// Normalize a search query: trimmed and lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Filter `folders` to those whose name or path contains `query`, ignoring
/// case, and order them with exact name matches first, then by name.
///
/// A blank query matches nothing.
pub fn rank_folder_matches(folders: Vec<Folder>, query: &str) -> Vec<Folder> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(bool, Folder)> = folders
        .into_iter()
        .filter_map(|folder| {
            let name = folder.name.to_lowercase();
            let hit = name.contains(&needle) || folder.path.to_lowercase().contains(&needle);
            hit.then(|| (name == needle, folder))
        })
        .collect();

    matches.sort_by(|(a_exact, a), (b_exact, b)| b_exact.cmp(a_exact).then_with(|| a.cmp_by_name(b)));

    matches.into_iter().map(|(_, folder)| folder).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use explorer_core::types::FolderId;

    use super::*;

    fn folder(id: i32, name: &str, path: &str) -> Folder {
        Folder {
            id: FolderId(id),
            name: name.to_string(),
            parent_id: None,
            path: path.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn names(folders: &[Folder]) -> Vec<&str> {
        folders.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_match_on_name_and_path() {
        let folders = vec![
            folder(1, "Documents", "/Documents"),
            folder(2, "Reports", "/Documents/Reports"),
            folder(3, "Music", "/Music"),
        ];

        let results = rank_folder_matches(folders, "  DOC ");
        assert_eq!(names(&results), vec!["Documents", "Reports"]);
    }

    #[test]
    fn test_exact_name_match_ranks_first() {
        let folders = vec![
            folder(1, "Art Projects", "/Art Projects"),
            folder(2, "Archive", "/Archive"),
            folder(3, "art", "/Pictures/art"),
        ];

        let results = rank_folder_matches(folders, "Art");
        assert_eq!(names(&results), vec!["art", "Art Projects"]);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let folders = vec![folder(1, "Documents", "/Documents")];
        assert!(rank_folder_matches(folders, "   ").is_empty());
    }
}
