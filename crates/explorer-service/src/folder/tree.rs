//! Reconstruction of the folder hierarchy from the flat folder table.

use std::collections::HashMap;

use explorer_core::types::FolderId;
use explorer_entity::folder::{Folder, FolderWithChildren};

/// Result of assembling a folder hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderTreeBuild {
    /// Root folders with their nested children.
    pub roots: Vec<FolderWithChildren>,
    /// Folders not reachable from any root, ordered by id: rows whose parent
    /// does not exist, rows on a parent cycle, and everything below them.
    pub detached: Vec<Folder>,
}

/// Build the folder tree from every folder row.
///
/// Roots are the folders with no parent. Siblings at every level are ordered
/// alphabetically ignoring case, ties broken by exact name and then id. Each folder is placed at most once, so the
/// build terminates on any input, including cyclic parent links.
pub fn build_folder_tree(folders: Vec<Folder>) -> FolderTreeBuild {
    let mut roots = Vec::new();
    let mut children: HashMap<FolderId, Vec<Folder>> = HashMap::new();

    for folder in folders {
        match folder.parent_id {
            None => roots.push(folder),
            Some(parent_id) => children.entry(parent_id).or_default().push(folder),
        }
    }

    roots.sort_by(Folder::cmp_by_name);
    for siblings in children.values_mut() {
        siblings.sort_by(Folder::cmp_by_name);
    }

    let roots = roots
        .into_iter()
        .map(|root| attach_children(root, &mut children))
        .collect();

    let mut detached: Vec<Folder> = children.into_values().flatten().collect();
    detached.sort_by_key(|f| f.id);

    FolderTreeBuild { roots, detached }
}

fn attach_children(
    folder: Folder,
    children: &mut HashMap<FolderId, Vec<Folder>>,
) -> FolderWithChildren {
    let mut node = FolderWithChildren::leaf(folder);
    if let Some(direct) = children.remove(&node.id()) {
        node.children = direct
            .into_iter()
            .map(|child| attach_children(child, children))
            .collect();
    }
    node
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn folder(id: i32, parent: Option<i32>, name: &str) -> Folder {
        Folder {
            id: FolderId(id),
            name: name.to_string(),
            parent_id: parent.map(FolderId),
            path: format!("/{name}"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn names(nodes: &[FolderWithChildren]) -> Vec<&str> {
        nodes.iter().map(|n| n.folder.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let build = build_folder_tree(Vec::new());
        assert!(build.roots.is_empty());
        assert!(build.detached.is_empty());
    }

    #[test]
    fn test_nested_hierarchy_sorted_by_name() {
        let build = build_folder_tree(vec![
            folder(1, None, "Pictures"),
            folder(2, None, "Documents"),
            folder(3, Some(2), "Work"),
            folder(4, Some(2), "Personal"),
            folder(5, Some(3), "Q1"),
        ]);

        assert_eq!(names(&build.roots), vec!["Documents", "Pictures"]);
        let docs = &build.roots[0];
        assert_eq!(names(&docs.children), vec!["Personal", "Work"]);
        assert_eq!(names(&docs.children[1].children), vec!["Q1"]);
        assert!(build.roots[1].children.is_empty());
        assert!(build.detached.is_empty());
    }

    #[test]
    fn test_mixed_case_siblings_sorted_alphabetically() {
        let build = build_folder_tree(vec![
            folder(1, None, "Zebra"),
            folder(2, None, "apple"),
            folder(3, None, "banana"),
            folder(4, Some(2), "cores"),
            folder(5, Some(2), "Bark"),
        ]);

        assert_eq!(names(&build.roots), vec!["apple", "banana", "Zebra"]);
        assert_eq!(names(&build.roots[0].children), vec!["Bark", "cores"]);
    }

    #[test]
    fn test_same_name_siblings_ordered_by_id() {
        let build = build_folder_tree(vec![folder(9, None, "a"), folder(3, None, "a")]);
        let ids: Vec<FolderId> = build.roots.iter().map(FolderWithChildren::id).collect();
        assert_eq!(ids, vec![FolderId(3), FolderId(9)]);
    }

    #[test]
    fn test_orphans_are_detached_with_their_subtree() {
        let build = build_folder_tree(vec![
            folder(1, None, "Documents"),
            folder(2, Some(99), "Lost"),
            folder(3, Some(2), "Below lost"),
        ]);

        assert_eq!(names(&build.roots), vec!["Documents"]);
        let detached: Vec<FolderId> = build.detached.iter().map(|f| f.id).collect();
        assert_eq!(detached, vec![FolderId(2), FolderId(3)]);
    }

    #[test]
    fn test_cycles_terminate_and_are_detached() {
        let build = build_folder_tree(vec![
            folder(1, Some(2), "a"),
            folder(2, Some(1), "b"),
            folder(3, Some(3), "self"),
            folder(4, None, "root"),
        ]);

        assert_eq!(names(&build.roots), vec!["root"]);
        assert_eq!(build.detached.len(), 3);
    }

    /// Deterministic pseudo-random forests, some with dangling parents.
    fn generated_folders(seed: u64, count: i32) -> Vec<Folder> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as i32
        };

        (1..=count)
            .map(|id| {
                let roll = next().rem_euclid(10);
                let parent = if id == 1 || roll < 2 {
                    None
                } else if roll == 9 {
                    Some(count + 1 + id)
                } else {
                    Some(1 + next().rem_euclid(id - 1))
                };
                let name = format!("f{}", next().rem_euclid(20));
                folder(id, parent, &name)
            })
            .collect()
    }

    fn check_node(node: &FolderWithChildren) -> usize {
        for child in &node.children {
            assert_eq!(child.folder.parent_id, Some(node.id()));
        }
        for pair in node.children.windows(2) {
            assert!(pair[0].folder.cmp_by_name(&pair[1].folder).is_lt());
        }
        1 + node.children.iter().map(check_node).sum::<usize>()
    }

    #[test]
    fn test_generated_forests_keep_tree_invariants() {
        for seed in 0..50 {
            let folders = generated_folders(seed, 60);
            let total = folders.len();
            let build = build_folder_tree(folders);

            for root in &build.roots {
                assert!(root.folder.parent_id.is_none());
            }
            for pair in build.roots.windows(2) {
                assert!(pair[0].folder.cmp_by_name(&pair[1].folder).is_lt());
            }
            let placed: usize = build.roots.iter().map(check_node).sum();
            assert_eq!(placed + build.detached.len(), total, "seed {seed}");
        }
    }
}
