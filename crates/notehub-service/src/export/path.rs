//! Folder path resolution over a notebook's flat folder list.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use notehub_core::types::FolderId;
use notehub_entity::folder::Folder;

/// Lookup table over every folder of one notebook.
///
/// Parent references are followed through the table only. A parent that is
/// not in the table (dangling) or that was already visited on the current
/// walk (cycle) ends the walk, and the folder reached last is treated as a
/// root.
#[derive(Debug)]
pub struct FolderIndex<'a> {
    by_id: HashMap<FolderId, &'a Folder>,
}

impl<'a> FolderIndex<'a> {
    /// Index a notebook's folders by identifier.
    pub fn new(folders: &'a [Folder]) -> Self {
        let by_id = folders.iter().map(|folder| (folder.id, folder)).collect();
        Self { by_id }
    }

    /// Look up a folder by identifier.
    pub fn get(&self, id: &FolderId) -> Option<&'a Folder> {
        self.by_id.get(id).copied()
    }

    /// The `/`-joined path from the outermost reachable ancestor down to
    /// `folder`. Names are used verbatim.
    pub fn resolve_path(&self, folder: &Folder) -> String {
        let chain = self.ancestry(folder);
        let mut path = String::new();
        for (i, node) in chain.iter().rev().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(&node.name);
        }
        path
    }

    /// Whether `candidate` lies on the ancestor walk of `folder`
    /// (including `folder` itself).
    pub fn is_ancestor_or_self(&self, candidate: &FolderId, folder: &Folder) -> bool {
        self.ancestry(folder).iter().any(|node| node.id == *candidate)
    }

    /// The folder followed by its ancestors, nearest first.
    fn ancestry<'f>(&self, folder: &'f Folder) -> Vec<&'f Folder>
    where
        'a: 'f,
    {
        let mut chain = vec![folder];
        let mut visited = HashSet::from([folder.id]);
        let mut current = folder;

        while let Some(parent_id) = current.parent_id {
            let Some(parent) = self.get(&parent_id) else {
                break;
            };
            if !visited.insert(parent.id) {
                warn!(
                    folder_id = %folder.id,
                    folder_name = %folder.name,
                    revisited = %parent.id,
                    "Cycle in folder parent references, treating folder as root"
                );
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use notehub_core::types::{NotebookId, UserId};

    use super::*;

    fn folder(name: &str, parent_id: Option<FolderId>) -> Folder {
        let now = Utc::now();
        Folder {
            id: FolderId::new(),
            name: name.to_string(),
            parent_id,
            notebook_id: NotebookId::new(),
            user_id: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_root_folder_resolves_to_own_name() {
        let folders = vec![folder("Resources", None)];
        let index = FolderIndex::new(&folders);
        assert_eq!(index.resolve_path(&folders[0]), "Resources");
    }

    #[test]
    fn test_nested_path_joins_ancestors_first() {
        let a = folder("A", None);
        let b = folder("B", Some(a.id));
        let c = folder("C", Some(b.id));
        let folders = vec![c, a, b];
        let index = FolderIndex::new(&folders);

        assert_eq!(index.resolve_path(&folders[0]), "A/B/C");
        assert_eq!(index.resolve_path(&folders[2]), "A/B");
    }

    #[test]
    fn test_dangling_parent_treated_as_root() {
        let orphan = folder("Orphan", Some(FolderId::new()));
        let folders = vec![orphan];
        let index = FolderIndex::new(&folders);
        assert_eq!(index.resolve_path(&folders[0]), "Orphan");
    }

    #[test]
    fn test_two_node_cycle_terminates_deterministically() {
        let mut a = folder("A", None);
        let b = folder("B", Some(a.id));
        a.parent_id = Some(b.id);
        let folders = vec![a, b];
        let index = FolderIndex::new(&folders);

        assert_eq!(index.resolve_path(&folders[0]), "B/A");
        assert_eq!(index.resolve_path(&folders[1]), "A/B");
        assert_eq!(index.resolve_path(&folders[0]), "B/A");
    }

    #[test]
    fn test_self_loop_resolves_to_own_name() {
        let mut a = folder("Loop", None);
        a.parent_id = Some(a.id);
        let folders = vec![a];
        let index = FolderIndex::new(&folders);
        assert_eq!(index.resolve_path(&folders[0]), "Loop");
    }

    #[test]
    fn test_names_are_used_verbatim() {
        let a = folder("Q1: plans?", None);
        let b = folder("  draft  ", Some(a.id));
        let folders = vec![a, b];
        let index = FolderIndex::new(&folders);
        assert_eq!(index.resolve_path(&folders[1]), "Q1: plans?/  draft  ");
    }

    #[test]
    fn test_is_ancestor_or_self() {
        let a = folder("A", None);
        let b = folder("B", Some(a.id));
        let c = folder("C", None);
        let folders = vec![a, b, c];
        let index = FolderIndex::new(&folders);

        assert!(index.is_ancestor_or_self(&folders[0].id, &folders[1]));
        assert!(index.is_ancestor_or_self(&folders[1].id, &folders[1]));
        assert!(!index.is_ancestor_or_self(&folders[1].id, &folders[0]));
        assert!(!index.is_ancestor_or_self(&folders[2].id, &folders[1]));
    }
}
