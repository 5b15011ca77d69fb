//! Entries that only exist in this session.
//!
//! The simulated upload backend never writes to the document store. Its results are kept here as a
//! folder tree whose nodes hold their children in [`DriveEntry::content`], and each folder's local
//! files are listed next to the live snapshot for that folder.

use drive_host::{next_entry_id, DriveEntry, DrivePath, EntryKind};

/// Id prefix of entries that live only in the local tree.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Builds a file entry for `name` in `path` that is never persisted.
pub fn local_file_entry(path: &DrivePath, name: impl Into<String>) -> DriveEntry {
    DriveEntry {
        id: format!("{LOCAL_ID_PREFIX}{}", next_entry_id()),
        name: name.into(),
        kind: EntryKind::File,
        path: path.as_str().to_string(),
        url: None,
        content: None,
    }
}

pub fn is_local(entry: &DriveEntry) -> bool {
    entry.id.starts_with(LOCAL_ID_PREFIX)
}

fn folder_node(name: &str, parent: &DrivePath) -> DriveEntry {
    DriveEntry {
        id: format!("{LOCAL_ID_PREFIX}{}{name}", parent.as_str()),
        name: name.to_string(),
        kind: EntryKind::Folder,
        path: parent.as_str().to_string(),
        url: None,
        content: Some(Vec::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTree {
    root: DriveEntry,
}

impl Default for LocalTree {
    fn default() -> Self {
        Self {
            root: folder_node("", &DrivePath::root()),
        }
    }
}

impl LocalTree {
    /// Files `entry` under the node for its parent path, creating folder nodes on the way.
    ///
    /// A local file with the same name in that folder is replaced.
    pub fn insert(&mut self, entry: DriveEntry) {
        let path = DrivePath::parse(&entry.path);
        let mut node = &mut self.root;
        let mut parent = DrivePath::root();
        for segment in path.segments() {
            let children = node.content.get_or_insert_with(Vec::new);
            let index = match children
                .iter()
                .position(|child| child.is_folder() && child.name == segment)
            {
                Some(index) => index,
                None => {
                    children.push(folder_node(segment, &parent));
                    children.len() - 1
                }
            };
            parent = parent.enter(segment);
            node = &mut children[index];
        }

        let children = node.content.get_or_insert_with(Vec::new);
        children.retain(|child| child.is_folder() || child.name != entry.name);
        children.push(entry);
    }

    /// Local files filed directly under `path`, in upload order.
    pub fn files_in(&self, path: &DrivePath) -> Vec<DriveEntry> {
        let mut node = &self.root;
        for segment in path.segments() {
            let Some(child) = node
                .content
                .iter()
                .flatten()
                .find(|child| child.is_folder() && child.name == segment)
            else {
                return Vec::new();
            };
            node = child;
        }
        node.content
            .iter()
            .flatten()
            .filter(|child| !child.is_folder())
            .cloned()
            .collect()
    }

    /// Removes the local entry with the id of `entry`. Returns `false` when it is not in the tree.
    pub fn remove(&mut self, entry: &DriveEntry) -> bool {
        let path = DrivePath::parse(&entry.path);
        let mut node = &mut self.root;
        for segment in path.segments() {
            let Some(child) = node
                .content
                .iter_mut()
                .flatten()
                .find(|child| child.is_folder() && child.name == segment)
            else {
                return false;
            };
            node = child;
        }
        let Some(children) = node.content.as_mut() else {
            return false;
        };
        let before = children.len();
        children.retain(|child| child.id != entry.id);
        children.len() != before
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(entries: &[DriveEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn files_are_listed_only_under_their_own_folder() {
        let mut tree = LocalTree::default();
        let documents = DrivePath::root().enter("Documents");
        tree.insert(local_file_entry(&documents, "a.png"));
        tree.insert(local_file_entry(&DrivePath::root(), "notes.txt"));

        assert_eq!(names(&tree.files_in(&documents)), vec!["a.png"]);
        assert_eq!(names(&tree.files_in(&DrivePath::root())), vec!["notes.txt"]);
        assert!(tree.files_in(&documents.enter("Sub")).is_empty());
        assert!(tree.files_in(&DrivePath::parse("/Images/")).is_empty());
    }

    #[test]
    fn folder_nodes_keep_children_in_content() {
        let mut tree = LocalTree::default();
        let nested = DrivePath::parse("/Documents/Reports/");
        tree.insert(local_file_entry(&nested, "q1.pdf"));

        let documents = tree.root.content.as_ref().expect("root children");
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "Documents");
        assert_eq!(documents[0].path, "/");
        let reports = documents[0].content.as_ref().expect("Documents children");
        assert_eq!(reports[0].path, "/Documents/");
        let files = reports[0].content.as_ref().expect("Reports children");
        assert_eq!(names(files), vec!["q1.pdf"]);
        assert_eq!(files[0].content, None);
    }

    #[test]
    fn same_name_replaces_and_remove_targets_one_entry() {
        let mut tree = LocalTree::default();
        let path = DrivePath::root();
        tree.insert(local_file_entry(&path, "a.png"));
        let replacement = local_file_entry(&path, "a.png");
        tree.insert(replacement.clone());
        tree.insert(local_file_entry(&path, "b.png"));
        assert_eq!(tree.files_in(&path).len(), 2);

        assert!(is_local(&replacement));
        assert!(tree.remove(&replacement));
        assert_eq!(names(&tree.files_in(&path)), vec!["b.png"]);
        assert!(!tree.remove(&replacement));
    }
}
