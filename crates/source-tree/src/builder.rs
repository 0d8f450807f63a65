use std::cmp::Ordering;

use crate::listing::{EntryKind, PathEntry};
use crate::node::{NodeKind, TreeNode};

/// Rebuild a nested directory tree from a flat recursive listing.
///
/// The root is always a directory named `root_name`. Each entry's path is
/// split on `/` and walked from the root, creating missing segments as
/// directories; a blob entry marks its final segment as a file and records
/// its extension. Once every entry has been applied, children are sorted
/// and file nodes are stripped of their child lists.
///
/// Pure in-memory transformation, no failure modes: malformed paths
/// (leading or doubled `/`) produce empty-string segments and are kept
/// as-is.
pub fn build(root_name: &str, entries: &[PathEntry]) -> TreeNode {
    let mut root = TreeNode::dir(root_name);

    for entry in entries {
        insert(&mut root, &entry.path, entry.kind == EntryKind::Blob);
    }

    strip_file_children(sort_children(root))
}

/// Walk `path` from `root`, creating segments as needed. Revisited
/// segments reuse the existing child, so siblings stay unique and a node
/// already marked as a file is never demoted back to a directory.
fn insert(root: &mut TreeNode, path: &str, is_blob: bool) {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;

    let mut node = root;
    for (index, segment) in segments.iter().enumerate() {
        let children = node.children.get_or_insert_with(Vec::new);
        let position = match children.iter().position(|child| child.name == *segment) {
            Some(position) => position,
            None => {
                children.push(TreeNode::dir(*segment));
                children.len() - 1
            }
        };
        node = &mut children[position];

        // Only a blob's final segment is a file; every intermediate
        // segment stays a directory.
        if is_blob && index == last {
            node.kind = NodeKind::File;
            node.extension = Some(extension_of(&node.name));
        }
    }
}

/// Extension rule, kept exactly as consumers of the output expect it:
/// split on `.`, drop a leading empty part, and take the last part only
/// when the name does not itself start with `.` — otherwise the "extension"
/// is the whole name. So `README.md` gives `md`, but `Makefile` gives
/// `Makefile`, `.gitignore` gives `.gitignore`, and `.env.local` gives
/// `.env.local`.
fn extension_of(name: &str) -> String {
    let mut parts: Vec<&str> = name.split('.').collect();
    if parts.first().is_some_and(|part| part.trim().is_empty()) {
        parts.remove(0);
    }

    match parts.pop() {
        Some(last) if !name.starts_with('.') && !parts.is_empty() => last.to_owned(),
        _ => name.to_owned(),
    }
}

/// Recursively sort every child list: by extension first when both
/// siblings have one, falling back to name. `sort_by` is stable, so equal
/// keys keep their insertion order.
fn sort_children(mut node: TreeNode) -> TreeNode {
    if let Some(children) = node.children.take() {
        let mut sorted: Vec<TreeNode> = children.into_iter().map(sort_children).collect();
        sorted.sort_by(sibling_order);
        node.children = Some(sorted);
    }
    node
}

fn sibling_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    if let (Some(a_ext), Some(b_ext)) = (&a.extension, &b.extension) {
        let by_extension = a_ext.cmp(b_ext);
        if by_extension != Ordering::Equal {
            return by_extension;
        }
    }
    a.name.cmp(&b.name)
}

/// Drop the child list from every file node. A file can accumulate a stray
/// child list when a path passes through it mid-walk; finalization removes
/// it unconditionally.
fn strip_file_children(mut node: TreeNode) -> TreeNode {
    match node.kind {
        NodeKind::File => node.children = None,
        NodeKind::Dir => {
            if let Some(children) = node.children.take() {
                node.children = Some(children.into_iter().map(strip_file_children).collect());
            }
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str) -> PathEntry {
        PathEntry::new(path, EntryKind::Blob)
    }

    fn tree(path: &str) -> PathEntry {
        PathEntry::new(path, EntryKind::Tree)
    }

    /// Follow a slash-delimited path from the root by child names.
    fn walk<'a>(root: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
        let mut node = root;
        for segment in path.split('/') {
            node = node.child(segment)?;
        }
        Some(node)
    }

    #[test]
    fn single_file_at_root() {
        let root = build("repo", &[blob("README.md")]);

        assert_eq!(root.name, "repo");
        assert_eq!(root.kind, NodeKind::Dir);

        let children = root.children.as_deref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "README.md");
        assert_eq!(children[0].kind, NodeKind::File);
        assert_eq!(children[0].extension.as_deref(), Some("md"));
        assert!(children[0].children.is_none());
    }

    #[test]
    fn directory_marker_plus_file_under_it() {
        let root = build("repo", &[blob("src/main.go"), tree("src")]);

        let src = root.child("src").unwrap();
        assert_eq!(src.kind, NodeKind::Dir);

        let main = src.child("main.go").unwrap();
        assert_eq!(main.kind, NodeKind::File);
        assert_eq!(main.extension.as_deref(), Some("go"));
    }

    #[test]
    fn dotfile_extension_is_full_name() {
        let root = build("repo", &[blob(".gitignore")]);

        let node = root.child(".gitignore").unwrap();
        assert_eq!(node.kind, NodeKind::File);
        assert_eq!(node.extension.as_deref(), Some(".gitignore"));
    }

    #[test]
    fn dotfile_with_extra_dots_keeps_full_name() {
        let root = build("repo", &[blob(".env.local")]);

        let node = root.child(".env.local").unwrap();
        assert_eq!(node.extension.as_deref(), Some(".env.local"));
    }

    #[test]
    fn extensionless_name_becomes_its_own_extension() {
        let root = build("repo", &[blob("Makefile")]);

        let node = root.child("Makefile").unwrap();
        assert_eq!(node.extension.as_deref(), Some("Makefile"));
    }

    #[test]
    fn multiple_dots_take_last_part() {
        let root = build("repo", &[blob("archive.tar.gz")]);

        let node = root.child("archive.tar.gz").unwrap();
        assert_eq!(node.extension.as_deref(), Some("gz"));
    }

    #[test]
    fn nested_path_creates_directories() {
        let root = build("repo", &[blob("a/b/c.txt")]);

        let a = root.child("a").unwrap();
        assert_eq!(a.kind, NodeKind::Dir);
        assert!(a.extension.is_none());

        let b = a.child("b").unwrap();
        assert_eq!(b.kind, NodeKind::Dir);
        assert!(b.extension.is_none());

        let c = b.child("c.txt").unwrap();
        assert_eq!(c.kind, NodeKind::File);
        assert_eq!(c.extension.as_deref(), Some("txt"));
        assert!(c.children.is_none());
    }

    #[test]
    fn every_path_is_reachable_with_the_right_kind() {
        let entries = [
            tree("src"),
            blob("src/lib.rs"),
            blob("src/builder.rs"),
            tree("docs"),
            blob("docs/guide.md"),
            blob("Cargo.toml"),
        ];
        let root = build("repo", &entries);

        for entry in &entries {
            let node = walk(&root, &entry.path).unwrap();
            let expected = if entry.kind == EntryKind::Blob {
                NodeKind::File
            } else {
                NodeKind::Dir
            };
            assert_eq!(node.kind, expected, "kind mismatch for {}", entry.path);
        }
    }

    #[test]
    fn shared_prefixes_create_no_duplicate_siblings() {
        let root = build(
            "repo",
            &[
                blob("src/a.rs"),
                blob("src/b.rs"),
                tree("src"),
                blob("src/c.rs"),
            ],
        );

        fn assert_unique(node: &TreeNode) {
            if let Some(children) = node.children.as_deref() {
                for (i, child) in children.iter().enumerate() {
                    assert!(
                        children[i + 1..].iter().all(|other| other.name != child.name),
                        "duplicate sibling {}",
                        child.name
                    );
                    assert_unique(child);
                }
            }
        }

        assert_unique(&root);
        assert_eq!(root.child("src").unwrap().children.as_deref().unwrap().len(), 3);
    }

    #[test]
    fn later_tree_entry_does_not_demote_a_file() {
        let root = build("repo", &[blob("notes"), tree("notes")]);

        let notes = root.child("notes").unwrap();
        assert_eq!(notes.kind, NodeKind::File);
        assert!(notes.children.is_none());
    }

    #[test]
    fn siblings_sort_by_extension_then_name() {
        let root = build(
            "repo",
            &[
                blob("main.rs"),
                blob("readme.md"),
                blob("alpha.rs"),
                blob("zeta.md"),
            ],
        );

        let names: Vec<&str> = root
            .children
            .as_deref()
            .unwrap()
            .iter()
            .map(|child| child.name.as_str())
            .collect();

        // md before rs; within each extension, names ascending.
        assert_eq!(names, vec!["readme.md", "zeta.md", "alpha.rs", "main.rs"]);
    }

    #[test]
    fn directories_sort_by_name_among_files() {
        let root = build("repo", &[blob("zz/inner.txt"), blob("aa.txt"), tree("mm")]);

        let names: Vec<&str> = root
            .children
            .as_deref()
            .unwrap()
            .iter()
            .map(|child| child.name.as_str())
            .collect();

        // Directories have no extension, so every comparison involving one
        // falls back to the name.
        assert_eq!(names, vec!["aa.txt", "mm", "zz"]);
    }

    #[test]
    fn sorting_applies_at_every_depth() {
        let root = build(
            "repo",
            &[blob("dir/b.txt"), blob("dir/a.txt"), blob("dir/sub/z.rs")],
        );

        let dir = root.child("dir").unwrap();
        let names: Vec<&str> = dir
            .children
            .as_deref()
            .unwrap()
            .iter()
            .map(|child| child.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    }

    #[test]
    fn rebuild_is_deeply_equal() {
        let entries = [
            blob("src/main.rs"),
            tree("src"),
            blob(".gitignore"),
            blob("docs/a/b/c.md"),
            blob("Makefile"),
        ];

        assert_eq!(build("repo", &entries), build("repo", &entries));
    }

    #[test]
    fn empty_segments_from_malformed_paths_are_kept() {
        let root = build("repo", &[blob("/leading.txt")]);

        // A leading slash yields an empty first segment, kept as-is.
        let empty = root.child("").unwrap();
        assert_eq!(empty.kind, NodeKind::Dir);

        let file = empty.child("leading.txt").unwrap();
        assert_eq!(file.kind, NodeKind::File);
        assert_eq!(file.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn empty_entry_list_gives_bare_root() {
        let root = build("repo", &[]);

        assert_eq!(root.kind, NodeKind::Dir);
        assert_eq!(root.children.as_deref().unwrap().len(), 0);
    }

    #[test]
    fn serialized_file_nodes_have_no_children_field() {
        let root = build("repo", &[blob("src/main.rs"), tree("src")]);
        let json = serde_json::to_value(&root).unwrap();

        let src = &json["children"][0];
        assert_eq!(src["kind"], "dir");
        assert!(src.get("extension").is_none());

        let main = &src["children"][0];
        assert_eq!(main["kind"], "file");
        assert_eq!(main["extension"], "rs");
        assert!(main.get("children").is_none());
    }
}
