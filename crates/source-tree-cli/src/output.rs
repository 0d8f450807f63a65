use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use source_tree::TreeNode;

/// Serialize the tree compactly, or with four-space indentation when
/// `prettify` is set.
pub fn serialize(tree: &TreeNode, prettify: bool) -> Result<String> {
    if !prettify {
        return serde_json::to_string(tree).context("failed to serialize tree");
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    tree.serialize(&mut serializer)
        .context("failed to serialize tree")?;
    String::from_utf8(buffer).context("serialized tree was not valid UTF-8")
}

/// True when the path has a directory component that may need creating.
pub fn has_parent_dir(path: &Path) -> bool {
    path.parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty())
}

/// Write the document, creating missing parent directories first.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory: {}", parent.display())
        })?;
    }

    fs::write(path, contents)
        .with_context(|| format!("failed to write output file: {}", path.display()))
}
