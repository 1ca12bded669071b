//! Recursive mutation helpers over a project's file tree.
//!
//! All functions address nodes by id and walk the ownership path
//! (`children`); `parent_id` is never consulted for traversal.

use super::{generate_file_id, FileNode, FileUpdate};

/// Depth-first search for a node.
pub fn find_node<'a>(files: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    for node in files {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = &node.children {
            if let Some(found) = find_node(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_node_mut<'a>(files: &'a mut [FileNode], id: &str) -> Option<&'a mut FileNode> {
    for node in files.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_node_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Find the folder whose `children` contains the given id.
pub fn find_parent_folder<'a>(files: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    for node in files {
        if let Some(children) = &node.children {
            if children.iter().any(|child| child.id == id) {
                return Some(node);
            }
            if let Some(found) = find_parent_folder(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Merge a partial update into the node with the given id.
/// Returns false when the id does not resolve.
pub fn update_node(files: &mut [FileNode], id: &str, update: FileUpdate) -> bool {
    match find_node_mut(files, id) {
        Some(node) => {
            node.apply(update);
            true
        }
        None => false,
    }
}

/// Detach and return the subtree rooted at the given id.
pub fn remove_node(files: &mut Vec<FileNode>, id: &str) -> Option<FileNode> {
    if let Some(position) = files.iter().position(|node| node.id == id) {
        return Some(files.remove(position));
    }
    for node in files.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(removed) = remove_node(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Whether the subtree rooted at `node` contains the given id
/// (including `node` itself). Used as the cycle check for move.
pub fn subtree_contains(node: &FileNode, id: &str) -> bool {
    if node.id == id {
        return true;
    }
    node.children
        .as_deref()
        .is_some_and(|children| children.iter().any(|child| subtree_contains(child, id)))
}

/// All node ids in the given forest, depth-first.
pub fn collect_ids(files: &[FileNode]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids_into(files, &mut ids);
    ids
}

fn collect_ids_into(files: &[FileNode], ids: &mut Vec<String>) {
    for node in files {
        ids.push(node.id.clone());
        if let Some(children) = &node.children {
            collect_ids_into(children, ids);
        }
    }
}

/// Deep-clone a subtree with a fresh id for every node, preserving
/// structure and content. The clone root is re-parented to `parent_id`.
pub fn clone_with_new_ids(node: &FileNode, parent_id: Option<&str>) -> FileNode {
    let mut clone = node.clone();
    clone.id = generate_file_id();
    clone.parent_id = parent_id.map(str::to_string);
    if let Some(children) = clone.children.take() {
        clone.children = Some(
            children
                .iter()
                .map(|child| clone_with_new_ids(child, Some(&clone.id)))
                .collect(),
        );
    }
    clone
}

/// Collision-avoiding name for a pasted clone: `a.js` becomes `a_copy.js`,
/// the suffix landing before the final extension. Names with no stem get a
/// plain trailing suffix instead, so `.gitignore` stays a dotfile
/// (`.gitignore_copy`) rather than turning into `_copy.gitignore`.
pub fn copy_name(name: &str) -> String {
    match name.rfind('.') {
        Some(index) if index > 0 => format!("{}_copy{}", &name[..index], &name[index..]),
        _ => format!("{name}_copy"),
    }
}
