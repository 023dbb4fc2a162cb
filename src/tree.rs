//! Path-level operations on a tree: create, delete and move.
//!
//! Paths are `/`-separated segment names resolved from an explicit root.
//! Resolution is by name rather than by position: create and move search
//! whole subtrees for each segment (see [`Scope::Subtree`]), while delete
//! walks direct children only.

use crate::node::{Node, Scope};
use thiserror::Error;
use tracing::{debug, warn};

/// Ways a structural operation can fail. The tree is never left half-moved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("source parent not found: {0}")]
    SourceParentNotFound(String),

    #[error("node to move not found: {0}")]
    NodeNotFound(String),

    /// The destination subtree already holds an entry with the moved name.
    #[error("cannot move a node to its descendant: {0}")]
    DescendantConflict(String),

    /// The name resolved somewhere under the source parent, but not as one
    /// of its direct children.
    #[error("failed to remove node from current parent: {0}")]
    DetachFailed(String),

    #[error("cannot move {0} into its own subtree")]
    IntoOwnSubtree(String),
}

/// Make sure every segment of `path` exists and return the last one.
///
/// Creating an existing path changes nothing.
pub fn create_path<'a>(root: &'a mut Node, path: &str) -> &'a mut Node {
    let segments: Vec<&str> = path.split('/').collect();
    ensure_path(root, &segments)
}

/// Resolve each segment below the previous one, creating it when missing.
///
/// Lookup is a subtree search, so a segment found deeper down (or naming the
/// current node itself) is reused instead of becoming a new direct child.
pub fn ensure_path<'a>(root: &'a mut Node, segments: &[&str]) -> &'a mut Node {
    segments
        .iter()
        .fold(root, |node, segment| node.resolve_or_insert(segment))
}

/// Remove the node at `path`, walking direct children only.
///
/// Returns the detached subtree. On failure the tree is untouched.
pub fn delete_path(root: &mut Node, path: &str) -> Result<Node, TreeError> {
    let (parents, leaf) = split_leaf(path);
    let (location, _) = locate_chain(root, &parents, Scope::Children)
        .map_err(|segment| TreeError::PathNotFound(segment.to_string()))?;

    let removed = root
        .descendant_mut(&location)
        .remove_child(leaf)
        .ok_or_else(|| TreeError::PathNotFound(leaf.to_string()))?;
    debug!(path, "deleted node");
    Ok(removed)
}

/// Move the subtree at `source` under `destination`.
///
/// Both ends are resolved by name with subtree searches. Missing destination
/// segments are created first and stay in place even if the move is then
/// refused by the descendant check or the detach step.
pub fn move_directory(root: &mut Node, source: &str, destination: &str) -> Result<(), TreeError> {
    let result = try_move(root, source, destination);
    match &result {
        Ok(()) => debug!(source, destination, "moved node"),
        Err(err) => warn!(source, destination, %err, "move refused"),
    }
    result
}

fn try_move(root: &mut Node, source: &str, destination: &str) -> Result<(), TreeError> {
    let (parents, leaf) = split_leaf(source);
    let (parent_location, source_parent) = locate_chain(root, &parents, Scope::Subtree)
        .map_err(|segment| TreeError::SourceParentNotFound(segment.to_string()))?;

    if source_parent.find_by_name(leaf).is_none() {
        return Err(TreeError::NodeNotFound(leaf.to_string()));
    }
    let detach_index = source_parent
        .locate(leaf, Scope::Children)
        .and_then(|location| location.first().copied());

    // Decide the outcome against the untouched tree so that the source
    // location stays valid; only then create the destination.
    let destination: Vec<&str> = destination.split('/').collect();
    let (existing, pending) = probe_path(root, &destination);
    let conflict = match pending.last() {
        // A freshly created leaf has no children, only its own name.
        Some(&fresh) => fresh == leaf,
        None => root
            .descendant(&existing)
            .is_some_and(|parent| parent.find_by_name(leaf).is_some()),
    };

    let refusal = if conflict {
        Some(TreeError::DescendantConflict(leaf.to_string()))
    } else if let Some(index) = detach_index {
        let mut moved = parent_location.clone();
        moved.push(index);
        existing
            .starts_with(&moved)
            .then(|| TreeError::IntoOwnSubtree(leaf.to_string()))
    } else {
        Some(TreeError::DetachFailed(leaf.to_string()))
    };

    if let Some(err) = refusal {
        ensure_path(root, &destination);
        return Err(err);
    }

    let node = root
        .descendant_mut(&parent_location)
        .remove_child(leaf)
        .ok_or_else(|| TreeError::DetachFailed(leaf.to_string()))?;
    // The moved subtree never holds part of the destination chain, so
    // resolving it after the detach reaches the same nodes as before.
    ensure_path(root, &destination).insert_child(node);
    Ok(())
}

fn split_leaf(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once('/') {
        Some((parents, leaf)) => (parents.split('/').collect(), leaf),
        None => (Vec::new(), path),
    }
}

/// Resolve `segments` one below the other, reporting the first missing one.
fn locate_chain<'t, 'p>(
    root: &'t Node,
    segments: &[&'p str],
    scope: Scope,
) -> Result<(Vec<usize>, &'t Node), &'p str> {
    let mut location = Vec::new();
    let mut current = root;
    for &segment in segments {
        let relative = current.locate(segment, scope).ok_or(segment)?;
        current = current.descendant(&relative).ok_or(segment)?;
        location.extend(relative);
    }
    Ok((location, current))
}

/// Read-only walk of [`ensure_path`]: the location of the deepest existing
/// node and the segments that would have to be created below it.
fn probe_path<'p, 's>(root: &Node, segments: &'p [&'s str]) -> (Vec<usize>, &'p [&'s str]) {
    let mut location = Vec::new();
    let mut current = root;
    for (position, &segment) in segments.iter().enumerate() {
        let Some(relative) = current.locate(segment, Scope::Subtree) else {
            return (location, &segments[position..]);
        };
        let Some(next) = current.descendant(&relative) else {
            return (location, &segments[position..]);
        };
        current = next;
        location.extend(relative);
    }
    (location, &[])
}
