//! The directory node and by-name resolution.
//!
//! Paths can be tens of thousands of segments deep, so nothing here recurses
//! per level: searching, cloning, comparing and dropping all walk with an
//! explicit stack.

use std::slice;

/// Name carried by every tree root.
///
/// Splitting a path on `/` can never yield this string, so no path segment
/// ever resolves to the root itself.
pub const ROOT_NAME: &str = "/";

/// How far a by-name lookup reaches below the node it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the immediate children.
    Children,
    /// The node itself, then every descendant depth-first in child order.
    ///
    /// The first node with a matching name wins, wherever it sits. Two
    /// branches holding the same name resolve to whichever comes first in
    /// sorted order, not to the one a caller's path may have meant.
    Subtree,
}

/// A directory-like entry in the namespace tree.
///
/// A node exclusively owns its children, which are kept sorted by name.
#[derive(Debug)]
pub struct Node {
    name: String,
    is_container: bool,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty directory node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_container: true,
            children: Vec::new(),
        }
    }

    /// Create the root of a fresh tree.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always true for now; leaf entries are not modelled yet.
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Children in ascending name order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Insert `child` keeping the children sorted and return it.
    ///
    /// Sibling names are not checked here. A child whose name is already
    /// taken lands right after its namesake, but callers must not let that
    /// happen.
    pub fn insert_child(&mut self, child: Node) -> &mut Node {
        let index = self
            .children
            .partition_point(|existing| existing.name <= child.name);
        self.children.insert(index, child);
        &mut self.children[index]
    }

    /// Detach the direct child called `name`, handing back its subtree.
    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self.child_index(name)?;
        Some(self.children.remove(index))
    }

    /// Depth-first search over this node and its descendants.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.resolve(name, Scope::Subtree)
    }

    /// Look at direct children only.
    pub fn get_direct_child(&self, name: &str) -> Option<&Node> {
        self.resolve(name, Scope::Children)
    }

    pub fn resolve(&self, name: &str, scope: Scope) -> Option<&Node> {
        let location = self.locate(name, scope)?;
        self.descendant(&location)
    }

    /// Child indices leading from `self` to the first node named `name`.
    ///
    /// An empty location means `self` matched. Locations are only valid
    /// until the tree is next mutated.
    pub fn locate(&self, name: &str, scope: Scope) -> Option<Vec<usize>> {
        match scope {
            Scope::Children => self.child_index(name).map(|index| vec![index]),
            Scope::Subtree => self.search(name),
        }
    }

    /// Follow a location produced by [`Node::locate`].
    pub fn descendant(&self, location: &[usize]) -> Option<&Node> {
        location
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Mutable counterpart of [`Node::descendant`].
    ///
    /// Panics if `location` is stale, which only happens when the tree was
    /// changed after the location was computed.
    pub(crate) fn descendant_mut(&mut self, location: &[usize]) -> &mut Node {
        location
            .iter()
            .fold(self, |node, &index| &mut node.children[index])
    }

    /// Subtree-resolve `name`, inserting an empty child when nothing matches.
    pub(crate) fn resolve_or_insert(&mut self, name: &str) -> &mut Node {
        match self.locate(name, Scope::Subtree) {
            Some(location) => self.descendant_mut(&location),
            None => {
                tracing::debug!(parent = %self.name, child = name, "creating node");
                self.insert_child(Node::new(name))
            }
        }
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.children
            .binary_search_by(|child| child.name.as_str().cmp(name))
            .ok()
    }

    /// Pre-order search; `location` always holds the indices down to the
    /// level whose iterator is on top of `stack`.
    fn search(&self, name: &str) -> Option<Vec<usize>> {
        if self.name == name {
            return Some(Vec::new());
        }
        let mut location = Vec::new();
        let mut stack = vec![self.children.iter().enumerate()];
        while let Some(level) = stack.last_mut() {
            match level.next() {
                Some((index, child)) => {
                    location.push(index);
                    if child.name == name {
                        return Some(location);
                    }
                    stack.push(child.children.iter().enumerate());
                }
                None => {
                    stack.pop();
                    location.pop();
                }
            }
        }
        None
    }
}

struct CloneFrame<'a> {
    source: &'a Node,
    pending: slice::Iter<'a, Node>,
    children: Vec<Node>,
}

impl<'a> CloneFrame<'a> {
    fn new(source: &'a Node) -> Self {
        Self {
            source,
            pending: source.children.iter(),
            children: Vec::with_capacity(source.children.len()),
        }
    }

    fn finish(self) -> Node {
        Node {
            name: self.source.name.clone(),
            is_container: self.source.is_container,
            children: self.children,
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let mut stack = vec![CloneFrame::new(self)];
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.next() {
                stack.push(CloneFrame::new(child));
                continue;
            }
            let Some(done) = stack.pop() else { break };
            let node = done.finish();
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return node,
            }
        }
        unreachable!("the root frame returns before the stack empties")
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((left, right)) = pairs.pop() {
            if left.name != right.name
                || left.is_container != right.is_container
                || left.children.len() != right.children.len()
            {
                return false;
            }
            pairs.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// An empty root.
impl Default for Node {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &Node) -> Vec<&str> {
        node.children().iter().map(Node::name).collect()
    }

    #[test]
    fn test_insert_child_keeps_children_sorted() {
        let mut root = Node::root();
        root.insert_child(Node::new("vegetables"));
        root.insert_child(Node::new("fruits"));
        root.insert_child(Node::new("grains"));

        assert_eq!(names(&root), ["fruits", "grains", "vegetables"]);
    }

    #[test]
    fn test_insert_child_returns_inserted_node() {
        let mut root = Node::root();
        root.insert_child(Node::new("b"));
        let inserted = root.insert_child(Node::new("a"));
        inserted.insert_child(Node::new("inner"));

        let a = root.get_direct_child("a").unwrap();
        assert_eq!(names(a), ["inner"]);
    }

    #[test]
    fn test_new_nodes_are_containers() {
        assert!(Node::new("x").is_container());
        assert_eq!(Node::root().name(), ROOT_NAME);
    }

    #[test]
    fn test_find_by_name_matches_self_first() {
        let mut root = Node::new("a");
        root.insert_child(Node::new("a"));

        assert_eq!(root.locate("a", Scope::Subtree), Some(vec![]));
        assert_eq!(root.locate("a", Scope::Children), Some(vec![0]));
    }

    #[test]
    fn test_find_by_name_returns_first_depth_first_match() {
        let mut root = Node::root();
        root.insert_child(Node::new("b"))
            .insert_child(Node::new("shared"))
            .insert_child(Node::new("marker"));
        root.insert_child(Node::new("a"))
            .insert_child(Node::new("deep"))
            .insert_child(Node::new("shared"));

        // "a" sorts before "b", so the copy under a/deep wins.
        let found = root.find_by_name("shared").unwrap();
        assert!(found.children().is_empty());
        assert_eq!(root.locate("shared", Scope::Subtree), Some(vec![0, 0, 0]));
    }

    #[test]
    fn test_get_direct_child_ignores_grandchildren() {
        let mut root = Node::root();
        root.insert_child(Node::new("fruits"))
            .insert_child(Node::new("apples"));

        assert!(root.get_direct_child("apples").is_none());
        assert!(root.find_by_name("apples").is_some());
    }

    #[test]
    fn test_remove_child_detaches_whole_subtree() {
        let mut root = Node::root();
        root.insert_child(Node::new("fruits"))
            .insert_child(Node::new("apples"));
        root.insert_child(Node::new("vegetables"));

        let removed = root.remove_child("fruits").unwrap();
        assert_eq!(names(&removed), ["apples"]);
        assert_eq!(names(&root), ["vegetables"]);
        assert!(root.remove_child("fruits").is_none());
    }

    fn chain(depth: usize) -> Node {
        let mut root = Node::root();
        let mut current = &mut root;
        for level in 0..depth {
            current = current.insert_child(Node::new(format!("n{level}")));
        }
        root
    }

    #[test]
    fn test_deep_chain_search_clone_compare_and_drop() {
        let depth = 50_000;
        let root = chain(depth);

        let location = root.locate(&format!("n{}", depth - 1), Scope::Subtree).unwrap();
        assert_eq!(location.len(), depth);
        assert!(root.find_by_name("missing").is_none());

        let copy = root.clone();
        assert!(copy == root);
        let mut other = chain(depth - 1);
        other.insert_child(Node::new("extra"));
        assert!(other != root);

        drop(copy);
        drop(other);
        drop(root);
    }

    #[test]
    fn test_clone_and_eq_see_every_field() {
        let mut root = Node::root();
        root.insert_child(Node::new("a")).insert_child(Node::new("b"));
        root.insert_child(Node::new("c"));

        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(names(copy.get_direct_child("a").unwrap()), ["b"]);

        let mut renamed = Node::root();
        renamed.insert_child(Node::new("a")).insert_child(Node::new("x"));
        renamed.insert_child(Node::new("c"));
        assert_ne!(renamed, root);
    }

    #[test]
    fn test_descendant_rejects_out_of_range_location() {
        let mut root = Node::root();
        root.insert_child(Node::new("only"));

        assert_eq!(root.descendant(&[0]).map(Node::name), Some("only"));
        assert!(root.descendant(&[1]).is_none());
        assert!(root.descendant(&[0, 0]).is_none());
    }

    #[test]
    fn test_resolve_or_insert_reuses_deep_match() {
        let mut root = Node::root();
        root.insert_child(Node::new("x"))
            .insert_child(Node::new("y"));

        root.resolve_or_insert("y");
        assert_eq!(names(&root), ["x"]);

        root.resolve_or_insert("z");
        assert_eq!(names(&root), ["x", "z"]);
    }
}
