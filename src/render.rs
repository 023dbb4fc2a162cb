//! Indented listing of a tree.

use crate::node::Node;
use std::iter::FusedIterator;
use std::slice;

/// Extra indentation added for each level below the starting node.
pub const INDENT_UNIT: &str = "  ";

/// Lazily list every descendant of `node`, one line per entry.
///
/// Lines come out depth-first, parents before their children, siblings in
/// name order. Each line is `indent`, then [`INDENT_UNIT`] once per level
/// below the first, then the name. The starting node itself is not listed.
pub fn render_tree<'a>(node: &'a Node, indent: &str) -> RenderTree<'a> {
    RenderTree {
        indent: indent.to_string(),
        stack: vec![node.children().iter()],
    }
}

/// Iterator returned by [`render_tree`].
pub struct RenderTree<'a> {
    indent: String,
    stack: Vec<slice::Iter<'a, Node>>,
}

impl Iterator for RenderTree<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            match self.stack.last_mut()?.next() {
                Some(child) => {
                    let line = format!("{}{}{}", self.indent, INDENT_UNIT.repeat(depth), child.name());
                    self.stack.push(child.children().iter());
                    return Some(line);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for RenderTree<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::create_path;

    #[test]
    fn test_render_flat_tree_in_sorted_order() {
        let mut root = Node::root();
        create_path(&mut root, "vegetables");
        create_path(&mut root, "fruits");

        let lines: Vec<String> = render_tree(&root, "").collect();
        assert_eq!(lines, ["fruits", "vegetables"]);

        let output: String = render_tree(&root, "").map(|line| line + "\n").collect();
        assert_eq!(output, "fruits\nvegetables\n");
    }

    #[test]
    fn test_render_nested_tree_pre_order() {
        let mut root = Node::root();
        create_path(&mut root, "grains/squash");
        create_path(&mut root, "fruits/apples/fuji");
        create_path(&mut root, "fruits/apples/gala");
        create_path(&mut root, "fruits/bananas");

        let lines: Vec<String> = render_tree(&root, "").collect();
        assert_eq!(
            lines,
            [
                "fruits",
                "  apples",
                "    fuji",
                "    gala",
                "  bananas",
                "grains",
                "  squash",
            ]
        );
    }

    #[test]
    fn test_render_prefixes_base_indent() {
        let mut root = Node::root();
        create_path(&mut root, "a/b");

        let lines: Vec<String> = render_tree(&root, "> ").collect();
        assert_eq!(lines, ["> a", ">   b"]);
    }

    #[test]
    fn test_render_is_lazy_and_fused() {
        let mut root = Node::root();
        create_path(&mut root, "a/b/c");

        let mut lines = render_tree(&root, "");
        assert_eq!(lines.next().as_deref(), Some("a"));
        assert_eq!(lines.by_ref().count(), 2);
        assert_eq!(lines.next(), None);
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_tree(&Node::root(), "").count(), 0);
    }
}
