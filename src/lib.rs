//! An in-memory directory tree driven by a tiny command language.
//!
//! The tree itself lives in [`node`] (the [`Node`] type and by-name resolution),
//! [`tree`] (path-level create, delete and move) and [`render`] (the indented
//! listing). Text commands such as `CREATE fruits/apples` or `MOVE a/b c` are
//! parsed by [`command`] and applied to a tree by the [`Dispatcher`].
//!
//! Every operation takes the tree root explicitly, so independent trees can
//! coexist in one process.

pub mod command;
mod dispatcher;
pub mod logging;
pub mod node;
pub mod render;
pub mod tree;

/// Re-export of the line-oriented command runner.
///
/// See [`Dispatcher`] for replaying a command file or running the prompt.
pub use dispatcher::Dispatcher;
pub use node::{Node, Scope};
pub use tree::TreeError;
