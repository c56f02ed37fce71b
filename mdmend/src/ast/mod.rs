//! The mdmend document tree.
//!
//! An mdast-shaped representation of parsed Markdown: a [`Document`] root
//! holding an ordered sequence of block nodes, each holding further children
//! down to leaf inline nodes. Nodes carry optional source positions taken
//! from the parser, which the transforms use for line-adjacency decisions.

pub mod nodes;

pub use nodes::*;
