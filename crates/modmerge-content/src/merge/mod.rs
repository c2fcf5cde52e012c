//! Recursive merge algorithms
//!
//! Both mergers take exclusive mutable access to the target tree and consume
//! the source tree, moving source subtrees into the target instead of
//! cloning them.

pub mod key_value;
pub mod node_tree;

pub use key_value::merge_maps;
pub use node_tree::merge_elements;
