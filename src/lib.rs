//! Combinatorial RBS core-sequence trees.
//!
//! Enumerates ribosome-binding-site core sequences of fixed length over
//! {A, C, G, T, _}, expands partially-specified sequences into a tree
//! (one wildcard resolved per level, 4 children per expansion), and rolls
//! mean/std/cv statistics up from externally-measured leaves to the root.
//!
//! Typical flow:
//! 1. [`TreeBuilder::build_full`] expands the all-wildcard root.
//! 2. [`assign_leaf_means`] seeds the leaves from a [`MeanSource`].
//! 3. [`aggregate`] rolls statistics bottom-up, post-order.
//! 4. [`collect_node_data`] / [`all_paths`] flatten the finished tree.

pub mod alphabet;
pub mod arena;
pub mod builder;
pub mod display;
pub mod errors;
pub mod sequence;
pub mod stats;
pub mod traverse;
pub mod util;

pub use alphabet::{
    generate_all_sequences, CORE_LENGTH, NUCLEOTIDES, POSSIBLE_SYMBOLS, WILDCARD,
};
pub use arena::{NodeData, SequenceArena, TreeNode};
pub use builder::{assign_leaf_means, MeanSource, TreeBuilder};
pub use display::SequenceTreeDisplay;
pub use errors::{TreeError, TreeResult};
pub use sequence::CoreSequence;
pub use stats::aggregate;
pub use traverse::{all_paths, collect_node_data, collect_records, NodeRecord};
