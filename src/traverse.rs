//! Flattening and path collection over finished trees.

use std::collections::BTreeMap;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

use crate::arena::SequenceArena;

/// Flattened per-node export row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Sequence string, possibly containing wildcards
    pub sequence: String,
    /// Aggregated mean, None if the tree was never aggregated
    pub mean: Option<f64>,
    /// Sample standard deviation of the children's means
    pub std: f64,
    /// Coefficient of variation
    pub cv: f64,
}

/// Map every node's sequence to its coefficient of variation.
///
/// One entry per node, internal and leaf alike. Sequences are unique
/// across the tree (wildcard counts differ across depths, resolved symbols
/// differ within a depth), so the mapping is collision-free.
pub fn collect_node_data(tree: &SequenceArena) -> BTreeMap<String, f64> {
    tree.iter()
        .map(|(_, node)| (node.data.sequence.to_string(), node.data.cv))
        .collect()
}

/// Flatten the tree into export rows, pre-order.
pub fn collect_records(tree: &SequenceArena) -> Vec<NodeRecord> {
    tree.iter()
        .map(|(_, node)| NodeRecord {
            sequence: node.data.sequence.to_string(),
            mean: node.data.mean,
            std: node.data.std,
            cv: node.data.cv,
        })
        .collect()
}

/// Collect every root-to-leaf path as ordered sequence strings.
///
/// Depth-first with explicit backtracking: the current sequence is pushed
/// onto a shared buffer before descending and popped after returning, so
/// one mutable path buffer serves the whole walk. A childless root yields
/// a single length-1 path.
pub fn all_paths(tree: &SequenceArena) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    if let Some(root) = tree.root() {
        let mut buffer = Vec::new();
        collect_paths(tree, root, &mut buffer, &mut paths);
    }
    paths
}

fn collect_paths(
    tree: &SequenceArena,
    idx: Index,
    buffer: &mut Vec<String>,
    paths: &mut Vec<Vec<String>>,
) {
    let Some(node) = tree.get_node(idx) else {
        return;
    };

    buffer.push(node.data.sequence.to_string());

    if node.children.is_empty() {
        paths.push(buffer.clone());
    } else {
        for &child in &node.children {
            collect_paths(tree, child, buffer, paths);
        }
    }

    buffer.pop();
}
