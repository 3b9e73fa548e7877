use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::sequence::CoreSequence;
use crate::stats;

/// Data payload for tree nodes: a sequence plus its aggregate statistics.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The (possibly partially-specified) sequence at this node
    pub sequence: CoreSequence,
    /// Aggregate mean; supplied externally for leaves, computed for
    /// internal nodes. `None` until populated.
    pub mean: Option<f64>,
    /// Sample standard deviation of the children's means
    pub std: f64,
    /// Coefficient of variation (std/mean, 0 when mean is 0)
    pub cv: f64,
}

impl NodeData {
    pub fn new(sequence: CoreSequence) -> Self {
        Self {
            sequence,
            mean: None,
            std: 0.0,
            cv: 0.0,
        }
    }

    pub fn with_mean(sequence: CoreSequence, mean: f64) -> Self {
        Self {
            sequence,
            mean: Some(mean),
            std: 0.0,
            cv: 0.0,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence)
    }
}

/// Tree node in the arena-based expansion hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Sequence and statistics for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in alphabet order of the resolved symbol
    pub children: Vec<Index>,
}

/// Arena-based tree of sequence expansions.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Each arena holds one complete expansion tree; parents exclusively own
/// their children (strict tree, no sharing, no cycles).
#[derive(Debug)]
pub struct SequenceArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for SequenceArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the sequence strings of all leaf nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.leaf_indices()
            .into_iter()
            .filter_map(|idx| self.get_node(idx))
            .map(|node| node.data.sequence.to_string())
            .collect()
    }

    /// Collects the arena indices of all leaf nodes, left to right.
    pub fn leaf_indices(&self) -> Vec<Index> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<Index>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node_idx);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Recomputes this node's mean/std/cv from its children's means.
    ///
    /// For an internal node: mean = arithmetic mean of the children's
    /// means, std = sample standard deviation (n-1 denominator, 0 for
    /// fewer than 2 children), cv = std/mean (0 when the mean is 0).
    /// Every child mean must already be finalized; aggregate bottom-up
    /// (post-order) or this fails with [`TreeError::UnaggregatedChild`].
    ///
    /// For a leaf: std and cv reset to 0, the externally-supplied mean is
    /// left untouched — but it must exist, or this fails with
    /// [`TreeError::MissingLeafMean`]. A childless node that still
    /// contains wildcards was never expanded and is rejected rather than
    /// treated as a leaf.
    #[instrument(level = "trace", skip(self))]
    pub fn calculate_statistics(&mut self, idx: Index) -> TreeResult<()> {
        let node = self
            .get_node(idx)
            .ok_or_else(|| TreeError::InternalError(format!("stale node index: {idx:?}")))?;

        if node.children.is_empty() {
            if !node.data.sequence.is_specific() {
                return Err(TreeError::UnexpandedNode(node.data.sequence.to_string()));
            }
            if node.data.mean.is_none() {
                return Err(TreeError::MissingLeafMean(node.data.sequence.to_string()));
            }
            let node = self
                .get_node_mut(idx)
                .ok_or_else(|| TreeError::InternalError(format!("stale node index: {idx:?}")))?;
            node.data.std = 0.0;
            node.data.cv = 0.0;
            return Ok(());
        }

        let mut means = Vec::with_capacity(node.children.len());
        for &child_idx in &node.children {
            let child = self.get_node(child_idx).ok_or_else(|| {
                TreeError::InternalError(format!("stale child index: {child_idx:?}"))
            })?;
            let mean = child
                .data
                .mean
                .ok_or_else(|| TreeError::UnaggregatedChild(child.data.sequence.to_string()))?;
            means.push(mean);
        }

        let mean = stats::mean(&means);
        let std = stats::sample_std(&means, mean);
        let cv = stats::coefficient_of_variation(std, mean);

        let node = self
            .get_node_mut(idx)
            .ok_or_else(|| TreeError::InternalError(format!("stale node index: {idx:?}")))?;
        node.data.mean = Some(mean);
        node.data.std = std;
        node.data.cv = cv;

        Ok(())
    }
}

pub struct TreeIterator<'a> {
    arena: &'a SequenceArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a SequenceArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a SequenceArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a SequenceArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
