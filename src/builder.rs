//! Top-down expansion of wildcard sequences into complete trees.

use std::collections::{BTreeMap, HashMap};

use generational_arena::Index;
use tracing::instrument;

use crate::arena::{NodeData, SequenceArena};
use crate::errors::{TreeError, TreeResult};
use crate::sequence::CoreSequence;

/// Source of externally-measured means for fully-specified sequences.
///
/// The crate never computes a leaf mean itself; whatever produced the
/// measurements (assay data, simulation output) answers through this seam.
pub trait MeanSource {
    /// The measured mean for a wildcard-free sequence, if known.
    fn mean_for(&self, sequence: &str) -> Option<f64>;
}

impl MeanSource for HashMap<String, f64> {
    fn mean_for(&self, sequence: &str) -> Option<f64> {
        self.get(sequence).copied()
    }
}

impl MeanSource for BTreeMap<String, f64> {
    fn mean_for(&self, sequence: &str) -> Option<f64> {
        self.get(sequence).copied()
    }
}

/// Expands wildcard sequences into complete arena trees.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the fully-expanded tree rooted at the all-wildcard sequence.
    #[instrument(level = "debug", skip(self))]
    pub fn build_full(&self) -> SequenceArena {
        self.build(CoreSequence::root())
    }

    /// Build the fully-expanded tree below `root`, parsed and validated.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_str(&self, root: &str) -> TreeResult<SequenceArena> {
        let root = CoreSequence::new(root)?;
        Ok(self.build(root))
    }

    /// Build the fully-expanded tree below `root`.
    ///
    /// Iterative stack-driven expansion: every node with wildcards gets
    /// exactly 4 children (first wildcard resolved, alphabet order) and
    /// fully-specified nodes stay leaves, so a root with k wildcards
    /// yields exactly 4^k leaves, each at distance k.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, root: CoreSequence) -> SequenceArena {
        let mut tree = SequenceArena::new();
        let mut stack: Vec<(CoreSequence, Option<Index>)> = vec![(root, None)];

        while let Some((sequence, parent_idx)) = stack.pop() {
            let expansions = sequence.expansions();
            let current_idx = tree.insert_node(NodeData::new(sequence), parent_idx);

            // Reversed so children are inserted in alphabet order
            for child in expansions.into_iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        tree
    }
}

/// Populate every leaf mean from `source`.
///
/// Fails with [`TreeError::MissingLeafMean`] on the first leaf (left to
/// right) the source cannot answer; no default is substituted.
#[instrument(level = "debug", skip(tree, source))]
pub fn assign_leaf_means(tree: &mut SequenceArena, source: &impl MeanSource) -> TreeResult<()> {
    for idx in tree.leaf_indices() {
        let node = tree
            .get_node(idx)
            .ok_or_else(|| TreeError::InternalError(format!("stale leaf index: {idx:?}")))?;
        let sequence = node.data.sequence.to_string();
        let mean = source
            .mean_for(&sequence)
            .ok_or(TreeError::MissingLeafMean(sequence))?;

        let node = tree
            .get_node_mut(idx)
            .ok_or_else(|| TreeError::InternalError(format!("stale leaf index: {idx:?}")))?;
        node.data.mean = Some(mean);
    }
    Ok(())
}
