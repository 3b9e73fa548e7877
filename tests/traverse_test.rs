//! Tests for tree flattening, path collection, and rendering

use std::collections::HashMap;

use rstest::{fixture, rstest};

use rbstree::util::testing;
use rbstree::{
    aggregate, all_paths, assign_leaf_means, collect_node_data, collect_records,
    generate_all_sequences, NodeRecord, SequenceArena, SequenceTreeDisplay, TreeBuilder,
};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// A built and aggregated tree with two wildcard levels (21 nodes, 16 leaves).
#[fixture]
fn aggregated_tree() -> SequenceArena {
    let mut tree = TreeBuilder::new().build_from_str("AC__TA").unwrap();
    let source: HashMap<String, f64> = tree
        .leaf_nodes()
        .into_iter()
        .enumerate()
        .map(|(i, seq)| (seq, 1.0 + i as f64))
        .collect();

    assign_leaf_means(&mut tree, &source).unwrap();
    aggregate(&mut tree).unwrap();
    tree
}

// ============================================================
// Node Data Collection Tests
// ============================================================

#[rstest]
fn given_aggregated_tree_when_collecting_node_data_then_one_entry_per_node(
    aggregated_tree: SequenceArena,
) {
    let data = collect_node_data(&aggregated_tree);

    // No key collisions: the map holds exactly as many entries as nodes
    assert_eq!(data.len(), aggregated_tree.len());
    assert_eq!(data.len(), 21);
    assert!(data.contains_key("AC__TA"));
    assert!(data.contains_key("ACAATA"));
}

#[rstest]
fn given_aggregated_tree_when_collecting_node_data_then_values_match_cv(
    aggregated_tree: SequenceArena,
) {
    let data = collect_node_data(&aggregated_tree);

    for (_, node) in aggregated_tree.iter() {
        assert_eq!(data[node.data.sequence.as_str()], node.data.cv);
    }
}

#[rstest]
fn given_aggregated_tree_when_collecting_records_then_serializable(
    aggregated_tree: SequenceArena,
) {
    let records = collect_records(&aggregated_tree);
    assert_eq!(records.len(), 21);
    // Pre-order: the root row comes first
    assert_eq!(records[0].sequence, "AC__TA");
    assert!(records.iter().all(|r| r.mean.is_some()));

    let json = serde_json::to_string(&records).unwrap();
    let parsed: Vec<NodeRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, records);
}

// ============================================================
// Path Collection Tests
// ============================================================

#[rstest]
fn given_aggregated_tree_when_collecting_paths_then_one_per_leaf(aggregated_tree: SequenceArena) {
    let paths = all_paths(&aggregated_tree);

    assert_eq!(paths.len(), 16);
    // Path length = root wildcards - leaf wildcards + 1
    assert!(paths.iter().all(|p| p.len() == 3));
}

#[rstest]
fn given_aggregated_tree_when_collecting_paths_then_root_to_leaf_order(
    aggregated_tree: SequenceArena,
) {
    let paths = all_paths(&aggregated_tree);

    assert_eq!(
        paths[0],
        vec![
            "AC__TA".to_string(),
            "ACA_TA".to_string(),
            "ACAATA".to_string()
        ]
    );
    let leaves = aggregated_tree.leaf_nodes();
    for path in &paths {
        assert_eq!(path[0], "AC__TA");
        assert!(leaves.contains(path.last().unwrap()));
    }
}

#[test]
fn given_single_node_tree_when_collecting_paths_then_one_length_1_path() {
    let tree = TreeBuilder::new().build_from_str("ACGTAC").unwrap();
    let paths = all_paths(&tree);

    assert_eq!(paths, vec![vec!["ACGTAC".to_string()]]);
}

#[test]
fn given_empty_arena_when_collecting_then_nothing() {
    let tree = SequenceArena::new();
    assert!(all_paths(&tree).is_empty());
    assert!(collect_node_data(&tree).is_empty());
    assert!(collect_records(&tree).is_empty());
}

// ============================================================
// Display Tests
// ============================================================

#[rstest]
fn given_aggregated_tree_when_rendering_then_contains_sequences(aggregated_tree: SequenceArena) {
    let rendered = aggregated_tree.to_tree_string().to_string();

    assert!(rendered.contains("AC__TA"));
    assert!(rendered.contains("ACA_TA"));
    assert!(rendered.contains("ACAATA"));
    assert!(rendered.contains("cv:"));
}

// ============================================================
// Enumeration Tests
// ============================================================

#[test]
fn given_core_length_when_enumerating_then_5_pow_n_sequences() {
    // Full search space at length 4: 5^4 sequences, wildcard-free subset 4^4
    let sequences: Vec<String> = generate_all_sequences(4).collect();
    assert_eq!(sequences.len(), 625);

    let specific = sequences.iter().filter(|s| !s.contains('_')).count();
    assert_eq!(specific, 256);
}
