//! Terminal rendering of sequence trees.

use generational_arena::Index;
use termtree::Tree;

use crate::arena::SequenceArena;

pub trait SequenceTreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl SequenceTreeDisplay for SequenceArena {
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(node_label(self, root_idx));

            fn build_tree(arena: &SequenceArena, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = arena.get_node(node_idx) {
                    for &child_idx in &node.children {
                        let mut child_tree = Tree::new(node_label(arena, child_idx));
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}

fn node_label(arena: &SequenceArena, idx: Index) -> String {
    arena
        .get_node(idx)
        .map(|node| format!("{} (cv: {:.4})", node.data.sequence, node.data.cv))
        .unwrap_or_default()
}
