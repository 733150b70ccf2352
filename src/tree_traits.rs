//! Conversion of forests into `termtree` values for terminal display.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// One tree per root; several roots hang under a `forest` node.
///
/// Built bottom-up: post-order guarantees every child's subtree is finished
/// before its parent claims it.
impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        let mut built: HashMap<Index, Tree<String>> = HashMap::with_capacity(self.len());
        for (idx, node) in self.iter_postorder() {
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(idx, Tree::new(node.data.to_string()).with_leaves(leaves));
        }

        let mut roots: Vec<_> = self
            .roots()
            .iter()
            .filter_map(|root| built.remove(root))
            .collect();
        match roots.len() {
            0 => Tree::new("(empty forest)".to_string()),
            1 => roots.remove(0),
            _ => Tree::new("forest".to_string()).with_leaves(roots),
        }
    }
}
