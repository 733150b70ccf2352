//! Forest operations: insert, delete, search and layout.
//!
//! Trees are plain owned values. Mutations rebuild the path they touch and
//! return a new forest; the input is never modified.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Unique, monotonically assigned tree node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node of a forest; owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// List of independent tree roots.
pub type Forest = Vec<TreeNode>;

/// Demo forest shown before any user edits.
pub fn seed_forest() -> Forest {
    vec![TreeNode::leaf(NodeId(1), "Root").with_children(vec![
        TreeNode::leaf(NodeId(2), "Child A").with_children(vec![
            TreeNode::leaf(NodeId(4), "Leaf A1"),
            TreeNode::leaf(NodeId(5), "Leaf A2"),
        ]),
        TreeNode::leaf(NodeId(3), "Child B"),
    ])]
}

/// Append a new leaf under the first node (depth-first) whose id is `parent_id`.
///
/// Fails with `NotFound` when no such parent exists and with `DuplicateNode`
/// when `new_id` is already taken.
#[instrument(level = "debug", skip(forest))]
pub fn insert_under_parent(
    forest: &[TreeNode],
    parent_id: NodeId,
    label: &str,
    new_id: NodeId,
) -> DomainResult<Forest> {
    if find_node(forest, new_id).is_ok() {
        return Err(DomainError::DuplicateNode(format!("tree node {}", new_id)));
    }
    let leaf = TreeNode::leaf(new_id, label);
    let mut inserted = false;
    let next = insert_rec(forest, parent_id, &leaf, &mut inserted);
    if !inserted {
        return Err(DomainError::not_found(format!("parent {}", parent_id)));
    }
    debug!(%parent_id, %new_id, "inserted node");
    Ok(next)
}

fn insert_rec(
    nodes: &[TreeNode],
    parent_id: NodeId,
    leaf: &TreeNode,
    inserted: &mut bool,
) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|node| {
            if *inserted {
                return node.clone();
            }
            if node.id == parent_id {
                *inserted = true;
                let mut parent = node.clone();
                parent.children.push(leaf.clone());
                return parent;
            }
            TreeNode {
                id: node.id,
                label: node.label.clone(),
                children: insert_rec(&node.children, parent_id, leaf, inserted),
            }
        })
        .collect()
}

/// Remove every node with `target_id` together with its subtree.
///
/// An absent id returns an equal forest.
#[instrument(level = "debug", skip(forest))]
pub fn delete_subtree(forest: &[TreeNode], target_id: NodeId) -> Forest {
    forest
        .iter()
        .filter(|node| node.id != target_id)
        .map(|node| TreeNode {
            id: node.id,
            label: node.label.clone(),
            children: delete_subtree(&node.children, target_id),
        })
        .collect()
}

/// Like [`delete_subtree`] but reports an absent id as `NotFound`.
pub fn try_delete_subtree(forest: &[TreeNode], target_id: NodeId) -> DomainResult<Forest> {
    find_node(forest, target_id)?;
    Ok(delete_subtree(forest, target_id))
}

/// Depth-first search for the first node with `target_id`.
pub fn find_node(forest: &[TreeNode], target_id: NodeId) -> DomainResult<&TreeNode> {
    find_rec(forest, target_id).ok_or_else(|| DomainError::not_found(format!("node {}", target_id)))
}

fn find_rec(nodes: &[TreeNode], target_id: NodeId) -> Option<&TreeNode> {
    for node in nodes {
        if node.id == target_id {
            return Some(node);
        }
        if let Some(found) = find_rec(&node.children, target_id) {
            return Some(found);
        }
    }
    None
}

/// `1 + max(id)` over the whole forest; 1 for an empty forest.
pub fn next_id(forest: &[TreeNode]) -> NodeId {
    NodeId(max_id(forest) + 1)
}

fn max_id(nodes: &[TreeNode]) -> u64 {
    nodes
        .iter()
        .map(|node| node.id.0.max(max_id(&node.children)))
        .max()
        .unwrap_or(0)
}

/// First id that occurs more than once, in depth-first order.
pub fn duplicate_id(forest: &[TreeNode]) -> Option<NodeId> {
    fn walk(nodes: &[TreeNode], seen: &mut HashSet<NodeId>) -> Option<NodeId> {
        nodes.iter().find_map(|node| {
            if !seen.insert(node.id) {
                return Some(node.id);
            }
            walk(&node.children, seen)
        })
    }
    walk(forest, &mut HashSet::new())
}

/// Distance between neighbouring layout slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub x: f64,
    pub y: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { x: 200.0, y: 100.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Renderer-agnostic placement of a forest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub positions: BTreeMap<NodeId, Point>,
    /// One `(parent, child)` pair per non-root node, in traversal order.
    pub edges: Vec<(NodeId, NodeId)>,
}

/// Place every node: `y` follows depth, `x` counts the leaves laid out
/// before the node, so a parent sits above its first leaf.
#[instrument(level = "debug", skip(forest))]
pub fn compute_layout(forest: &[TreeNode], spacing: Spacing) -> Layout {
    let mut layout = Layout::default();
    let mut leaves_so_far = 0usize;
    place(forest, 0, None, &mut leaves_so_far, spacing, &mut layout);
    layout
}

fn place(
    nodes: &[TreeNode],
    depth: usize,
    parent: Option<NodeId>,
    leaves_so_far: &mut usize,
    spacing: Spacing,
    layout: &mut Layout,
) {
    for node in nodes {
        let point = Point {
            x: *leaves_so_far as f64 * spacing.x,
            y: depth as f64 * spacing.y,
        };
        layout.positions.insert(node.id, point);
        if let Some(parent_id) = parent {
            layout.edges.push((parent_id, node.id));
        }
        if node.is_leaf() {
            *leaves_so_far += 1;
        } else {
            place(&node.children, depth + 1, Some(node.id), leaves_so_far, spacing, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_of_empty_forest_is_one() {
        assert_eq!(next_id(&[]), NodeId(1));
    }

    #[test]
    fn test_duplicate_id_found_in_nested_node() {
        assert_eq!(duplicate_id(&seed_forest()), None);
        let forest = vec![
            TreeNode::leaf(NodeId(1), "A")
                .with_children(vec![TreeNode::leaf(NodeId(2), "A1")]),
            TreeNode::leaf(NodeId(3), "B")
                .with_children(vec![TreeNode::leaf(NodeId(2), "B1")]),
        ];
        assert_eq!(duplicate_id(&forest), Some(NodeId(2)));
    }

    #[test]
    fn test_next_id_of_seed() {
        assert_eq!(next_id(&seed_forest()), NodeId(6));
    }

    #[test]
    fn test_insert_rejects_taken_id() {
        let result = insert_under_parent(&seed_forest(), NodeId(1), "x", NodeId(3));
        assert!(matches!(result, Err(DomainError::DuplicateNode(_))));
    }

    #[test]
    fn test_layout_places_parent_over_first_leaf() {
        let layout = compute_layout(&seed_forest(), Spacing::default());
        let root = layout.positions[&NodeId(1)];
        let child_b = layout.positions[&NodeId(3)];
        assert_eq!(root, Point { x: 0.0, y: 0.0 });
        assert_eq!(layout.positions[&NodeId(5)], Point { x: 200.0, y: 200.0 });
        assert_eq!(child_b, Point { x: 400.0, y: 100.0 });
        assert_eq!(layout.edges.len(), 4);
    }
}
