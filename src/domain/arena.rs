//! Flat, parent-linked index over a forest.
//!
//! The nested [`TreeNode`] form answers downward questions well. Upward and
//! whole-subtree questions (who is my parent, how tall is this branch, which
//! leaves hang below it) go through a [`TreeArena`] built from it.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{NodeId, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub label: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    pub parent: Option<Index>,
    pub children: Vec<Index>,
}

impl ArenaNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Summary of one node's place in its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub node: NodeData,
    pub parent: Option<NodeId>,
    /// Ids from the node up to its root, the node first.
    pub path: Vec<NodeId>,
    /// Levels in the subtree rooted here; 1 for a leaf.
    pub height: usize,
    pub subtree_size: usize,
    pub leaves: Vec<NodeId>,
}

impl NodeInfo {
    /// 1 at a root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Summary of a whole forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestInfo {
    pub nodes: usize,
    pub roots: usize,
    pub height: usize,
    pub leaves: Vec<NodeId>,
}

/// Flat index over a forest with O(1) id lookup and parent links.
///
/// Ids are expected to be unique; a repeated id resolves to the node met
/// first in pre-order.
#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<ArenaNode>,
    roots: Vec<Index>,
    by_id: HashMap<NodeId, Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every node of `forest`, keeping sibling order.
    #[instrument(level = "debug", skip(forest))]
    pub fn from_forest(forest: &[TreeNode]) -> Self {
        let mut index = Self::new();
        let mut pending: Vec<(&TreeNode, Option<Index>)> =
            forest.iter().rev().map(|node| (node, None)).collect();

        while let Some((node, parent)) = pending.pop() {
            let idx = index.insert_node(
                NodeData {
                    id: node.id,
                    label: node.label.clone(),
                },
                parent,
            );
            pending.extend(node.children.iter().rev().map(|child| (child, Some(idx))));
        }
        trace!(nodes = index.len(), "forest indexed");
        index
    }

    /// Attach `data` under `parent`, or as a new root.
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let id = data.id;
        let idx = self.arena.insert(ArenaNode {
            data,
            parent,
            children: Vec::new(),
        });
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_node) => parent_node.children.push(idx),
            None => self.roots.push(idx),
        }
        self.by_id.entry(id).or_insert(idx);
        idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn find(&self, id: NodeId) -> DomainResult<Index> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or_else(|| DomainError::not_found(format!("node {}", id)))
    }

    fn node(&self, id: NodeId) -> DomainResult<&ArenaNode> {
        self.find(id)
            .and_then(|idx| self.get_node(idx).ok_or_else(|| DomainError::not_found(id)))
    }

    /// None for a root.
    pub fn parent_of(&self, id: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self
            .node(id)?
            .parent
            .and_then(|p| self.get_node(p))
            .map(|parent| parent.data.id))
    }

    pub fn path_to_root(&self, id: NodeId) -> DomainResult<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut cursor = Some(self.find(id)?);
        while let Some(node) = cursor.and_then(|idx| self.get_node(idx)) {
            path.push(node.data.id);
            cursor = node.parent;
        }
        Ok(path)
    }

    pub fn subtree_size(&self, id: NodeId) -> DomainResult<usize> {
        Ok(self.subtree(self.find(id)?).count())
    }

    /// Levels below and including `id`.
    pub fn height_of(&self, id: NodeId) -> DomainResult<usize> {
        Ok(self.height_from(self.find(id)?))
    }

    fn height_from(&self, idx: Index) -> usize {
        self.get_node(idx).map_or(0, |node| {
            1 + node
                .children
                .iter()
                .map(|&child| self.height_from(child))
                .max()
                .unwrap_or(0)
        })
    }

    /// Height of the tallest tree; 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.height_from(root))
            .max()
            .unwrap_or(0)
    }

    /// Leaf ids of the whole forest, left to right.
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        leaves_of(self.iter())
    }

    /// Leaf ids below `id` (itself, if it is a leaf), left to right.
    pub fn leaves_under(&self, id: NodeId) -> DomainResult<Vec<NodeId>> {
        Ok(leaves_of(self.subtree(self.find(id)?)))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn node_info(&self, id: NodeId) -> DomainResult<NodeInfo> {
        Ok(NodeInfo {
            node: self.node(id)?.data.clone(),
            parent: self.parent_of(id)?,
            path: self.path_to_root(id)?,
            height: self.height_of(id)?,
            subtree_size: self.subtree_size(id)?,
            leaves: self.leaves_under(id)?,
        })
    }

    pub fn forest_info(&self) -> ForestInfo {
        ForestInfo {
            nodes: self.len(),
            roots: self.roots.len(),
            height: self.depth(),
            leaves: self.leaf_nodes(),
        }
    }

    /// Pre-order over every root.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            arena: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Pre-order over the subtree rooted at `idx`.
    fn subtree(&self, idx: Index) -> PreOrder<'_> {
        PreOrder {
            arena: self,
            stack: vec![idx],
        }
    }

    /// Post-order over every root: children before their parent.
    pub fn iter_postorder(&self) -> PostOrder<'_> {
        PostOrder {
            arena: self,
            stack: self.roots.iter().rev().map(|&idx| (idx, false)).collect(),
        }
    }
}

fn leaves_of<'a>(nodes: impl Iterator<Item = (Index, &'a ArenaNode)>) -> Vec<NodeId> {
    nodes
        .filter(|(_, node)| node.is_leaf())
        .map(|(_, node)| node.data.id)
        .collect()
}

pub struct PreOrder<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.get_node(idx)?;
        self.stack.extend(node.children.iter().rev());
        Some((idx, node))
    }
}

pub struct PostOrder<'a> {
    arena: &'a TreeArena,
    /// `(node, children already pushed)`
    stack: Vec<(Index, bool)>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, expanded)) = self.stack.pop() {
            let Some(node) = self.arena.get_node(idx) else {
                continue;
            };
            if expanded {
                return Some((idx, node));
            }
            self.stack.push((idx, true));
            self.stack
                .extend(node.children.iter().rev().map(|&child| (child, false)));
        }
        None
    }
}
