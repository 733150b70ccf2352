//! Node/edge set with policy-controlled edge insertion.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::Point;

/// How [`Graph::add_edge`] and [`Graph::add_node`] validate their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Endpoints must exist; an edge joining the same pair in either
    /// direction is a duplicate; node labels are unique.
    #[default]
    Strict,
    /// Anything goes.
    Permissive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("e{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// True when the edge joins `a` and `b` regardless of direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Graph value; operations return a new graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    next_id: u64,
    policy: EdgePolicy,
}

impl Graph {
    pub fn new(policy: EdgePolicy) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 1,
            policy,
        }
    }

    /// Six nodes `Node A`..`Node F` on a circle with a small directed tree of
    /// edges, as the demo starts.
    pub fn seed(policy: EdgePolicy) -> Self {
        let mut graph = Self::new(policy);
        let points = circle_positions(6, Point { x: 200.0, y: 200.0 }, 150.0);
        for point in points {
            let label = graph.default_label();
            graph = graph.push_node(label, point);
        }
        graph.edges = [("1", "2"), ("1", "3"), ("2", "4"), ("3", "5"), ("4", "6")]
            .iter()
            .map(|(s, t)| Edge::new(s, t))
            .collect();
        graph
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node(&self, id: &str) -> DomainResult<&GraphNode> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .ok_or_else(|| DomainError::not_found(format!("graph node {}", id)))
    }

    /// Label the next node would get: `Node A`, `Node B`, ... cycling through
    /// the alphabet by id.
    pub fn default_label(&self) -> String {
        let letter = (b'A' + ((self.next_id - 1) % 26) as u8) as char;
        format!("Node {}", letter)
    }

    /// Deterministic slot for a node added without a position: successive
    /// nodes spiral around the seed circle by the golden angle.
    pub fn next_position(&self) -> Point {
        const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
        let angle = GOLDEN_ANGLE * self.nodes.len() as f64;
        let radius = 150.0 + 10.0 * self.nodes.len() as f64;
        Point {
            x: 200.0 + radius * angle.cos(),
            y: 200.0 + radius * angle.sin(),
        }
    }

    fn push_node(&self, label: String, position: Point) -> Self {
        let mut next = self.clone();
        next.nodes.push(GraphNode {
            id: self.next_id.to_string(),
            label,
            position,
        });
        next.next_id += 1;
        next
    }

    /// Append a node with a fresh id.
    ///
    /// Under the strict policy a label already in use is `DuplicateNode`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&self, label: &str, position: Point) -> DomainResult<Self> {
        if self.policy == EdgePolicy::Strict && self.nodes.iter().any(|n| n.label == label) {
            return Err(DomainError::DuplicateNode(label.to_string()));
        }
        let next = self.push_node(label.to_string(), position);
        debug!(id = self.next_id, "added graph node");
        Ok(next)
    }

    /// Append a directed edge `source -> target`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_edge(&self, source: &str, target: &str) -> DomainResult<Self> {
        if self.policy == EdgePolicy::Strict {
            for endpoint in [source, target] {
                if !self.contains_node(endpoint) {
                    return Err(DomainError::not_found(format!("graph node {}", endpoint)));
                }
            }
            if self.edges.iter().any(|edge| edge.connects(source, target)) {
                return Err(DomainError::DuplicateEdge {
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }
        }
        let mut next = self.clone();
        next.edges.push(Edge::new(source, target));
        Ok(next)
    }

    /// Ids adjacent to `id` through any edge, in edge order.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.source == id {
                    Some(edge.target.as_str())
                } else if edge.target == id {
                    Some(edge.source.as_str())
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(EdgePolicy::default())
    }
}

/// `count` evenly spaced points on a circle.
pub fn circle_positions(count: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            Point {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect()
}
