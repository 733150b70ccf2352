//! Domain layer: structures and their pure operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod bounded;
pub mod commits;
pub mod error;
pub mod graph;
pub mod history;
pub mod playlist;
pub mod sequence;
pub mod tree;

pub use arena::{ForestInfo, NodeData, NodeInfo, TreeArena};
pub use bounded::{Bounded, DEFAULT_CAPACITY};
pub use commits::{Commit, CommitLog};
pub use error::{DomainError, DomainResult};
pub use graph::{Edge, EdgePolicy, Graph, GraphNode};
pub use history::History;
pub use playlist::{AutoAdvance, Playlist};
pub use tree::{Forest, Layout, NodeId, Point, Spacing, TreeNode};
