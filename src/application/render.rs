//! Plain-text renderings of each structure.

use itertools::Itertools;

use crate::domain::{
    Bounded, CommitLog, ForestInfo, Graph, Layout, NodeId, NodeInfo, Playlist, TreeArena,
    TreeNode,
};
use crate::tree_traits::TreeNodeConvert;

pub fn sequence(items: &[i64]) -> String {
    format!("[{}]", items.iter().join(", "))
}

/// Singly linked rendering: `1 -> 2 -> 3 -> null`.
pub fn linked_list(items: &[i64]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .chain(std::iter::once("null".to_string()))
        .join(" -> ")
}

pub fn bounded(items: &Bounded<i64>) -> String {
    items.to_string()
}

pub fn forest(forest: &[TreeNode]) -> String {
    TreeArena::from_forest(forest)
        .to_tree_string()
        .to_string()
        .trim_end()
        .to_string()
}

fn id_list(ids: &[NodeId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}

pub fn node_info(info: &NodeInfo) -> String {
    let parent = info
        .parent
        .map_or_else(|| "none (root)".to_string(), |p| p.to_string());
    [
        info.node.to_string(),
        format!("  parent: {}", parent),
        format!("  depth: {}, height: {}", info.depth(), info.height),
        format!("  subtree size: {}", info.subtree_size),
        format!("  leaves: {}", id_list(&info.leaves)),
        format!("  path: {}", info.path.iter().join(" <- ")),
    ]
    .join("\n")
}

pub fn forest_info(info: &ForestInfo) -> String {
    format!(
        "{} nodes in {} tree(s), height {}, leaves {}",
        info.nodes,
        info.roots,
        info.height,
        id_list(&info.leaves)
    )
}

pub fn graph(graph: &Graph) -> String {
    let nodes = graph
        .nodes()
        .iter()
        .map(|n| format!("  {} {} @ ({:.0}, {:.0})", n.id, n.label, n.position.x, n.position.y));
    let edges = graph.edges().iter().map(|e| format!("  {} {}", e.id, e));
    std::iter::once(format!("nodes ({}):", graph.nodes().len()))
        .chain(nodes)
        .chain(std::iter::once(format!("edges ({}):", graph.edges().len())))
        .chain(edges)
        .join("\n")
}

pub fn layout(layout: &Layout) -> String {
    let positions = layout
        .positions
        .iter()
        .map(|(id, p)| format!("  {} ({:.0}, {:.0})", id, p.x, p.y));
    let edges = layout
        .edges
        .iter()
        .map(|(parent, child)| format!("  {} -> {}", parent, child));
    std::iter::once("positions:".to_string())
        .chain(positions)
        .chain(std::iter::once("edges:".to_string()))
        .chain(edges)
        .join("\n")
}

pub fn playlist(playlist: &Playlist<String>) -> String {
    if playlist.is_empty() {
        return "(empty playlist)".to_string();
    }
    playlist
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == playlist.current_index() { ">" } else { " " };
            format!("{} {}. {}", marker, i, item)
        })
        .join("\n")
}

pub fn commits(log: &CommitLog) -> String {
    log.commits()
        .iter()
        .map(|commit| {
            let marker = if log.checked_out() == Some(commit.id.as_str()) {
                "*"
            } else {
                " "
            };
            format!("{} {}", marker, commit)
        })
        .join("\n")
}
