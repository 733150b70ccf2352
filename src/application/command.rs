//! Text command language.
//!
//! One command per line: `<structure> <operation> [arguments]`. Blank lines
//! and lines starting with `#` are skipped. Malformed input is reported as
//! `InvalidInput` before anything reaches the domain operations.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use itertools::Itertools;

use crate::domain::{DomainError, DomainResult, NodeId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    Array,
    List,
    Stack,
    Queue,
    Tree,
    Graph,
    Playlist,
    Commits,
}

impl Structure {
    pub const ALL: [Structure; 8] = [
        Structure::Array,
        Structure::List,
        Structure::Stack,
        Structure::Queue,
        Structure::Tree,
        Structure::Graph,
        Structure::Playlist,
        Structure::Commits,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Structure::Array => "array",
            Structure::List => "list",
            Structure::Stack => "stack",
            Structure::Queue => "queue",
            Structure::Tree => "tree",
            Structure::Graph => "graph",
            Structure::Playlist => "playlist",
            Structure::Commits => "commits",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Structure {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Structure::ALL
            .into_iter()
            .find(|structure| structure.name() == s)
            .ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "unknown structure '{}' (expected one of: {})",
                    s,
                    Structure::ALL.iter().join(", ")
                ))
            })
    }
}

/// Operations shared by the array and linked-list demos.
#[derive(Debug, Clone, PartialEq)]
pub enum SeqOp {
    Push(i64),
    Pop,
    Insert { index: usize, value: i64 },
    Delete(usize),
    Get(usize),
    Search(i64),
    Sort,
    PushHead(i64),
    DropHead,
    DropTail,
    MoveUp(usize),
    MoveDown(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StackOp {
    Push(i64),
    Pop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeOp {
    Add { parent: NodeId, label: String },
    Delete(NodeId),
    Find(NodeId),
    Layout,
    /// One node, or the whole forest without an id.
    Info(Option<NodeId>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    Node {
        label: Option<String>,
        position: Option<Point>,
    },
    Edge { source: String, target: String },
    Neighbors(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistOp {
    Add(String),
    Remove(usize),
    Next,
    Prev,
    MoveUp(usize),
    MoveDown(usize),
    Select(usize),
    Play,
    Pause,
    Tick(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOp {
    Commit(String),
    Checkout(String),
    Ancestry(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Array or list operation; the structure says which.
    Seq(Structure, SeqOp),
    Stack(StackOp),
    Queue(QueueOp),
    Tree(TreeOp),
    Graph(GraphOp),
    Playlist(PlaylistOp),
    Commits(CommitOp),
    Undo(Structure),
    Redo(Structure),
    Show(Structure),
    Reset(Structure),
}

/// Parse one line; `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> DomainResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut args = Args::new(line);
    let structure: Structure = args.word("structure")?.parse()?;
    let op = args.word("operation")?;

    let command = match (structure, op) {
        (s, "undo") => Command::Undo(s),
        (s, "redo") => Command::Redo(s),
        (s, "show") => Command::Show(s),
        (s, "reset") => Command::Reset(s),
        (s @ (Structure::Array | Structure::List), op) => Command::Seq(s, parse_seq(s, op, &mut args)?),
        (Structure::Stack, "push") => Command::Stack(StackOp::Push(args.value()?)),
        (Structure::Stack, "pop") => Command::Stack(StackOp::Pop),
        (Structure::Queue, "enqueue") => Command::Queue(QueueOp::Enqueue(args.value()?)),
        (Structure::Queue, "dequeue") => Command::Queue(QueueOp::Dequeue),
        (Structure::Tree, op) => Command::Tree(parse_tree(op, &mut args)?),
        (Structure::Graph, op) => Command::Graph(parse_graph(op, &mut args)?),
        (Structure::Playlist, op) => Command::Playlist(parse_playlist(op, &mut args)?),
        (Structure::Commits, op) => Command::Commits(parse_commits(op, &mut args)?),
        (s, op) => return Err(unknown_op(s, op)),
    };
    args.finish()?;
    Ok(Some(command))
}

/// Parse a whole script, keeping 1-based line numbers.
///
/// Each line parses independently so one bad line does not hide the rest.
pub fn parse_script(text: &str) -> Vec<(usize, DomainResult<Command>)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_line(line) {
            Ok(None) => None,
            Ok(Some(command)) => Some((i + 1, Ok(command))),
            Err(e) => Some((i + 1, Err(e))),
        })
        .collect()
}

fn parse_seq(structure: Structure, op: &str, args: &mut Args) -> DomainResult<SeqOp> {
    Ok(match op {
        "push" => SeqOp::Push(args.value()?),
        "pop" => SeqOp::Pop,
        "insert" => SeqOp::Insert {
            index: args.index()?,
            value: args.value()?,
        },
        "delete" => SeqOp::Delete(args.index()?),
        "get" => SeqOp::Get(args.index()?),
        "search" => SeqOp::Search(args.value()?),
        "sort" => SeqOp::Sort,
        "head" => SeqOp::PushHead(args.value()?),
        "drop-head" => SeqOp::DropHead,
        "drop-tail" => SeqOp::DropTail,
        "up" => SeqOp::MoveUp(args.index()?),
        "down" => SeqOp::MoveDown(args.index()?),
        _ => return Err(unknown_op(structure, op)),
    })
}

fn parse_tree(op: &str, args: &mut Args) -> DomainResult<TreeOp> {
    Ok(match op {
        "add" => TreeOp::Add {
            parent: args.node_id()?,
            label: args.text("label")?,
        },
        "delete" => TreeOp::Delete(args.node_id()?),
        "find" => TreeOp::Find(args.node_id()?),
        "layout" => TreeOp::Layout,
        "info" => TreeOp::Info(args.optional_node_id()?),
        _ => return Err(unknown_op(Structure::Tree, op)),
    })
}

fn parse_graph(op: &str, args: &mut Args) -> DomainResult<GraphOp> {
    Ok(match op {
        "node" => {
            let mut words = args.rest();
            let position = match words.as_slice() {
                [.., x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => Some(Point { x, y }),
                    _ => None,
                },
                _ => None,
            };
            if position.is_some() {
                words.truncate(words.len() - 2);
            }
            let label = (!words.is_empty()).then(|| words.join(" "));
            GraphOp::Node { label, position }
        }
        "edge" => GraphOp::Edge {
            source: args.word("source node")?.to_string(),
            target: args.word("target node")?.to_string(),
        },
        "neighbors" => GraphOp::Neighbors(args.word("node")?.to_string()),
        _ => return Err(unknown_op(Structure::Graph, op)),
    })
}

fn parse_playlist(op: &str, args: &mut Args) -> DomainResult<PlaylistOp> {
    Ok(match op {
        "add" => PlaylistOp::Add(args.text("title")?),
        "remove" => PlaylistOp::Remove(args.index()?),
        "next" => PlaylistOp::Next,
        "prev" => PlaylistOp::Prev,
        "up" => PlaylistOp::MoveUp(args.index()?),
        "down" => PlaylistOp::MoveDown(args.index()?),
        "select" => PlaylistOp::Select(args.index()?),
        "play" => PlaylistOp::Play,
        "pause" => PlaylistOp::Pause,
        "tick" => PlaylistOp::Tick(Duration::from_millis(args.unsigned("milliseconds")?)),
        _ => return Err(unknown_op(Structure::Playlist, op)),
    })
}

fn parse_commits(op: &str, args: &mut Args) -> DomainResult<CommitOp> {
    Ok(match op {
        "add" => CommitOp::Commit(args.text("message")?),
        "checkout" => CommitOp::Checkout(args.word("commit id")?.to_string()),
        "ancestry" => CommitOp::Ancestry(args.word("commit id")?.to_string()),
        _ => return Err(unknown_op(Structure::Commits, op)),
    })
}

fn unknown_op(structure: Structure, op: &str) -> DomainError {
    DomainError::InvalidInput(format!("unknown {} operation '{}'", structure, op))
}

/// Cursor over the whitespace-separated words of a line.
struct Args<'a> {
    words: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
}

impl<'a> Args<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            words: line.split_whitespace().peekable(),
        }
    }

    fn word(&mut self, what: &str) -> DomainResult<&'a str> {
        self.words
            .next()
            .ok_or_else(|| DomainError::InvalidInput(format!("missing {}", what)))
    }

    fn value(&mut self) -> DomainResult<i64> {
        let word = self.word("value")?;
        word.parse()
            .map_err(|_| DomainError::InvalidInput(format!("not a number: '{}'", word)))
    }

    fn unsigned(&mut self, what: &str) -> DomainResult<u64> {
        let word = self.word(what)?;
        word.parse()
            .map_err(|_| DomainError::InvalidInput(format!("not a non-negative number: '{}'", word)))
    }

    fn index(&mut self) -> DomainResult<usize> {
        let word = self.word("index")?;
        match word.parse::<i64>() {
            Ok(n) if n < 0 => Err(DomainError::InvalidInput(format!(
                "index must not be negative: {}",
                n
            ))),
            Ok(n) => usize::try_from(n)
                .map_err(|_| DomainError::InvalidInput(format!("index too large: {}", n))),
            Err(_) => Err(DomainError::InvalidInput(format!("not an index: '{}'", word))),
        }
    }

    fn node_id(&mut self) -> DomainResult<NodeId> {
        let word = self.word("node id")?;
        word.trim_start_matches('#')
            .parse()
            .map(NodeId)
            .map_err(|_| DomainError::InvalidInput(format!("not a node id: '{}'", word)))
    }

    fn optional_node_id(&mut self) -> DomainResult<Option<NodeId>> {
        match self.words.peek() {
            Some(_) => self.node_id().map(Some),
            None => Ok(None),
        }
    }

    /// Remaining words joined by single spaces; must not be empty.
    fn text(&mut self, what: &str) -> DomainResult<String> {
        let words = self.rest();
        if words.is_empty() {
            return Err(DomainError::InvalidInput(format!("missing {}", what)));
        }
        Ok(words.join(" "))
    }

    fn rest(&mut self) -> Vec<&'a str> {
        self.words.by_ref().collect()
    }

    fn finish(&mut self) -> DomainResult<()> {
        match self.words.peek() {
            Some(extra) => Err(DomainError::InvalidInput(format!(
                "unexpected argument '{}'",
                extra
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("array push 4", Command::Seq(Structure::Array, SeqOp::Push(4)))]
    #[case("list insert 1 9", Command::Seq(Structure::List, SeqOp::Insert { index: 1, value: 9 }))]
    #[case("stack push -3", Command::Stack(StackOp::Push(-3)))]
    #[case("queue dequeue", Command::Queue(QueueOp::Dequeue))]
    #[case("tree add #2 Leaf A3", Command::Tree(TreeOp::Add { parent: NodeId(2), label: "Leaf A3".into() }))]
    #[case("tree info 4", Command::Tree(TreeOp::Info(Some(NodeId(4)))))]
    #[case("tree info", Command::Tree(TreeOp::Info(None)))]
    #[case("graph edge 1 4", Command::Graph(GraphOp::Edge { source: "1".into(), target: "4".into() }))]
    #[case("playlist tick 3000", Command::Playlist(PlaylistOp::Tick(Duration::from_millis(3000))))]
    #[case("commits add Fix the build", Command::Commits(CommitOp::Commit("Fix the build".into())))]
    #[case("tree undo", Command::Undo(Structure::Tree))]
    fn test_parse_line(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse_line(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# comment")]
    fn test_blank_and_comment_lines_skip(#[case] line: &str) {
        assert_eq!(parse_line(line).unwrap(), None);
    }

    #[rstest]
    #[case("heap push 1")]
    #[case("array push")]
    #[case("array push x")]
    #[case("array delete -1")]
    #[case("array pop now")]
    #[case("stack enqueue 1")]
    #[case("tree add 1")]
    fn test_malformed_lines_are_invalid_input(#[case] line: &str) {
        assert!(matches!(parse_line(line), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_graph_node_with_position() {
        let command = parse_line("graph node Node X 10 20.5").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Graph(GraphOp::Node {
                label: Some("Node X".into()),
                position: Some(Point { x: 10.0, y: 20.5 }),
            })
        );
    }

    #[test]
    fn test_graph_node_without_label() {
        let command = parse_line("graph node").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Graph(GraphOp::Node {
                label: None,
                position: None
            })
        );
    }

    #[test]
    fn test_script_keeps_line_numbers() {
        let parsed = parse_script("# demo\narray push 1\n\narray bogus\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, 2);
        assert_eq!(parsed[1].0, 4);
        assert!(parsed[1].1.is_err());
    }
}
