//! One live instance of every demo structure, each behind an undo log.

use std::time::Instant;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::command::{
    Command, CommitOp, GraphOp, PlaylistOp, QueueOp, SeqOp, StackOp, Structure, TreeOp,
};
use crate::application::{render, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    sequence, tree, AutoAdvance, Bounded, CommitLog, DomainError, Forest, Graph, History,
    Playlist, TreeArena,
};

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The structure now holds a new snapshot (or moved through its history).
    Changed(Structure),
    /// A query answer; nothing was modified.
    Report(String),
}

/// Owns every structure plus the play-queue timer.
///
/// Each successful mutation records a snapshot, so every structure supports
/// undo and redo. Failed commands leave everything as it was.
#[derive(Debug)]
pub struct Workspace {
    settings: Settings,
    array: History<Vec<i64>>,
    list: History<Vec<i64>>,
    stack: History<Bounded<i64>>,
    queue: History<Bounded<i64>>,
    forest: History<Forest>,
    graph: History<Graph>,
    playlist: History<Playlist<String>>,
    commits: History<CommitLog>,
    auto_advance: AutoAdvance,
    clock: Instant,
}

impl Workspace {
    /// Build every structure from the configured seeds.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        settings.validate()?;
        let clock = Instant::now();
        let mut auto_advance = AutoAdvance::new(settings.advance_delay());
        let playlist = Playlist::new(settings.seeds.playlist.clone());
        auto_advance.arm(&playlist, clock);

        Ok(Self {
            array: History::new(settings.seeds.array.clone()),
            list: History::new(settings.seeds.list.clone()),
            stack: History::new(Bounded::with_items(
                settings.seeds.stack.clone(),
                settings.capacity,
            )?),
            queue: History::new(Bounded::with_items(
                settings.seeds.queue.clone(),
                settings.capacity,
            )?),
            forest: History::new(settings.seeds.forest.clone()),
            graph: History::new(Graph::seed(settings.edge_policy)),
            playlist: History::new(playlist),
            commits: History::new(CommitLog::seed()),
            auto_advance,
            clock,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn array(&self) -> &[i64] {
        self.array.current()
    }

    pub fn list(&self) -> &[i64] {
        self.list.current()
    }

    pub fn stack(&self) -> &Bounded<i64> {
        self.stack.current()
    }

    pub fn queue(&self) -> &Bounded<i64> {
        self.queue.current()
    }

    pub fn forest(&self) -> &Forest {
        self.forest.current()
    }

    pub fn graph(&self) -> &Graph {
        self.graph.current()
    }

    pub fn playlist(&self) -> &Playlist<String> {
        self.playlist.current()
    }

    pub fn commits(&self) -> &CommitLog {
        self.commits.current()
    }

    pub fn auto_advance(&self) -> &AutoAdvance {
        &self.auto_advance
    }

    /// `(cursor, entries)` of a structure's history.
    pub fn history_position(&self, structure: Structure) -> (usize, usize) {
        fn pos<S: Clone>(h: &History<S>) -> (usize, usize) {
            (h.cursor(), h.len())
        }
        match structure {
            Structure::Array => pos(&self.array),
            Structure::List => pos(&self.list),
            Structure::Stack => pos(&self.stack),
            Structure::Queue => pos(&self.queue),
            Structure::Tree => pos(&self.forest),
            Structure::Graph => pos(&self.graph),
            Structure::Playlist => pos(&self.playlist),
            Structure::Commits => pos(&self.commits),
        }
    }

    /// Current value of `structure` as display text.
    pub fn render(&self, structure: Structure) -> String {
        match structure {
            Structure::Array => render::sequence(self.array()),
            Structure::List => render::linked_list(self.list()),
            Structure::Stack => render::bounded(self.stack()),
            Structure::Queue => render::bounded(self.queue()),
            Structure::Tree => render::forest(self.forest()),
            Structure::Graph => render::graph(self.graph()),
            Structure::Playlist => render::playlist(self.playlist()),
            Structure::Commits => render::commits(self.commits()),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, command: &Command) -> ApplicationResult<Outcome> {
        let outcome = match command {
            Command::Seq(structure, op) => self.apply_seq(*structure, op)?,
            Command::Stack(op) => self.apply_stack(op)?,
            Command::Queue(op) => self.apply_queue(op)?,
            Command::Tree(op) => self.apply_tree(op)?,
            Command::Graph(op) => self.apply_graph(op)?,
            Command::Playlist(op) => self.apply_playlist(op)?,
            Command::Commits(op) => self.apply_commits(op)?,
            Command::Undo(structure) => self.step(*structure, false),
            Command::Redo(structure) => self.step(*structure, true),
            Command::Show(structure) => Outcome::Report(self.render(*structure)),
            Command::Reset(structure) => self.reset(*structure)?,
        };
        debug!(?outcome, "command applied");
        Ok(outcome)
    }

    fn apply_seq(&mut self, structure: Structure, op: &SeqOp) -> ApplicationResult<Outcome> {
        let history = match structure {
            Structure::Array => &mut self.array,
            Structure::List => &mut self.list,
            other => {
                return Err(DomainError::InvalidInput(format!(
                    "{} does not support sequence operations",
                    other
                ))
                .into())
            }
        };
        let current = history.current();
        let next = match op {
            SeqOp::Push(value) => sequence::push(current, *value),
            SeqOp::Pop => sequence::pop(current),
            SeqOp::Insert { index, value } => sequence::insert_at(current, *index, *value)?,
            SeqOp::Delete(index) => sequence::delete_at(current, *index)?,
            SeqOp::Get(index) => {
                let value = sequence::access_at(current, *index)?;
                return Ok(Outcome::Report(format!("element at index {}: {}", index, value)));
            }
            SeqOp::Search(value) => {
                let index = sequence::search(current, value)?;
                return Ok(Outcome::Report(format!("value {} found at index {}", value, index)));
            }
            SeqOp::Sort => sequence::sort_ascending(current),
            SeqOp::PushHead(value) => sequence::insert_at_head(current, *value),
            SeqOp::DropHead => sequence::delete_head(current),
            SeqOp::DropTail => sequence::delete_tail(current),
            SeqOp::MoveUp(index) => sequence::move_up(current, *index)?,
            SeqOp::MoveDown(index) => sequence::move_down(current, *index)?,
        };
        history.record(next);
        Ok(Outcome::Changed(structure))
    }

    fn apply_stack(&mut self, op: &StackOp) -> ApplicationResult<Outcome> {
        let current = self.stack.current();
        let next = match op {
            StackOp::Push(value) => current.push(*value)?,
            StackOp::Pop => current.pop(),
        };
        self.stack.record(next);
        Ok(Outcome::Changed(Structure::Stack))
    }

    fn apply_queue(&mut self, op: &QueueOp) -> ApplicationResult<Outcome> {
        let current = self.queue.current();
        let next = match op {
            QueueOp::Enqueue(value) => current.enqueue(*value)?,
            QueueOp::Dequeue => current.dequeue(),
        };
        self.queue.record(next);
        Ok(Outcome::Changed(Structure::Queue))
    }

    fn apply_tree(&mut self, op: &TreeOp) -> ApplicationResult<Outcome> {
        let current = self.forest.current();
        let next = match op {
            TreeOp::Add { parent, label } => {
                let id = tree::next_id(current);
                tree::insert_under_parent(current, *parent, label, id)?
            }
            TreeOp::Delete(id) => tree::try_delete_subtree(current, *id)?,
            TreeOp::Find(id) => {
                let node = tree::find_node(current, *id)?;
                return Ok(Outcome::Report(format!("found {}", node)));
            }
            TreeOp::Layout => {
                let layout = tree::compute_layout(current, self.settings.layout);
                return Ok(Outcome::Report(render::layout(&layout)));
            }
            TreeOp::Info(id) => {
                let arena = TreeArena::from_forest(current);
                let report = match id {
                    Some(id) => render::node_info(&arena.node_info(*id)?),
                    None => render::forest_info(&arena.forest_info()),
                };
                return Ok(Outcome::Report(report));
            }
        };
        self.forest.record(next);
        Ok(Outcome::Changed(Structure::Tree))
    }

    fn apply_graph(&mut self, op: &GraphOp) -> ApplicationResult<Outcome> {
        let current = self.graph.current();
        let next = match op {
            GraphOp::Node { label, position } => {
                let label = label.clone().unwrap_or_else(|| current.default_label());
                let position = position.unwrap_or_else(|| current.next_position());
                current.add_node(&label, position)?
            }
            GraphOp::Edge { source, target } => current.add_edge(source, target)?,
            GraphOp::Neighbors(id) => {
                let node = current.node(id)?;
                return Ok(Outcome::Report(format!(
                    "{} {} neighbors: [{}]",
                    node.id,
                    node.label,
                    current.neighbors(id).iter().join(", ")
                )));
            }
        };
        self.graph.record(next);
        Ok(Outcome::Changed(Structure::Graph))
    }

    fn apply_playlist(&mut self, op: &PlaylistOp) -> ApplicationResult<Outcome> {
        let current = self.playlist.current();
        let next = match op {
            PlaylistOp::Add(title) => current.add(title.clone()),
            PlaylistOp::Remove(index) => current.remove(*index)?,
            PlaylistOp::Next => current.next(),
            PlaylistOp::Prev => current.previous(),
            PlaylistOp::MoveUp(index) => current.move_up(*index)?,
            PlaylistOp::MoveDown(index) => current.move_down(*index)?,
            PlaylistOp::Select(index) => current.select(*index)?,
            PlaylistOp::Play => {
                self.auto_advance.resume(self.playlist.current(), self.clock);
                return Ok(Outcome::Report("playing".to_string()));
            }
            PlaylistOp::Pause => {
                self.auto_advance.pause();
                return Ok(Outcome::Report("paused".to_string()));
            }
            PlaylistOp::Tick(elapsed) => return Ok(self.tick(*elapsed)),
        };
        self.playlist.record(next);
        self.rearm();
        Ok(Outcome::Changed(Structure::Playlist))
    }

    /// Advance the workspace clock and fire the play-queue timer if due.
    fn tick(&mut self, elapsed: std::time::Duration) -> Outcome {
        self.clock += elapsed;
        match self.auto_advance.poll(self.playlist.current(), self.clock) {
            Some(next) => {
                self.playlist.record(next);
                Outcome::Changed(Structure::Playlist)
            }
            None => match self.auto_advance.deadline() {
                Some(deadline) => Outcome::Report(format!(
                    "next advance in {} ms",
                    deadline.saturating_duration_since(self.clock).as_millis()
                )),
                None => Outcome::Report("no advance pending".to_string()),
            },
        }
    }

    fn rearm(&mut self) {
        self.auto_advance.arm(self.playlist.current(), self.clock);
    }

    fn apply_commits(&mut self, op: &CommitOp) -> ApplicationResult<Outcome> {
        let current = self.commits.current();
        let next = match op {
            CommitOp::Commit(message) => current.commit(message)?,
            CommitOp::Checkout(id) => current.checkout(id)?,
            CommitOp::Ancestry(id) => {
                let chain = current.ancestry(id)?;
                return Ok(Outcome::Report(
                    chain.iter().map(|c| c.id.as_str()).join(" <- "),
                ));
            }
        };
        self.commits.record(next);
        Ok(Outcome::Changed(Structure::Commits))
    }

    fn step(&mut self, structure: Structure, forward: bool) -> Outcome {
        fn go<S: Clone>(history: &mut History<S>, forward: bool) {
            if forward {
                history.redo();
            } else {
                history.undo();
            }
        }
        match structure {
            Structure::Array => go(&mut self.array, forward),
            Structure::List => go(&mut self.list, forward),
            Structure::Stack => go(&mut self.stack, forward),
            Structure::Queue => go(&mut self.queue, forward),
            Structure::Tree => go(&mut self.forest, forward),
            Structure::Graph => go(&mut self.graph, forward),
            Structure::Playlist => {
                go(&mut self.playlist, forward);
                self.rearm();
            }
            Structure::Commits => go(&mut self.commits, forward),
        }
        Outcome::Changed(structure)
    }

    /// Record the seed value as a new snapshot, so a reset can be undone.
    fn reset(&mut self, structure: Structure) -> ApplicationResult<Outcome> {
        let seeds = &self.settings.seeds;
        match structure {
            Structure::Array => self.array.record(seeds.array.clone()),
            Structure::List => self.list.record(seeds.list.clone()),
            Structure::Stack => self.stack.record(Bounded::with_items(
                seeds.stack.clone(),
                self.settings.capacity,
            )?),
            Structure::Queue => self.queue.record(Bounded::with_items(
                seeds.queue.clone(),
                self.settings.capacity,
            )?),
            Structure::Tree => self.forest.record(seeds.forest.clone()),
            Structure::Graph => self.graph.record(Graph::seed(self.settings.edge_policy)),
            Structure::Playlist => {
                self.playlist.record(Playlist::new(seeds.playlist.clone()));
                self.rearm();
            }
            Structure::Commits => self.commits.record(CommitLog::seed()),
        }
        Ok(Outcome::Changed(structure))
    }
}
