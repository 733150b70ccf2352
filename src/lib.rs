//! Collection operations for data-structure demos.
//!
//! The [`domain`] layer holds pure, all-or-nothing operations on sequences,
//! bounded stacks and queues, forests, graphs, playlists and commit logs,
//! plus the undo/redo [`domain::History`]. The [`application`] layer runs a
//! small text command language against a [`application::Workspace`] holding
//! one instance of each structure; [`cli`] exposes it as the `dsviz` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
