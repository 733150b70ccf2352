//! Application layer: command language and the workspace that runs it
//!
//! This layer owns the stateful side (one history per structure) and calls
//! into the pure domain operations.

pub mod command;
pub mod error;
pub mod error_ext;
pub mod render;
pub mod workspace;

pub use command::{parse_line, parse_script, Command, Structure};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use workspace::{Outcome, Workspace};
