//! Attaching the file being read to an I/O failure.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O failure into `OperationFailed` naming `action` and `path`,
    /// e.g. `cannot read script /tmp/demo.dsviz: No such file or directory`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: source.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn given_missing_file_when_read_then_message_names_action_and_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.dsviz");

        let err = std::fs::read_to_string(&path)
            .with_path_context("read script", &path)
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("cannot read script "), "{message}");
        assert!(message.contains("missing.dsviz"), "{message}");
        let io = err
            .source()
            .and_then(|e| e.downcast_ref::<io::Error>())
            .map(io::Error::kind);
        assert_eq!(io, Some(io::ErrorKind::NotFound));
    }
}
