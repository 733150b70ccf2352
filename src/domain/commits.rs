//! Version-control style commit log: each commit points at one parent.

use std::fmt;

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub parent: Option<String>,
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{} {} (parent {})", self.id, self.message, parent),
            None => write!(f, "{} {}", self.id, self.message),
        }
    }
}

/// Commits in creation order plus the checked-out commit, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    commits: Vec<Commit>,
    checked_out: Option<String>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Five commits with one branch off "Add login page".
    pub fn seed() -> Self {
        let entries = [
            ("1", "Initial commit", None),
            ("2", "Add login page", Some("1")),
            ("3", "Fix login bug", Some("2")),
            ("4", "Add user profile", Some("2")),
            ("5", "Merge user profile", Some("3")),
        ];
        Self {
            commits: entries
                .iter()
                .map(|(id, message, parent)| Commit {
                    id: id.to_string(),
                    message: message.to_string(),
                    parent: parent.map(str::to_string),
                })
                .collect(),
            checked_out: None,
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn checked_out(&self) -> Option<&str> {
        self.checked_out.as_deref()
    }

    pub fn get(&self, id: &str) -> DomainResult<&Commit> {
        self.commits
            .iter()
            .find(|commit| commit.id == id)
            .ok_or_else(|| DomainError::not_found(format!("commit {}", id)))
    }

    /// Add a commit on top of the checked-out commit, or the latest one when
    /// nothing is checked out.
    pub fn commit(&self, message: &str) -> DomainResult<Self> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::InvalidInput("empty commit message".to_string()));
        }
        let parent = self
            .checked_out
            .clone()
            .or_else(|| self.commits.last().map(|c| c.id.clone()));
        let id = (self.commits.len() + 1).to_string();
        debug!(%id, ?parent, "new commit");
        let mut next = self.clone();
        next.commits.push(Commit {
            id,
            message: message.to_string(),
            parent,
        });
        Ok(next)
    }

    pub fn checkout(&self, id: &str) -> DomainResult<Self> {
        self.get(id)?;
        Ok(Self {
            commits: self.commits.clone(),
            checked_out: Some(id.to_string()),
        })
    }

    /// Commits from `id` back to the root.
    pub fn ancestry(&self, id: &str) -> DomainResult<Vec<&Commit>> {
        let mut chain = Vec::new();
        let mut current = Some(self.get(id)?);
        while let Some(commit) = current {
            chain.push(commit);
            current = match &commit.parent {
                Some(parent) => Some(self.get(parent)?),
                None => None,
            };
            if chain.len() > self.commits.len() {
                return Err(DomainError::InvalidInput(format!("parent cycle at commit {}", id)));
            }
        }
        Ok(chain)
    }
}
