//! Serialisable store commands and the JSON Lines journal format.
//!
//! Each journal line is a [`CommandEnvelope`]: a timestamp, the acting user,
//! and one [`Command`]. Replaying a journal through
//! [`CommentStore::apply`](crate::store::CommentStore::apply) reproduces the
//! sequence of store operations a client performed.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::errors::{CoreError, CoreResult};
use crate::reaction::ReactionState;

/// Common envelope for every journalled command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// When the command was issued
    pub ts: DateTime<Utc>,
    /// User issuing the command; reactions are recorded against this id
    pub actor: String,
    /// The command payload
    #[serde(flatten)]
    pub command: Command,
}

/// All store operations that can be journalled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", content = "data")]
pub enum Command {
    /// Replace a project's forest with a server snapshot
    LoadSnapshot(LoadSnapshot),
    /// Prepend a confirmed root comment
    InsertRoot(InsertRoot),
    /// Append a confirmed reply
    InsertReply(InsertReply),
    /// Toggle the actor's like
    ToggleLike(ToggleReaction),
    /// Toggle the actor's dislike
    ToggleDislike(ToggleReaction),
    /// Force the actor's reaction back to a known state
    RestoreReaction(RestoreReaction),
    /// Remove a comment and its replies
    Delete(DeleteComment),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSnapshot {
    pub project_id: String,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRoot {
    pub project_id: String,
    pub comment: Comment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertReply {
    pub project_id: String,
    pub parent_id: String,
    pub reply: Comment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleReaction {
    pub project_id: String,
    pub comment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreReaction {
    pub project_id: String,
    pub comment_id: String,
    pub state: ReactionState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteComment {
    pub project_id: String,
    pub comment_id: String,
}

impl Command {
    /// Stable name of the command, as written in the journal.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadSnapshot(_) => "LoadSnapshot",
            Self::InsertRoot(_) => "InsertRoot",
            Self::InsertReply(_) => "InsertReply",
            Self::ToggleLike(_) => "ToggleLike",
            Self::ToggleDislike(_) => "ToggleDislike",
            Self::RestoreReaction(_) => "RestoreReaction",
            Self::Delete(_) => "Delete",
        }
    }

    /// The project this command targets.
    #[must_use]
    pub fn project_id(&self) -> &str {
        match self {
            Self::LoadSnapshot(c) => &c.project_id,
            Self::InsertRoot(c) => &c.project_id,
            Self::InsertReply(c) => &c.project_id,
            Self::ToggleLike(c) | Self::ToggleDislike(c) => &c.project_id,
            Self::RestoreReaction(c) => &c.project_id,
            Self::Delete(c) => &c.project_id,
        }
    }
}

impl CommandEnvelope {
    /// Create a new envelope with the current timestamp.
    pub fn new(actor: impl Into<String>, command: Command) -> Self {
        Self {
            ts: Utc::now(),
            actor: actor.into(),
            command,
        }
    }

    /// Serialize the envelope to a JSON line (no trailing newline).
    ///
    /// # Errors
    ///
    /// Returns an error if a comment fails to serialize.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse an envelope from a JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a valid envelope.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Parse a JSON Lines journal. Blank lines are skipped.
///
/// # Errors
///
/// Returns `CoreError::Journal` with the 1-based line number of the first
/// line that fails to parse.
pub fn parse_journal(text: &str) -> CoreResult<Vec<CommandEnvelope>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            CommandEnvelope::from_json_line(line).map_err(|source| CoreError::Journal {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse a journal file.
///
/// # Errors
///
/// Returns `CoreError::Io` if the file cannot be read, or
/// `CoreError::Journal` if a line is malformed.
pub fn read_journal(path: &Path) -> CoreResult<Vec<CommandEnvelope>> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_journal(&text)
}
