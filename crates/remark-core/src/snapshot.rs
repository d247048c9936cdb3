//! Server snapshot documents.
//!
//! A snapshot is a JSON object mapping project ids to their root comment
//! lists, exactly as the comment API returns them. Decoding does not check
//! tree structure; a snapshot is trusted to be well formed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::comment::Comment;
use crate::errors::{CoreError, CoreResult};
use crate::store::CommentStore;

/// Root comment lists keyed by project id.
pub type Snapshot = BTreeMap<String, Vec<Comment>>;

/// Decode a snapshot from JSON text.
///
/// # Errors
///
/// Returns `CoreError::Snapshot` if the text is not a valid snapshot.
pub fn parse_snapshot(text: &str) -> CoreResult<Snapshot> {
    serde_json::from_str(text).map_err(CoreError::Snapshot)
}

/// Read and decode a snapshot file.
///
/// # Errors
///
/// Returns `CoreError::Io` if the file cannot be read, or
/// `CoreError::Snapshot` if its contents are not a valid snapshot.
pub fn read_snapshot(path: &Path) -> CoreResult<Snapshot> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&text)
}

impl CommentStore {
    /// Load every project in `snapshot`, replacing each project's forest.
    ///
    /// Projects absent from the snapshot are left as they are.
    pub fn load_all(&mut self, snapshot: Snapshot) {
        for (project_id, comments) in snapshot {
            self.load_snapshot(&project_id, comments);
        }
    }
}
