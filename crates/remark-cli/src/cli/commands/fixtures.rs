//! Snapshot and journal fixtures shared by command tests.

use std::path::{Path, PathBuf};

pub(crate) const SNAPSHOT: &str = r#"{
    "P1": [
        {
            "_id": "c1",
            "content": "Why was the bridge contract re-tendered?",
            "user": {"_id": "u1", "name": "Ada"},
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "likes": ["u2"],
            "dislikes": [],
            "replies": [
                {
                    "_id": "r1",
                    "content": "The first bid lapsed.",
                    "user": {"_id": "u2", "name": "Bo"},
                    "createdAt": "2024-01-02T00:00:00Z",
                    "updatedAt": "2024-01-02T00:00:00Z",
                    "likes": [],
                    "dislikes": [],
                    "replies": [],
                    "parentComment": "c1"
                }
            ]
        }
    ]
}"#;

pub(crate) const JOURNAL: &str = concat!(
    r#"{"ts":"2024-02-01T00:00:00Z","actor":"u2","command":"ToggleDislike","data":{"project_id":"P1","comment_id":"c1"}}"#,
    "\n",
    r#"{"ts":"2024-02-01T00:01:00Z","actor":"u3","command":"Delete","data":{"project_id":"P1","comment_id":"ghost"}}"#,
    "\n",
);

pub(crate) fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
