//! Implementation of `remark view` and `remark show`.

use anyhow::{anyhow, Result};

use crate::cli::commands::helpers::open_store;
use crate::cli::SourceArgs;
use crate::output::{Formatter, OutputFormat};
use remark_core::view::{summarize, CommentSummary};
use remark_core::CommentStore;

/// Show a project's comments newest first.
#[tracing::instrument(skip(source, format))]
pub fn run_view(
    source: &SourceArgs,
    project_id: &str,
    viewer: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let store = open_store(source)?;
    let summaries = summarize(store.roots(project_id), viewer);

    let formatter = Formatter::new(format);
    formatter.print_list(
        &summaries,
        "No comments yet. Be the first to comment!",
        "comments",
    )?;

    Ok(())
}

/// Show one comment and its replies.
#[tracing::instrument(skip(source, format))]
pub fn run_show(
    source: &SourceArgs,
    project_id: &str,
    comment_id: &str,
    viewer: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let store = open_store(source)?;
    let summary = comment_summary(&store, project_id, comment_id, viewer)?;

    let formatter = Formatter::new(format);
    formatter.print(&summary)?;

    Ok(())
}

fn comment_summary(
    store: &CommentStore,
    project_id: &str,
    comment_id: &str,
    viewer: Option<&str>,
) -> Result<CommentSummary> {
    let comment = store
        .get(project_id, comment_id)
        .ok_or_else(|| anyhow!("Comment not found: {comment_id} (project {project_id})"))?;
    Ok(CommentSummary::build(comment, viewer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::fixtures::{write, SNAPSHOT};
    use remark_core::ReactionState;

    fn store() -> CommentStore {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceArgs {
            snapshot: write(dir.path(), "snapshot.json", SNAPSHOT),
            journal: None,
        };
        open_store(&source).unwrap()
    }

    #[test]
    fn test_comment_summary_for_reply() {
        let summary = comment_summary(&store(), "P1", "r1", Some("u2")).unwrap();
        assert_eq!(summary.comment_id, "r1");
        assert!(summary.is_author);
        assert!(!summary.can_reply);
    }

    #[test]
    fn test_comment_summary_for_root() {
        let summary = comment_summary(&store(), "P1", "c1", Some("u2")).unwrap();
        assert_eq!(summary.viewer_reaction, ReactionState::Liked);
        assert_eq!(summary.replies.len(), 1);
        assert!(summary.can_reply);
    }

    #[test]
    fn test_comment_summary_missing() {
        let err = comment_summary(&store(), "P1", "ghost", None).unwrap_err();
        assert_eq!(err.to_string(), "Comment not found: ghost (project P1)");
    }

    #[test]
    fn test_run_view_unknown_project_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceArgs {
            snapshot: write(dir.path(), "snapshot.json", SNAPSHOT),
            journal: None,
        };
        run_view(&source, "P404", None, OutputFormat::Json).unwrap();
    }
}
