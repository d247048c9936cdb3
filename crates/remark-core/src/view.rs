//! Read-side projections of a comment forest.
//!
//! Nothing here mutates or caches the forest; every call recomputes from
//! the stored trees, so results always reflect the latest mutation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::comment::Comment;
use crate::reaction::ReactionState;
use crate::tree;

/// Root comments newest first.
///
/// Anything at root level carrying a parent link is dropped. Equal
/// timestamps keep their stored order. Replies are left in stored order.
#[must_use]
pub fn project_roots(roots: &[Comment]) -> Vec<&Comment> {
    let mut view: Vec<&Comment> = roots.iter().filter(|c| !c.is_reply()).collect();
    view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    view
}

/// A comment as one viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSummary {
    pub comment_id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: usize,
    pub dislikes: usize,
    pub reply_count: usize,
    pub viewer_reaction: ReactionState,
    pub is_author: bool,
    /// Replies are only offered on root comments.
    pub can_reply: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentSummary>,
}

impl CommentSummary {
    /// Summarise `comment` and its replies for `viewer` (anonymous if `None`).
    #[must_use]
    pub fn build(comment: &Comment, viewer: Option<&str>) -> Self {
        Self::build_at(comment, viewer, 0)
    }

    fn build_at(comment: &Comment, viewer: Option<&str>, depth: usize) -> Self {
        Self {
            comment_id: comment.id.clone(),
            author: comment.author.name.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            likes: comment.like_count(),
            dislikes: comment.dislike_count(),
            reply_count: comment.replies.len(),
            viewer_reaction: viewer.map_or(ReactionState::None, |v| comment.reaction_of(v)),
            is_author: viewer.is_some_and(|v| comment.is_authored_by(v)),
            can_reply: depth == 0 && !comment.is_reply(),
            replies: comment
                .replies
                .iter()
                .map(|reply| Self::build_at(reply, viewer, depth + 1))
                .collect(),
        }
    }
}

/// The projected view of a forest, summarised for `viewer`.
#[must_use]
pub fn summarize(roots: &[Comment], viewer: Option<&str>) -> Vec<CommentSummary> {
    project_roots(roots)
        .into_iter()
        .map(|comment| CommentSummary::build(comment, viewer))
        .collect()
}

/// Aggregate counts for one project's forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForestStats {
    pub project_id: String,
    pub roots: usize,
    pub comments: usize,
    pub likes: usize,
    pub dislikes: usize,
    /// Deepest reply nesting; 0 when there are no replies.
    pub max_depth: usize,
}

impl ForestStats {
    #[must_use]
    pub fn compute(project_id: &str, roots: &[Comment]) -> Self {
        let mut stats = Self {
            project_id: project_id.to_string(),
            roots: roots.len(),
            ..Self::default()
        };

        for (depth, comment) in tree::walk(roots) {
            stats.comments += 1;
            stats.likes += comment.like_count();
            stats.dislikes += comment.dislike_count();
            stats.max_depth = stats.max_depth.max(depth);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Author;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn comment(id: &str, author: &str, created: DateTime<Utc>) -> Comment {
        Comment::new(id, format!("text of {id}"), Author::new(author, author), created).unwrap()
    }

    fn ids<'a>(view: &[&'a Comment]) -> Vec<&'a str> {
        view.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_sorts_newest_first() {
        let roots = vec![
            comment("old", "a", at(2023, 1, 1)),
            comment("new", "a", at(2024, 6, 1)),
            comment("mid", "a", at(2024, 1, 1)),
        ];
        assert_eq!(ids(&project_roots(&roots)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_ties_keep_stored_order() {
        let roots = vec![
            comment("first", "a", at(2024, 1, 1)),
            comment("second", "a", at(2024, 1, 1)),
            comment("newer", "a", at(2024, 2, 1)),
        ];
        assert_eq!(ids(&project_roots(&roots)), vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_drops_stray_replies_at_root() {
        let roots = vec![
            comment("c1", "a", at(2024, 1, 1)),
            comment("stray", "a", at(2024, 5, 1)).reply_to("c1"),
        ];
        assert_eq!(ids(&project_roots(&roots)), vec!["c1"]);
    }

    #[test]
    fn test_empty_parent_stays_in_view() {
        let mut blank = comment("c2", "a", at(2024, 2, 1));
        blank.parent_id = Some(String::new());
        let roots = vec![comment("c1", "a", at(2024, 1, 1)), blank];

        assert_eq!(ids(&project_roots(&roots)), vec!["c2", "c1"]);
        assert!(CommentSummary::build(&roots[1], None).can_reply);
    }

    #[test]
    fn test_replies_not_resorted() {
        let mut root = comment("c1", "a", at(2024, 1, 1));
        root.replies.push(comment("late", "b", at(2024, 3, 1)).reply_to("c1"));
        root.replies.push(comment("early", "b", at(2024, 2, 1)).reply_to("c1"));
        let roots = vec![root];

        let view = project_roots(&roots);
        let reply_ids: Vec<&str> = view[0].replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(reply_ids, vec!["late", "early"]);
    }

    #[test]
    fn test_summary_for_viewer() {
        let mut root = comment("c1", "ada", at(2024, 1, 1));
        root.likes.insert("bo");
        root.dislikes.insert("cy");
        root.replies.push(comment("r1", "bo", at(2024, 1, 2)).reply_to("c1"));
        let roots = vec![root];

        let summaries = summarize(&roots, Some("bo"));
        assert_eq!(summaries.len(), 1);
        let c1 = &summaries[0];
        assert_eq!(c1.likes, 1);
        assert_eq!(c1.dislikes, 1);
        assert_eq!(c1.reply_count, 1);
        assert_eq!(c1.viewer_reaction, ReactionState::Liked);
        assert!(!c1.is_author);
        assert!(c1.can_reply);

        let r1 = &c1.replies[0];
        assert!(r1.is_author);
        assert!(!r1.can_reply);
        assert_eq!(r1.viewer_reaction, ReactionState::None);
    }

    #[test]
    fn test_summary_anonymous() {
        let mut root = comment("c1", "ada", at(2024, 1, 1));
        root.likes.insert("ada");
        let summary = CommentSummary::build(&root, None);
        assert_eq!(summary.viewer_reaction, ReactionState::None);
        assert!(!summary.is_author);
    }

    #[test]
    fn test_summary_json_omits_empty_replies() {
        let root = comment("c1", "ada", at(2024, 1, 1));
        let json = serde_json::to_value(CommentSummary::build(&root, None)).unwrap();
        assert!(json.get("replies").is_none());
        assert_eq!(json["viewer_reaction"], "none");
    }

    #[test]
    fn test_forest_stats() {
        let mut root = comment("c1", "ada", at(2024, 1, 1));
        let mut reply = comment("r1", "bo", at(2024, 1, 2)).reply_to("c1");
        reply.replies.push(comment("rr1", "cy", at(2024, 1, 3)).reply_to("r1"));
        reply.likes.insert("ada");
        root.replies.push(reply);
        root.dislikes.insert("bo");
        let roots = vec![root, comment("c2", "bo", at(2024, 2, 1))];

        let stats = ForestStats::compute("P1", &roots);
        assert_eq!(
            stats,
            ForestStats {
                project_id: "P1".to_string(),
                roots: 2,
                comments: 4,
                likes: 1,
                dislikes: 1,
                max_depth: 2,
            }
        );
    }

    #[test]
    fn test_forest_stats_empty() {
        let stats = ForestStats::compute("P1", &[]);
        assert_eq!(stats.comments, 0);
        assert_eq!(stats.max_depth, 0);
    }
}
