//! Depth-first search and removal over comment forests.
//!
//! A forest is a slice of root comments, each owning its replies. Every
//! function here recurses into `replies` to any depth, even though the UI
//! only ever produces one level of nesting.

use crate::comment::Comment;

/// Find the comment with `id`, searching each root before its replies.
#[must_use]
pub fn find<'a>(forest: &'a [Comment], id: &str) -> Option<&'a Comment> {
    for comment in forest {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Mutable counterpart of [`find`], with the same search order.
pub fn find_mut<'a>(forest: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    for comment in forest {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Remove the comment with `id` and return it with its replies.
///
/// The list itself is checked before any reply list beneath it, so a root
/// match wins over a nested one. Below that, each comment's direct replies
/// are checked before its deeper descendants.
pub fn remove(forest: &mut Vec<Comment>, id: &str) -> Option<Comment> {
    if let Some(pos) = forest.iter().position(|comment| comment.id == id) {
        return Some(forest.remove(pos));
    }
    forest
        .iter_mut()
        .find_map(|comment| remove(&mut comment.replies, id))
}

/// Pre-order walk over a forest, yielding each comment with its depth.
///
/// Roots have depth 0.
#[must_use]
pub fn walk(forest: &[Comment]) -> Walk<'_> {
    Walk {
        stack: vec![forest.iter()],
    }
}

/// Iterator returned by [`walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Comment>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            if let Some(comment) = level.next() {
                self.stack.push(comment.replies.iter());
                return Some((depth, comment));
            }
            self.stack.pop();
        }
    }
}

/// Number of comments in a forest, replies included.
#[must_use]
pub fn count(forest: &[Comment]) -> usize {
    walk(forest).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Author;
    use chrono::{TimeZone, Utc};

    fn node(id: &str, replies: Vec<Comment>) -> Comment {
        let mut comment = Comment::new(
            id,
            format!("comment {id}"),
            Author::new("u1", "Ada"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        for reply in replies {
            comment.replies.push(reply.reply_to(id));
        }
        comment
    }

    /// c1 -> [r1 -> [rr1], r2], c2
    fn forest() -> Vec<Comment> {
        vec![
            node("c1", vec![node("r1", vec![node("rr1", vec![])]), node("r2", vec![])]),
            node("c2", vec![]),
        ]
    }

    fn ids(forest: &[Comment]) -> Vec<&str> {
        walk(forest).map(|(_, c)| c.id.as_str()).collect()
    }

    #[test]
    fn test_find_root_and_nested() {
        let forest = forest();
        assert_eq!(find(&forest, "c2").unwrap().id, "c2");
        assert_eq!(find(&forest, "r2").unwrap().id, "r2");
        assert_eq!(find(&forest, "rr1").unwrap().parent_id.as_deref(), Some("r1"));
        assert!(find(&forest, "ghost").is_none());
    }

    #[test]
    fn test_find_mut_edits_in_place() {
        let mut forest = forest();
        find_mut(&mut forest, "rr1").unwrap().content = "edited".to_string();
        assert_eq!(find(&forest, "rr1").unwrap().content, "edited");
    }

    #[test]
    fn test_find_empty_forest() {
        assert!(find(&[], "c1").is_none());
        assert!(find_mut(&mut [], "c1").is_none());
    }

    #[test]
    fn test_remove_root() {
        let mut forest = forest();
        let removed = remove(&mut forest, "c1").unwrap();
        assert_eq!(removed.replies.len(), 2);
        assert_eq!(ids(&forest), vec!["c2"]);
    }

    #[test]
    fn test_remove_reply_keeps_siblings() {
        let mut forest = forest();
        remove(&mut forest, "r1").unwrap();
        assert_eq!(ids(&forest), vec!["c1", "r2", "c2"]);
    }

    #[test]
    fn test_remove_grandchild() {
        let mut forest = forest();
        let removed = remove(&mut forest, "rr1").unwrap();
        assert_eq!(removed.id, "rr1");
        assert_eq!(ids(&forest), vec!["c1", "r1", "r2", "c2"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut forest = forest();
        let before = forest.clone();
        assert!(remove(&mut forest, "ghost").is_none());
        assert_eq!(forest, before);
    }

    #[test]
    fn test_remove_prefers_shallowest_match() {
        // Same id at root and nested: the root copy goes first.
        let mut forest = vec![node("a", vec![node("dup", vec![])]), node("dup", vec![])];
        remove(&mut forest, "dup").unwrap();
        assert_eq!(ids(&forest), vec!["a", "dup"]);
        assert_eq!(forest[0].replies.len(), 1);
    }

    #[test]
    fn test_walk_depths() {
        let forest = forest();
        let walked: Vec<(usize, &str)> = walk(&forest).map(|(d, c)| (d, c.id.as_str())).collect();
        assert_eq!(
            walked,
            vec![(0, "c1"), (1, "r1"), (2, "rr1"), (1, "r2"), (0, "c2")]
        );
        assert_eq!(count(&forest), 5);
        assert_eq!(count(&[]), 0);
    }
}
