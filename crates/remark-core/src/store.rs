//! Per-project comment forests and the operations that mutate them.
//!
//! `CommentStore` is the only owner of comment trees. Callers submit
//! operations and read through shared references; nothing outside this
//! module gets a mutable handle to a stored comment.
//!
//! Every operation completes. A target id that does not exist makes the
//! operation a no-op, never an error.
//!
//! Structural inserts are expected only after the server has confirmed the
//! comment. Reaction toggles are applied optimistically; if the server then
//! rejects one, the caller undoes it with [`CommentStore::restore_reaction`]
//! or by loading a fresh snapshot.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::command::{Command, CommandEnvelope};
use crate::comment::Comment;
use crate::reaction::{self, Reaction, ReactionChange, ReactionState};
use crate::tree;
use crate::view;

/// Callback invoked after each change to the store.
pub type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Handle returned by [`CommentStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A change applied to one project's forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub project_id: String,
    pub change: Change,
}

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The forest was replaced wholesale.
    SnapshotLoaded { roots: usize },
    /// A root comment was prepended.
    RootInserted { comment_id: String },
    /// A reply was appended under `parent_id`.
    ReplyInserted { parent_id: String, reply_id: String },
    /// A user's reaction on a comment changed.
    ReactionChanged {
        comment_id: String,
        user_id: String,
        change: ReactionChange,
    },
    /// A comment and its replies were removed.
    Deleted { comment_id: String },
    /// The whole forest was dropped.
    Evicted,
}

/// Comment forests keyed by project id.
#[derive(Default)]
pub struct CommentStore {
    forests: HashMap<String, Vec<Comment>>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl std::fmt::Debug for CommentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentStore")
            .field("forests", &self.forests)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CommentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replace the forest for `project_id` with `comments`.
    ///
    /// Local edits not yet reflected in `comments` are discarded.
    pub fn load_snapshot(&mut self, project_id: &str, comments: Vec<Comment>) {
        let roots = comments.len();
        self.forests.insert(project_id.to_string(), comments);

        debug!(project_id, roots, "Loaded comment snapshot");
        self.notify(project_id, Change::SnapshotLoaded { roots });
    }

    /// Prepend a root comment, making it the most recent in stored order.
    pub fn insert_root(&mut self, project_id: &str, comment: Comment) {
        let comment_id = comment.id.clone();
        self.forests
            .entry(project_id.to_string())
            .or_default()
            .insert(0, comment);

        debug!(project_id, comment_id, "Inserted root comment");
        self.notify(project_id, Change::RootInserted { comment_id });
    }

    /// Append `reply` to the replies of `parent_id`.
    ///
    /// A reply without a parent link is given one. Returns `false`, leaving
    /// the forest untouched, if the parent does not exist.
    pub fn insert_reply(&mut self, project_id: &str, parent_id: &str, mut reply: Comment) -> bool {
        let Some(parent) = self.find_mut(project_id, parent_id) else {
            trace!(project_id, parent_id, "Reply parent not found, ignoring");
            return false;
        };

        if reply.parent_id.is_none() {
            reply.parent_id = Some(parent_id.to_string());
        }
        let reply_id = reply.id.clone();
        parent.replies.push(reply);

        debug!(project_id, parent_id, reply_id, "Inserted reply");
        self.notify(
            project_id,
            Change::ReplyInserted {
                parent_id: parent_id.to_string(),
                reply_id,
            },
        );
        true
    }

    /// Toggle a like from `user_id`. Returns `None` if the comment does not exist.
    pub fn toggle_like(
        &mut self,
        project_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Option<ReactionChange> {
        self.toggle_reaction(project_id, comment_id, user_id, Reaction::Like)
    }

    /// Toggle a dislike from `user_id`. Returns `None` if the comment does not exist.
    pub fn toggle_dislike(
        &mut self,
        project_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Option<ReactionChange> {
        self.toggle_reaction(project_id, comment_id, user_id, Reaction::Dislike)
    }

    /// Toggle `reaction` from `user_id` on a comment anywhere in the forest.
    pub fn toggle_reaction(
        &mut self,
        project_id: &str,
        comment_id: &str,
        user_id: &str,
        reaction: Reaction,
    ) -> Option<ReactionChange> {
        let Some(comment) = self.find_mut(project_id, comment_id) else {
            trace!(project_id, comment_id, %reaction, "Reaction target not found, ignoring");
            return None;
        };

        let change = reaction::toggle(comment, user_id, reaction);

        debug!(
            project_id,
            comment_id,
            user_id,
            %reaction,
            before = %change.before,
            after = %change.after,
            "Toggled reaction"
        );
        self.notify_reaction(project_id, comment_id, user_id, change);
        Some(change)
    }

    /// Put `user_id`'s reaction on a comment back to `state`.
    ///
    /// Used to undo an optimistic toggle the server rejected, passing the
    /// `before` of the toggle's [`ReactionChange`]. Returns `false` if the
    /// comment does not exist.
    pub fn restore_reaction(
        &mut self,
        project_id: &str,
        comment_id: &str,
        user_id: &str,
        state: ReactionState,
    ) -> bool {
        let Some(comment) = self.find_mut(project_id, comment_id) else {
            trace!(project_id, comment_id, "Restore target not found, ignoring");
            return false;
        };

        let change = reaction::restore(comment, user_id, state);
        if !change.is_noop() {
            debug!(project_id, comment_id, user_id, state = %state, "Restored reaction");
            self.notify_reaction(project_id, comment_id, user_id, change);
        }
        true
    }

    /// Remove a comment and its replies from wherever it sits in the forest.
    ///
    /// Returns the removed subtree, or `None` if nothing matched.
    pub fn delete_comment(&mut self, project_id: &str, comment_id: &str) -> Option<Comment> {
        let removed = self
            .forests
            .get_mut(project_id)
            .and_then(|forest| tree::remove(forest, comment_id));

        match removed {
            Some(comment) => {
                debug!(
                    project_id,
                    comment_id,
                    replies = comment.replies.len(),
                    "Deleted comment"
                );
                self.notify(
                    project_id,
                    Change::Deleted {
                        comment_id: comment_id.to_string(),
                    },
                );
                Some(comment)
            }
            None => {
                trace!(project_id, comment_id, "Delete target not found, ignoring");
                None
            }
        }
    }

    /// Drop the forest for `project_id`, returning it.
    pub fn evict(&mut self, project_id: &str) -> Option<Vec<Comment>> {
        let forest = self.forests.remove(project_id)?;
        debug!(project_id, roots = forest.len(), "Evicted comment forest");
        self.notify(project_id, Change::Evicted);
        Some(forest)
    }

    /// Apply a journalled command.
    ///
    /// Reaction commands act on behalf of the envelope's actor. Returns
    /// whether the forest changed.
    pub fn apply(&mut self, envelope: CommandEnvelope) -> bool {
        let actor = envelope.actor;

        match envelope.command {
            Command::LoadSnapshot(c) => {
                self.load_snapshot(&c.project_id, c.comments);
                true
            }
            Command::InsertRoot(c) => {
                self.insert_root(&c.project_id, c.comment);
                true
            }
            Command::InsertReply(c) => self.insert_reply(&c.project_id, &c.parent_id, c.reply),
            Command::ToggleLike(c) => self
                .toggle_like(&c.project_id, &c.comment_id, &actor)
                .is_some(),
            Command::ToggleDislike(c) => self
                .toggle_dislike(&c.project_id, &c.comment_id, &actor)
                .is_some(),
            Command::RestoreReaction(c) => {
                let before = self
                    .get(&c.project_id, &c.comment_id)
                    .map(|comment| comment.reaction_of(&actor));
                self.restore_reaction(&c.project_id, &c.comment_id, &actor, c.state)
                    && before != Some(c.state)
            }
            Command::Delete(c) => self.delete_comment(&c.project_id, &c.comment_id).is_some(),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Root comments for a project in stored order. Empty if unknown.
    #[must_use]
    pub fn roots(&self, project_id: &str) -> &[Comment] {
        self.forests
            .get(project_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look up a comment anywhere in a project's forest.
    #[must_use]
    pub fn get(&self, project_id: &str, comment_id: &str) -> Option<&Comment> {
        tree::find(self.roots(project_id), comment_id)
    }

    /// Root comments newest first, as displayed. Recomputed on every call.
    #[must_use]
    pub fn view(&self, project_id: &str) -> Vec<&Comment> {
        view::project_roots(self.roots(project_id))
    }

    /// Total comments in a project, replies included.
    #[must_use]
    pub fn comment_count(&self, project_id: &str) -> usize {
        tree::count(self.roots(project_id))
    }

    /// Ids of every project with a loaded forest, in no particular order.
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.forests.keys().map(String::as_str)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a callback that runs after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn find_mut(&mut self, project_id: &str, comment_id: &str) -> Option<&mut Comment> {
        self.forests
            .get_mut(project_id)
            .and_then(|forest| tree::find_mut(forest, comment_id))
    }

    fn notify_reaction(
        &mut self,
        project_id: &str,
        comment_id: &str,
        user_id: &str,
        change: ReactionChange,
    ) {
        self.notify(
            project_id,
            Change::ReactionChanged {
                comment_id: comment_id.to_string(),
                user_id: user_id.to_string(),
                change,
            },
        );
    }

    fn notify(&mut self, project_id: &str, change: Change) {
        if self.observers.is_empty() {
            return;
        }
        let event = StoreEvent {
            project_id: project_id.to_string(),
            change,
        };
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}
