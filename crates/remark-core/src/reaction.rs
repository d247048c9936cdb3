//! Like/dislike toggle policy.
//!
//! A user holds at most one reaction per comment. Set membership in
//! `likes`/`dislikes` is the only record of it; counts are derived.
//!
//! Toggling a reaction the user already holds withdraws it. Toggling the
//! other reaction switches sides. `restore` forces an exact state and is
//! what callers use to undo an optimistic toggle the server rejected.

use serde::{Deserialize, Serialize};

use crate::comment::Comment;

/// A reaction a user can toggle on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Dislike => write!(f, "dislike"),
        }
    }
}

/// A user's reaction to one comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    /// The reaction held in this state, if any.
    #[must_use]
    pub const fn reaction(self) -> Option<Reaction> {
        match self {
            Self::None => None,
            Self::Liked => Some(Reaction::Like),
            Self::Disliked => Some(Reaction::Dislike),
        }
    }
}

impl std::fmt::Display for ReactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Liked => write!(f, "liked"),
            Self::Disliked => write!(f, "disliked"),
        }
    }
}

/// The effect of a reaction operation on one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChange {
    pub before: ReactionState,
    pub after: ReactionState,
}

impl ReactionChange {
    #[must_use]
    pub fn is_noop(self) -> bool {
        self.before == self.after
    }
}

/// Toggle `reaction` for `user_id` on `comment`.
pub fn toggle(comment: &mut Comment, user_id: &str, reaction: Reaction) -> ReactionChange {
    let before = comment.reaction_of(user_id);
    let (target, opposite) = comment.reaction_sets_mut(reaction);

    if !target.remove(user_id) {
        target.insert(user_id);
        opposite.remove(user_id);
    }

    ReactionChange {
        before,
        after: comment.reaction_of(user_id),
    }
}

/// Force `user_id` into exactly `state` on `comment`.
pub fn restore(comment: &mut Comment, user_id: &str, state: ReactionState) -> ReactionChange {
    let before = comment.reaction_of(user_id);
    if before == state {
        return ReactionChange {
            before,
            after: state,
        };
    }

    comment.likes.remove(user_id);
    comment.dislikes.remove(user_id);
    if let Some(reaction) = state.reaction() {
        let (target, _) = comment.reaction_sets_mut(reaction);
        target.insert(user_id);
    }

    ReactionChange {
        before,
        after: comment.reaction_of(user_id),
    }
}
