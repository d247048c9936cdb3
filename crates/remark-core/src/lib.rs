//! remark-core: domain logic for remark comment threads.
//!
//! This crate owns the comment data model, the per-project comment forest
//! store, the like/dislike toggle policy, the view projection, and the
//! serialisable command journal that drives the store.

pub mod command;
pub mod comment;
pub mod errors;
pub mod reaction;
pub mod snapshot;
pub mod store;
pub mod tree;
pub mod view;

pub use comment::{Author, Comment, ReactionSet};
pub use errors::{CoreError, CoreResult};
pub use reaction::{Reaction, ReactionChange, ReactionState};
pub use store::{Change, CommentStore, StoreEvent, SubscriptionId};
