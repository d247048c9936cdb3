//! Comment data model.
//!
//! Comments are serialised with snake_case field names. Aliases accept the
//! camelCase / `_id` shape the comment API sends, so server snapshots
//! decode without a translation layer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::reaction::{Reaction, ReactionState};

/// The user who wrote a comment. Carried through the tree, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "photo", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

/// Insertion-ordered set of user ids.
///
/// Serialised as a plain JSON array. Duplicate ids in decoded input are
/// collapsed to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct ReactionSet(Vec<String>);

impl ReactionSet {
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.0.iter().any(|id| id == user_id)
    }

    /// Add a user. Returns `false` if they were already present.
    pub fn insert(&mut self, user_id: &str) -> bool {
        if self.contains(user_id) {
            return false;
        }
        self.0.push(user_id.to_string());
        true
    }

    /// Remove a user. Returns `false` if they were not present.
    pub fn remove(&mut self, user_id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|id| id != user_id);
        self.0.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ReactionSet {
    fn from(ids: Vec<String>) -> Self {
        let mut set = Self::default();
        for id in &ids {
            set.insert(id);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for ReactionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// A comment and, recursively, its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier, unique within a project's forest.
    #[serde(alias = "_id")]
    pub id: String,
    pub content: String,
    #[serde(alias = "user")]
    pub author: Author,
    #[serde(alias = "createdAt", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt", deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: ReactionSet,
    #[serde(default)]
    pub dislikes: ReactionSet,
    /// Replies in display order (oldest first).
    #[serde(default)]
    pub replies: Vec<Comment>,
    /// Set iff this comment is a reply. An empty id decodes as `None`.
    #[serde(
        default,
        alias = "parentComment",
        alias = "parentCommentId",
        deserialize_with = "deserialize_parent_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
}

impl Comment {
    /// Build a root comment with no reactions or replies.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidComment` if `id` is empty or `content`
    /// is blank.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        author: Author,
        created_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let id = id.into();
        let content = content.into();

        if id.is_empty() {
            return Err(CoreError::InvalidComment {
                id,
                reason: "id is empty".to_string(),
            });
        }
        if content.trim().is_empty() {
            return Err(CoreError::InvalidComment {
                id,
                reason: "content is empty".to_string(),
            });
        }

        Ok(Self {
            id,
            content,
            author,
            created_at,
            updated_at: created_at,
            likes: ReactionSet::default(),
            dislikes: ReactionSet::default(),
            replies: Vec::new(),
            parent_id: None,
        })
    }

    /// Mark this comment as a reply to `parent_id`.
    #[must_use]
    pub fn reply_to(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.parent_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    #[must_use]
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author.id == user_id
    }

    /// The reaction `user_id` currently holds on this comment.
    #[must_use]
    pub fn reaction_of(&self, user_id: &str) -> ReactionState {
        if self.likes.contains(user_id) {
            ReactionState::Liked
        } else if self.dislikes.contains(user_id) {
            ReactionState::Disliked
        } else {
            ReactionState::None
        }
    }

    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    #[must_use]
    pub fn dislike_count(&self) -> usize {
        self.dislikes.len()
    }

    /// The set for `reaction` and the set for its opposite, borrowed together.
    pub(crate) fn reaction_sets_mut(
        &mut self,
        reaction: Reaction,
    ) -> (&mut ReactionSet, &mut ReactionSet) {
        match reaction {
            Reaction::Like => (&mut self.likes, &mut self.dislikes),
            Reaction::Dislike => (&mut self.dislikes, &mut self.likes),
        }
    }
}

/// Accept RFC 3339, or an offset-less date-time or bare date read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(ts) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn deserialize_parent_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<String>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}
