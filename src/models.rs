//! Read-only snapshots of the entities being scored
//!
//! These carry only the fields the scoring engine reads. The host
//! application copies them out of its own models before scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An article as seen by the hotness scorer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleSnapshot {
    #[serde(default)]
    pub id: u64,
    /// Caller-assigned quality score (reaction-derived)
    #[serde(default)]
    pub score: i64,
    pub published_at: DateTime<Utc>,
    /// Lower-cased tag names
    #[serde(default)]
    pub tag_list: BTreeSet<String>,
}

impl ArticleSnapshot {
    pub fn new(score: i64, published_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            score,
            published_at,
            tag_list: BTreeSet::new(),
        }
    }

    /// Replace the tag set with the tags in a comma-separated list,
    /// e.g. `"hello, discuss, watercooler"`.
    pub fn with_cached_tag_list(mut self, cached: &str) -> Self {
        self.tag_list = parse_tag_list(cached);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag_list.insert(tag.trim().to_lowercase());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_list.contains(&tag.to_lowercase())
    }
}

/// Split a cached tag string into normalized tag names.
pub fn parse_tag_list(cached: &str) -> BTreeSet<String> {
    cached
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A single reaction on a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    #[serde(default = "default_reaction_category")]
    pub category: String,
    pub points: f64,
}

fn default_reaction_category() -> String {
    "like".to_string()
}

impl Reaction {
    pub fn new(category: impl Into<String>, points: f64) -> Self {
        Self {
            category: category.into(),
            points,
        }
    }
}

/// Identity of the author, passed through to external scoring untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserSnapshot {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
}

impl UserSnapshot {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// A comment as seen by the quality and spaminess scorers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CommentSnapshot {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Number of replies anywhere below this comment
    #[serde(default)]
    pub descendants_count: u32,
    /// Sent beside the comment in the spam payload, never inside it
    #[serde(default, skip_serializing)]
    pub user: Option<UserSnapshot>,
}

impl CommentSnapshot {
    pub fn new(body_markdown: impl Into<String>) -> Self {
        Self {
            body_markdown: body_markdown.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: UserSnapshot) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    pub fn with_descendants(mut self, count: u32) -> Self {
        self.descendants_count = count;
        self
    }

    /// Sum of reaction points, truncated to an integer
    pub fn reaction_points(&self) -> i64 {
        self.reactions.iter().map(|r| r.points).sum::<f64>() as i64
    }
}
