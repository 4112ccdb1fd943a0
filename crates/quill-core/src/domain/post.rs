use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PostFields, User};

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub publish: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `user_id`.
    pub fn new(user_id: Uuid, slug: String, fields: PostFields, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            slug,
            title: fields.title,
            content: fields.content,
            draft: fields.draft,
            publish: fields.publish,
            timestamp: now,
            updated: now,
        }
    }

    /// Replace the editable fields. Identity, slug, owner and creation time stay put.
    pub fn apply(&mut self, fields: PostFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.content = fields.content;
        self.draft = fields.draft;
        self.publish = fields.publish;
        self.updated = now;
    }
}

/// A post together with its author, as shown to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub post: Post,
    pub author: Option<User>,
}
