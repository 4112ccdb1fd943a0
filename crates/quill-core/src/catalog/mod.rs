//! The post catalog: create, list, detail, update and delete.
//!
//! Every operation takes the caller explicitly. Mutations and access to
//! unpublished posts go through the [`AccessPolicy`] gate, and a refused
//! caller gets the same `NotFound` as a caller asking for a missing post.

mod filter;
mod gate;
mod pagination;
pub mod visibility;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::slug::unique_slug;
use crate::domain::{Caller, NewPost, Post, PostChanges, PostKey, PostRecord, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, PostRepository, UserRepository};

pub use filter::{ListOrder, PostFilter, SearchTerm};
pub use gate::AccessPolicy;
pub use pagination::{PAGE_REQUEST_VAR, Page, PageWindow, Paginator, paginate};

/// A configuration value that names no known option.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {setting} `{value}`")]
pub struct UnknownSetting {
    pub setting: &'static str,
    pub value: String,
}

impl UnknownSetting {
    fn new(setting: &'static str, value: &str) -> Self {
        Self {
            setting,
            value: value.to_string(),
        }
    }
}

/// Tunables of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub page_size: u64,
    pub order: ListOrder,
    pub access_policy: AccessPolicy,
    /// Path under which posts are served, e.g. `/api/posts`.
    pub base_path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            order: ListOrder::default(),
            access_policy: AccessPolicy::default(),
            base_path: "/api/posts".to_string(),
        }
    }
}

impl CatalogSettings {
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page_size)
    }

    /// Canonical URL of a post.
    pub fn post_url(&self, post: &Post) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), post.slug)
    }

    pub fn list_url(&self) -> String {
        match self.base_path.trim_end_matches('/') {
            "" => "/".to_string(),
            path => path.to_string(),
        }
    }
}

/// One-shot message shown to the user after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Saved,
    Deleted,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::Created => "Successfully Created",
            Notice::Saved => "Item Saved",
            Notice::Deleted => "Successfully Deleted",
        };
        f.write_str(text)
    }
}

/// Outcome of a successful mutation: where to send the user next, what to
/// tell them, and the affected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect<T> {
    pub location: String,
    pub notice: Notice,
    pub value: T,
}

/// A single post as served by the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub record: PostRecord,
    /// URL-encoded content, for share links.
    pub share_string: String,
    pub today: NaiveDate,
}

/// Raw listing parameters as received from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// One page of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListing {
    pub page: Page<PostRecord>,
    pub query: Option<SearchTerm>,
    pub today: NaiveDate,
}

/// CRUD and listing façade over the post collection.
pub struct PostCatalog {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    settings: CatalogSettings,
}

impl PostCatalog {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            posts,
            users,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn is_privileged(&self, caller: &Caller) -> bool {
        self.settings.access_policy.permits(caller)
    }

    fn gate(&self, caller: &Caller, key: &dyn fmt::Display) -> Result<(), DomainError> {
        if self.is_privileged(caller) {
            return Ok(());
        }
        tracing::debug!(user_id = ?caller.user_id, key = %key, "Access refused, reporting not found");
        Err(DomainError::post_not_found(key))
    }

    async fn find(&self, key: &PostKey) -> Result<Post, DomainError> {
        let found = match key {
            PostKey::Id(id) => self.posts.find_by_id(*id).await?,
            PostKey::Slug(slug) => self.posts.find_by_slug(slug).await?,
        };
        found.ok_or_else(|| DomainError::post_not_found(key))
    }

    async fn with_author(&self, post: Post) -> Result<PostRecord, DomainError> {
        let author = self.users.find_by_id(post.user_id).await?;
        Ok(PostRecord { post, author })
    }

    async fn with_authors(&self, posts: Vec<Post>) -> Result<Vec<PostRecord>, DomainError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.user_id).collect();
        ids.sort();
        ids.dedup();

        let authors: HashMap<Uuid, User> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_many(&ids)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.user_id).cloned();
                PostRecord { post, author }
            })
            .collect())
    }

    /// Record the account behind a privileged caller so its posts have an
    /// author. Does nothing for other callers or for a mismatched account.
    pub async fn enroll(&self, caller: &Caller, account: User) -> Result<(), DomainError> {
        if caller.user_id != Some(account.id) || !self.is_privileged(caller) {
            return Ok(());
        }

        let stored = self.users.ensure(account).await?;
        tracing::debug!(user_id = %stored.id, username = %stored.username, "Author enrolled");
        Ok(())
    }

    /// Create a post owned by the caller.
    pub async fn create(
        &self,
        caller: &Caller,
        input: NewPost,
    ) -> Result<Redirect<PostRecord>, DomainError> {
        self.gate(caller, &"new")?;
        let Some(owner) = caller.user_id else {
            return Err(DomainError::post_not_found("new"));
        };

        let fields = input.validate().map_err(DomainError::Validation)?;
        let slug = unique_slug(&fields.title, |candidate| async move {
            self.posts.slug_exists(&candidate).await
        })
        .await?;

        let post = Post::new(owner, slug, fields, self.clock.now());
        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");

        Ok(Redirect {
            location: self.settings.post_url(&saved),
            notice: Notice::Created,
            value: self.with_author(saved).await?,
        })
    }

    /// Show one post. Unpublished posts are only shown to privileged callers.
    pub async fn detail(&self, caller: &Caller, key: &PostKey) -> Result<PostDetail, DomainError> {
        let today = self.clock.today();
        let post = self.find(key).await?;
        if !visibility::is_public(&post, today) {
            self.gate(caller, key)?;
        }

        let share_string = urlencoding::encode(&post.content).into_owned();
        Ok(PostDetail {
            record: self.with_author(post).await?,
            share_string,
            today,
        })
    }

    /// One page of the listing, narrowed by visibility and the search query.
    pub async fn list(&self, caller: &Caller, query: ListQuery) -> Result<PostListing, DomainError> {
        let today = self.clock.today();
        let filter = PostFilter {
            visible_on: (!self.is_privileged(caller)).then_some(today),
            search: SearchTerm::parse(query.q.as_deref()),
            order: self.settings.order,
        };

        let count = self.posts.count(&filter).await?;
        let window = self.settings.paginator().locate(count, query.page.as_deref());
        let posts = self
            .posts
            .fetch(&filter, window.offset(), window.limit())
            .await?;
        tracing::debug!(
            count,
            page = window.number,
            num_pages = window.num_pages,
            query = ?filter.search.as_ref().map(SearchTerm::as_str),
            "Listing posts"
        );

        Ok(PostListing {
            page: Page::new(self.with_authors(posts).await?, window),
            query: filter.search,
            today,
        })
    }

    /// Replace the editable fields of a post.
    pub async fn update(
        &self,
        caller: &Caller,
        key: &PostKey,
        changes: PostChanges,
    ) -> Result<Redirect<PostRecord>, DomainError> {
        self.gate(caller, key)?;
        let mut post = self.find(key).await?;

        let fields = changes.validate().map_err(DomainError::Validation)?;
        post.apply(fields, self.clock.now());
        let saved = self
            .posts
            .update(post)
            .await
            .map_err(|e| missing_as_not_found(e, key))?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post updated");

        Ok(Redirect {
            location: self.settings.post_url(&saved),
            notice: Notice::Saved,
            value: self.with_author(saved).await?,
        })
    }

    /// Permanently remove a post.
    pub async fn delete(&self, caller: &Caller, key: &PostKey) -> Result<Redirect<Post>, DomainError> {
        self.gate(caller, key)?;
        let post = self.find(key).await?;

        self.posts
            .delete(post.id)
            .await
            .map_err(|e| missing_as_not_found(e, key))?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "Post deleted");

        Ok(Redirect {
            location: self.settings.list_url(),
            notice: Notice::Deleted,
            value: post,
        })
    }
}

fn missing_as_not_found(err: RepoError, key: &PostKey) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(key),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let settings = CatalogSettings {
            base_path: "/api/posts/".to_string(),
            ..CatalogSettings::default()
        };
        let fields = crate::domain::PostFields {
            title: "Hello".to_string(),
            content: "Body".to_string(),
            draft: false,
            publish: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let post = Post::new(Uuid::new_v4(), "hello".to_string(), fields, chrono::Utc::now());

        assert_eq!(settings.post_url(&post), "/api/posts/hello");
        assert_eq!(settings.list_url(), "/api/posts");
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::Created.to_string(), "Successfully Created");
        assert_eq!(Notice::Saved.to_string(), "Item Saved");
        assert_eq!(Notice::Deleted.to_string(), "Successfully Deleted");
    }
}
