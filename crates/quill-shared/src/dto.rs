//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a post. Missing fields are reported by validation, not
/// by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub draft: Option<bool>,
    pub publish: Option<NaiveDate>,
}

/// Request to edit a post. Unknown fields (`id`, `slug`, `user_id`, ...) are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub draft: Option<bool>,
    pub publish: Option<NaiveDate>,
}

/// Query string of the listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Public information about a post's author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub publish: NaiveDate,
    pub user_id: Uuid,
    pub author: Option<AuthorResponse>,
    pub timestamp: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Canonical URL of the post.
    pub url: String,
}

/// Navigation metadata of a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub page_size: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
    pub start_index: u64,
    pub end_index: u64,
}

/// Response of the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub title: String,
    pub posts: Vec<PostResponse>,
    pub page: PageResponse,
    /// Name of the query parameter selecting the page.
    pub page_request_var: String,
    pub query: Option<String>,
    pub today: NaiveDate,
}

/// Response of the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub title: String,
    pub post: PostResponse,
    pub share_string: String,
    pub today: NaiveDate,
}
