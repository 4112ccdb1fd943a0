//! Post handlers.

use actix_web::{HttpResponse, http::header, web};

use quill_core::CatalogSettings;
use quill_core::catalog::{
    ListQuery, PAGE_REQUEST_VAR, PageWindow, PostDetail, PostListing, Redirect,
};
use quill_core::domain::{NewPost, Post, PostChanges, PostKey, PostRecord, User};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthorResponse, CreatePostRequest, ListPostsParams, PageResponse, PostDetailResponse,
    PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const LIST_TITLE: &str = "List";

fn author_response(user: User) -> AuthorResponse {
    AuthorResponse {
        id: user.id,
        full_name: user.full_name(),
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}

fn post_response(post: Post, author: Option<User>, settings: &CatalogSettings) -> PostResponse {
    PostResponse {
        url: settings.post_url(&post),
        id: post.id,
        slug: post.slug,
        title: post.title,
        content: post.content,
        draft: post.draft,
        publish: post.publish,
        user_id: post.user_id,
        author: author.map(author_response),
        timestamp: post.timestamp,
        updated: post.updated,
    }
}

fn record_response(record: PostRecord, settings: &CatalogSettings) -> PostResponse {
    post_response(record.post, record.author, settings)
}

fn page_response(window: &PageWindow) -> PageResponse {
    PageResponse {
        number: window.number,
        num_pages: window.num_pages,
        count: window.count,
        page_size: window.page_size,
        has_previous: window.has_previous(),
        has_next: window.has_next(),
        previous_page_number: window.previous_page_number(),
        next_page_number: window.next_page_number(),
        start_index: window.start_index(),
        end_index: window.end_index(),
    }
}

fn list_response(listing: PostListing, settings: &CatalogSettings) -> PostListResponse {
    let page = page_response(&listing.page.window);
    PostListResponse {
        title: LIST_TITLE.to_string(),
        posts: listing
            .page
            .items
            .into_iter()
            .map(|record| record_response(record, settings))
            .collect(),
        page,
        page_request_var: PAGE_REQUEST_VAR.to_string(),
        query: listing.query.map(|q| q.as_str().to_string()),
        today: listing.today,
    }
}

fn detail_response(detail: PostDetail, settings: &CatalogSettings) -> PostDetailResponse {
    PostDetailResponse {
        title: detail.record.post.title.clone(),
        post: record_response(detail.record, settings),
        share_string: detail.share_string,
        today: detail.today,
    }
}

/// `303 See Other` to the redirect target, carrying the notice and the value.
fn see_other<T: serde::Serialize>(location: String, notice: impl ToString, data: T) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::ok_with_message(data, notice.to_string()))
}

fn redirect_record(redirect: Redirect<PostRecord>, settings: &CatalogSettings) -> HttpResponse {
    let data = record_response(redirect.value, settings);
    see_other(redirect.location, redirect.notice, data)
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = ListQuery {
        q: params.q,
        page: params.page,
    };

    let listing = state.catalog.list(&identity.caller(), query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(list_response(
        listing,
        state.catalog.settings(),
    ))))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = NewPost {
        title: req.title.clone(),
        content: req.content.clone(),
        draft: req.draft,
        publish: req.publish,
    };

    let caller = identity.caller();
    if let Some(identity) = &identity.0 {
        state.catalog.enroll(&caller, identity.account()).await?;
    }

    let redirect = state
        .catalog
        .create(&caller, input)
        .await
        .map_err(|e| AppError::from(e).with_input(&req))?;

    Ok(redirect_record(redirect, state.catalog.settings()))
}

/// GET /api/posts/{key}
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = PostKey::parse(&path.into_inner());

    let detail = state.catalog.detail(&identity.caller(), &key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail_response(
        detail,
        state.catalog.settings(),
    ))))
}

/// PUT /api/posts/{key}
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let key = PostKey::parse(&path.into_inner());
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title.clone(),
        content: req.content.clone(),
        draft: req.draft,
        publish: req.publish,
    };

    let redirect = state
        .catalog
        .update(&identity.caller(), &key, changes)
        .await
        .map_err(|e| AppError::from(e).with_input(&req))?;

    Ok(redirect_record(redirect, state.catalog.settings()))
}

/// DELETE /api/posts/{key}
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = PostKey::parse(&path.into_inner());

    let redirect = state.catalog.delete(&identity.caller(), &key).await?;
    let data = post_response(redirect.value, None, state.catalog.settings());

    Ok(see_other(redirect.location, redirect.notice, data))
}
