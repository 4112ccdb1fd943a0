use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, Value};
use uuid::Uuid;

use quill_core::catalog::{ListOrder, PostFilter, SearchTerm};
use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

use super::entity::post;
use super::postgres_repo::{PostgresPostRepository, listing_query};

fn post_model(slug: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        slug: slug.to_owned(),
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        draft: false,
        publish: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        timestamp: now.into(),
        updated: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("test-post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_post_by_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("hello-world")]])
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let found = repo.find_by_slug("hello-world").await.unwrap();
    assert_eq!(found.map(|p| p.slug), Some("hello-world".to_string()));

    let missing = repo.find_by_slug("nope").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_slug_exists_counts_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(1)]])
        .append_query_results(vec![vec![count_row(0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.slug_exists("taken").await.unwrap());
    assert!(!repo.slug_exists("free").await.unwrap());
}

#[tokio::test]
async fn test_count_with_filter() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let filter = PostFilter {
        visible_on: NaiveDate::from_ymd_opt(2024, 6, 1),
        ..PostFilter::default()
    };

    assert_eq!(repo.count(&filter).await.unwrap(), 7);
}

#[tokio::test]
async fn test_fetch_returns_models_in_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("first"), post_model("second")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.fetch(&PostFilter::default(), 0, 10).await.unwrap();
    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["first", "second"]);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[test]
fn test_listing_query_without_filter() {
    let sql = listing_query(&PostFilter::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(!sql.contains("WHERE"));
    assert!(sql.contains(r#"ORDER BY "posts"."timestamp" ASC"#));
}

#[test]
fn test_listing_query_visibility_and_search() {
    let filter = PostFilter {
        visible_on: NaiveDate::from_ymd_opt(2024, 6, 1),
        search: SearchTerm::parse(Some("  Rust ")),
        order: ListOrder::NewestFirst,
    };

    let sql = listing_query(&filter)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."draft" ="#));
    assert!(sql.contains(r#""posts"."publish" <="#));
    assert!(sql.contains("LOWER"));
    assert!(sql.contains("'%rust%'"));
    assert!(sql.contains("IN (SELECT"));
    assert!(sql.contains(r#"ORDER BY "posts"."timestamp" DESC"#));
}
