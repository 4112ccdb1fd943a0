//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, IntoSimpleExpr, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use uuid::Uuid;

use quill_core::catalog::{ListOrder, PostFilter};
use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Escape LIKE wildcards so the search term matches literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `LOWER(column) LIKE pattern`, with the pattern already lower-cased.
fn contains_ci<C: ColumnTrait>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(column.into_simple_expr())).like(LikeExpr::new(pattern).escape('\\'))
}

/// The WHERE clause of a listing.
///
/// Author names are matched through a subquery rather than a join, so a post
/// is returned once even when several fields match.
pub(crate) fn listing_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(today) = filter.visible_on {
        condition = condition
            .add(post::Column::Draft.eq(false))
            .add(post::Column::Publish.lte(today));
    }

    if let Some(term) = &filter.search {
        let pattern = like_pattern(term.needle());
        let authors = Query::select()
            .column(user::Column::Id)
            .from(UserEntity)
            .cond_where(
                Condition::any()
                    .add(contains_ci(user::Column::FirstName, &pattern))
                    .add(contains_ci(user::Column::LastName, &pattern)),
            )
            .to_owned();

        condition = condition.add(
            Condition::any()
                .add(contains_ci(post::Column::Title, &pattern))
                .add(contains_ci(post::Column::Content, &pattern))
                .add(post::Column::UserId.in_subquery(authors)),
        );
    }

    condition
}

/// Filtered and ordered listing query, without paging.
pub(crate) fn listing_query(filter: &PostFilter) -> Select<PostEntity> {
    let query = PostEntity::find().filter(listing_condition(filter));
    match filter.order {
        ListOrder::Insertion => query
            .order_by_asc(post::Column::Timestamp)
            .order_by_asc(post::Column::Id),
        ListOrder::NewestFirst => query
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        tracing::debug!(count = ids.len(), "Loading authors");

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(count > 0)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(listing_condition(filter))
            .count(&self.db)
            .await
            .map_err(repo_error)
    }

    async fn fetch(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = listing_query(filter)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
