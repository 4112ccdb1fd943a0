use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::PostFilter;
use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Accounts belong to the auth system; rows are only
/// written so that posts have an author to point at.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Load every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Return the stored user with `user.id`, inserting `user` if there is none.
    async fn ensure(&self, user: User) -> Result<User, RepoError> {
        if let Some(existing) = self.find_by_id(user.id).await? {
            return Ok(existing);
        }

        let id = user.id;
        match self.insert(user).await {
            Ok(saved) => Ok(saved),
            // Lost a race with a concurrent insert of the same account.
            Err(RepoError::Constraint(msg)) => self
                .find_by_id(id)
                .await?
                .ok_or(RepoError::Constraint(msg)),
            Err(e) => Err(e),
        }
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Posts matching `filter`, in the filter's order, skipping `offset` and
    /// returning at most `limit`.
    async fn fetch(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;
}
