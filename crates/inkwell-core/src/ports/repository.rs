use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, PostKey, User};
use crate::error::RepoError;
use crate::feed::FeedEntry;
use crate::pagination::{Page, PageRequest};
use crate::visibility::PostPredicate;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-constraint violations are `RepoError::Constraint`,
    /// dangling parent ids are `RepoError::ForeignKey`.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the cascade rules of its relations.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// All categories, optionally only published ones, ordered by title.
    async fn list(&self, published_only: bool) -> Result<Vec<Category>, RepoError>;
}

#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {
    async fn list(&self, published_only: bool) -> Result<Vec<Location>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `predicate`, annotated with comment counts, newest
    /// `pub_date` first (ties in insertion order), cut to the clamped page.
    async fn find_feed(
        &self,
        predicate: &PostPredicate,
        request: PageRequest,
    ) -> Result<Page<FeedEntry>, RepoError>;

    /// The id of a post sharing `key`, ignoring `exclude`.
    async fn find_duplicate(
        &self,
        key: &PostKey,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
