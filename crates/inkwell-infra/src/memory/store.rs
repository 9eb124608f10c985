//! In-memory repositories - used when no database is configured and in tests.
//!
//! All tables live behind one async `RwLock`, so uniqueness checks and the
//! insert they guard happen under the same write guard.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{Category, Comment, Location, Post, PostKey, User};
use inkwell_core::error::RepoError;
use inkwell_core::feed::{FeedEntry, compose_feed};
use inkwell_core::pagination::{Page, PageRequest};
use inkwell_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};
use inkwell_core::service::Repositories;
use inkwell_core::visibility::PostPredicate;

/// Rows in insertion order.
#[derive(Default)]
pub(crate) struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn delete_post_rows(&mut self, keep: impl Fn(&Post) -> bool) {
        let removed: Vec<Uuid> = self
            .posts
            .iter()
            .filter(|p| !keep(p))
            .map(|p| p.id)
            .collect();
        self.posts.retain(|p| keep(p));
        self.comments.retain(|c| !removed.contains(&c.post_id));
    }
}

/// Fails like a foreign key named `constraint` unless `id` is a row of `P`.
fn require_parent<P: Record>(tables: &Tables, id: Uuid, constraint: &str) -> Result<(), RepoError> {
    if P::rows(tables).iter().any(|r| r.id() == id) {
        Ok(())
    } else {
        Err(RepoError::ForeignKey(constraint.to_string()))
    }
}

/// A row type stored in [`Tables`].
pub(crate) trait Record: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn id(&self) -> Uuid;
    fn rows(tables: &Tables) -> &Vec<Self>;
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;

    /// Reject `self` if it clashes with a unique column of another row.
    fn check_unique(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Reject `self` if it points at a parent row that does not exist.
    fn check_references(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Apply the relation rules after the row `id` was removed.
    fn cascade(_id: Uuid, _tables: &mut Tables) {}
}

impl Record for User {
    const NAME: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.users
    }
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.users
    }
    fn check_unique(&self, tables: &Tables) -> Result<(), RepoError> {
        if tables
            .users
            .iter()
            .any(|u| u.id != self.id && u.username == self.username)
        {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }
        Ok(())
    }
    fn cascade(id: Uuid, tables: &mut Tables) {
        tables.delete_post_rows(|p| p.author_id != id);
        tables.comments.retain(|c| c.author_id != id);
    }
}

impl Record for Category {
    const NAME: &'static str = "categories";

    fn id(&self) -> Uuid {
        self.id
    }
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.categories
    }
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.categories
    }
    fn check_unique(&self, tables: &Tables) -> Result<(), RepoError> {
        if tables
            .categories
            .iter()
            .any(|c| c.id != self.id && c.slug == self.slug)
        {
            return Err(RepoError::Constraint("categories_slug_key".to_string()));
        }
        Ok(())
    }
    fn cascade(id: Uuid, tables: &mut Tables) {
        for post in tables.posts.iter_mut().filter(|p| p.category_id == Some(id)) {
            post.category_id = None;
        }
    }
}

impl Record for Location {
    const NAME: &'static str = "locations";

    fn id(&self) -> Uuid {
        self.id
    }
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.locations
    }
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.locations
    }
    fn cascade(id: Uuid, tables: &mut Tables) {
        for post in tables.posts.iter_mut().filter(|p| p.location_id == Some(id)) {
            post.location_id = None;
        }
    }
}

impl Record for Post {
    const NAME: &'static str = "posts";

    fn id(&self) -> Uuid {
        self.id
    }
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.posts
    }
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.posts
    }
    fn check_unique(&self, tables: &Tables) -> Result<(), RepoError> {
        let key = self.key();
        if tables.posts.iter().any(|p| p.id != self.id && key.matches(p)) {
            return Err(RepoError::Constraint("unique_post".to_string()));
        }
        Ok(())
    }
    fn check_references(&self, tables: &Tables) -> Result<(), RepoError> {
        require_parent::<User>(tables, self.author_id, "fk_post_author")?;
        if let Some(category_id) = self.category_id {
            require_parent::<Category>(tables, category_id, "fk_post_category")?;
        }
        if let Some(location_id) = self.location_id {
            require_parent::<Location>(tables, location_id, "fk_post_location")?;
        }
        Ok(())
    }
    fn cascade(id: Uuid, tables: &mut Tables) {
        tables.comments.retain(|c| c.post_id != id);
    }
}

impl Record for Comment {
    const NAME: &'static str = "comments";

    fn id(&self) -> Uuid {
        self.id
    }
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.comments
    }
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.comments
    }
    fn check_references(&self, tables: &Tables) -> Result<(), RepoError> {
        require_parent::<Post>(tables, self.post_id, "fk_comment_post")?;
        require_parent::<User>(tables, self.author_id, "fk_comment_author")
    }
}

/// Generic in-memory repository over one table.
pub struct InMemoryRepository<R> {
    tables: Arc<RwLock<Tables>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> InMemoryRepository<R> {
    fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            _record: PhantomData,
        }
    }
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;
pub type InMemoryLocationRepository = InMemoryRepository<Location>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

#[async_trait]
impl<R: Record> BaseRepository<R, Uuid> for InMemoryRepository<R> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, RepoError> {
        let tables = self.tables.read().await;
        Ok(R::rows(&tables).iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, entity: R) -> Result<R, RepoError> {
        let mut tables = self.tables.write().await;
        if R::rows(&tables).iter().any(|r| r.id() == entity.id()) {
            return Err(RepoError::Constraint(format!("{}_pkey", R::NAME)));
        }
        entity.check_references(&tables)?;
        entity.check_unique(&tables)?;
        R::rows_mut(&mut tables).push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: R) -> Result<R, RepoError> {
        let mut tables = self.tables.write().await;
        let index = R::rows(&tables)
            .iter()
            .position(|r| r.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        entity.check_references(&tables)?;
        entity.check_unique(&tables)?;
        R::rows_mut(&mut tables)[index] = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let rows = R::rows_mut(&mut tables);
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        R::cascade(id, &mut tables);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list(&self, published_only: bool) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| !published_only || c.is_published)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(categories)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn list(&self, published_only: bool) -> Result<Vec<Location>, RepoError> {
        let tables = self.tables.read().await;
        let mut locations: Vec<Location> = tables
            .locations
            .iter()
            .filter(|l| !published_only || l.is_published)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_feed(
        &self,
        predicate: &PostPredicate,
        request: PageRequest,
    ) -> Result<Page<FeedEntry>, RepoError> {
        let tables = self.tables.read().await;

        let categories: HashMap<Uuid, Category> = tables
            .categories
            .iter()
            .map(|c| (c.id, c.clone()))
            .collect();

        let mut comment_counts: HashMap<Uuid, u64> = HashMap::new();
        for comment in &tables.comments {
            *comment_counts.entry(comment.post_id).or_insert(0) += 1;
        }

        Ok(compose_feed(
            tables.posts.iter().cloned(),
            &categories,
            &comment_counts,
            predicate,
            request,
        ))
    }

    async fn find_duplicate(
        &self,
        key: &PostKey,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| Some(p.id) != exclude && key.matches(p))
            .map(|p| p.id))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

/// Shared in-memory tables handing out repositories over them.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(InMemoryUserRepository::new(self.tables.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(self.tables.clone())),
            locations: Arc::new(InMemoryLocationRepository::new(self.tables.clone())),
            posts: Arc::new(InMemoryPostRepository::new(self.tables.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(self.tables.clone())),
        }
    }
}
