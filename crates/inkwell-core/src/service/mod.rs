//! Application services - the operations the HTTP layer exposes.
//!
//! [`BlogService`] composes feeds and gates post/comment mutations,
//! [`AccountService`] handles registration and profiles, and
//! [`CatalogService`] manages categories and locations for staff.
//! Every method that depends on the current time takes `now` from the caller
//! so one request sees one consistent timestamp.

mod accounts;
mod catalog;
mod comments;
mod feed;
mod posts;

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, Viewer};
use crate::error::{DomainError, DomainResult};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use feed::PostDetail;

/// Handles to every repository the services need.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

/// Where a viewer is sent after a mutation that was not (or was) applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    PostDetail(Uuid),
    Profile(String),
}

/// Result of an ownership-gated mutation.
///
/// A failed ownership check is not an error: nothing changes and the
/// viewer is sent to the canonical view instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Applied(T),
    Redirect(Redirect),
}

impl<T> Mutation<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }
}

/// Feed composition, post detail and the post/comment mutation gateway.
#[derive(Clone)]
pub struct BlogService {
    repos: Repositories,
    page_size: u64,
}

impl BlogService {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// The viewer's account as stored now. A token outliving its account
    /// no longer authenticates anyone.
    async fn current_user(&self, viewer: &Viewer) -> DomainResult<User> {
        self.repos
            .users
            .find_by_id(viewer.user_id)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }
}

fn require_viewer(viewer: Option<&Viewer>) -> DomainResult<&Viewer> {
    viewer.ok_or(DomainError::Unauthenticated)
}
