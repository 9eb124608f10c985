//! Read paths: feeds and post detail.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, User, Viewer};
use crate::error::{DomainError, DomainResult};
use crate::feed::{FeedEntry, FeedScope, feed_predicate};
use crate::pagination::{Page, PageRequest};
use crate::visibility::is_visible;

use super::BlogService;

/// A visible post together with its comments, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl BlogService {
    /// Build a page request from a raw `?page=` value.
    pub fn page_request(&self, raw: Option<&str>) -> PageRequest {
        PageRequest::parse(raw, self.page_size)
    }

    async fn feed(
        &self,
        scope: FeedScope,
        viewer: Option<&Viewer>,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<Page<FeedEntry>> {
        let predicate = feed_predicate(scope, viewer, now);
        tracing::debug!(?scope, page = request.number, "Composing feed");
        Ok(self.repos.posts.find_feed(&predicate, request).await?)
    }

    pub async fn global_feed(
        &self,
        viewer: Option<&Viewer>,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<Page<FeedEntry>> {
        self.feed(FeedScope::Global, viewer, request, now).await
    }

    /// Posts of a published category. Unknown or unpublished slugs are not found.
    pub async fn category_feed(
        &self,
        slug: &str,
        viewer: Option<&Viewer>,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<(Category, Page<FeedEntry>)> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let page = self
            .feed(FeedScope::Category(category.id), viewer, request, now)
            .await?;
        Ok((category, page))
    }

    /// Posts written by `username`; the author sees drafts and scheduled posts too.
    pub async fn profile_feed(
        &self,
        username: &str,
        viewer: Option<&Viewer>,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<(User, Page<FeedEntry>)> {
        let profile = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let page = self
            .feed(FeedScope::Author(profile.id), viewer, request, now)
            .await?;
        Ok((profile, page))
    }

    /// Load a post the viewer may see. Hidden posts are reported as missing.
    pub(super) async fn visible_post(
        &self,
        id: Uuid,
        viewer: Option<&Viewer>,
        now: DateTime<Utc>,
    ) -> DomainResult<Post> {
        let post = self
            .repos
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        let category = match post.category_id {
            Some(category_id) => self.repos.categories.find_by_id(category_id).await?,
            None => None,
        };

        if !is_visible(&post, category.as_ref(), viewer, now) {
            tracing::debug!(post_id = %id, "Post hidden from viewer");
            return Err(DomainError::not_found("post", id));
        }
        Ok(post)
    }

    pub async fn post_detail(
        &self,
        id: Uuid,
        viewer: Option<&Viewer>,
        now: DateTime<Utc>,
    ) -> DomainResult<PostDetail> {
        let post = self.visible_post(id, viewer, now).await?;
        let comments = self.repos.comments.find_by_post(post.id).await?;
        Ok(PostDetail { post, comments })
    }
}
