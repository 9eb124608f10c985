//! Comment mutations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::authz::{Action, can_mutate};
use crate::domain::{Comment, Viewer};
use crate::error::{DomainError, DomainResult};
use crate::forms::CommentForm;

use super::{BlogService, Mutation, Redirect, require_viewer};

impl BlogService {
    /// Attach a comment to a post the viewer can see.
    pub async fn add_comment(
        &self,
        viewer: Option<&Viewer>,
        post_id: Uuid,
        form: CommentForm,
        now: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        let viewer = require_viewer(viewer)?;
        let author = self.current_user(viewer).await?;
        let post = self.visible_post(post_id, Some(viewer), now).await?;
        form.validate()
            .into_result()
            .map_err(DomainError::Validation)?;

        let comment = self
            .repos
            .comments
            .create(Comment::new(post.id, author.id, form.text))
            .await?;

        tracing::info!(comment_id = %comment.id, post_id = %post.id, "Comment added");
        Ok(comment)
    }

    /// The comment `comment_id` as long as it hangs off post `post_id`.
    async fn comment_on(&self, post_id: Uuid, comment_id: Uuid) -> DomainResult<Comment> {
        if self.repos.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("post", post_id));
        }
        self.repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    pub async fn edit_comment(
        &self,
        viewer: Option<&Viewer>,
        post_id: Uuid,
        comment_id: Uuid,
        form: CommentForm,
    ) -> DomainResult<Mutation<Comment>> {
        let viewer = require_viewer(viewer)?;
        let mut comment = self.comment_on(post_id, comment_id).await?;

        if !can_mutate(viewer, &comment, Action::Edit) {
            tracing::warn!(%comment_id, viewer_id = %viewer.user_id, "Comment edit by non-author ignored");
            return Ok(Mutation::Redirect(Redirect::PostDetail(post_id)));
        }

        form.validate()
            .into_result()
            .map_err(DomainError::Validation)?;
        comment.text = form.text;

        let comment = self.repos.comments.update(comment).await?;
        tracing::info!(%comment_id, "Comment updated");
        Ok(Mutation::Applied(comment))
    }

    pub async fn delete_comment(
        &self,
        viewer: Option<&Viewer>,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> DomainResult<Mutation<()>> {
        let viewer = require_viewer(viewer)?;
        let comment = self.comment_on(post_id, comment_id).await?;

        if !can_mutate(viewer, &comment, Action::Delete) {
            tracing::warn!(%comment_id, viewer_id = %viewer.user_id, "Comment delete by non-owner ignored");
            return Ok(Mutation::Redirect(Redirect::PostDetail(post_id)));
        }

        self.repos.comments.delete(comment_id).await?;
        tracing::info!(%comment_id, "Comment deleted");
        Ok(Mutation::Applied(()))
    }
}
