//! Post mutations.

use uuid::Uuid;

use crate::authz::{Action, can_mutate};
use crate::domain::{Post, PostKey, Viewer};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::forms::{NON_FIELD_ERRORS, PostForm, ValidationErrors};

use super::{BlogService, Mutation, Redirect, require_viewer};

const DUPLICATE_POST: &str =
    "A post with this title, text, category, location and publication date already exists.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

fn duplicate_post() -> DomainError {
    DomainError::Validation(ValidationErrors::single(NON_FIELD_ERRORS, DUPLICATE_POST))
}

fn form_key(form: &PostForm) -> PostKey {
    PostKey {
        title: form.title.clone(),
        text: form.text.clone(),
        category_id: form.category_id,
        location_id: form.location_id,
        pub_date: form.pub_date,
    }
}

fn apply_form(post: &mut Post, form: PostForm) {
    post.title = form.title;
    post.text = form.text;
    post.pub_date = form.pub_date;
    post.category_id = form.category_id;
    post.location_id = form.location_id;
    post.image = form.image;
    post.is_published = form.is_published;
}

/// Store-level uniqueness races surface as the same validation error.
fn constraint_to_validation(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => duplicate_post(),
        other => other.into(),
    }
}

impl BlogService {
    /// Field checks, reference checks, then the uniqueness check.
    async fn validate_post_form(&self, form: &PostForm, exclude: Option<Uuid>) -> DomainResult<()> {
        let mut errors = form.validate();

        if let Some(category_id) = form.category_id {
            if self.repos.categories.find_by_id(category_id).await?.is_none() {
                errors.add("category_id", INVALID_CHOICE);
            }
        }
        if let Some(location_id) = form.location_id {
            if self.repos.locations.find_by_id(location_id).await?.is_none() {
                errors.add("location_id", INVALID_CHOICE);
            }
        }

        if errors.is_empty()
            && self
                .repos
                .posts
                .find_duplicate(&form_key(form), exclude)
                .await?
                .is_some()
        {
            errors.add(NON_FIELD_ERRORS, DUPLICATE_POST);
        }

        errors.into_result().map_err(DomainError::Validation)
    }

    /// Create a post authored by the viewer.
    pub async fn create_post(&self, viewer: Option<&Viewer>, form: PostForm) -> DomainResult<Post> {
        let viewer = require_viewer(viewer)?;
        let author = self.current_user(viewer).await?;
        self.validate_post_form(&form, None).await?;

        let mut post = Post::new(author.id, String::new(), String::new(), form.pub_date);
        apply_form(&mut post, form);

        let post = self
            .repos
            .posts
            .create(post)
            .await
            .map_err(constraint_to_validation)?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    /// Edit a post. Anyone but the author is redirected to the post unchanged.
    pub async fn edit_post(
        &self,
        viewer: Option<&Viewer>,
        id: Uuid,
        form: PostForm,
    ) -> DomainResult<Mutation<Post>> {
        let viewer = require_viewer(viewer)?;
        let mut post = self
            .repos
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        if !can_mutate(viewer, &post, Action::Edit) {
            tracing::warn!(post_id = %id, viewer_id = %viewer.user_id, "Edit by non-author ignored");
            return Ok(Mutation::Redirect(Redirect::PostDetail(id)));
        }

        self.validate_post_form(&form, Some(id)).await?;
        apply_form(&mut post, form);

        let post = self
            .repos
            .posts
            .update(post)
            .await
            .map_err(constraint_to_validation)?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(Mutation::Applied(post))
    }

    /// Delete a post as its author or as staff; others are redirected to it.
    ///
    /// On success the viewer is sent to their own profile under the
    /// username they hold now.
    pub async fn delete_post(
        &self,
        viewer: Option<&Viewer>,
        id: Uuid,
    ) -> DomainResult<Mutation<Redirect>> {
        let viewer = require_viewer(viewer)?;
        let post = self
            .repos
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        if !can_mutate(viewer, &post, Action::Delete) {
            tracing::warn!(post_id = %id, viewer_id = %viewer.user_id, "Delete by non-owner ignored");
            return Ok(Mutation::Redirect(Redirect::PostDetail(id)));
        }

        let user = self.current_user(viewer).await?;
        self.repos.posts.delete(id).await?;
        tracing::info!(post_id = %id, viewer_id = %viewer.user_id, "Post deleted");
        Ok(Mutation::Applied(Redirect::Profile(user.username)))
    }
}
