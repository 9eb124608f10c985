//! Comment mutations.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use inkwell_core::forms::CommentForm;
use inkwell_core::service::{Mutation, Redirect};
use inkwell_shared::dto::CommentRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, see_other};
use crate::state::AppState;

use super::views;

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .add_comment(
            Some(&identity.viewer()),
            path.into_inner(),
            CommentForm {
                text: body.into_inner().text,
            },
            Utc::now(),
        )
        .await?;

    Ok(HttpResponse::Created().json(views::comment(comment)))
}

/// PUT /api/posts/{id}/comments/{comment_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .edit_comment(
            Some(&identity.viewer()),
            post_id,
            comment_id,
            CommentForm {
                text: body.into_inner().text,
            },
        )
        .await?;

    Ok(match outcome {
        Mutation::Applied(comment) => HttpResponse::Ok().json(views::comment(comment)),
        Mutation::Redirect(target) => see_other(&target),
    })
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .delete_comment(Some(&identity.viewer()), post_id, comment_id)
        .await?;

    let target = match outcome {
        Mutation::Applied(()) => Redirect::PostDetail(post_id),
        Mutation::Redirect(target) => target,
    };
    Ok(see_other(&target))
}
