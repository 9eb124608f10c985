//! Global feed, post detail and post mutations.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use inkwell_core::forms::PostForm;
use inkwell_core::service::{Mutation, Redirect};
use inkwell_shared::dto::{PageQuery, PostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppResult, redirect_location, see_other};
use crate::state::AppState;

use super::views;

fn post_form(req: PostRequest) -> PostForm {
    PostForm {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        category_id: req.category_id,
        location_id: req.location_id,
        image: req.image,
        is_published: req.is_published,
    }
}

/// GET /api/posts?page=
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let request = state.blog.page_request(query.page.as_deref());
    let page = state
        .blog
        .global_feed(viewer.as_ref(), request, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(views::feed(page)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .create_post(Some(&identity.viewer()), post_form(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            redirect_location(&Redirect::PostDetail(post.id)),
        ))
        .json(views::post(post)))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let detail = state
        .blog
        .post_detail(path.into_inner(), viewer.as_ref(), Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(views::post_detail(detail)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .edit_post(
            Some(&identity.viewer()),
            path.into_inner(),
            post_form(body.into_inner()),
        )
        .await?;

    Ok(match outcome {
        Mutation::Applied(post) => HttpResponse::Ok().json(views::post(post)),
        Mutation::Redirect(target) => see_other(&target),
    })
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .delete_post(Some(&identity.viewer()), path.into_inner())
        .await?;

    let target = match outcome {
        Mutation::Applied(profile) => profile,
        Mutation::Redirect(target) => target,
    };
    Ok(see_other(&target))
}
