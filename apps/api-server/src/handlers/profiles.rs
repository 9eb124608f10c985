//! Public profile pages.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use inkwell_shared::dto::{PageQuery, ProfileFeedResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::views;

/// GET /api/profile/{username}?page=
pub async fn profile_feed(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let request = state.blog.page_request(query.page.as_deref());
    let (user, page) = state
        .blog
        .profile_feed(&path, viewer.as_ref(), request, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: views::profile(user),
        posts: views::feed(page),
    }))
}
