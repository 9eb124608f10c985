//! Image uploads for posts.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};

use inkwell_shared::dto::MediaResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upload size limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/media - raw body, typed by `Content-Type`.
pub async fn upload(
    state: web::Data<AppState>,
    identity: Identity,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::UnsupportedMediaType("missing Content-Type".to_string()))?;

    let reference = state.media.put(content_type, &body).await?;
    tracing::debug!(user_id = %identity.user_id, %reference, "Image uploaded");

    Ok(HttpResponse::Created().json(MediaResponse {
        url: format!("/api/media/{reference}"),
        reference,
    }))
}

/// GET /api/media/{name}
pub async fn fetch(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let object = state
        .media
        .get(&path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("media {path} not found")))?;

    Ok(HttpResponse::Ok()
        .content_type(object.content_type)
        .body(object.bytes))
}
