//! Categories and locations: public listings, category feeds and staff admin.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use inkwell_core::forms::{CategoryForm, LocationForm};
use inkwell_shared::dto::{CategoryFeedResponse, CategoryRequest, LocationRequest, PageQuery};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::views;

fn category_form(req: CategoryRequest) -> CategoryForm {
    CategoryForm {
        title: req.title,
        description: req.description,
        slug: req.slug,
        is_published: req.is_published,
    }
}

fn location_form(req: LocationRequest) -> LocationForm {
    LocationForm {
        name: req.name,
        is_published: req.is_published,
    }
}

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.catalog.published_categories().await?;
    let body: Vec<_> = categories.into_iter().map(views::category).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/locations
pub async fn list_locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.catalog.published_locations().await?;
    let body: Vec<_> = locations.into_iter().map(views::location).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/categories/{slug}/posts?page=
pub async fn category_feed(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let request = state.blog.page_request(query.page.as_deref());
    let (category, page) = state
        .blog
        .category_feed(&path, viewer.as_ref(), request, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: views::category(category),
        posts: views::feed(page),
    }))
}

/// POST /api/admin/categories
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .catalog
        .create_category(Some(&identity.viewer()), category_form(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(views::category(category)))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .catalog
        .update_category(
            Some(&identity.viewer()),
            path.into_inner(),
            category_form(body.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(views::category(category)))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .catalog
        .delete_category(Some(&identity.viewer()), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/admin/locations
pub async fn create_location(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    let location = state
        .catalog
        .create_location(Some(&identity.viewer()), location_form(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(views::location(location)))
}

/// PUT /api/admin/locations/{id}
pub async fn update_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    let location = state
        .catalog
        .update_location(
            Some(&identity.viewer()),
            path.into_inner(),
            location_form(body.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(views::location(location)))
}

/// DELETE /api/admin/locations/{id}
pub async fn delete_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .catalog
        .delete_location(Some(&identity.viewer()), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
