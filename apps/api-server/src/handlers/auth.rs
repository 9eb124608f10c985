//! Registration, login and the caller's own account.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::User;
use inkwell_core::forms::{ProfileForm, RegistrationForm};
use inkwell_core::ports::STAFF_ROLE;
use inkwell_shared::dto::{AuthResponse, LoginRequest, ProfileRequest, RegisterUserRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::views;

fn issue_token(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let roles = if user.is_staff {
        vec![STAFF_ROLE.to_string()]
    } else {
        Vec::new()
    };

    let access_token = state
        .tokens
        .generate_token(user.id, &user.username, roles)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        user: views::user(user),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .accounts
        .register(RegistrationForm {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(issue_token(&state, user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .accounts
        .authenticate(&req.username, &req.password)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(HttpResponse::Ok().json(issue_token(&state, user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.accounts.current(Some(&identity.viewer())).await?;
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// PUT /api/auth/me
pub async fn update_me(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .accounts
        .update_profile(
            Some(&identity.viewer()),
            ProfileForm {
                first_name: req.first_name,
                last_name: req.last_name,
                username: req.username,
                email: req.email,
            },
        )
        .await?;

    // The old token still names the previous username.
    Ok(HttpResponse::Ok().json(issue_token(&state, user)?))
}

/// DELETE /api/auth/me
pub async fn delete_me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    state.accounts.delete_account(Some(&identity.viewer())).await?;
    Ok(HttpResponse::NoContent().finish())
}
