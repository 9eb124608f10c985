//! Registration, login and profile management.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{User, Viewer};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::forms::{ProfileForm, RegistrationForm, ValidationErrors};
use crate::ports::{PasswordService, UserRepository};

use super::require_viewer;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

fn username_taken() -> DomainError {
    DomainError::Validation(ValidationErrors::single("username", USERNAME_TAKEN))
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn register(&self, form: RegistrationForm) -> DomainResult<User> {
        let mut errors = form.validate();
        if !errors.has("username") && self.users.find_by_username(&form.username).await?.is_some()
        {
            errors.add("username", USERNAME_TAKEN);
        }
        errors.into_result().map_err(DomainError::Validation)?;

        let password_hash = self.passwords.hash(&form.password)?;
        let user = self
            .users
            .create(User::new(form.username, form.email, password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => username_taken(),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check a username/password pair.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<User> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::InvalidCredentials);
        }
        Ok(user)
    }

    /// The viewer's own account.
    pub async fn current(&self, viewer: Option<&Viewer>) -> DomainResult<User> {
        let viewer = require_viewer(viewer)?;
        self.users
            .find_by_id(viewer.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", viewer.user_id))
    }

    pub async fn update_profile(
        &self,
        viewer: Option<&Viewer>,
        form: ProfileForm,
    ) -> DomainResult<User> {
        let mut user = self.current(viewer).await?;

        let mut errors = form.validate();
        if !errors.has("username") && form.username != user.username {
            if let Some(other) = self.users.find_by_username(&form.username).await? {
                if other.id != user.id {
                    errors.add("username", USERNAME_TAKEN);
                }
            }
        }
        errors.into_result().map_err(DomainError::Validation)?;

        user.first_name = form.first_name;
        user.last_name = form.last_name;
        user.username = form.username;
        user.email = form.email;
        user.updated_at = Utc::now();

        let user = self.users.update(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => username_taken(),
            other => other.into(),
        })?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Remove the viewer's account together with their posts and comments.
    pub async fn delete_account(&self, viewer: Option<&Viewer>) -> DomainResult<()> {
        let viewer = require_viewer(viewer)?;
        self.users.delete(viewer.user_id).await?;
        tracing::info!(user_id = %viewer.user_id, "Account deleted");
        Ok(())
    }
}
