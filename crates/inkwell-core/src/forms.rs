//! Input forms and their field-level validation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Longest accepted title, category title or location name.
pub const MAX_TITLE_LENGTH: usize = 256;
/// Longest accepted username.
pub const MAX_USERNAME_LENGTH: usize = 150;
/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Key used for errors that do not belong to one field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name -> messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

fn require_text(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
    }
}

fn require_short_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    require_text(errors, field, value);
    if value.chars().count() > max {
        errors.add(field, format!("Ensure this value has at most {max} characters."));
    }
}

/// Create/edit payload for a post. The author is never part of it.
#[derive(Debug, Clone)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub image: Option<String>,
    pub is_published: bool,
}

impl PostForm {
    /// Field-shape checks; references are checked against the store by the service.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require_short_text(&mut errors, "title", &self.title, MAX_TITLE_LENGTH);
        require_text(&mut errors, "text", &self.text);
        if let Some(image) = &self.image {
            if image.trim().is_empty() {
                errors.add("image", "Image reference must not be blank.");
            }
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "text", &self.text);
        errors
    }
}

fn validate_username(errors: &mut ValidationErrors, username: &str) {
    require_short_text(errors, "username", username, MAX_USERNAME_LENGTH);
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if !username.chars().all(allowed) {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}

fn validate_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() || !email.contains('@') {
        errors.add("email", "Enter a valid email address.");
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_username(&mut errors, &self.username);
        validate_email(&mut errors, &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters."),
            );
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl ProfileForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_username(&mut errors, &self.username);
        validate_email(&mut errors, &self.email);
        if self.first_name.chars().count() > MAX_USERNAME_LENGTH {
            errors.add("first_name", "Ensure this value has at most 150 characters.");
        }
        if self.last_name.chars().count() > MAX_USERNAME_LENGTH {
            errors.add("last_name", "Ensure this value has at most 150 characters.");
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct CategoryForm {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl CategoryForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require_short_text(&mut errors, "title", &self.title, MAX_TITLE_LENGTH);
        require_text(&mut errors, "description", &self.description);
        require_text(&mut errors, "slug", &self.slug);
        let slug_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if !self.slug.chars().all(slug_char) {
            errors.add(
                "slug",
                "Only Latin letters, digits, hyphens and underscores are allowed.",
            );
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct LocationForm {
    pub name: String,
    pub is_published: bool,
}

impl LocationForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require_short_text(&mut errors, "name", &self.name, MAX_TITLE_LENGTH);
        errors
    }
}
