use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account that authors posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// Staff accounts may delete any post or comment.
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn as_viewer(&self) -> Viewer {
        Viewer {
            user_id: self.id,
            is_staff: self.is_staff,
        }
    }
}

/// The account behind the current request.
///
/// Anonymous requests carry `Option::<Viewer>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Uuid,
    pub is_staff: bool,
}

impl Viewer {
    pub fn new(user_id: Uuid, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }

    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
