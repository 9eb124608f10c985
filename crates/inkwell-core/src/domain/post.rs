use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry, possibly scheduled for the future.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    /// Publication moment; a future value schedules the post.
    pub pub_date: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    /// Reference into the media store.
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new published post owned by `author_id`.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            pub_date,
            category_id: None,
            location_id: None,
            image: None,
            is_published: true,
            created_at: Utc::now(),
        }
    }

    /// The fields that must be unique across all posts.
    pub fn key(&self) -> PostKey {
        PostKey {
            title: self.title.clone(),
            text: self.text.clone(),
            category_id: self.category_id,
            location_id: self.location_id,
            pub_date: self.pub_date,
        }
    }
}

/// `(title, text, category, location, pub_date)` - no two posts may share it.
///
/// Absent category and location compare equal to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostKey {
    pub title: String,
    pub text: String,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub pub_date: DateTime<Utc>,
}

impl PostKey {
    pub fn matches(&self, post: &Post) -> bool {
        self.title == post.title
            && self.text == post.text
            && self.category_id == post.category_id
            && self.location_id == post.location_id
            && self.pub_date == post.pub_date
    }
}
