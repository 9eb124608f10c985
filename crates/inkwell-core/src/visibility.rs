//! Post visibility rules expressed as composable predicates.
//!
//! A [`PostPredicate`] is evaluated in memory by [`PostPredicate::evaluate`]
//! and translated into SQL by the PostgreSQL repository, so both stores
//! agree on what a viewer may see.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post, Viewer};

/// A filter over posts, joined with their (optional) category.
#[derive(Debug, Clone, PartialEq)]
pub enum PostPredicate {
    /// `post.is_published`
    Published,
    /// `post.pub_date <= now`
    ReleasedBy(DateTime<Utc>),
    /// The post has no category, or its category is published.
    CategoryPublished,
    InCategory(Uuid),
    ByAuthor(Uuid),
    All(Vec<PostPredicate>),
    Any(Vec<PostPredicate>),
}

impl PostPredicate {
    /// Matches every post.
    pub fn always() -> Self {
        PostPredicate::All(Vec::new())
    }

    pub fn and(self, other: PostPredicate) -> Self {
        match self {
            PostPredicate::All(mut parts) => {
                parts.push(other);
                PostPredicate::All(parts)
            }
            first => PostPredicate::All(vec![first, other]),
        }
    }

    pub fn or(self, other: PostPredicate) -> Self {
        match self {
            PostPredicate::Any(mut parts) => {
                parts.push(other);
                PostPredicate::Any(parts)
            }
            first => PostPredicate::Any(vec![first, other]),
        }
    }

    /// Evaluate against a post and the category it references, if any.
    ///
    /// `category` must be the category whose id is `post.category_id`.
    pub fn evaluate(&self, post: &Post, category: Option<&Category>) -> bool {
        match self {
            PostPredicate::Published => post.is_published,
            PostPredicate::ReleasedBy(now) => post.pub_date <= *now,
            PostPredicate::CategoryPublished => match (post.category_id, category) {
                (None, _) => true,
                (Some(_), Some(category)) => category.is_published,
                // Dangling reference: treat like a missing category row in a join.
                (Some(_), None) => false,
            },
            PostPredicate::InCategory(id) => post.category_id == Some(*id),
            PostPredicate::ByAuthor(id) => post.author_id == *id,
            PostPredicate::All(parts) => parts.iter().all(|p| p.evaluate(post, category)),
            PostPredicate::Any(parts) => parts.iter().any(|p| p.evaluate(post, category)),
        }
    }
}

/// Published, released by `now`, and not inside an unpublished category.
pub fn publicly_visible(now: DateTime<Utc>) -> PostPredicate {
    PostPredicate::Published
        .and(PostPredicate::ReleasedBy(now))
        .and(PostPredicate::CategoryPublished)
}

/// What `viewer` may see: public posts plus everything they authored.
pub fn visible_to(viewer: Option<&Viewer>, now: DateTime<Utc>) -> PostPredicate {
    match viewer {
        Some(viewer) => publicly_visible(now).or(PostPredicate::ByAuthor(viewer.user_id)),
        None => publicly_visible(now),
    }
}

/// Whether a single post is visible to `viewer` at `now`.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: Option<&Viewer>,
    now: DateTime<Utc>,
) -> bool {
    visible_to(viewer, now).evaluate(post, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()
    }

    fn post_by(author: Uuid) -> Post {
        Post::new(author, "T".into(), "Body".into(), now() - Duration::days(1))
    }

    fn category(is_published: bool) -> Category {
        let mut c = Category::new("Travel".into(), "Trips".into(), "travel".into());
        c.is_published = is_published;
        c
    }

    #[test]
    fn test_published_post_is_visible_to_everyone() {
        let post = post_by(Uuid::new_v4());
        let stranger = Viewer::new(Uuid::new_v4(), false);

        assert!(is_visible(&post, None, None, now()));
        assert!(is_visible(&post, None, Some(&stranger), now()));
    }

    #[test]
    fn test_author_always_sees_own_post() {
        let author = Viewer::new(Uuid::new_v4(), false);
        let hidden_category = category(false);

        let mut post = post_by(author.user_id);
        post.is_published = false;
        post.pub_date = now() + Duration::days(30);
        post.category_id = Some(hidden_category.id);

        assert!(is_visible(&post, Some(&hidden_category), Some(&author), now()));
        assert!(!is_visible(&post, Some(&hidden_category), None, now()));
    }

    #[test]
    fn test_unpublished_post_hidden_from_others() {
        let mut post = post_by(Uuid::new_v4());
        post.is_published = false;
        let stranger = Viewer::new(Uuid::new_v4(), false);
        let staff = Viewer::new(Uuid::new_v4(), true);

        assert!(!is_visible(&post, None, Some(&stranger), now()));
        assert!(!is_visible(&post, None, Some(&staff), now()));
    }

    #[test]
    fn test_future_post_becomes_visible_at_pub_date() {
        let mut post = post_by(Uuid::new_v4());
        post.pub_date = now() + Duration::hours(1);

        assert!(!is_visible(&post, None, None, now()));
        assert!(is_visible(&post, None, None, now() + Duration::hours(1)));
        assert!(is_visible(&post, None, None, now() + Duration::hours(2)));
    }

    #[test]
    fn test_category_publication_gates_visibility() {
        let published = category(true);
        let hidden = category(false);

        let mut post = post_by(Uuid::new_v4());
        post.category_id = Some(published.id);
        assert!(is_visible(&post, Some(&published), None, now()));

        post.category_id = Some(hidden.id);
        assert!(!is_visible(&post, Some(&hidden), None, now()));
    }

    #[test]
    fn test_post_without_category_skips_category_check() {
        let post = post_by(Uuid::new_v4());
        assert!(PostPredicate::CategoryPublished.evaluate(&post, None));
    }

    #[test]
    fn test_combinators_flatten() {
        let p = PostPredicate::Published
            .and(PostPredicate::CategoryPublished)
            .and(PostPredicate::ReleasedBy(now()));
        assert!(matches!(p, PostPredicate::All(ref parts) if parts.len() == 3));

        let author = Uuid::new_v4();
        let q = PostPredicate::Published
            .or(PostPredicate::ByAuthor(author))
            .or(PostPredicate::InCategory(author));
        assert!(matches!(q, PostPredicate::Any(ref parts) if parts.len() == 3));
    }

    #[test]
    fn test_always_matches_everything() {
        let mut post = post_by(Uuid::new_v4());
        post.is_published = false;
        assert!(PostPredicate::always().evaluate(&post, None));
    }
}
