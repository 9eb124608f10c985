//! Feed composition: filter, annotate, order, paginate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Category, Post, Viewer};
use crate::pagination::{Page, PageRequest};
use crate::visibility::{PostPredicate, visible_to};

/// The subset of posts a feed draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    Global,
    Category(Uuid),
    Author(Uuid),
}

/// A post annotated with its comment count.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub post: Post,
    pub comment_count: u64,
}

/// The predicate selecting what `viewer` sees within `scope`.
///
/// An author browsing their own profile sees every post they wrote.
pub fn feed_predicate(
    scope: FeedScope,
    viewer: Option<&Viewer>,
    now: DateTime<Utc>,
) -> PostPredicate {
    match scope {
        FeedScope::Global => visible_to(viewer, now),
        FeedScope::Category(id) => PostPredicate::InCategory(id).and(visible_to(viewer, now)),
        FeedScope::Author(id) if viewer.is_some_and(|v| v.is(id)) => PostPredicate::ByAuthor(id),
        FeedScope::Author(id) => PostPredicate::ByAuthor(id).and(visible_to(viewer, now)),
    }
}

/// Build a feed page from candidates in insertion order.
///
/// `categories` must contain every category referenced by a candidate;
/// posts missing from `comment_counts` have no comments.
pub fn compose_feed<I>(
    candidates: I,
    categories: &HashMap<Uuid, Category>,
    comment_counts: &HashMap<Uuid, u64>,
    predicate: &PostPredicate,
    request: PageRequest,
) -> Page<FeedEntry>
where
    I: IntoIterator<Item = Post>,
{
    let mut entries: Vec<FeedEntry> = candidates
        .into_iter()
        .filter(|post| {
            let category = post.category_id.and_then(|id| categories.get(&id));
            predicate.evaluate(post, category)
        })
        .map(|post| {
            let comment_count = comment_counts.get(&post.id).copied().unwrap_or(0);
            FeedEntry {
                post,
                comment_count,
            }
        })
        .collect();

    // Stable: equal pub_dates keep insertion order.
    entries.sort_by(|a, b| b.post.pub_date.cmp(&a.post.pub_date));

    request.slice(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()
    }

    fn post(author: Uuid, title: &str, days_ago: i64) -> Post {
        Post::new(
            author,
            title.into(),
            "Body".into(),
            now() - Duration::days(days_ago),
        )
    }

    fn titles(page: &Page<FeedEntry>) -> Vec<&str> {
        page.items.iter().map(|e| e.post.title.as_str()).collect()
    }

    #[test]
    fn test_orders_by_pub_date_descending() {
        let author = Uuid::new_v4();
        let posts = vec![post(author, "old", 5), post(author, "new", 1), post(author, "mid", 3)];

        let page = compose_feed(
            posts,
            &HashMap::new(),
            &HashMap::new(),
            &feed_predicate(FeedScope::Global, None, now()),
            PageRequest::default(),
        );

        assert_eq!(titles(&page), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let author = Uuid::new_v4();
        let posts = vec![post(author, "first", 2), post(author, "second", 2), post(author, "third", 2)];

        let page = compose_feed(
            posts,
            &HashMap::new(),
            &HashMap::new(),
            &PostPredicate::always(),
            PageRequest::default(),
        );

        assert_eq!(titles(&page), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_annotates_comment_counts() {
        let author = Uuid::new_v4();
        let commented = post(author, "commented", 1);
        let quiet = post(author, "quiet", 2);
        let counts = HashMap::from([(commented.id, 3)]);

        let page = compose_feed(
            vec![commented, quiet],
            &HashMap::new(),
            &counts,
            &PostPredicate::always(),
            PageRequest::default(),
        );

        let counts: Vec<u64> = page.items.iter().map(|e| e.comment_count).collect();
        assert_eq!(counts, vec![3, 0]);
    }

    #[test]
    fn test_category_scope_hides_unpublished_category() {
        let author = Uuid::new_v4();
        let mut hidden = Category::new("Hidden".into(), "".into(), "hidden".into());
        hidden.is_published = false;
        let mut p = post(author, "in hidden", 1);
        p.category_id = Some(hidden.id);
        let categories = HashMap::from([(hidden.id, hidden.clone())]);

        let anonymous = compose_feed(
            vec![p.clone()],
            &categories,
            &HashMap::new(),
            &feed_predicate(FeedScope::Category(hidden.id), None, now()),
            PageRequest::default(),
        );
        assert!(anonymous.items.is_empty());

        let owner = Viewer::new(author, false);
        let own = compose_feed(
            vec![p],
            &categories,
            &HashMap::new(),
            &feed_predicate(FeedScope::Category(hidden.id), Some(&owner), now()),
            PageRequest::default(),
        );
        assert_eq!(titles(&own), vec!["in hidden"]);
    }

    #[test]
    fn test_profile_owner_sees_drafts_others_do_not() {
        let author = Uuid::new_v4();
        let mut draft = post(author, "draft", 1);
        draft.is_published = false;
        let mut scheduled = post(author, "scheduled", -3);
        scheduled.is_published = true;
        let public = post(author, "public", 2);
        let someone_else = post(Uuid::new_v4(), "other", 1);
        let posts = vec![draft, scheduled, public, someone_else];

        let owner = Viewer::new(author, false);
        let own = compose_feed(
            posts.clone(),
            &HashMap::new(),
            &HashMap::new(),
            &feed_predicate(FeedScope::Author(author), Some(&owner), now()),
            PageRequest::default(),
        );
        assert_eq!(titles(&own), vec!["scheduled", "draft", "public"]);

        let stranger = Viewer::new(Uuid::new_v4(), false);
        let theirs = compose_feed(
            posts,
            &HashMap::new(),
            &HashMap::new(),
            &feed_predicate(FeedScope::Author(author), Some(&stranger), now()),
            PageRequest::default(),
        );
        assert_eq!(titles(&theirs), vec!["public"]);
    }

    #[test]
    fn test_composing_twice_is_identical() {
        let author = Uuid::new_v4();
        let posts: Vec<Post> = (0..15).map(|i| post(author, &format!("p{i}"), i % 4)).collect();
        let predicate = feed_predicate(FeedScope::Global, None, now());
        let request = PageRequest::new(2, 10);

        let first = compose_feed(posts.clone(), &HashMap::new(), &HashMap::new(), &predicate, request);
        let second = compose_feed(posts, &HashMap::new(), &HashMap::new(), &predicate, request);

        assert_eq!(titles(&first), titles(&second));
        assert_eq!(first.number, 2);
        assert_eq!(first.items.len(), 5);
    }
}
