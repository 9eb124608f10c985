use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use inkwell_core::domain::{Category, Comment, Location, Post, User, Viewer};
use inkwell_core::error::{DomainError, RepoError};
use inkwell_core::forms::{
    CategoryForm, CommentForm, NON_FIELD_ERRORS, PostForm, RegistrationForm,
};
use inkwell_core::pagination::PageRequest;
use inkwell_core::ports::{AuthError, BaseRepository, PasswordService};
use inkwell_core::service::{
    AccountService, BlogService, CatalogService, Mutation, Redirect, Repositories,
};

use super::InMemoryStore;

struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

struct Fixture {
    repos: Repositories,
    blog: BlogService,
    now: DateTime<Utc>,
}

impl Fixture {
    fn new() -> Self {
        let repos = InMemoryStore::new().repositories();
        Self {
            blog: BlogService::new(repos.clone()).with_page_size(10),
            repos,
            now: Utc::now(),
        }
    }

    async fn user(&self, username: &str, is_staff: bool) -> Viewer {
        let mut user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "plain:secret123".to_string(),
        );
        user.is_staff = is_staff;
        let user = self.repos.users.create(user).await.unwrap();
        user.as_viewer()
    }

    async fn category(&self, slug: &str, is_published: bool) -> Category {
        let mut category = Category::new(slug.to_uppercase(), String::new(), slug.to_string());
        category.is_published = is_published;
        self.repos.categories.create(category).await.unwrap()
    }

    async fn post(&self, author: &Viewer, title: &str, age: Duration) -> Post {
        let post = Post::new(
            author.user_id,
            title.to_string(),
            "Body".to_string(),
            self.now - age,
        );
        self.repos.posts.create(post).await.unwrap()
    }

    async fn titles(&self, viewer: Option<&Viewer>) -> Vec<String> {
        self.blog
            .global_feed(viewer, PageRequest::new(1, 100), self.now)
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|e| e.post.title)
            .collect()
    }
}

fn form(title: &str, pub_date: DateTime<Utc>) -> PostForm {
    PostForm {
        title: title.to_string(),
        text: "Body".to_string(),
        pub_date,
        category_id: None,
        location_id: None,
        image: None,
        is_published: true,
    }
}

#[tokio::test]
async fn test_global_feed_hides_unreleased_posts_from_others() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let hidden = fx.category("hidden", false).await;

    fx.post(&alice, "visible", Duration::hours(1)).await;
    let mut draft = fx.post(&alice, "draft", Duration::hours(2)).await;
    draft.is_published = false;
    fx.repos.posts.update(draft).await.unwrap();
    fx.post(&alice, "scheduled", -Duration::days(1)).await;
    let mut filed = fx.post(&alice, "filed", Duration::hours(3)).await;
    filed.category_id = Some(hidden.id);
    fx.repos.posts.update(filed).await.unwrap();

    assert_eq!(fx.titles(None).await, vec!["visible"]);
    assert_eq!(fx.titles(Some(&bob)).await, vec!["visible"]);
    assert_eq!(
        fx.titles(Some(&alice)).await,
        vec!["scheduled", "visible", "draft", "filed"]
    );
}

#[tokio::test]
async fn test_feed_ties_keep_insertion_order() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;

    fx.post(&alice, "first", Duration::hours(1)).await;
    fx.post(&alice, "second", Duration::hours(1)).await;
    fx.post(&alice, "newest", Duration::minutes(1)).await;

    assert_eq!(fx.titles(None).await, vec!["newest", "first", "second"]);
}

#[tokio::test]
async fn test_feed_page_number_is_clamped() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    for i in 0..12 {
        fx.post(&alice, &format!("post {i}"), Duration::hours(i + 1)).await;
    }

    let request = fx.blog.page_request(Some("999"));
    let page = fx.blog.global_feed(None, request, fx.now).await.unwrap();
    assert_eq!(page.number, 2);
    assert_eq!(page.num_pages, 2);
    assert_eq!(page.items.len(), 2);

    let request = fx.blog.page_request(Some("abc"));
    let page = fx.blog.global_feed(None, request, fx.now).await.unwrap();
    assert_eq!(page.number, 1);
    assert_eq!(page.items[0].post.title, "post 0");
}

#[tokio::test]
async fn test_empty_feed_is_single_page() {
    let fx = Fixture::new();
    let page = fx
        .blog
        .global_feed(None, fx.blog.page_request(Some("3")), fx.now)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 1);
}

#[tokio::test]
async fn test_feed_counts_comments() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let post = fx.post(&alice, "busy", Duration::hours(1)).await;
    fx.post(&alice, "quiet", Duration::hours(2)).await;

    for text in ["one", "two"] {
        fx.blog
            .add_comment(Some(&bob), post.id, CommentForm { text: text.into() }, fx.now)
            .await
            .unwrap();
    }

    let page = fx
        .blog
        .global_feed(None, PageRequest::default(), fx.now)
        .await
        .unwrap();
    let counts: Vec<u64> = page.items.iter().map(|e| e.comment_count).collect();
    assert_eq!(counts, vec![2, 0]);
}

#[tokio::test]
async fn test_category_feed_requires_published_category() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let travel = fx.category("travel", true).await;
    fx.category("secret", false).await;

    let mut post = fx.post(&alice, "trip", Duration::hours(1)).await;
    post.category_id = Some(travel.id);
    fx.repos.posts.update(post).await.unwrap();
    fx.post(&alice, "elsewhere", Duration::hours(1)).await;

    let (category, page) = fx
        .blog
        .category_feed("travel", None, PageRequest::default(), fx.now)
        .await
        .unwrap();
    assert_eq!(category.id, travel.id);
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].post.title, "trip");

    let hidden = fx
        .blog
        .category_feed("secret", None, PageRequest::default(), fx.now)
        .await;
    assert!(matches!(hidden, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_profile_feed_shows_drafts_to_author_only() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    fx.post(&alice, "public", Duration::hours(1)).await;
    fx.post(&alice, "scheduled", -Duration::hours(1)).await;
    fx.post(&bob, "bobs", Duration::hours(1)).await;

    let (_, own) = fx
        .blog
        .profile_feed("alice", Some(&alice), PageRequest::default(), fx.now)
        .await
        .unwrap();
    assert_eq!(own.total_items, 2);

    let (_, public) = fx
        .blog
        .profile_feed("alice", Some(&bob), PageRequest::default(), fx.now)
        .await
        .unwrap();
    assert_eq!(public.total_items, 1);
    assert_eq!(public.items[0].post.title, "public");

    let missing = fx
        .blog
        .profile_feed("nobody", None, PageRequest::default(), fx.now)
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_post_detail_hides_drafts_from_others() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let draft = fx
        .blog
        .create_post(
            Some(&alice),
            PostForm {
                is_published: false,
                ..form("draft", fx.now - Duration::hours(1))
            },
        )
        .await
        .unwrap();

    assert!(fx.blog.post_detail(draft.id, Some(&alice), fx.now).await.is_ok());
    let hidden = fx.blog.post_detail(draft.id, Some(&bob), fx.now).await;
    assert!(matches!(hidden, Err(DomainError::NotFound { .. })));

    let comment = fx
        .blog
        .add_comment(Some(&bob), draft.id, CommentForm { text: "hi".into() }, fx.now)
        .await;
    assert!(matches!(comment, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_create_post_rejects_duplicate_key() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let pub_date = fx.now - Duration::hours(1);

    fx.blog
        .create_post(Some(&alice), form("same", pub_date))
        .await
        .unwrap();
    let err = fx
        .blog
        .create_post(Some(&bob), form("same", pub_date))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(errors) => assert!(errors.has(NON_FIELD_ERRORS)),
        other => panic!("expected validation error, got {other:?}"),
    }

    // A different publication date makes the key unique again.
    assert!(
        fx.blog
            .create_post(Some(&bob), form("same", pub_date - Duration::seconds(1)))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_changing_any_key_field_makes_post_unique() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let travel = fx.category("travel", true).await;
    let food = fx.category("food", true).await;
    let lisbon = fx
        .repos
        .locations
        .create(Location::new("Lisbon".to_string()))
        .await
        .unwrap();
    let porto = fx
        .repos
        .locations
        .create(Location::new("Porto".to_string()))
        .await
        .unwrap();
    let pub_date = fx.now - Duration::hours(1);
    let base = PostForm {
        category_id: Some(travel.id),
        location_id: Some(lisbon.id),
        ..form("trip", pub_date)
    };
    fx.blog.create_post(Some(&alice), base.clone()).await.unwrap();

    // Fields outside the key do not make a post unique.
    let restyled = PostForm {
        image: Some("cover.png".to_string()),
        is_published: false,
        ..base.clone()
    };
    let clash = fx.blog.create_post(Some(&alice), restyled).await;
    assert!(matches!(clash, Err(DomainError::Validation(_))));

    let variants = [
        ("title", PostForm { title: "trip 2".to_string(), ..base.clone() }),
        ("text", PostForm { text: "Other body".to_string(), ..base.clone() }),
        ("category", PostForm { category_id: Some(food.id), ..base.clone() }),
        ("no category", PostForm { category_id: None, ..base.clone() }),
        ("location", PostForm { location_id: Some(porto.id), ..base.clone() }),
        ("no location", PostForm { location_id: None, ..base.clone() }),
        ("pub_date", PostForm { pub_date: pub_date - Duration::minutes(1), ..base.clone() }),
    ];

    for (field, variant) in variants {
        let created = fx.blog.create_post(Some(&alice), variant.clone()).await;
        assert!(created.is_ok(), "different {field} rejected: {created:?}");

        let repeated = fx.blog.create_post(Some(&alice), variant).await;
        assert!(
            matches!(repeated, Err(DomainError::Validation(_))),
            "repeated {field} accepted: {repeated:?}"
        );
    }
}

#[tokio::test]
async fn test_edit_post_checks_key_against_other_posts_only() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let pub_date = fx.now - Duration::hours(1);
    let first = fx
        .blog
        .create_post(Some(&alice), form("first", pub_date))
        .await
        .unwrap();
    let second = fx
        .blog
        .create_post(Some(&alice), form("second", pub_date))
        .await
        .unwrap();

    // Same key as the post itself: only the draft flag changes.
    let outcome = fx
        .blog
        .edit_post(
            Some(&alice),
            first.id,
            PostForm {
                is_published: false,
                ..form("first", pub_date)
            },
        )
        .await
        .unwrap();
    match outcome {
        Mutation::Applied(post) => assert!(!post.is_published),
        other => panic!("expected applied edit, got {other:?}"),
    }

    let err = fx
        .blog
        .edit_post(Some(&alice), second.id, form("first", pub_date))
        .await
        .unwrap_err();
    match err {
        DomainError::Validation(errors) => assert!(errors.has(NON_FIELD_ERRORS)),
        other => panic!("expected validation error, got {other:?}"),
    }

    let stored: Option<Post> = fx.repos.posts.find_by_id(second.id).await.unwrap();
    assert_eq!(stored.unwrap().title, "second");
}

#[tokio::test]
async fn test_token_of_deleted_account_cannot_write() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let bobs = fx.post(&bob, "bobs", Duration::hours(1)).await;

    fx.repos.users.delete(alice.user_id).await.unwrap();

    let post = fx.blog.create_post(Some(&alice), form("ghost", fx.now)).await;
    assert!(matches!(post, Err(DomainError::Unauthenticated)));

    let comment = fx
        .blog
        .add_comment(Some(&alice), bobs.id, CommentForm { text: "boo".into() }, fx.now)
        .await;
    assert!(matches!(comment, Err(DomainError::Unauthenticated)));

    assert_eq!(fx.titles(None).await, vec!["bobs"]);
    assert!(fx.repos.comments.find_by_post(bobs.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_rejects_dangling_references() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let post = fx.post(&alice, "anchored", Duration::hours(1)).await;

    let orphan = Post::new(Uuid::new_v4(), "orphan".into(), "Body".into(), fx.now);
    let result = fx.repos.posts.create(orphan).await;
    assert!(matches!(result, Err(RepoError::ForeignKey(_))));

    let mut moved = post.clone();
    moved.category_id = Some(Uuid::new_v4());
    let result = fx.repos.posts.update(moved).await;
    assert!(matches!(result, Err(RepoError::ForeignKey(_))));

    let stray = Comment::new(Uuid::new_v4(), alice.user_id, "hi".into());
    let result = fx.repos.comments.create(stray).await;
    assert!(matches!(result, Err(RepoError::ForeignKey(_))));

    let ghost = Comment::new(post.id, Uuid::new_v4(), "hi".into());
    let result = fx.repos.comments.create(ghost).await;
    assert!(matches!(result, Err(RepoError::ForeignKey(_))));

    assert_eq!(fx.titles(None).await, vec!["anchored"]);
}

#[tokio::test]
async fn test_create_post_rejects_unknown_location() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;

    let err = fx
        .blog
        .create_post(
            Some(&alice),
            PostForm {
                location_id: Some(Uuid::new_v4()),
                ..form("somewhere", fx.now)
            },
        )
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(errors) => assert!(errors.has("location_id")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_store_rejects_duplicate_post_key() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let original = fx.post(&alice, "twin", Duration::hours(1)).await;

    let mut twin = original.clone();
    twin.id = Uuid::new_v4();
    let result = fx.repos.posts.create(twin).await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_edit_post_by_other_user_redirects_unchanged() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let post = fx.post(&alice, "mine", Duration::hours(1)).await;

    let outcome = fx
        .blog
        .edit_post(Some(&bob), post.id, form("stolen", fx.now))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        Mutation::Redirect(Redirect::PostDetail(id)) if id == post.id
    ));

    let stored: Option<Post> = fx.repos.posts.find_by_id(post.id).await.unwrap();
    assert_eq!(stored.unwrap().title, "mine");

    let outcome = fx
        .blog
        .edit_post(Some(&alice), post.id, form("renamed", post.pub_date))
        .await
        .unwrap();
    assert!(outcome.is_applied());
}

#[tokio::test]
async fn test_delete_post_requires_owner_or_staff() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let admin = fx.user("admin", true).await;
    let post = fx.post(&alice, "mine", Duration::hours(1)).await;

    let outcome = fx.blog.delete_post(Some(&bob), post.id).await.unwrap();
    assert_eq!(outcome, Mutation::Redirect(Redirect::PostDetail(post.id)));
    assert!(fx.blog.post_detail(post.id, None, fx.now).await.is_ok());

    let outcome = fx.blog.delete_post(Some(&admin), post.id).await.unwrap();
    assert!(outcome.is_applied());

    let gone = fx.blog.post_detail(post.id, None, fx.now).await;
    assert!(matches!(gone, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_post_redirects_to_current_username() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let post = fx.post(&alice, "mine", Duration::hours(1)).await;

    let mut account: User = fx.repos.users.find_by_id(alice.user_id).await.unwrap().unwrap();
    account.username = "alicia".to_string();
    fx.repos.users.update(account).await.unwrap();

    let outcome = fx.blog.delete_post(Some(&alice), post.id).await.unwrap();
    assert_eq!(
        outcome,
        Mutation::Applied(Redirect::Profile("alicia".to_string()))
    );
}

#[tokio::test]
async fn test_anonymous_mutation_is_unauthenticated() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let post = fx.post(&alice, "mine", Duration::hours(1)).await;

    let result = fx.blog.delete_post(None, post.id).await;
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn test_comment_mutations_follow_ownership() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let post = fx.post(&alice, "post", Duration::hours(1)).await;
    let comment = fx
        .blog
        .add_comment(Some(&bob), post.id, CommentForm { text: "nice".into() }, fx.now)
        .await
        .unwrap();

    let outcome = fx
        .blog
        .edit_comment(Some(&alice), post.id, comment.id, CommentForm { text: "x".into() })
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        Mutation::Redirect(Redirect::PostDetail(id)) if id == post.id
    ));

    let outcome = fx
        .blog
        .edit_comment(Some(&bob), post.id, comment.id, CommentForm { text: "nicer".into() })
        .await
        .unwrap();
    match outcome {
        Mutation::Applied(updated) => assert_eq!(updated.text, "nicer"),
        other => panic!("expected applied edit, got {other:?}"),
    }

    let wrong_post = fx
        .blog
        .delete_comment(Some(&bob), Uuid::new_v4(), comment.id)
        .await;
    assert!(matches!(wrong_post, Err(DomainError::NotFound { .. })));

    let outcome = fx
        .blog
        .delete_comment(Some(&bob), post.id, comment.id)
        .await
        .unwrap();
    assert!(outcome.is_applied());

    let detail = fx.blog.post_detail(post.id, None, fx.now).await.unwrap();
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let post = fx.post(&alice, "post", Duration::hours(1)).await;
    fx.blog
        .add_comment(Some(&alice), post.id, CommentForm { text: "self".into() }, fx.now)
        .await
        .unwrap();

    fx.blog.delete_post(Some(&alice), post.id).await.unwrap();

    let left = fx.repos.comments.find_by_post(post.id).await.unwrap();
    assert!(left.is_empty());
}

#[tokio::test]
async fn test_deleting_category_and_location_keeps_posts() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let category = fx.category("travel", true).await;
    let location = fx
        .repos
        .locations
        .create(Location::new("Lisbon".to_string()))
        .await
        .unwrap();

    let mut post = fx.post(&alice, "trip", Duration::hours(1)).await;
    post.category_id = Some(category.id);
    post.location_id = Some(location.id);
    fx.repos.posts.update(post.clone()).await.unwrap();

    fx.repos.categories.delete(category.id).await.unwrap();
    fx.repos.locations.delete(location.id).await.unwrap();

    let stored: Post = fx.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert!(stored.category_id.is_none());
    assert!(stored.location_id.is_none());
    assert_eq!(fx.titles(None).await, vec!["trip"]);
}

#[tokio::test]
async fn test_deleting_user_removes_posts_and_comments() {
    let fx = Fixture::new();
    let alice = fx.user("alice", false).await;
    let bob = fx.user("bob", false).await;
    let alices = fx.post(&alice, "alices", Duration::hours(1)).await;
    let bobs = fx.post(&bob, "bobs", Duration::hours(2)).await;
    fx.blog
        .add_comment(Some(&alice), bobs.id, CommentForm { text: "hey".into() }, fx.now)
        .await
        .unwrap();
    fx.blog
        .add_comment(Some(&bob), alices.id, CommentForm { text: "yo".into() }, fx.now)
        .await
        .unwrap();

    fx.repos.users.delete(alice.user_id).await.unwrap();

    assert_eq!(fx.titles(None).await, vec!["bobs"]);
    assert!(fx.repos.comments.find_by_post(bobs.id).await.unwrap().is_empty());
    assert!(fx.repos.comments.find_by_post(alices.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_rejects_duplicate_username() {
    let fx = Fixture::new();
    fx.user("alice", false).await;

    let clash = User::new("alice".into(), "other@example.com".into(), "x".into());
    let result = fx.repos.users.create(clash).await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
    let by_email = fx.repos.users.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.username), Some("alice".to_string()));
    assert!(fx.repos.users.find_by_email("other@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let fx = Fixture::new();
    let result = fx.repos.posts.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_register_and_authenticate() {
    let fx = Fixture::new();
    let accounts = AccountService::new(fx.repos.users.clone(), Arc::new(PlainPasswords));

    let user = accounts
        .register(RegistrationForm {
            username: "carol".into(),
            email: "carol@example.com".into(),
            password: "correct-horse".into(),
        })
        .await
        .unwrap();
    assert!(!user.is_staff);

    let again = accounts
        .register(RegistrationForm {
            username: "carol".into(),
            email: "carol2@example.com".into(),
            password: "correct-horse".into(),
        })
        .await;
    match again {
        Err(DomainError::Validation(errors)) => assert!(errors.has("username")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let logged_in = accounts.authenticate("carol", "correct-horse").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    let wrong = accounts.authenticate("carol", "wrong-password").await;
    assert!(matches!(wrong, Err(DomainError::InvalidCredentials)));
}

#[tokio::test]
async fn test_catalog_changes_require_staff() {
    let fx = Fixture::new();
    let catalog = CatalogService::new(fx.repos.categories.clone(), fx.repos.locations.clone());
    let alice = fx.user("alice", false).await;
    let admin = fx.user("admin", true).await;
    let travel = CategoryForm {
        title: "Travel".into(),
        description: "Trips".into(),
        slug: "travel".into(),
        is_published: true,
    };

    let denied = catalog.create_category(Some(&alice), travel.clone()).await;
    assert!(matches!(denied, Err(DomainError::Forbidden)));

    catalog
        .create_category(Some(&admin), travel.clone())
        .await
        .unwrap();
    let taken = catalog.create_category(Some(&admin), travel).await;
    match taken {
        Err(DomainError::Validation(errors)) => assert!(errors.has("slug")),
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(catalog.published_categories().await.unwrap().len(), 1);
}
