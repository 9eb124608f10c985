//! Domain values rendered as wire DTOs.

use inkwell_core::domain::{Category, Comment, Location, Post, User};
use inkwell_core::feed::FeedEntry;
use inkwell_core::pagination::Page;
use inkwell_core::service::PostDetail;
use inkwell_shared::dto::{
    CategoryResponse, CommentResponse, FeedItemResponse, LocationResponse, PageResponse,
    PostDetailResponse, PostResponse, ProfileResponse, UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_staff: user.is_staff,
        created_at: user.created_at,
    }
}

pub fn profile(user: User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at,
    }
}

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        category_id: post.category_id,
        location_id: post.location_id,
        image: post.image,
        is_published: post.is_published,
        created_at: post.created_at,
    }
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post(detail.post),
        comments: detail.comments.into_iter().map(comment).collect(),
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
    }
}

pub fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
        is_published: location.is_published,
    }
}

pub fn feed(page: Page<FeedEntry>) -> PageResponse<FeedItemResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(|entry| FeedItemResponse {
        post: post(entry.post),
        comment_count: entry.comment_count,
    });

    PageResponse {
        items: page.items,
        page: page.number,
        page_size: page.page_size,
        num_pages: page.num_pages,
        total_items: page.total_items,
        has_next,
        has_previous,
    }
}
