//! In-memory entity store.

mod store;

pub use store::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLocationRepository,
    InMemoryPostRepository, InMemoryRepository, InMemoryStore, InMemoryUserRepository,
};

#[cfg(test)]
mod tests;
