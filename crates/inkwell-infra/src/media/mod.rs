//! Storage for uploaded post images.

mod local;

pub use local::LocalMediaStore;
