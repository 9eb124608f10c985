//! SeaORM entities.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;
