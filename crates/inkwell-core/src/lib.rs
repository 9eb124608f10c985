//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog backend.
//! Entities, visibility rules, feed composition and the mutation gateway live
//! here with zero infrastructure dependencies; storage and auth are reached
//! through the traits in [`ports`].

pub mod authz;
pub mod domain;
pub mod error;
pub mod feed;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod service;
pub mod visibility;

pub use error::{DomainError, DomainResult, RepoError};
