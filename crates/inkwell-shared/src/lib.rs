//! # Inkwell Shared
//!
//! Wire types of the JSON API: request/response DTOs and RFC 7807 problem bodies.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
