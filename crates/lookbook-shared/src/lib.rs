//! # Lookbook Shared
//!
//! Request/response types of the public blog API, shared by the server and
//! any Rust client.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
