//! # Lookbook Core
//!
//! The domain layer of the Lookbook blog backend.
//! This crate contains the post model, its on-disk document shape and the
//! ports that storage adapters implement. It performs no I/O.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DocumentError, DomainError, RepoError};
