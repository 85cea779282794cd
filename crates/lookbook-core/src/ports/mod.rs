//! Ports - trait definitions for storage and request throttling.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod repository;

pub use rate_limit::{RateLimitResult, RateLimiter};
pub use repository::{PostRepository, RecordRepository};
