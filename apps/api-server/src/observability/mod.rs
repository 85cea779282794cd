//! Observability module - request ids attached to tracing spans.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};
