//! HTTP middleware

pub mod request_id;

pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware, REQUEST_ID_HEADER};
