//! # MtaaSuite OTP API
//!
//! HTTP binding of the OTP operations. Exposed as a library so the route
//! tests can build the application in-process.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
