//! Middleware module
//!
//! Request logging middleware applied to every route

pub mod logging;

pub use logging::request_logging_middleware;
