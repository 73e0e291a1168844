//! HTTP middleware for request processing.
//!
//! Provides observability middleware.

pub mod pod_name;
pub mod tracing;
