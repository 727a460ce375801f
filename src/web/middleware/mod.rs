//! HTTP middleware applied around the page routes.

pub mod method_override;
pub mod tracing;
