//! Server-rendered web layer.
//!
//! HTML pages for listings and reviews, rendered with Askama templates.
//!
//! # Modules
//!
//! - [`extract`] - Form/JSON body extractor
//! - [`forms`] - Submitted payloads and validation rules
//! - [`handlers`] - Page and form handlers
//! - [`middleware`] - Method override and request tracing
//! - [`routes`] - Listing route configuration

pub mod extract;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
