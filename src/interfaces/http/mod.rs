//! HTTP interface
//!
//! - `common`: response envelope, form extractor, error mapping
//! - `middleware`: anti-forgery (double-submit cookie)
//! - `modules`: handlers and DTOs per resource
//! - `router`: router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_router, ApiDoc, AppState};
