//! HTTP REST API interfaces
//!
//! - `common`: Response envelope and validated JSON extractor
//! - `modules`: Per-resource route handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
