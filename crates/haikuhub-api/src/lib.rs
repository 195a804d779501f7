//! # haikuhub-api
//!
//! HTTP layer for HaikuHub built on Axum.
//!
//! Provides the host routes (pages, haiku API, plugin listing, health),
//! DTOs, the Tera page template, and the application builder that folds
//! plugin route fragments and collected middleware into the final router.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod templates;

pub use app::build_app;
pub use state::ApiState;
