//! # haikuhub-core
//!
//! Core crate for HaikuHub. Contains configuration schemas and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other HaikuHub crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
