//! # plugin-rate-limit
//!
//! Per-client token bucket rate limiting installed as collected middleware,
//! with an interval-driven cleanup task that prunes stale buckets and a
//! `GET /api/rate-limit/status` endpoint.

pub mod limiter;
pub mod plugin;

pub use limiter::RateLimiter;
pub use plugin::{RateLimitPlugin, RateLimitSettings};
