//! Host middleware.

pub mod logging;
