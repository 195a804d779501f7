//! Response DTOs.

use serde::{Deserialize, Serialize};

use haikuhub_library::Haiku;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Number of haikus in the collection.
    pub haikus: usize,
}

/// Response for `GET /api/haikus/random`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomHaikuResponse {
    /// Index of the selected haiku within the collection.
    pub index: usize,
    /// The haiku at that index.
    pub data: Haiku,
}
