//! Haiku record model.

use serde::{Deserialize, Serialize};

/// One haiku. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Haiku {
    /// The poem text, lines separated by `\n`.
    pub text: String,
    /// Optional reference to an illustration served under `/static`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Haiku {
    /// Creates a haiku without an image.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}
