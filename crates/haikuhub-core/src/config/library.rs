//! Haiku library configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the haiku collection and static assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Path to the JSON file holding the haiku collection.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_data_file() -> String {
    "data/haikus.json".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}
