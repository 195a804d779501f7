//! Error types for the plugin framework.
//!
//! Registration-time failures (`DuplicateName`, `InvalidPlugin`) are fatal
//! to that one `register` call. `Load` is fatal to one file but not to a
//! directory scan. `Init` aborts the whole startup sequence.

use std::path::PathBuf;

use thiserror::Error;

use haikuhub_core::error::{AppError, ErrorKind};

/// Errors produced by the plugin registry, loader, and orchestrator.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin with the same name is already registered.
    #[error("plugin '{name}' is already registered")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// The plugin violates the registration contract.
    #[error("invalid plugin: {reason}")]
    InvalidPlugin {
        /// Why the plugin was rejected.
        reason: String,
    },

    /// No plugin is registered under the given name.
    #[error("plugin '{name}' not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A dynamic library could not be loaded or registered.
    #[error("failed to load plugin from '{}': {reason}", path.display())]
    Load {
        /// Path of the offending file.
        path: PathBuf,
        /// Description of the underlying import or registration failure.
        reason: String,
    },

    /// A plugin's `init` returned an error during orchestration.
    #[error("plugin '{name}' failed to initialize")]
    Init {
        /// Name of the failing plugin.
        name: String,
        /// The error returned by the plugin.
        #[source]
        source: AppError,
    },
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        let kind = match &err {
            PluginError::DuplicateName { .. } => ErrorKind::Conflict,
            PluginError::InvalidPlugin { .. } => ErrorKind::Validation,
            PluginError::NotFound { .. } => ErrorKind::NotFound,
            PluginError::Load { .. } | PluginError::Init { .. } => ErrorKind::Plugin,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
