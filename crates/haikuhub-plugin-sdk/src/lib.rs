//! # haikuhub-plugin-sdk
//!
//! SDK for developing HaikuHub plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use haikuhub_plugin_sdk::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct MyPlugin;
//!
//! #[async_trait]
//! impl Plugin for MyPlugin {
//!     fn metadata(&self) -> PluginMetadata {
//!         plugin_metadata!(
//!             name: "my-plugin",
//!             version: "1.0.0",
//!             description: "A sample plugin",
//!             author: "Developer"
//!         )
//!     }
//!
//!     async fn init(&self, app: &mut AppHandle, plugins: &PluginManager) -> Result<(), AppError> {
//!         plugins
//!             .register_hook("haikus:render", ClosureCallback::wrap("my-plugin", |data| {
//!                 let data = data.clone();
//!                 async move { Ok(Some(data)) }
//!             }))
//!             .await;
//!         Ok(())
//!     }
//! }
//!
//! // For a cdylib build, export the dynamic entry point:
//! declare_plugin!(MyPlugin);
//! ```

/// Prelude for convenient imports.
pub mod prelude {
    pub use async_trait::async_trait;
    pub use haikuhub_core::error::AppError;
    pub use haikuhub_plugin::app_handle::AppHandle;
    pub use haikuhub_plugin::hooks::callback::{ClosureCallback, HookCallback};
    pub use haikuhub_plugin::hooks::names;
    pub use haikuhub_plugin::manager::PluginManager;
    pub use haikuhub_plugin::middleware::middleware_fn;
    pub use haikuhub_plugin::registry::{Plugin, PluginMetadata};

    pub use crate::{declare_plugin, plugin_metadata};
}

/// Builds a [`PluginMetadata`](haikuhub_plugin::registry::PluginMetadata)
/// from the descriptive fields. Dependencies default to empty.
#[macro_export]
macro_rules! plugin_metadata {
    (
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr
    ) => {
        $crate::prelude::PluginMetadata {
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            dependencies: Vec::new(),
        }
    };
    (
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr,
        dependencies: [$($dep:expr),* $(,)?]
    ) => {
        $crate::prelude::PluginMetadata {
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            dependencies: vec![$($dep.to_string()),*],
        }
    };
}

/// Exports the `haikuhub_plugin_entry` symbol the dynamic loader resolves.
///
/// The plugin type must implement `Default` and `Plugin`. Use from a crate
/// built with `crate-type = ["cdylib"]` to produce a loadable library.
#[macro_export]
macro_rules! declare_plugin {
    ($plugin:ty) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn haikuhub_plugin_entry()
        -> *mut Box<dyn $crate::prelude::Plugin> {
            Box::into_raw(Box::new(
                Box::new(<$plugin>::default()) as Box<dyn $crate::prelude::Plugin>
            ))
        }
    };
}
