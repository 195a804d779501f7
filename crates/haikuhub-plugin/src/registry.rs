//! Plugin registry — stores registered plugin instances and metadata.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use haikuhub_core::error::AppError;

use crate::app_handle::AppHandle;
use crate::error::PluginError;
use crate::manager::PluginManager;

/// Descriptive metadata about a plugin.
///
/// Everything here is informational. In particular `dependencies` is a
/// plain list of names that is never checked or enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique plugin name, used as the registry key.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Names of plugins this one expects to be present.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns descriptive plugin metadata.
    fn metadata(&self) -> PluginMetadata;

    /// Called once at startup with the shared application handle and the
    /// plugin manager. Route fragments are contributed through `app`;
    /// hooks and middleware through `plugins`.
    async fn init(&self, app: &mut AppHandle, plugins: &PluginManager) -> Result<(), AppError>;
}

/// Snapshot of a registry entry returned by lookups and listings.
#[derive(Debug, Clone, Serialize)]
pub struct PluginEntry {
    /// Registered name (may differ from `metadata.name` for plugins loaded
    /// under a filename-derived fallback).
    pub name: String,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
    /// The plugin's descriptive metadata.
    pub metadata: PluginMetadata,
}

/// One registered plugin. Only `enabled` mutates after registration;
/// records are never removed.
#[derive(Debug)]
struct PluginRecord {
    name: String,
    enabled: bool,
    metadata: PluginMetadata,
    plugin: Arc<dyn Plugin>,
}

/// Registry of all plugins, in registration order.
#[derive(Debug)]
pub struct PluginRegistry {
    /// Records in registration order. Lookups scan linearly — the set is
    /// small and fixed at startup.
    records: RwLock<Vec<PluginRecord>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Registers a plugin under its metadata name.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let name = plugin.metadata().name;
        self.register_named(&name, plugin).await
    }

    /// Registers a plugin under an explicit name (the loader uses this for
    /// the filename-derived fallback).
    pub async fn register_named(
        &self,
        name: &str,
        plugin: Arc<dyn Plugin>,
    ) -> Result<(), PluginError> {
        if name.trim().is_empty() {
            return Err(PluginError::InvalidPlugin {
                reason: "plugin name is empty".to_string(),
            });
        }

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.name == name) {
            return Err(PluginError::DuplicateName {
                name: name.to_string(),
            });
        }

        let metadata = plugin.metadata();
        info!(
            plugin = %name,
            version = %metadata.version,
            "Registering plugin"
        );

        records.push(PluginRecord {
            name: name.to_string(),
            enabled: true,
            metadata,
            plugin,
        });

        Ok(())
    }

    /// Enables a plugin by name.
    ///
    /// Has no retroactive effect on a plugin skipped during a past
    /// initialization pass.
    pub async fn enable(&self, name: &str) -> Result<(), PluginError> {
        self.set_enabled(name, true).await
    }

    /// Disables a plugin by name.
    ///
    /// Middleware, hooks, and routes already installed by the plugin stay
    /// in place; only a future initialization pass observes the flag.
    pub async fn disable(&self, name: &str) -> Result<(), PluginError> {
        self.set_enabled(name, false).await
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), PluginError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.name == name) {
            Some(record) => {
                record.enabled = enabled;
                info!(plugin = %name, enabled = enabled, "Plugin enabled flag changed");
                Ok(())
            }
            None => Err(PluginError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Gets a registry entry by name.
    pub async fn get(&self, name: &str) -> Option<PluginEntry> {
        let records = self.records.read().await;
        records.iter().find(|r| r.name == name).map(|r| PluginEntry {
            name: r.name.clone(),
            enabled: r.enabled,
            metadata: r.metadata.clone(),
        })
    }

    /// Lists all registered plugins in registration order, regardless of
    /// enabled state.
    pub async fn list(&self) -> Vec<PluginEntry> {
        let records = self.records.read().await;
        records
            .iter()
            .map(|r| PluginEntry {
                name: r.name.clone(),
                enabled: r.enabled,
                metadata: r.metadata.clone(),
            })
            .collect()
    }

    /// Returns the number of registered plugins.
    pub async fn count(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, name: &str) -> bool {
        let records = self.records.read().await;
        records.iter().any(|r| r.name == name)
    }

    /// Checks whether a plugin is registered and enabled.
    pub async fn is_enabled(&self, name: &str) -> bool {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.enabled)
            .unwrap_or(false)
    }

    /// Snapshot of `(name, enabled, plugin)` in registration order for the
    /// orchestrator.
    pub(crate) async fn snapshot(&self) -> Vec<(String, bool, Arc<dyn Plugin>)> {
        let records = self.records.read().await;
        records
            .iter()
            .map(|r| (r.name.clone(), r.enabled, Arc::clone(&r.plugin)))
            .collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NamedPlugin {
        name: &'static str,
    }

    #[async_trait]
    impl Plugin for NamedPlugin {
        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                name: self.name.to_string(),
                version: "1.0.0".to_string(),
                ..PluginMetadata::default()
            }
        }

        async fn init(
            &self,
            _app: &mut AppHandle,
            _plugins: &PluginManager,
        ) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn plugin(name: &'static str) -> Arc<dyn Plugin> {
        Arc::new(NamedPlugin { name })
    }

    #[tokio::test]
    async fn test_list_preserves_registration_order() {
        let registry = PluginRegistry::new();
        registry.register(plugin("alpha")).await.unwrap();
        registry.register(plugin("bravo")).await.unwrap();
        registry.register(plugin("charlie")).await.unwrap();

        registry.disable("bravo").await.unwrap();

        let names: Vec<String> = registry.list().await.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_first_record_intact() {
        let registry = PluginRegistry::new();
        registry.register(plugin("alpha")).await.unwrap();

        let err = registry.register(plugin("alpha")).await.unwrap_err();
        assert!(matches!(err, PluginError::DuplicateName { name } if name == "alpha"));

        assert_eq!(registry.count().await, 1);
        assert!(registry.is_enabled("alpha").await);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let registry = PluginRegistry::new();
        let err = registry.register(plugin("  ")).await.unwrap_err();
        assert!(matches!(err, PluginError::InvalidPlugin { .. }));
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_enable_disable_flips_flag() {
        let registry = PluginRegistry::new();
        registry.register(plugin("alpha")).await.unwrap();
        assert!(registry.is_enabled("alpha").await);

        registry.disable("alpha").await.unwrap();
        assert!(!registry.is_enabled("alpha").await);

        registry.enable("alpha").await.unwrap();
        assert!(registry.is_enabled("alpha").await);
    }

    #[tokio::test]
    async fn test_toggle_unknown_name_fails() {
        let registry = PluginRegistry::new();
        let err = registry.disable("ghost").await.unwrap_err();
        assert!(matches!(err, PluginError::NotFound { name } if name == "ghost"));
    }

    #[tokio::test]
    async fn test_get_unknown_returns_none() {
        let registry = PluginRegistry::new();
        assert!(registry.get("ghost").await.is_none());
        assert!(!registry.is_enabled("ghost").await);
    }

    #[tokio::test]
    async fn test_register_named_overrides_metadata_name() {
        let registry = PluginRegistry::new();
        registry
            .register_named("renamed", plugin("alpha"))
            .await
            .unwrap();

        let entry = registry.get("renamed").await.unwrap();
        assert_eq!(entry.name, "renamed");
        assert_eq!(entry.metadata.name, "alpha");
    }
}
