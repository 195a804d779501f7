//! Dynamic plugin loader.
//!
//! Discovery and execution are separate steps: [`PluginLoader::discover`]
//! produces a deterministic, alphabetically ordered list of file
//! descriptors without touching any code; loading then walks that list and
//! imports each library via `libloading`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::PluginError;
use crate::registry::{Plugin, PluginRegistry};

/// Symbol every dynamic plugin library must export.
///
/// The `declare_plugin!` macro in `haikuhub-plugin-sdk` generates it.
pub const PLUGIN_ENTRY_SYMBOL: &[u8] = b"haikuhub_plugin_entry";

/// Type of the entry function exported by dynamic plugin libraries.
pub type PluginEntryFn = unsafe extern "C" fn() -> *mut Box<dyn Plugin>;

/// Descriptor for a plugin file found during discovery, produced before any
/// code from the file runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFileDescriptor {
    /// Name derived from the file stem; the registration fallback when the
    /// plugin's own metadata carries no name.
    pub name: String,
    /// Absolute or relative path of the library file.
    pub path: PathBuf,
}

/// Loads plugins from shared libraries and registers them.
pub struct PluginLoader {
    /// Target registry for loaded plugins.
    registry: Arc<PluginRegistry>,
    /// Loaded libraries, kept alive for the lifetime of the loader.
    /// Dropping a library while its plugin is registered would leave the
    /// registry holding dangling code.
    libraries: Vec<libloading::Library>,
}

impl PluginLoader {
    /// Creates a new loader registering into `registry`.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            libraries: Vec::new(),
        }
    }

    /// Lists plugin library files directly inside `dir`, sorted by filename.
    ///
    /// A missing directory is a valid empty plugin set: it logs a warning
    /// and yields an empty list. Only regular files with the platform
    /// dynamic-library extension are considered; subdirectories are not
    /// entered.
    pub fn discover(dir: &Path) -> Vec<PluginFileDescriptor> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    dir = %dir.display(),
                    error = %e,
                    "Plugin directory not readable, loading no plugins"
                );
                return Vec::new();
            }
        };

        let mut descriptors: Vec<PluginFileDescriptor> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str())
                        == Some(std::env::consts::DLL_EXTENSION)
            })
            .map(|path| PluginFileDescriptor {
                name: path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default()
                    .to_string(),
                path,
            })
            .collect();

        descriptors.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        descriptors
    }

    /// Loads the library at `path`, resolves its entry symbol, and registers
    /// the constructed plugin. Returns the registered name.
    ///
    /// The registration name is the plugin's `metadata().name`, falling back
    /// to the file stem when that is empty. Import and registration failures
    /// both surface as [`PluginError::Load`].
    ///
    /// # Safety
    ///
    /// This runs arbitrary code from a shared library. Only load trusted
    /// plugins.
    pub async unsafe fn load(&mut self, path: &Path) -> Result<String, PluginError> {
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| PluginError::Load {
            path: path.to_path_buf(),
            reason: format!("library import failed: {e}"),
        })?;

        let entry: libloading::Symbol<'_, PluginEntryFn> =
            unsafe { library.get(PLUGIN_ENTRY_SYMBOL) }.map_err(|e| PluginError::Load {
                path: path.to_path_buf(),
                reason: format!("missing entry symbol: {e}"),
            })?;

        let plugin: Arc<dyn Plugin> = Arc::from(unsafe { *Box::from_raw(entry()) });

        let metadata_name = plugin.metadata().name;
        let name = if metadata_name.trim().is_empty() {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string()
        } else {
            metadata_name
        };

        self.registry
            .register_named(&name, plugin)
            .await
            .map_err(|e| PluginError::Load {
                path: path.to_path_buf(),
                reason: format!("registration failed: {e}"),
            })?;

        self.libraries.push(library);
        info!(plugin = %name, path = %path.display(), "Dynamic plugin loaded");
        Ok(name)
    }

    /// Discovers and loads every plugin library in `dir`, in alphabetical
    /// filename order. Returns the number of successfully loaded plugins.
    ///
    /// Each per-file failure is logged and skipped; it never aborts the
    /// scan. A missing directory loads nothing and is not an error.
    ///
    /// # Safety
    ///
    /// See [`PluginLoader::load`] — every discovered library runs with full
    /// trust.
    pub async unsafe fn load_from_directory(&mut self, dir: &Path) -> usize {
        let descriptors = Self::discover(dir);
        let mut loaded = 0;

        for descriptor in descriptors {
            match unsafe { self.load(&descriptor.path) }.await {
                Ok(name) => {
                    loaded += 1;
                    info!(plugin = %name, "Plugin registered from directory scan");
                }
                Err(e) => {
                    error!(
                        path = %descriptor.path.display(),
                        error = %e,
                        "Skipping plugin file"
                    );
                }
            }
        }

        loaded
    }

    /// Number of libraries this loader holds open.
    pub fn loaded_count(&self) -> usize {
        self.libraries.len()
    }
}

impl std::fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLoader")
            .field("loaded_count", &self.libraries.len())
            .finish()
    }
}
