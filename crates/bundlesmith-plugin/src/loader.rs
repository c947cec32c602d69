//! Dynamic plugin loader using `libloading` (feature-gated).

#[cfg(feature = "dynamic")]
pub mod dynamic_loader {
    use std::path::Path;
    use std::sync::Arc;

    use tracing::info;

    use bundlesmith_core::error::AppError;

    use crate::traits::Plugin;

    /// Type of the plugin creation function exported by dynamic plugins.
    ///
    /// Dynamic plugins must export: `extern "C" fn create_plugin() -> *mut dyn Plugin`
    pub type CreatePluginFn = unsafe extern "C" fn() -> *mut dyn Plugin;

    #[cfg(target_os = "windows")]
    const LIBRARY_EXTENSION: &str = "dll";
    #[cfg(target_os = "macos")]
    const LIBRARY_EXTENSION: &str = "dylib";
    #[cfg(all(unix, not(target_os = "macos")))]
    const LIBRARY_EXTENSION: &str = "so";

    /// Loads plugins from shared libraries (.so / .dll / .dylib).
    pub struct DynamicLoader {
        /// Loaded libraries (kept alive for the lifetime of the loader).
        _libraries: Vec<libloading::Library>,
    }

    impl DynamicLoader {
        /// Creates a new dynamic loader.
        pub fn new() -> Self {
            Self {
                _libraries: Vec::new(),
            }
        }

        /// Loads a plugin from the given shared library path.
        ///
        /// # Safety
        /// This function loads arbitrary code from a shared library.
        /// Only load trusted plugins.
        pub unsafe fn load_from_path(&mut self, path: &Path) -> Result<Arc<dyn Plugin>, AppError> {
            let lib = unsafe { libloading::Library::new(path) }.map_err(|e| {
                AppError::plugin(format!(
                    "Failed to load plugin library '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            let create_fn: libloading::Symbol<CreatePluginFn> =
                unsafe { lib.get(b"create_plugin") }.map_err(|e| {
                    AppError::plugin(format!(
                        "Plugin '{}' missing 'create_plugin' symbol: {}",
                        path.display(),
                        e
                    ))
                })?;

            let raw_plugin = unsafe { create_fn() };
            let plugin = unsafe { Arc::from_raw(raw_plugin) };

            info!(
                path = %path.display(),
                plugin = %plugin.info().name,
                "Dynamic plugin loaded"
            );

            self._libraries.push(lib);

            Ok(plugin)
        }

        /// Loads every shared library in a directory, in name order.
        ///
        /// # Safety
        /// Same contract as [`Self::load_from_path`], applied to every
        /// library found.
        pub unsafe fn load_directory(&mut self, dir: &Path) -> Result<Vec<Arc<dyn Plugin>>, AppError> {
            let mut paths = Vec::new();
            for entry in std::fs::read_dir(dir)? {
                paths.push(entry?.path());
            }
            paths.sort();

            let mut plugins = Vec::new();
            for path in paths {
                if path.extension().and_then(|e| e.to_str()) != Some(LIBRARY_EXTENSION) {
                    continue;
                }
                plugins.push(unsafe { self.load_from_path(&path) }?);
            }
            Ok(plugins)
        }
    }

    impl std::fmt::Debug for DynamicLoader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DynamicLoader")
                .field("loaded_count", &self._libraries.len())
                .finish()
        }
    }
}

/// Stub loader when the dynamic feature is not enabled.
#[cfg(not(feature = "dynamic"))]
pub mod dynamic_loader {
    /// Stub dynamic loader.
    #[derive(Debug)]
    pub struct DynamicLoader;

    impl DynamicLoader {
        /// Creates a stub loader.
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for DynamicLoader {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub use dynamic_loader::DynamicLoader;
