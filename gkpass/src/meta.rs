//! Plugin manifest and dynamic loading.
//!
//! Hosts discover pass plugins through a TOML manifest listing each
//! plugin's name and library path. Loading resolves the well-known ABI
//! symbols, checks the ABI version, and returns a wrapper keeping the
//! library mapped for as long as the descriptor is alive.
use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use libloading::Library;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    magic::{ENV_PLUGIN_MANIFEST, PLUGIN_API_VERSION, PLUGIN_API_VERSION_FN_NAME, PLUGIN_INFO_FN_NAME},
    plugin::{PassPluginInfo, PluginApiVersionFn, PluginInfoFn},
    utils::error::{PassError, PassResult},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetaInfo {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManifest {
    pub plugins: Vec<PluginMetaInfo>,
}

impl PluginManifest {
    /// Get the default path to the plugin manifest file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(manifest_path) = std::env::var(ENV_PLUGIN_MANIFEST) {
            return manifest_path.into();
        }

        // Fallback to default paths based on OS
        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }

            path.push("gpukern");
            path.push("plugins.toml");
        }
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }

            path.push("gpukern");
            path.push("plugins.toml");
        }

        path
    }

    /// Load a manifest from a TOML file.
    pub fn load_from_toml(path: &Path) -> PassResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| PassError::ManifestParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Save the manifest to a TOML file, creating parent directories as
    /// needed.
    pub fn save_to_toml(&self, path: &Path) -> PassResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| {
            PassError::Unknown(format!(
                "Failed during serialization of TOML to path `{}`: {}",
                path.display(),
                e
            ))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Find a plugin entry by name.
    pub fn find(&self, name: &str) -> Option<&PluginMetaInfo> {
        self.plugins.iter().find(|plugin| plugin.name == name)
    }
}

/// Wrapper around a dynamically loaded pass plugin.
///
/// Prevents the library from being unloaded while the descriptor is in use.
pub struct LoadedPassPlugin {
    info: PassPluginInfo,
    /// SAFETY: Drop order ensures that the library is not unloaded before
    /// the descriptor is dropped.
    ///
    /// DO NOT CHANGE THE ORDER OF FIELDS!
    _lib: Arc<Library>,
}

impl std::fmt::Debug for LoadedPassPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedPassPlugin").finish_non_exhaustive()
    }
}

impl Deref for LoadedPassPlugin {
    type Target = PassPluginInfo;

    fn deref(&self) -> &Self::Target {
        &self.info
    }
}

/// Load a pass plugin listed in the manifest.
///
/// The plugin's ABI version is checked before its descriptor factory is
/// invoked; a mismatch refuses the plugin without calling into it further.
pub fn load_pass_plugin(manifest: &PluginManifest, name: &str) -> PassResult<LoadedPassPlugin> {
    let meta = manifest
        .find(name)
        .ok_or_else(|| PassError::PluginNotFound(name.to_string()))?;

    unsafe {
        let library = Library::new(&meta.path).map_err(|e| PassError::PluginLoadError {
            source: e,
            file: meta.path.clone(),
            name: meta.name.clone(),
        })?;

        let api_version_fn: libloading::Symbol<PluginApiVersionFn> = library
            .get(PLUGIN_API_VERSION_FN_NAME.as_bytes())
            .map_err(|e| PassError::PluginLoadError {
                source: e,
                file: meta.path.clone(),
                name: meta.name.clone(),
            })?;

        let api_version = api_version_fn();
        if api_version != PLUGIN_API_VERSION {
            return Err(PassError::api_mismatch(&meta.name, api_version));
        }

        let info_fn: libloading::Symbol<PluginInfoFn> = library
            .get(PLUGIN_INFO_FN_NAME.as_bytes())
            .map_err(|e| PassError::PluginLoadError {
                source: e,
                file: meta.path.clone(),
                name: meta.name.clone(),
            })?;

        let info = info_fn();
        if info.api_version != PLUGIN_API_VERSION {
            return Err(PassError::api_mismatch(&meta.name, info.api_version));
        }

        info!(
            "loaded pass plugin `{}` version {} from {}",
            info.name, info.version, meta.path
        );

        Ok(LoadedPassPlugin {
            _lib: Arc::new(library),
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_toml_round_trip() {
        let manifest = PluginManifest {
            plugins: vec![PluginMetaInfo {
                name: "gpu-kernel-attr-plugin".to_string(),
                path: "./libgkplug.so".to_string(),
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins.toml");
        manifest.save_to_toml(&path).unwrap();

        let loaded = PluginManifest::load_from_toml(&path).unwrap();
        assert_eq!(loaded.plugins.len(), 1);
        assert_eq!(loaded.plugins[0].name, "gpu-kernel-attr-plugin");
        assert_eq!(loaded.plugins[0].path, "./libgkplug.so");
    }

    #[test]
    fn loading_an_unlisted_plugin_fails() {
        let manifest = PluginManifest::default();
        let err = load_pass_plugin(&manifest, "missing").unwrap_err();
        assert!(matches!(err, PassError::PluginNotFound(name) if name == "missing"));
    }

    #[test]
    fn manifest_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "plugins = 3").unwrap();

        let err = PluginManifest::load_from_toml(&path).unwrap_err();
        assert!(matches!(err, PassError::ManifestParseError { .. }));
    }
}
