use thiserror::Error;

use crate::magic::PLUGIN_API_VERSION;

#[derive(Debug, Error)]
pub enum PassError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse plugin manifest '{file}': {source}")]
    ManifestParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Plugin with name '{0}' not found in manifest")]
    PluginNotFound(String),

    #[error("Failed to load plugin '{name}' from file '{file}': {source}")]
    PluginLoadError {
        source: libloading::Error,
        file: String,
        name: String,
    },

    #[error(
        "Plugin '{name}' was built against pass-plugin ABI version {found}, host expects {expected}"
    )]
    ApiVersionMismatch {
        name: String,
        found: u32,
        expected: u32,
    },

    #[error("No registered pass recognizes the pipeline name '{0}'")]
    UnknownPass(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl PassError {
    pub fn api_mismatch(name: impl Into<String>, found: u32) -> Self {
        PassError::ApiVersionMismatch {
            name: name.into(),
            found,
            expected: PLUGIN_API_VERSION,
        }
    }
}

pub type PassResult<T> = Result<T, PassError>;
