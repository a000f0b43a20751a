//! Well-known names shared across the pass, the pipelines and the plugin ABI.

/// Name of the runtime function bracketing the start of a kernel body.
pub const RT_KERNEL_INIT: &str = "__gpukern_kernel_init";

/// Name of the runtime function bracketing the end of a kernel body.
pub const RT_KERNEL_DEINIT: &str = "__gpukern_kernel_deinit";

/// Pipeline name of the kernel attribute pass under the modern pass manager.
pub const KERNEL_ATTR_PASS_NAME: &str = "gpu-kernel-attr";

/// Registered name of the kernel attribute pass under the legacy pass manager.
pub const LEGACY_KERNEL_ATTR_PASS_NAME: &str = "legacy-gpu-kernel-attr";

/// Attribute kind marking a function as a kernel entry. Downstream code
/// generation keys its GPU-specific handling on this attribute.
pub const KERNEL_ENTRY_ATTR: &str = "gpukern-kernel";

/// Value stored under [`KERNEL_ENTRY_ATTR`].
pub const KERNEL_ENTRY_ATTR_VALUE: &str = "true";

/// Tuning attribute kinds, set only when configured.
pub const ATTR_FLAT_WORK_GROUP_SIZE: &str = "gpukern-flat-work-group-size";
pub const ATTR_NUM_SGPR: &str = "gpukern-num-sgpr";
pub const ATTR_NUM_VGPR: &str = "gpukern-num-vgpr";
pub const ATTR_WAVES_PER_EU: &str = "gpukern-waves-per-eu";

/// Environment variables feeding [`crate::config::AttributeConfig::from_env`].
pub const ENV_KERNEL_ENTRY_FUNCTION_NAME: &str = "GPUKERN_KERNEL_ENTRY_FUNCTION_NAME";
pub const ENV_FLAT_WORK_GROUP_SIZE: &str = "GPUKERN_FLAT_WORK_GROUP_SIZE";
pub const ENV_NUM_SGPR: &str = "GPUKERN_NUM_SGPR";
pub const ENV_NUM_VGPR: &str = "GPUKERN_NUM_VGPR";
pub const ENV_WAVES_PER_EU: &str = "GPUKERN_WAVES_PER_EU";

/// Name of the environment variable containing the path to the plugin
/// manifest file. If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/gpukern/plugins.toml` or `$HOME/.config/gpukern/plugins.toml`
///  (2) on Windows: `%APPDATA%\gpukern\plugins.toml`
pub const ENV_PLUGIN_MANIFEST: &str = "GPUKERN_PLUGIN_MANIFEST";

/// Name of the exported plugin descriptor factory function.
pub const PLUGIN_INFO_FN_NAME: &str = "__gkpass_fn_plugin_info";

/// Name of the exported plugin ABI version function.
pub const PLUGIN_API_VERSION_FN_NAME: &str = "__gkpass_fn_api_version";

/// Version of the plugin ABI. A plugin built against a different version is
/// refused at load time.
pub const PLUGIN_API_VERSION: u32 = 1;
