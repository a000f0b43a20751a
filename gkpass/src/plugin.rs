//! Pass-plugin ABI.
//!
//! A pass plugin is a dynamic library exporting two well-known symbols: an
//! ABI-version function (checked before anything else is called) and a
//! descriptor factory returning a [`PassPluginInfo`]. The host invokes the
//! descriptor's registration callback with its [`PassBuilder`] so the
//! plugin can hook its passes into the pipeline.
use semver::Version;

use crate::pipeline::modern::PassBuilder;

/// Descriptor returned by a plugin's exported factory function.
pub struct PassPluginInfo {
    /// ABI version the plugin was built against; must equal
    /// [`crate::magic::PLUGIN_API_VERSION`] or the host refuses the plugin.
    pub api_version: u32,

    /// Display name of the plugin.
    pub name: &'static str,

    /// Version of the plugin itself.
    pub version: Version,

    /// Invoked with the host's pass builder during pipeline assembly.
    pub register: fn(&mut PassBuilder),
}

impl PassPluginInfo {
    /// Apply the plugin's registrations to a pass builder.
    pub fn register_into(&self, builder: &mut PassBuilder) {
        (self.register)(builder)
    }
}

/// Prototype of the exported descriptor factory. Symbol name is
/// [`crate::magic::PLUGIN_INFO_FN_NAME`].
pub type PluginInfoFn = unsafe fn() -> PassPluginInfo;

/// Prototype of the exported ABI version function. Symbol name is
/// [`crate::magic::PLUGIN_API_VERSION_FN_NAME`].
pub type PluginApiVersionFn = unsafe fn() -> u32;

/// Define the exported plugin symbols for a pass plugin crate.
///
/// ```ignore
/// define_pass_plugin!("my-pass-plugin", "0.1.0", register);
///
/// fn register(builder: &mut gkpass::pipeline::modern::PassBuilder) {
///     // hook passes into the builder
/// }
/// ```
#[macro_export]
macro_rules! define_pass_plugin {
    (
        $name:literal, $version:literal, $register:path $(,)?
    ) => {
        #[unsafe(no_mangle)]
        pub fn __gkpass_fn_api_version() -> u32 {
            $crate::magic::PLUGIN_API_VERSION
        }

        #[unsafe(no_mangle)]
        pub fn __gkpass_fn_plugin_info() -> $crate::plugin::PassPluginInfo {
            $crate::plugin::PassPluginInfo {
                api_version: $crate::magic::PLUGIN_API_VERSION,
                name: $name,
                version: $crate::semver::Version::parse($version).unwrap(),
                register: $register,
            }
        }
    };
}
