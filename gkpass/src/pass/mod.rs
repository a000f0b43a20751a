//! The kernel-entry attribute pass.
//!
//! A function is a kernel entry when its body is bracketed by direct calls
//! to both runtime marker functions ([`crate::magic::RT_KERNEL_INIT`] and
//! [`crate::magic::RT_KERNEL_DEINIT`]). The pass collects the set of such
//! functions in a read-only scan, then annotates each member with the
//! target attribute downstream code generation keys on. Both pipeline
//! adapters in [`crate::pipeline`] call into this one core; neither carries
//! its own copy of the algorithm.
use std::{collections::BTreeSet, sync::Arc};

use gkinstr::modules::Module;
use log::{debug, info};
use uuid::Uuid;

use crate::{
    config::AttributeConfig,
    magic::{KERNEL_ENTRY_ATTR, KERNEL_ENTRY_ATTR_VALUE, RT_KERNEL_DEINIT, RT_KERNEL_INIT},
};

pub mod adapters;
pub mod report;

pub use adapters::{LegacyKernelEntryPass, register_pass_builder_callbacks};
pub use report::{BufferReporter, Reporter, StdoutReporter};

/// The shared scan-and-annotate core.
///
/// The pass holds no per-module state: the kernel-entry set is rebuilt from
/// scratch on every [`KernelEntryPass::run`] and discarded when the run
/// returns. Its only durable side effects are the attributes added to the
/// classified functions (and, if absent beforehand, the synthesized marker
/// declarations).
pub struct KernelEntryPass {
    config: AttributeConfig,
    reporter: Arc<dyn Reporter>,
}

impl Default for KernelEntryPass {
    fn default() -> Self {
        KernelEntryPass {
            config: AttributeConfig::from_env(),
            reporter: Arc::new(StdoutReporter),
        }
    }
}

impl KernelEntryPass {
    /// Pass with configuration from the process environment, reporting to
    /// stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass with an explicit configuration and diagnostic sink.
    pub fn with_config(config: AttributeConfig, reporter: Arc<dyn Reporter>) -> Self {
        KernelEntryPass { config, reporter }
    }

    /// Collect the identities of every kernel entry function in `module`.
    ///
    /// Both marker declarations are resolved once (created if absent) and
    /// every classification query in the scan runs against those two
    /// resolved declarations. Functions are visited in the module's stored
    /// order; membership does not depend on it.
    pub fn collect_kernel_entries(module: &mut Module) -> BTreeSet<Uuid> {
        let init = module.get_or_create_runtime_function(RT_KERNEL_INIT);
        let deinit = module.get_or_create_runtime_function(RT_KERNEL_DEINIT);

        let mut entries = BTreeSet::new();
        for function in module.functions.values() {
            // Direct containment over direct calls only. A helper that
            // brackets the markers on behalf of its caller does not make the
            // caller a kernel entry.
            if !function.calls(init) || !function.calls(deinit) {
                continue;
            }

            debug!(
                "classified `{}` as kernel entry",
                function.display_name()
            );
            entries.insert(function.uuid);
        }

        entries
    }

    /// Scan `module` and annotate every kernel entry function.
    ///
    /// Emits one `Kernel entry function <name>` line per annotated function
    /// through the injected reporter, in the module's stored function
    /// order. Annotation is idempotent: a second run finds the same entry
    /// set and leaves every attribute set unchanged.
    pub fn run(&self, module: &mut Module) {
        let entries = Self::collect_kernel_entries(module);
        info!(
            "kernel attribute pass classified {} entry function(s)",
            entries.len()
        );

        for uuid in &entries {
            let function = module
                .functions
                .get_mut(uuid)
                .expect("kernel entry set members are module functions");
            let name = function.display_name();

            if !self.config.matches_entry_name(&name) {
                self.reporter.line(&format!("Skip {}", name));
                continue;
            }

            self.reporter
                .line(&format!("Kernel entry function {}", name));
            function
                .attributes
                .set(KERNEL_ENTRY_ATTR, KERNEL_ENTRY_ATTR_VALUE);

            for (kind, value) in self.config.tuning_attributes() {
                if value.is_empty() {
                    continue;
                }
                self.reporter
                    .line(&format!("Set attribute {} => {}", kind, value));
                function.attributes.set(kind, value);
            }
        }
    }
}
