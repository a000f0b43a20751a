//! Pipeline adapters for the kernel attribute pass.
//!
//! Thin shims exposing [`KernelEntryPass`] to each pass-manager
//! generation. Both produce the same entry set and the same attribute
//! mutations for a given module; only the registration surface differs.
use gkinstr::modules::Module;

use crate::{
    magic::{KERNEL_ATTR_PASS_NAME, LEGACY_KERNEL_ATTR_PASS_NAME},
    pass::KernelEntryPass,
    pipeline::{
        legacy::{LegacyModulePass, LegacyPassRegistration},
        modern::{
            ModuleAnalysisManager, ModulePass, PassBuilder, PipelineParsing, PreservedAnalyses,
        },
    },
};

impl ModulePass for KernelEntryPass {
    fn name(&self) -> &'static str {
        KERNEL_ATTR_PASS_NAME
    }

    fn run(&mut self, module: &mut Module, _am: &mut ModuleAnalysisManager) -> PreservedAnalyses {
        KernelEntryPass::run(self, module);
        // Conservative: the scan may synthesize marker declarations and the
        // annotation mutates attribute sets, so nothing is claimed preserved
        // even on a run that classified no function.
        PreservedAnalyses::none()
    }

    // Runs even when the module is compiled with optimizations disabled;
    // the attribute is a correctness input for code generation, not an
    // optimization.
    fn is_required(&self) -> bool {
        true
    }
}

/// The kernel attribute pass under the legacy pipeline generation.
#[derive(Default)]
pub struct LegacyKernelEntryPass {
    inner: KernelEntryPass,
}

impl LegacyKernelEntryPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inner(inner: KernelEntryPass) -> Self {
        LegacyKernelEntryPass { inner }
    }
}

impl LegacyModulePass for LegacyKernelEntryPass {
    fn name(&self) -> &'static str {
        LEGACY_KERNEL_ATTR_PASS_NAME
    }

    fn run_on_module(&mut self, module: &mut Module) -> bool {
        self.inner.run(module);
        // Always reported as modified: resolving the marker declarations can
        // extend the declaration list even when no function qualifies.
        true
    }
}

inventory::submit! {
    LegacyPassRegistration {
        name: LEGACY_KERNEL_ATTR_PASS_NAME,
        description: "GPU kernel entry attribute pass",
        modifies_cfg: false,
        is_analysis: false,
        factory: || Box::new(LegacyKernelEntryPass::new()),
    }
}

/// Hook the pass into a modern pass builder: scheduled unconditionally at
/// pipeline start (before inlining, so marker calls are still direct), and
/// resolvable by its pipeline name.
pub fn register_pass_builder_callbacks(builder: &mut PassBuilder) {
    builder.register_pipeline_start_callback(|mpm| {
        mpm.add_pass(KernelEntryPass::new());
    });

    builder.register_pipeline_parsing_callback(|name, mpm| {
        if name == KERNEL_ATTR_PASS_NAME {
            mpm.add_pass(KernelEntryPass::new());
            PipelineParsing::Parsed
        } else {
            PipelineParsing::NotParsed
        }
    });
}
