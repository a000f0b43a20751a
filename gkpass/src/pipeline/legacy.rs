//! Legacy pass manager: eager, linearly ordered scheduling.
//!
//! The older host pipeline generation knows nothing of extension points or
//! preservation summaries. Passes implement [`LegacyModulePass`], report
//! whether they modified the unit, and are registered process-wide under a
//! fixed name through a static registry so hosts can schedule them by name
//! on the command line.
use gkinstr::modules::Module;
use log::debug;

use crate::utils::error::{PassError, PassResult};

/// A whole-module pass under the legacy pipeline generation.
pub trait LegacyModulePass: Send {
    /// Registered name of the pass.
    fn name(&self) -> &'static str;

    /// Run the pass. Returns true if the module was (possibly) modified;
    /// the pipeline reruns dependent analyses in that case.
    fn run_on_module(&mut self, module: &mut Module) -> bool;
}

/// Static registration record for a legacy pass.
///
/// Submitted via `inventory::submit!` at the definition site; the registry
/// is assembled at program start without any explicit registration call.
pub struct LegacyPassRegistration {
    /// Name the pass is scheduled by.
    pub name: &'static str,
    /// Human-readable description shown in pass listings.
    pub description: &'static str,
    /// Whether the pass may modify control-flow structure.
    pub modifies_cfg: bool,
    /// Whether the pass is a pure analysis.
    pub is_analysis: bool,
    /// Constructs a fresh pass instance.
    pub factory: fn() -> Box<dyn LegacyModulePass>,
}

inventory::collect!(LegacyPassRegistration);

/// Look up a registered legacy pass by name.
pub fn find_registered_pass(name: &str) -> Option<&'static LegacyPassRegistration> {
    inventory::iter::<LegacyPassRegistration>
        .into_iter()
        .find(|registration| registration.name == name)
}

/// Eager, linearly ordered legacy pipeline.
#[derive(Default)]
pub struct LegacyPassManager {
    passes: Vec<Box<dyn LegacyModulePass>>,
}

impl LegacyPassManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pass(&mut self, pass: impl LegacyModulePass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Schedule a pass from the static registry by its registered name.
    pub fn add_pass_by_name(&mut self, name: &str) -> PassResult<()> {
        let registration =
            find_registered_pass(name).ok_or_else(|| PassError::UnknownPass(name.to_string()))?;
        self.passes.push((registration.factory)());
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every scheduled pass in insertion order. Returns true if any pass
    /// reported modifying the module.
    pub fn run(&mut self, module: &mut Module) -> bool {
        let mut modified = false;
        for pass in &mut self.passes {
            debug!("running legacy module pass `{}`", pass.name());
            modified |= pass.run_on_module(module);
        }
        modified
    }
}
