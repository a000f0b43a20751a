//! Modern pass manager: callback-extensible pipeline assembly.
//!
//! Passes implement [`ModulePass`] and are scheduled by a
//! [`ModulePassManager`]. Hosts assemble pipelines through a
//! [`PassBuilder`], which plugins extend with callbacks: a pipeline-start
//! extension point (runs registered passes before everything else,
//! inlining included) and pipeline parsing (resolving a textual pass name
//! to a pass, the `-passes=` surface).
use std::collections::BTreeSet;

use gkinstr::modules::{Module, attributes::ATTR_OPTNONE};
use log::debug;
use smallvec::SmallVec;

use crate::utils::error::{PassError, PassResult};

/// Which analyses remain valid after a pass ran.
///
/// Only the two extreme points are modeled: everything preserved (the pass
/// did not mutate the module) or nothing preserved (conservative default
/// for transformation passes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreservedAnalyses {
    all: bool,
}

impl PreservedAnalyses {
    /// The pass preserved every analysis.
    pub fn all() -> Self {
        PreservedAnalyses { all: true }
    }

    /// The pass preserved no analyses; every cached result must be
    /// recomputed.
    pub fn none() -> Self {
        PreservedAnalyses { all: false }
    }

    pub fn are_all_preserved(&self) -> bool {
        self.all
    }

    /// Combine with the preservation of another pass run on the same unit.
    pub fn intersect(&mut self, other: &PreservedAnalyses) {
        self.all &= other.all;
    }
}

/// Bookkeeping for cached module analyses.
///
/// The manager only tracks validity; recomputation is the analysis owner's
/// concern. A pass reporting [`PreservedAnalyses::none`] flushes every
/// cached result.
#[derive(Debug, Default)]
pub struct ModuleAnalysisManager {
    valid: BTreeSet<String>,
}

impl ModuleAnalysisManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the named analysis holds a valid cached result.
    pub fn mark_valid(&mut self, analysis: impl Into<String>) {
        self.valid.insert(analysis.into());
    }

    /// Returns true if the named analysis still holds a valid result.
    pub fn is_valid(&self, analysis: &str) -> bool {
        self.valid.contains(analysis)
    }

    /// Apply a pass's preservation summary to the cache.
    pub fn invalidate(&mut self, preserved: &PreservedAnalyses) {
        if !preserved.are_all_preserved() && !self.valid.is_empty() {
            debug!("invalidating {} cached module analyses", self.valid.len());
            self.valid.clear();
        }
    }
}

/// A transformation or analysis pass over a whole module.
pub trait ModulePass: Send {
    /// Pipeline name of the pass.
    fn name(&self) -> &'static str;

    /// Run the pass, returning which analyses it preserved.
    fn run(&mut self, module: &mut Module, am: &mut ModuleAnalysisManager) -> PreservedAnalyses;

    /// Required passes run even when the module is compiled with
    /// optimizations disabled; non-required passes are skipped there.
    fn is_required(&self) -> bool {
        false
    }
}

/// Returns true when the module was compiled with optimizations disabled,
/// i.e. every defined function carries the `optnone` attribute (frontends
/// decorate all functions when compiling at the lowest optimization level).
/// An empty module does not count as disabled.
pub fn optimizations_disabled(module: &Module) -> bool {
    !module.functions.is_empty()
        && module
            .functions
            .values()
            .all(|function| function.attributes.contains(ATTR_OPTNONE))
}

/// Ordered collection of module passes.
#[derive(Default)]
pub struct ModulePassManager {
    passes: Vec<Box<dyn ModulePass>>,
}

impl std::fmt::Debug for ModulePassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModulePassManager")
            .field("passes", &self.passes.len())
            .finish()
    }
}

impl ModulePassManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pass(&mut self, pass: impl ModulePass + 'static) {
        self.passes.push(Box::new(pass));
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Run every scheduled pass in order, invalidating cached analyses after
    /// each pass according to its preservation summary. Returns the
    /// intersection of all preservation summaries.
    pub fn run_passes(
        &mut self,
        module: &mut Module,
        am: &mut ModuleAnalysisManager,
    ) -> PreservedAnalyses {
        let mut preserved = PreservedAnalyses::all();
        let disabled = optimizations_disabled(module);

        for pass in &mut self.passes {
            if disabled && !pass.is_required() {
                debug!(
                    "skipping pass `{}`: module has optimizations disabled",
                    pass.name()
                );
                continue;
            }

            debug!("running module pass `{}`", pass.name());
            let pass_preserved = pass.run(module, am);
            am.invalidate(&pass_preserved);
            preserved.intersect(&pass_preserved);
        }

        preserved
    }
}

/// Outcome of offering a pipeline name to a parsing callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineParsing {
    /// The callback recognized the name and scheduled the pass.
    Parsed,
    /// The name belongs to some other pass.
    NotParsed,
}

type StartCallback = Box<dyn Fn(&mut ModulePassManager)>;
type ParsingCallback = Box<dyn Fn(&str, &mut ModulePassManager) -> PipelineParsing>;

/// Assembles pass pipelines, honoring registered extension callbacks.
#[derive(Default)]
pub struct PassBuilder {
    start_callbacks: SmallVec<StartCallback, 4>,
    parsing_callbacks: SmallVec<ParsingCallback, 4>,
}

impl PassBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked when a default pipeline is assembled;
    /// passes it schedules run before everything else in the pipeline.
    pub fn register_pipeline_start_callback(
        &mut self,
        callback: impl Fn(&mut ModulePassManager) + 'static,
    ) {
        self.start_callbacks.push(Box::new(callback));
    }

    /// Register a callback consulted when resolving textual pipeline names.
    pub fn register_pipeline_parsing_callback(
        &mut self,
        callback: impl Fn(&str, &mut ModulePassManager) -> PipelineParsing + 'static,
    ) {
        self.parsing_callbacks.push(Box::new(callback));
    }

    /// Assemble the default pipeline: every pipeline-start callback in
    /// registration order. (Host optimization passes would follow; none are
    /// modeled here.)
    pub fn build_default_pipeline(&self) -> ModulePassManager {
        let mut mpm = ModulePassManager::new();
        for callback in &self.start_callbacks {
            callback(&mut mpm);
        }
        mpm
    }

    /// Resolve a comma-separated pipeline description into a pass manager.
    ///
    /// Every name must be recognized by some registered parsing callback,
    /// otherwise the whole description is rejected.
    pub fn parse_pipeline(&self, text: &str) -> PassResult<ModulePassManager> {
        let mut mpm = ModulePassManager::new();
        for name in text.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let recognized = self
                .parsing_callbacks
                .iter()
                .any(|callback| callback(name, &mut mpm) == PipelineParsing::Parsed);
            if !recognized {
                return Err(PassError::UnknownPass(name.to_string()));
            }
        }
        Ok(mpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserved_analyses_intersection() {
        let mut preserved = PreservedAnalyses::all();
        preserved.intersect(&PreservedAnalyses::all());
        assert!(preserved.are_all_preserved());
        preserved.intersect(&PreservedAnalyses::none());
        assert!(!preserved.are_all_preserved());
    }

    #[test]
    fn analysis_manager_flushes_on_none_preserved() {
        let mut am = ModuleAnalysisManager::new();
        am.mark_valid("call-graph");
        am.invalidate(&PreservedAnalyses::all());
        assert!(am.is_valid("call-graph"));
        am.invalidate(&PreservedAnalyses::none());
        assert!(!am.is_valid("call-graph"));
    }

    #[test]
    fn empty_module_is_not_optimization_disabled() {
        assert!(!optimizations_disabled(&Module::new()));
    }
}
