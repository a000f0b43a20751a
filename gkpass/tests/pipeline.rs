use std::sync::Arc;

use gkinstr::modules::{
    BasicBlock, Function, Module,
    attributes::ATTR_OPTNONE,
    instructions::{Instr, misc::Invoke},
    operand::Label,
    symbol::FunctionPointer,
};
use gkpass::{
    config::AttributeConfig,
    magic::{
        KERNEL_ATTR_PASS_NAME, KERNEL_ENTRY_ATTR, LEGACY_KERNEL_ATTR_PASS_NAME, RT_KERNEL_DEINIT,
        RT_KERNEL_INIT,
    },
    pass::{BufferReporter, KernelEntryPass, LegacyKernelEntryPass, register_pass_builder_callbacks},
    pipeline::{
        legacy::{LegacyPassManager, find_registered_pass},
        modern::{
            ModuleAnalysisManager, ModulePass, ModulePassManager, PassBuilder, PreservedAnalyses,
        },
    },
    utils::error::PassError,
};

fn markers(module: &mut Module) -> (FunctionPointer, FunctionPointer) {
    (
        module.get_or_create_runtime_function(RT_KERNEL_INIT),
        module.get_or_create_runtime_function(RT_KERNEL_DEINIT),
    )
}

fn function_calling(name: &str, callees: &[FunctionPointer]) -> Function {
    let mut function = Function::new(name);
    let instructions = callees
        .iter()
        .map(|callee| Instr::Invoke(Invoke::void_call(*callee)))
        .collect();
    function
        .body
        .insert(Label::NIL, BasicBlock::returning(instructions));
    function
}

fn sample_module() -> Module {
    let mut module = Module::new();
    let (init, deinit) = markers(&mut module);
    module.add_function(function_calling("kernel", &[init, deinit]));
    module.add_function(function_calling("plain", &[deinit]));
    module
}

fn buffered_pass() -> KernelEntryPass {
    KernelEntryPass::with_config(AttributeConfig::default(), Arc::new(BufferReporter::new()))
}

#[test]
fn both_adapters_produce_identical_modules() {
    let mut via_legacy = sample_module();
    let mut via_modern = via_legacy.clone();

    let mut lpm = LegacyPassManager::new();
    lpm.add_pass(LegacyKernelEntryPass::with_inner(buffered_pass()));
    let modified = lpm.run(&mut via_legacy);
    assert!(modified);

    let mut mpm = ModulePassManager::new();
    mpm.add_pass(buffered_pass());
    let mut am = ModuleAnalysisManager::new();
    mpm.run_passes(&mut via_modern, &mut am);

    assert_eq!(via_legacy, via_modern);
    let kernel = via_legacy.function_by_name("kernel").unwrap();
    assert!(kernel.attributes.contains(KERNEL_ENTRY_ATTR));
    let plain = via_legacy.function_by_name("plain").unwrap();
    assert!(plain.attributes.is_empty());
}

#[test]
fn legacy_adapter_reports_modified_even_on_a_no_op_run() {
    let mut module = Module::new();
    let mut lpm = LegacyPassManager::new();
    lpm.add_pass(LegacyKernelEntryPass::with_inner(buffered_pass()));
    assert!(lpm.run(&mut module), "conservative: always reported modified");
}

#[test]
fn modern_adapter_preserves_no_analyses() {
    let mut module = sample_module();
    let mut am = ModuleAnalysisManager::new();
    am.mark_valid("call-graph");

    let mut mpm = ModulePassManager::new();
    mpm.add_pass(buffered_pass());
    let preserved = mpm.run_passes(&mut module, &mut am);

    assert!(!preserved.are_all_preserved());
    assert!(!am.is_valid("call-graph"));
}

/// Non-required pass counting its executions.
struct CountingPass {
    runs: Arc<parking_lot::Mutex<usize>>,
}

impl ModulePass for CountingPass {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn run(&mut self, _module: &mut Module, _am: &mut ModuleAnalysisManager) -> PreservedAnalyses {
        *self.runs.lock() += 1;
        PreservedAnalyses::all()
    }
}

#[test]
fn required_pass_runs_with_optimizations_disabled() {
    let mut module = sample_module();
    for function in module.functions.values_mut() {
        function.attributes.set(ATTR_OPTNONE, "");
    }

    let runs = Arc::new(parking_lot::Mutex::new(0));
    let mut mpm = ModulePassManager::new();
    mpm.add_pass(CountingPass { runs: runs.clone() });
    mpm.add_pass(buffered_pass());

    let mut am = ModuleAnalysisManager::new();
    mpm.run_passes(&mut module, &mut am);

    assert_eq!(*runs.lock(), 0, "non-required pass must be skipped");
    let kernel = module.function_by_name("kernel").unwrap();
    assert!(
        kernel.attributes.contains(KERNEL_ENTRY_ATTR),
        "required pass must still run"
    );
}

#[test]
fn pass_builder_resolves_the_pipeline_name() {
    let mut builder = PassBuilder::new();
    register_pass_builder_callbacks(&mut builder);

    let mpm = builder.parse_pipeline(KERNEL_ATTR_PASS_NAME).unwrap();
    assert_eq!(mpm.len(), 1);

    let default_pipeline = builder.build_default_pipeline();
    assert_eq!(default_pipeline.len(), 1, "registered at pipeline start");
}

#[test]
fn pass_builder_rejects_unknown_names() {
    let mut builder = PassBuilder::new();
    register_pass_builder_callbacks(&mut builder);

    let err = builder
        .parse_pipeline("no-such-pass")
        .expect_err("unknown names must be rejected");
    assert!(matches!(err, PassError::UnknownPass(name) if name == "no-such-pass"));
}

#[test]
fn legacy_pass_is_statically_registered() {
    let registration = find_registered_pass(LEGACY_KERNEL_ATTR_PASS_NAME)
        .expect("legacy pass must be discoverable by name");
    assert!(!registration.modifies_cfg);
    assert!(!registration.is_analysis);

    let mut lpm = LegacyPassManager::new();
    lpm.add_pass_by_name(LEGACY_KERNEL_ATTR_PASS_NAME).unwrap();
    assert!(lpm.add_pass_by_name("no-such-pass").is_err());

    let mut module = sample_module();
    assert!(lpm.run(&mut module));
    let kernel = module.function_by_name("kernel").unwrap();
    assert!(kernel.attributes.contains(KERNEL_ENTRY_ATTR));
}

#[test]
fn parsing_the_same_name_twice_schedules_two_instances() {
    let mut builder = PassBuilder::new();
    register_pass_builder_callbacks(&mut builder);

    let pipeline = format!("{},{}", KERNEL_ATTR_PASS_NAME, KERNEL_ATTR_PASS_NAME);
    let mut mpm = builder.parse_pipeline(&pipeline).unwrap();
    assert_eq!(mpm.len(), 2);

    // Running the pass twice in one pipeline is still idempotent.
    let mut module = sample_module();
    let mut am = ModuleAnalysisManager::new();
    mpm.run_passes(&mut module, &mut am);
    let kernel = module.function_by_name("kernel").unwrap();
    assert_eq!(kernel.attributes.len(), 1);
}
