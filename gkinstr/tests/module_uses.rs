use gkinstr::modules::{
    BasicBlock, Function, Module,
    instructions::{Instr, misc::Invoke},
    operand::Label,
    symbol::{ExternalFunction, FunctionPointer},
};
use uuid::Uuid;

fn function_calling(name: &str, callees: &[FunctionPointer]) -> Function {
    let mut function = Function::new(name);
    let instructions = callees
        .iter()
        .map(|callee| Instr::Invoke(Invoke::void_call(*callee)))
        .collect();
    function.body.insert(Label::NIL, BasicBlock::returning(instructions));
    function
}

#[test]
fn uses_of_walks_all_call_sites_in_stored_order() {
    let mut module = Module::new();
    let init = module.get_or_create_runtime_function("__gpukern_kernel_init");

    let caller_a = function_calling("a", &[init, init]);
    let caller_b = function_calling("b", &[init]);
    let bystander = function_calling("c", &[]);
    let a_uuid = caller_a.uuid;
    let b_uuid = caller_b.uuid;
    module.add_function(caller_a);
    module.add_function(caller_b);
    module.add_function(bystander);

    let edges: Vec<_> = module.uses_of(init).collect();
    assert_eq!(edges.len(), 3);
    assert!(edges.iter().filter(|edge| edge.function == a_uuid).count() == 2);
    assert!(edges.iter().filter(|edge| edge.function == b_uuid).count() == 1);

    // Stored order is Uuid order over functions.
    let mut seen_functions: Vec<Uuid> = edges.iter().map(|edge| edge.function).collect();
    seen_functions.dedup();
    let mut expected = vec![a_uuid, b_uuid];
    expected.sort();
    assert_eq!(seen_functions, expected);
}

#[test]
fn calls_is_a_direct_containment_check() {
    let mut module = Module::new();
    let init = module.get_or_create_runtime_function("__gpukern_kernel_init");

    let helper = function_calling("helper", &[init]);
    let helper_ptr = helper.pointer();
    let outer = function_calling("outer", &[helper_ptr]);

    assert!(helper.calls(init));
    assert!(outer.calls(helper_ptr));
    assert!(!outer.calls(init), "transitive calls must not count");
}

#[test]
fn call_sites_reports_block_and_index() {
    let mut module = Module::new();
    let deinit = module.get_or_create_runtime_function("__gpukern_kernel_deinit");
    let function = function_calling("kernel", &[deinit, deinit]);

    let sites = function.call_sites(deinit);
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].block, Label::NIL);
    assert_eq!(sites[0].index, 0);
    assert_eq!(sites[1].index, 1);
}

#[test]
fn validate_rejects_unresolved_callees() {
    let mut module = Module::new();
    let dangling = FunctionPointer::External(Uuid::new_v4());
    module.add_function(function_calling("broken", &[dangling]));

    let err = module.validate().unwrap_err();
    assert!(err.is_undefined_callee());
}

#[test]
fn validate_accepts_resolved_modules() {
    let mut module = Module::new();
    let init = module.declare_external(ExternalFunction::opaque("__gpukern_kernel_init"));
    module.add_function(function_calling("fine", &[init]));
    assert!(module.validate().is_ok());
}

#[test]
fn validate_rejects_duplicate_external_names() {
    let mut module = Module::new();
    module.declare_external(ExternalFunction::opaque("__gpukern_kernel_init"));
    module.declare_external(ExternalFunction::opaque("__gpukern_kernel_init"));

    let err = module.validate().unwrap_err();
    assert!(err.is_duplicate_external_name());
}

#[test]
fn validate_requires_entry_block_for_nonempty_bodies() {
    let mut module = Module::new();
    let mut function = Function::new("no_entry");
    function
        .body
        .insert(Label(1), BasicBlock::returning(Vec::new()));
    module.add_function(function);

    let err = module.validate().unwrap_err();
    assert!(err.is_missing_entry_block());
}
