use gkinstr::{
    modules::{
        BasicBlock, Function, Module,
        control_flow::{CBranch, Jump, Terminator},
        instructions::{
            Instr, InstrOp, Instruction, InstructionFlags,
            int::{IAdd, ICmp, ICmpVariant},
            misc::{Invoke, Select},
        },
        operand::{Imm, Label, Name, Operand},
    },
    types::Ty,
};

/// %2 = iadd i32 %0, %1 ; %3 = icmp slt i32 %2, 0 ; %4 = select i32 %3, %0, %1
fn arithmetic_block() -> BasicBlock {
    let instructions = vec![
        Instr::IAdd(IAdd {
            dest: Name(2),
            ty: Ty::I32,
            lhs: Operand::Reg(Name(0)),
            rhs: Operand::Reg(Name(1)),
        }),
        Instr::ICmp(ICmp {
            dest: Name(3),
            variant: ICmpVariant::Slt,
            ty: Ty::I32,
            lhs: Operand::Reg(Name(2)),
            rhs: Operand::Imm(Imm::Int(0)),
        }),
        Instr::Select(Select {
            dest: Name(4),
            ty: Ty::I32,
            cond: Operand::Reg(Name(3)),
            val_true: Operand::Reg(Name(0)),
            val_false: Operand::Reg(Name(1)),
        }),
    ];
    BasicBlock::returning(instructions)
}

#[test]
fn simple_instructions_expose_destinations_and_dependencies() {
    let block = arithmetic_block();

    let add = &block.instructions[0];
    assert!(add.is_simple());
    assert_eq!(add.destination(), Some(Name(2)));
    assert_eq!(add.callee(), None);

    let cmp = &block.instructions[1];
    let deps: Vec<Name> = cmp.dependencies().collect();
    assert_eq!(deps, vec![Name(2)], "immediates are not dependencies");

    let select = &block.instructions[2];
    let deps: Vec<Name> = select.dependencies().collect();
    assert_eq!(deps, vec![Name(3), Name(0), Name(1)]);
}

#[test]
fn invoke_is_the_only_call_instruction() {
    let mut module = Module::new();
    let callee = module.get_or_create_runtime_function("__gpukern_kernel_init");
    let invoke = Instr::Invoke(Invoke::void_call(callee));

    assert!(invoke.flags().contains(InstructionFlags::CALL));
    assert_eq!(invoke.callee(), Some(callee));
    assert_eq!(invoke.destination(), None);

    for instr in arithmetic_block().instructions {
        assert!(!instr.flags().contains(InstructionFlags::CALL));
        assert_eq!(instr.callee(), None);
    }
}

#[test]
fn instruction_mnemonics_round_trip_through_the_discriminant() {
    let block = arithmetic_block();
    let ops: Vec<InstrOp> = block.instructions.iter().map(Instr::op).collect();
    assert_eq!(ops, vec![InstrOp::IAdd, InstrOp::ICmp, InstrOp::Select]);

    assert_eq!(InstrOp::from_str("icmp"), Some(InstrOp::ICmp));
    assert_eq!(InstrOp::from_str("phi"), None);
    assert_eq!(InstrOp::Invoke.opname(), "invoke");

    assert_eq!(ICmpVariant::from_str("slt"), Some(ICmpVariant::Slt));
    assert_eq!(ICmpVariant::Slt.to_str(), "slt");
}

#[test]
fn next_available_name_accounts_for_params_and_destinations() {
    let mut function = Function::new("arith");
    function.params.push((Name(0), Ty::I32));
    function.params.push((Name(1), Ty::I32));
    function.body.insert(Label::NIL, arithmetic_block());

    assert_eq!(function.next_available_name(), Name(5));

    let empty = Function::new("empty");
    assert_eq!(empty.next_available_name(), Name(0));
}

#[test]
fn terminator_successors_follow_branch_targets() {
    let cbranch = Terminator::CBranch(CBranch {
        cond: Operand::Reg(Name(3)),
        target_true: Label(1),
        target_false: Label(2),
    });
    let succ: Vec<Label> = cbranch.successors().collect();
    assert_eq!(succ, vec![Label(1), Label(2)]);

    let jump = Terminator::Jump(Jump { target: Label(1) });
    assert_eq!(jump.successors().collect::<Vec<_>>(), vec![Label(1)]);

    assert_eq!(Terminator::ret_void().successors().count(), 0);
}

#[test]
fn callable_name_resolves_both_symbol_spaces() {
    let mut module = Module::new();
    let external = module.get_or_create_runtime_function("__gpukern_kernel_deinit");

    let function = Function::new("kernel");
    let internal = function.pointer();
    module.add_function(function);

    assert_eq!(
        module.callable_name(external).as_deref(),
        Some("__gpukern_kernel_deinit")
    );
    assert_eq!(module.callable_name(internal).as_deref(), Some("kernel"));
    assert!(module.function_by_name("kernel").is_some());
    assert!(module.function_by_name("missing").is_none());
}
