//! Miscellaneous instructions: function calls and value selection.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    modules::{
        instructions::{Instruction, InstructionFlags},
        operand::{Name, Operand},
        symbol::FunctionPointer,
    },
    types::Ty,
};

/// Invoke (direct call) instruction.
///
/// This instruction calls the referenced function, either internal or
/// external. The callee is referenced by identity; indirect calls through
/// first-class function values are not part of this IR, so every use-edge
/// from an instruction to a callable is established by an `Invoke`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Invoke {
    /// The function being called.
    pub callee: FunctionPointer,

    /// The argument operands to pass to the function.
    pub args: Vec<Operand>,

    /// The destination SSA name for the return value, if any.
    pub dest: Option<Name>,

    /// The return type of the function being called. `None` for `void`
    /// functions.
    pub ty: Option<Ty>,
}

impl Invoke {
    /// Call with no arguments and no result, the shape of a runtime marker
    /// call.
    pub fn void_call(callee: FunctionPointer) -> Self {
        Invoke {
            callee,
            args: Vec::new(),
            dest: None,
            ty: None,
        }
    }
}

impl Instruction for Invoke {
    fn flags(&self) -> InstructionFlags {
        InstructionFlags::CALL | InstructionFlags::MEMORY
    }

    fn operands(&self) -> impl Iterator<Item = &Operand> {
        self.args.iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.args.iter_mut()
    }

    fn destination(&self) -> Option<Name> {
        self.dest
    }

    fn set_destination(&mut self, name: Name) {
        // Cannot change a void return to a non-void return
        if self.dest.is_some() {
            self.dest = Some(name);
        }
    }

    fn callee(&self) -> Option<FunctionPointer> {
        Some(self.callee)
    }
}

/// Select instruction.
///
/// Chooses between two values based on a boolean condition, without a
/// branch.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Select {
    /// The destination SSA name for the selected value.
    pub dest: Name,
    /// The type of the selected value.
    pub ty: Ty,
    /// The condition operand; should evaluate to a boolean value.
    pub cond: Operand,
    /// Value produced when the condition is true.
    pub val_true: Operand,
    /// Value produced when the condition is false.
    pub val_false: Operand,
}

impl Instruction for Select {
    fn flags(&self) -> InstructionFlags {
        InstructionFlags::SIMPLE
    }

    fn operands(&self) -> impl Iterator<Item = &Operand> {
        [&self.cond, &self.val_true, &self.val_false].into_iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        [&mut self.cond, &mut self.val_true, &mut self.val_false].into_iter()
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }

    fn set_destination(&mut self, name: Name) {
        self.dest = name;
    }
}
