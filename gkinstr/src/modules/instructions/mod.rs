//! Instruction IR modules
//!
//! This module groups all instruction kinds exposed by the gpukern
//! instruction IR. Each instruction is represented as a small data structure
//! with public fields, making it easy to construct and inspect. Submodules
//! contain families of operations:
//!
//! - `int`: integer arithmetic and comparisons
//! - `misc`: function calls and value selection
//!
//! You typically manipulate instructions via the [`Instr`] enum which is a
//! tagged union of all concrete instruction forms.
use auto_enums::auto_enum;
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIs, EnumIter, EnumTryAs, IntoEnumIterator};

use crate::modules::{
    operand::{Name, Operand},
    symbol::FunctionPointer,
};

pub mod int;
pub mod misc;

bitflags! {
    /// Flags providing additional information about instructions: whether an
    /// instruction has side-effects, touches memory, or transfers control to
    /// another callable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InstructionFlags: u32 {
        /// A "simple" instruction has no side-effects except for a potential
        /// trap (e.g., division by zero). Simple instructions can be freely
        /// duplicated without changing program semantics.
        const SIMPLE = 1 << 0;

        /// This instruction is *potentially* affecting or accessing memory
        /// state. Function calls carry this flag.
        const MEMORY = 1 << 1;

        /// This instruction transfers control to another callable; it is the
        /// only instruction kind that contributes use-edges to function
        /// symbols.
        const CALL = 1 << 2;
    }
}

/// Common interface implemented by every instruction node.
///
/// This trait provides lightweight, zero-allocation iteration over an
/// instruction's input operands and exposes its optional destination SSA
/// name when present.
pub trait Instruction {
    fn flags(&self) -> InstructionFlags;

    /// Returns true if this instruction is "simple", see [`InstructionFlags::SIMPLE`].
    #[inline]
    fn is_simple(&self) -> bool {
        self.flags().contains(InstructionFlags::SIMPLE)
    }

    /// Iterate over all input operands for this instruction.
    fn operands(&self) -> impl Iterator<Item = &Operand>;

    /// Mutably iterate over all input operands for this instruction.
    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand>;

    /// Return the destination SSA name if the instruction produces a result.
    fn destination(&self) -> Option<Name> {
        None
    }

    /// Update the destination SSA name for this instruction. No-op if the
    /// instruction does not produce a result.
    fn set_destination(&mut self, _name: Name) {}

    /// The callable this instruction references, if it is a call.
    fn callee(&self) -> Option<FunctionPointer> {
        None
    }

    /// Convenience iterator over referenced SSA names (i.e., register
    /// operands). Immediates and labels are ignored.
    fn dependencies(&self) -> impl Iterator<Item = Name> {
        self.operands().filter_map(|op| match op {
            Operand::Reg(reg) => Some(*reg),
            _ => None,
        })
    }
}

/// Discriminated union covering all public instruction kinds.
///
/// Use this enum to store heterogeneous instruction streams and to
/// pattern-match on specific operations. The generated [`InstrOp`]
/// discriminant (via `strum`) can be helpful for fast classification.
#[derive(Debug, Clone, Hash, PartialEq, Eq, EnumIs, EnumTryAs, EnumDiscriminants)]
#[strum_discriminants(name(InstrOp), derive(EnumIter))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Instr {
    // Integer instructions
    IAdd(int::IAdd),
    ISub(int::ISub),
    IMul(int::IMul),
    ICmp(int::ICmp),

    // Misc instructions
    Invoke(misc::Invoke),
    Select(misc::Select),
}

impl InstrOp {
    /// Return the canonical mnemonic used when printing this instruction.
    pub fn opname(&self) -> &'static str {
        match self {
            InstrOp::IAdd => "iadd",
            InstrOp::ISub => "isub",
            InstrOp::IMul => "imul",
            InstrOp::ICmp => "icmp",
            InstrOp::Invoke => "invoke",
            InstrOp::Select => "select",
        }
    }

    /// Parse a mnemonic into its corresponding discriminator.
    pub fn from_str(s: &str) -> Option<Self> {
        InstrOp::iter().find(|op| op.opname() == s)
    }
}

impl Instr {
    /// Return the discriminant for this instruction value.
    pub fn op(&self) -> InstrOp {
        self.into()
    }
}

macro_rules! define_instr_any_instr {
    (
        $($variant:ident),* $(,)?
    ) => {
        impl Instruction for Instr {
            fn flags(&self) -> InstructionFlags {
                match self {
                    $(
                        Instr::$variant(instr) => instr.flags(),
                    )*
                }
            }

            #[auto_enum(Iterator)]
            fn operands(&self) -> impl Iterator<Item = &Operand> {
                match self {
                    $(
                        Instr::$variant(instr) => instr.operands(),
                    )*
                }
            }

            #[auto_enum(Iterator)]
            fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
                match self {
                    $(
                        Instr::$variant(instr) => instr.operands_mut(),
                    )*
                }
            }

            fn destination(&self) -> Option<Name> {
                match self {
                    $(
                        Instr::$variant(instr) => instr.destination(),
                    )*
                }
            }

            fn set_destination(&mut self, name: Name) {
                match self {
                    $(
                        Instr::$variant(instr) => instr.set_destination(name),
                    )*
                }
            }

            fn callee(&self) -> Option<FunctionPointer> {
                match self {
                    $(
                        Instr::$variant(instr) => instr.callee(),
                    )*
                }
            }
        }
    };
}

define_instr_any_instr! {
    IAdd,
    ISub,
    IMul,
    ICmp,
    Invoke,
    Select,
}

macro_rules! define_instr_from {
    ($typ:ty, $variant:ident) => {
        impl From<$typ> for Instr {
            fn from(inst: $typ) -> Self {
                Instr::$variant(inst)
            }
        }
    };
}

define_instr_from!(int::IAdd, IAdd);
define_instr_from!(int::ISub, ISub);
define_instr_from!(int::IMul, IMul);
define_instr_from!(int::ICmp, ICmp);
define_instr_from!(misc::Invoke, Invoke);
define_instr_from!(misc::Select, Select);
