//! Module definitions for control flow terminators.
//!
//! Branching and flow control operations closing each basic block:
//! conditional branches, jumps, returns and traps.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::modules::operand::{Label, Operand};

/// Conditional branch instruction.
///
/// The condition is evaluated, and if it is true (non-zero), control
/// transfers to `target_true`; otherwise, it transfers to `target_false`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CBranch {
    /// The condition operand; should evaluate to a boolean value.
    pub cond: Operand,
    /// The label to jump to if the condition is true.
    pub target_true: Label,
    /// The label to jump to if the condition is false.
    pub target_false: Label,
}

/// Unconditional jump instruction.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Jump {
    /// The label to jump to.
    pub target: Label,
}

/// Return from function instruction. Optionally returns a value.
///
/// If `value` is `None`, it indicates a `void` return.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ret {
    pub value: Option<Operand>,
}

/// Trap instruction to indicate an unrecoverable error or exceptional condition.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trap;

/// Control flow terminator instructions.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terminator {
    CBranch(CBranch),
    Jump(Jump),
    Ret(Ret),
    Trap(Trap),
}

impl Terminator {
    /// Return terminator with no value, the most common block closer.
    pub fn ret_void() -> Self {
        Terminator::Ret(Ret { value: None })
    }

    /// Labels this terminator may transfer control to.
    pub fn successors(&self) -> impl Iterator<Item = Label> {
        let pair: [Option<Label>; 2] = match self {
            Terminator::CBranch(cb) => [Some(cb.target_true), Some(cb.target_false)],
            Terminator::Jump(jump) => [Some(jump.target), None],
            Terminator::Ret(_) | Terminator::Trap(_) => [None, None],
        };
        pair.into_iter().flatten()
    }
}

impl std::fmt::Display for Terminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminator::CBranch(cbranch) => write!(
                f,
                "branch {}, {:#}, {:#}",
                cbranch.cond, cbranch.target_true, cbranch.target_false
            ),
            Terminator::Jump(jump) => write!(f, "jump {}", jump.target),
            Terminator::Ret(ret) => {
                if let Some(value) = &ret.value {
                    write!(f, "ret {}", value)
                } else {
                    write!(f, "ret void")
                }
            }
            Terminator::Trap(_) => write!(f, "trap"),
        }
    }
}
