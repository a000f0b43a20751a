//! Use-edge queries over module call graphs.
//!
//! A use-edge is a directed relation from an instruction (the user) to the
//! callable it references (the used). This IR keeps no per-symbol use
//! lists; edges are recovered by walking the module, which is bounded and
//! deterministic. All queries here are read-only so a pass can gather its
//! facts before performing any mutation.
use smallvec::SmallVec;
use uuid::Uuid;

use crate::modules::{
    Function, Module,
    instructions::Instruction,
    operand::Label,
    symbol::FunctionPointer,
};

/// A single use of a callable: the instruction at `index` within block
/// `block` of function `function` calls the callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseEdge {
    /// Identity of the enclosing function.
    pub function: Uuid,
    /// Label of the enclosing basic block.
    pub block: Label,
    /// Index of the using instruction within its block.
    pub index: usize,
}

impl Module {
    /// Walk every use-edge of `callee` in this module, in stored function
    /// order.
    pub fn uses_of(&self, callee: FunctionPointer) -> impl Iterator<Item = UseEdge> + '_ {
        self.functions.values().flat_map(move |function| {
            function
                .iter_instructions()
                .filter(move |(_, _, instr)| instr.callee() == Some(callee))
                .map(move |(block, index, _)| UseEdge {
                    function: function.uuid,
                    block,
                    index,
                })
        })
    }
}

impl Function {
    /// Returns true if this function directly contains a call to `callee`.
    ///
    /// Direct containment only: a call reached through a helper function
    /// does not count. The walk short-circuits on the first matching call
    /// site; additional call sites to the same callee do not change the
    /// result.
    pub fn calls(&self, callee: FunctionPointer) -> bool {
        self.iter_instructions()
            .any(|(_, _, instr)| instr.callee() == Some(callee))
    }

    /// Collect the call sites of `callee` within this function.
    ///
    /// Functions bracket a runtime marker with one or two calls in the
    /// common case, hence the inline capacity.
    pub fn call_sites(&self, callee: FunctionPointer) -> SmallVec<UseEdge, 4> {
        self.iter_instructions()
            .filter(|(_, _, instr)| instr.callee() == Some(callee))
            .map(|(block, index, _)| UseEdge {
                function: self.uuid,
                block,
                index,
            })
            .collect()
    }
}
