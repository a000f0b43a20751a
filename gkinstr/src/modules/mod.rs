//! Module, function and basic-block containers.
//!
//! A [`Module`] is the compilation-unit boundary processed by one pass
//! invocation: it owns the functions defined in the unit together with the
//! declarations of external functions those definitions reference.
//! Functions are identified by UUID; display names exist for linking and
//! diagnostics only.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    modules::{
        attributes::FunctionAttributes,
        control_flow::Terminator,
        instructions::{Instr, Instruction},
        operand::{Label, Name},
        symbol::{ExternalFunction, FunctionPointer},
    },
    types::Ty,
    utils::Error,
};

pub mod attributes;
pub mod control_flow;
pub mod instructions;
pub mod operand;
pub mod runtime;
pub mod symbol;

/// A basic block within a function, containing a sequence of instructions
/// and ending with a control flow terminator.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasicBlock {
    pub instructions: Vec<Instr>,
    pub terminator: Terminator,
}

impl BasicBlock {
    /// Block with the given instructions closed by `ret void`.
    pub fn returning(instructions: Vec<Instr>) -> Self {
        BasicBlock {
            instructions,
            terminator: Terminator::ret_void(),
        }
    }
}

/// A function made of basic blocks and parameter metadata.
///
/// A `Function` owns its control-flow graph (`body`) and carries an optional
/// display `name` plus its attribute set. Parameters are represented as a
/// list of `(Name, Ty)` pairs.
///
/// By convention the entrypoint is the basic block with the [`Label::NIL`]
/// label.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub params: Vec<(Name, Ty)>,
    pub return_type: Option<Ty>,
    pub body: BTreeMap<Label, BasicBlock>,
    pub attributes: FunctionAttributes,
}

impl Function {
    /// Empty function with a fresh identity and the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            uuid: Uuid::new_v4(),
            name: Some(name.into()),
            params: Vec::new(),
            return_type: None,
            body: BTreeMap::new(),
            attributes: FunctionAttributes::new(),
        }
    }

    /// Identity-based reference to this function.
    pub fn pointer(&self) -> FunctionPointer {
        FunctionPointer::Internal(self.uuid)
    }

    /// Display name for diagnostics; falls back to the UUID when the
    /// function carries no name.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.uuid.to_string(),
        }
    }

    /// Iterate over every instruction of the function in block-label order,
    /// yielding the enclosing block label and the instruction's index within
    /// its block.
    pub fn iter_instructions(&self) -> impl Iterator<Item = (Label, usize, &Instr)> {
        self.body.iter().flat_map(|(label, block)| {
            let label = *label;
            block
                .instructions
                .iter()
                .enumerate()
                .map(move |(index, instr)| (label, index, instr))
        })
    }

    /// Find the next available [`Name`] for an instruction destination.
    pub fn next_available_name(&self) -> Name {
        let mut max_index = None;
        for (name, _) in &self.params {
            max_index = max_index.max(Some(name.0));
        }

        for (_, _, instr) in self.iter_instructions() {
            if let Some(dest) = instr.destination() {
                max_index = max_index.max(Some(dest.0));
            }
        }

        Name(max_index.map_or(0, |m| m + 1))
    }
}

/// A module containing defined functions and references to external ones.
///
/// `Module` acts as the compilation unit boundary for symbol visibility.
/// Functions defined here appear in `functions`; references to symbols not
/// defined locally are listed in `external_functions`. Both maps iterate in
/// key order, which is the stored function order diagnostics follow.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    pub functions: BTreeMap<Uuid, Function>,
    pub external_functions: BTreeMap<Uuid, ExternalFunction>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function definition to the module, returning the reference used
    /// to call it.
    pub fn add_function(&mut self, function: Function) -> FunctionPointer {
        let pointer = function.pointer();
        self.functions.insert(function.uuid, function);
        pointer
    }

    /// Add an external function declaration, returning the reference used to
    /// call it.
    pub fn declare_external(&mut self, external: ExternalFunction) -> FunctionPointer {
        let pointer = FunctionPointer::External(external.uuid);
        self.external_functions.insert(external.uuid, external);
        pointer
    }

    /// Resolve a callable reference to a display name for diagnostics.
    pub fn callable_name(&self, pointer: FunctionPointer) -> Option<String> {
        match pointer {
            FunctionPointer::Internal(uuid) => {
                self.functions.get(&uuid).map(Function::display_name)
            }
            FunctionPointer::External(uuid) => {
                self.external_functions.get(&uuid).map(|ext| ext.name.clone())
            }
        }
    }

    /// Look up a defined function by display name. Names are not required to
    /// be unique; the first match in stored order is returned.
    pub fn function_by_name(&self, name: &str) -> Option<&Function> {
        self.functions
            .values()
            .find(|function| function.name.as_deref() == Some(name))
    }

    /// Verify structural well-formedness:
    /// 1) Every non-empty function has an entry block at [`Label::NIL`].
    /// 2) Every callee referenced by an instruction resolves to a definition
    ///    or a declaration in this module.
    /// 3) No two external declarations share a linking name.
    pub fn validate(&self) -> Result<(), Error> {
        let mut external_names = std::collections::BTreeSet::new();
        for external in self.external_functions.values() {
            if !external_names.insert(external.name.as_str()) {
                return Err(Error::DuplicateExternalName {
                    name: external.name.clone(),
                });
            }
        }

        for function in self.functions.values() {
            if !function.body.is_empty() && !function.body.contains_key(&Label::NIL) {
                return Err(Error::MissingEntryBlock {
                    function: function.display_name(),
                });
            }

            for (_, _, instr) in function.iter_instructions() {
                let Some(callee) = instr.callee() else {
                    continue;
                };
                let resolved = match callee {
                    FunctionPointer::Internal(uuid) => self.functions.contains_key(&uuid),
                    FunctionPointer::External(uuid) => {
                        self.external_functions.contains_key(&uuid)
                    }
                };
                if !resolved {
                    return Err(Error::UndefinedCallee {
                        function: function.display_name(),
                        kind: callee.into(),
                        undefined: callee.uuid(),
                    });
                }
            }
        }

        Ok(())
    }
}
