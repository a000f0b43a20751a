//! Define external symbols and linkage information for modules.
//!
//! This module provides structures to represent functions declared but not
//! defined within a module (runtime functions in particular) and the
//! identity-based references instructions use to name a callable. Callables
//! are always referenced by identity; names exist for linking and
//! diagnostics only.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;
use uuid::Uuid;

use crate::types::Ty;

/// Defines an externally linked function.
///
/// This struct represents a function that is declared in the current module
/// but defined outside of it, such as an accelerator runtime entry point.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExternalFunction {
    /// Unique identifier for the external function. This is used internally
    /// to reference the declaration within the module.
    pub uuid: Uuid,

    /// The name of the external function as it appears in the linking context.
    pub name: String,

    /// The parameter types of the external function.
    pub param_types: Vec<Ty>,

    /// The return type of the external function. `None` indicates a `void`
    /// return type.
    pub return_type: Option<Ty>,
}

impl ExternalFunction {
    /// Declaration with no parameters and a `void` return, the shape
    /// synthesized for runtime marker functions that are resolved before
    /// their real prototype is known.
    pub fn opaque(name: impl Into<String>) -> Self {
        ExternalFunction {
            uuid: Uuid::new_v4(),
            name: name.into(),
            param_types: Vec::new(),
            return_type: None,
        }
    }
}

/// A reference to a function symbol, internal or external.
///
/// Internal functions are defined within the current module, while external
/// functions are declared but defined outside the module.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumDiscriminants)]
#[strum_discriminants(name(FunctionPointerType), derive(Hash))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionPointer {
    /// Reference to a function defined within the current module
    Internal(Uuid),

    /// Reference to an external function (i.e., declared in `ExternalFunction`)
    External(Uuid),
}

impl FunctionPointer {
    /// Get the UUID of the function pointer, regardless of its type.
    pub fn uuid(&self) -> Uuid {
        match self {
            FunctionPointer::Internal(uuid) => *uuid,
            FunctionPointer::External(uuid) => *uuid,
        }
    }
}

impl std::fmt::Display for FunctionPointerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionPointerType::Internal => write!(f, "internal"),
            FunctionPointerType::External => write!(f, "external"),
        }
    }
}
