use strum::EnumIs;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::symbol::FunctionPointerType;

/// Structural well-formedness errors reported by [`crate::modules::Module::validate`].
#[derive(Debug, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// No basic block with the entrypoint label was found.
    #[error(
        "By convention, the entrypoint basic block of function `{function}` must have label `%block_0`. No such basic block was found."
    )]
    MissingEntryBlock { function: String },

    /// An instruction references a callable that is neither defined nor
    /// declared within the module.
    #[error(
        "An instruction of function `{function}` refers to an {kind} callable `{undefined}` that is neither defined nor declared within the module."
    )]
    UndefinedCallee {
        function: String,
        kind: FunctionPointerType,
        undefined: Uuid,
    },

    /// Two external declarations share a linking name. Runtime function
    /// resolution is keyed by name and would no longer be deterministic.
    #[error("The module declares the external function `{name}` more than once.")]
    DuplicateExternalName { name: String },
}
