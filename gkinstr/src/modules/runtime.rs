//! Runtime function resolution.
//!
//! Accelerator runtime functions (kernel init/deinit markers in particular)
//! are declared on demand: a pass asking for a runtime function by name must
//! receive a callable reference whether or not the module already declares
//! it. Resolution is keyed by name and idempotent, so every query within a
//! run shares one declaration.
use log::debug;

use crate::modules::{
    Module,
    symbol::{ExternalFunction, FunctionPointer},
};

impl Module {
    /// Find the external declaration with the given name.
    pub fn find_runtime_function(&self, name: &str) -> Option<FunctionPointer> {
        self.external_functions
            .values()
            .find(|ext| ext.name == name)
            .map(|ext| FunctionPointer::External(ext.uuid))
    }

    /// Return the declaration of the named runtime function, creating a
    /// void/no-arg declaration if the module does not already carry one.
    ///
    /// Repeated calls with the same name return a reference to the same
    /// declaration. Creating the declaration mutates the module's
    /// declaration list even if no instruction ever references it.
    pub fn get_or_create_runtime_function(&mut self, name: &str) -> FunctionPointer {
        if let Some(existing) = self.find_runtime_function(name) {
            return existing;
        }

        debug!("synthesizing runtime function declaration `{}`", name);
        self.declare_external(ExternalFunction::opaque(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::modules::Module;

    #[test]
    fn resolution_is_idempotent_within_a_module() {
        let mut module = Module::new();
        let first = module.get_or_create_runtime_function("__gpukern_kernel_init");
        let second = module.get_or_create_runtime_function("__gpukern_kernel_init");
        assert_eq!(first, second);
        assert_eq!(module.external_functions.len(), 1);
    }

    #[test]
    fn resolution_reuses_existing_declarations() {
        let mut module = Module::new();
        let declared = module.declare_external(
            crate::modules::symbol::ExternalFunction::opaque("__gpukern_kernel_deinit"),
        );
        let resolved = module.get_or_create_runtime_function("__gpukern_kernel_deinit");
        assert_eq!(declared, resolved);
        assert_eq!(module.external_functions.len(), 1);
    }
}
