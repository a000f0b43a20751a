//! Intermediate representation for the gpukern accelerator toolchain.
//!
//! The crate exposes the module/function/instruction model that analysis
//! and transformation passes operate on, together with the query surface
//! those passes need: use-edge walks over callable references, function
//! attribute sets, and create-if-absent resolution of well-known runtime
//! function declarations.

pub mod analysis;
pub mod modules;
pub mod types;
pub mod utils;
