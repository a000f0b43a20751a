//! Kernel-entry attribute pass and pipeline integration for gpukern.
//!
//! The crate exposes a minimal surface area: the shared scan-and-annotate
//! core ([`pass::KernelEntryPass`]), the two pass-manager generations it
//! plugs into ([`pipeline::modern`], [`pipeline::legacy`]), and the
//! loadable-plugin ABI ([`plugin`], [`meta`]) host tools use to discover
//! the pass.

pub mod config;
pub mod magic;
pub mod meta;
pub mod pass;
pub mod pipeline;
pub mod plugin;
pub mod utils;

pub extern crate inventory;
pub extern crate semver;
