//! Loadable pass plugin exposing the GPU kernel attribute pass.
//!
//! Hosts that load this library through the manifest machinery in
//! [`gkpass::meta`] receive a descriptor whose registration callback hooks
//! the pass into their pipeline: at pipeline start under the modern pass
//! manager, and by name through the pipeline parsing surface. The legacy
//! registration needs no callback; linking this crate submits the pass to
//! the process-wide legacy registry.
use gkpass::{define_pass_plugin, pass, pipeline::modern::PassBuilder};
use log::debug;

define_pass_plugin!("gpu-kernel-attr-plugin", "0.1.0", register);

fn register(builder: &mut PassBuilder) {
    debug!("registering GPU kernel attribute pass callbacks");
    pass::register_pass_builder_callbacks(builder);
}
