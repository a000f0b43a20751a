//! Pass-manager integration.
//!
//! Two structurally independent generations of the host pipeline's
//! registration API are supported: the eager, linearly-ordered legacy
//! manager ([`legacy`]) and the callback-extensible modern builder
//! ([`modern`]). Both resolve to the identical scan-and-annotate core in
//! [`crate::pass`]; the adapters here are shims, not alternate
//! implementations.

pub mod legacy;
pub mod modern;
