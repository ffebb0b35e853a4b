//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and `cfe_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod local_fs;
pub mod paths;
