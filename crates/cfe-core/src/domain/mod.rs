//! Domain logic for the patch settings.
//!
//! Everything here is pure: no file system, no platform directories, no
//! global state.  The application layer in `cfe-settings` decides where
//! documents come from and where they go; this module decides what they
//! contain.

/// Ordered INI document (the settings store).
pub mod document;

/// Per-product effective configuration schemas.
pub mod patch_config;

/// Product identities and file naming.
pub mod product;

/// One-way merge of shipped defaults into a user document.
pub mod reconcile;
