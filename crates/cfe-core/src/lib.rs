//! # cfe-core
//!
//! Settings model for the CFE Patch: the ordered INI document, the
//! default-into-user reconciliation, and the typed per-product configuration
//! the game reads at runtime.
//!
//! This crate performs no I/O.  Loading files, persisting the reconciled user
//! file, and resolving the per-user Documents directory live in
//! `cfe-settings`.
//!
//! # How the pieces fit (for beginners)
//!
//! - **`domain::document`** – [`Document`] parses and writes the
//!   `[SECTION]` / `KEY=VALUE` text format while preserving order.
//!
//! - **`domain::reconcile`** – [`reconcile`] copies keys that a newer shipped
//!   default knows about into an older user document, never touching values
//!   the user already has.
//!
//! - **`domain::patch_config`** – [`RedAlertConfig`] and
//!   [`TiberianDawnConfig`] are the typed settings.  Both implement
//!   [`PatchSchema`], which layers documents on top of built-in defaults and
//!   keeps every value inside its legal range.

pub mod domain;

pub use domain::document::{Document, LineEnding, Section};
pub use domain::patch_config::{
    clamp_wall_build_length, PatchSchema, RedAlertConfig, TiberianDawnConfig, FEATURES, SETTINGS,
    WALL_BUILD_LENGTH_RANGE,
};
pub use domain::product::Product;
pub use domain::reconcile::reconcile;
