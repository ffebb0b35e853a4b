//! Application layer: the settings use cases.
//!
//! Everything here works against the [`settings_fs::SettingsFs`] port rather
//! than `std::fs`, so every failure path can be exercised in unit tests.
//!
//! # Sub-modules
//!
//! - **`settings_fs`**     – The file-system port trait.
//!
//! - **`load_settings`**   – Reads one INI file; a missing file is reported,
//!   not raised.
//!
//! - **`commit_settings`** – The durable writer: stage to `<file>.tmp`, flush,
//!   promote over the destination, always clean up.
//!
//! - **`bootstrap`**       – The startup sequence that layers built-in,
//!   shipped, and user settings and keeps the user file up to date.

pub mod bootstrap;
pub mod commit_settings;
pub mod load_settings;
pub mod settings_fs;
