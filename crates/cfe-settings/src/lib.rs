//! cfe-settings library entry point.
//!
//! Loads the patch settings at game startup: built-in defaults, then the
//! shipped `DEFAULT.*.INI`, then the user's own INI under Documents.  The
//! user's file is created on first run and topped up with any keys a newer
//! patch ships, using a staged write that never corrupts the existing file.
//!
//! Most hosts only need [`initialise`]:
//!
//! ```ignore
//! let config: cfe_core::RedAlertConfig = cfe_settings::initialise();
//! ```

/// Application layer: settings use cases.
pub mod application;

/// Infrastructure layer: real file system and platform paths.
pub mod infrastructure;

mod startup;

pub use application::bootstrap::{Bootstrap, BootstrapOptions, Bootstrapper, UserFileStatus};
pub use application::commit_settings::{CommitError, DurableWriter};
pub use application::settings_fs::SettingsFs;
pub use startup::{default_options, initialise};
