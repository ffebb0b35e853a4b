//! Bootstrapper: builds the effective patch configuration at startup.
//!
//! # Startup sequence
//!
//! ```text
//! built-in defaults
//!   └─ + shipped default INI        (skipped if missing)
//!        └─ user INI found?
//!             ├─ yes: + user INI, reconcile(default → user),
//!             │       rewrite user INI if keys were added
//!             └─ no:  copy shipped default to the user path
//! ```
//!
//! The sequence is linear and runs exactly once.  Nothing in it is fatal: any
//! failure is logged and the configuration reached so far is used.  The
//! caller gets back a plain [`Bootstrap`] value; there is no global state.

use std::io;
use std::path::{Path, PathBuf};

use cfe_core::{reconcile, Document, PatchSchema, Product};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::commit_settings::DurableWriter;
use super::load_settings::load_document_into;
use super::settings_fs::SettingsFs;

/// Where the bootstrapper looks for the two settings files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Shipped default INI, usually relative to the game directory.
    pub default_path: PathBuf,
    /// Per-user INI.  `None` when no Documents directory could be resolved,
    /// in which case only the built-in and shipped defaults apply.
    pub user_path: Option<PathBuf>,
}

impl BootstrapOptions {
    /// Standard locations for `product`, given the per-user Documents
    /// directory (if one is known).
    pub fn for_product(product: Product, documents_dir: Option<&Path>) -> Self {
        Self {
            default_path: PathBuf::from(product.default_file_name()),
            user_path: documents_dir.map(|dir| dir.join(product.relative_user_path())),
        }
    }

    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    pub fn with_user_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_path = Some(path.into());
        self
    }
}

/// What happened to the user settings file during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFileStatus {
    /// No user path was configured; the user stage was skipped.
    NoUserPath,
    /// Loaded, and it already contained every default key.
    UpToDate,
    /// Loaded, missing keys were merged in, and the file was rewritten.
    Reconciled,
    /// Loaded and merged, but the rewrite failed.  The file on disk is
    /// unchanged; the merged keys apply for this run only.
    ReconcileNotPersisted,
    /// Absent, and seeded from a copy of the shipped default.
    Seeded,
    /// Absent, and could not be seeded (no shipped default or copy failed).
    Missing,
}

/// Result of a bootstrap run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap<S> {
    /// The frozen effective configuration.
    pub config: S,
    pub user_file: UserFileStatus,
}

/// Errors from seeding a missing user file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("shipped default {0} is not available")]
    NoDefault(PathBuf),

    #[error("failed to create settings directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs the startup sequence against a [`SettingsFs`].
pub struct Bootstrapper<'a, F: ?Sized> {
    fs: &'a F,
    options: BootstrapOptions,
}

impl<'a, F> Bootstrapper<'a, F>
where
    F: SettingsFs + ?Sized,
{
    pub fn new(fs: &'a F, options: BootstrapOptions) -> Self {
        Self { fs, options }
    }

    /// Builds the effective configuration for schema `S`.
    pub fn run<S: PatchSchema>(&self) -> Bootstrap<S> {
        let mut config = S::builtin();

        let mut defaults = Document::new();
        if load_document_into(self.fs, &self.options.default_path, &mut defaults) {
            config.populate(&defaults);
        } else {
            debug!(
                "no shipped default at {}, using built-in {} settings",
                self.options.default_path.display(),
                S::PRODUCT
            );
        }

        let Some(user_path) = self.options.user_path.as_deref() else {
            warn!("no user settings path resolved for {}", S::PRODUCT);
            return Bootstrap {
                config,
                user_file: UserFileStatus::NoUserPath,
            };
        };

        let mut user = Document::new();
        let user_file = if load_document_into(self.fs, user_path, &mut user) {
            config.populate(&user);
            self.update_user_file(&defaults, &mut user, user_path)
        } else {
            match self.seed_user_file(user_path) {
                Ok(()) => {
                    info!("created {} from shipped default", user_path.display());
                    UserFileStatus::Seeded
                }
                Err(e) => {
                    debug!("user settings not seeded: {e}");
                    UserFileStatus::Missing
                }
            }
        };

        Bootstrap { config, user_file }
    }

    /// Merges missing default keys into `user` and persists it if anything
    /// was added.
    fn update_user_file(
        &self,
        defaults: &Document,
        user: &mut Document,
        user_path: &Path,
    ) -> UserFileStatus {
        let changed = reconcile(defaults, user);
        if !changed {
            return UserFileStatus::UpToDate;
        }

        if DurableWriter::new(self.fs).commit_if_changed(user, changed, user_path) {
            UserFileStatus::Reconciled
        } else {
            UserFileStatus::ReconcileNotPersisted
        }
    }

    /// Copies the shipped default verbatim to `user_path`, never replacing a
    /// file that already exists there.
    fn seed_user_file(&self, user_path: &Path) -> Result<(), SeedError> {
        let default_path = &self.options.default_path;
        if !self.fs.is_available(default_path) {
            return Err(SeedError::NoDefault(default_path.clone()));
        }

        if let Some(dir) = user_path.parent() {
            self.fs
                .ensure_dir(dir)
                .map_err(|source| SeedError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        self.fs
            .copy_new(default_path, user_path)
            .map_err(|source| SeedError::Copy {
                from: default_path.clone(),
                to: user_path.to_path_buf(),
                source,
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings_fs::MockSettingsFs;
    use cfe_core::RedAlertConfig;

    const DEFAULT: &str = "DEFAULT.CFEPATCH_RA.INI";
    const USER: &str = "docs/CFEPatch/CFEPATCH_RA.INI";

    fn options() -> BootstrapOptions {
        BootstrapOptions::for_product(Product::RedAlert, None)
            .with_default_path(DEFAULT)
            .with_user_path(USER)
    }

    /// A mock where only the listed files exist, with the given contents.
    fn fs_with(files: &'static [(&'static str, &'static str)]) -> MockSettingsFs {
        let mut fs = MockSettingsFs::new();
        fs.expect_is_available()
            .returning(move |p| files.iter().any(|(name, _)| p == Path::new(name)));
        fs.expect_read().returning(move |p| {
            files
                .iter()
                .find(|(name, _)| p == Path::new(name))
                .map(|(_, text)| text.as_bytes().to_vec())
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        });
        fs
    }

    #[test]
    fn test_for_product_builds_user_path_under_documents() {
        let documents = Path::new("/home/u/Documents");

        let opts = BootstrapOptions::for_product(Product::RedAlert, Some(documents));

        assert_eq!(opts.default_path, PathBuf::from("DEFAULT.CFEPATCH_RA.INI"));
        assert_eq!(opts.user_path, Some(documents.join(Product::RedAlert.relative_user_path())));
    }

    #[test]
    fn test_for_product_without_documents_has_no_user_path() {
        let opts = BootstrapOptions::for_product(Product::TiberianDawn, None);
        assert_eq!(opts.user_path, None);
        assert_eq!(opts.default_path, PathBuf::from("DEFAULT.CFEPATCH.INI"));
    }

    #[test]
    fn test_run_with_no_files_yields_builtin_defaults() {
        // Arrange
        let mut fs = fs_with(&[]);
        fs.expect_ensure_dir().never();
        fs.expect_copy_new().never();

        // Act
        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        // Assert
        assert_eq!(result.config, RedAlertConfig::builtin());
        assert_eq!(result.user_file, UserFileStatus::Missing);
    }

    #[test]
    fn test_run_without_user_path_applies_shipped_default_only() {
        let fs = fs_with(&[(DEFAULT, "[FEATURES]\nRALLY_POINTS=1\n")]);
        let opts = BootstrapOptions::for_product(Product::RedAlert, None)
            .with_default_path(DEFAULT);

        let result = Bootstrapper::new(&fs, opts).run::<RedAlertConfig>();

        assert!(result.config.enable_rally_points);
        assert_eq!(result.user_file, UserFileStatus::NoUserPath);
    }

    #[test]
    fn test_run_user_values_override_shipped_default() {
        let fs = fs_with(&[
            (DEFAULT, "[FEATURES]\nRALLY_POINTS=1\n\n[SETTINGS]\nWALL_BUILD_LENGTH=3\n"),
            (USER, "[FEATURES]\nRALLY_POINTS=0\n\n[SETTINGS]\nWALL_BUILD_LENGTH=6\n"),
        ]);

        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        assert!(!result.config.enable_rally_points);
        assert_eq!(result.config.wall_build_length, 6);
        assert_eq!(result.user_file, UserFileStatus::UpToDate);
    }

    #[test]
    fn test_run_clamps_after_each_layer() {
        let fs = fs_with(&[
            (DEFAULT, "[SETTINGS]\nWALL_BUILD_LENGTH=50\n"),
            (USER, "[SETTINGS]\nWALL_BUILD_LENGTH=-5\n"),
        ]);

        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        assert_eq!(result.config.wall_build_length, 1);
    }

    #[test]
    fn test_run_rewrites_user_file_when_keys_are_missing() {
        // Arrange
        let mut fs = fs_with(&[(DEFAULT, "[FEATURES]\nRALLY_POINTS=1\n"), (USER, "")]);
        fs.expect_ensure_dir().times(1).returning(|_| Ok(()));
        fs.expect_write_synced()
            .withf(|path, contents| {
                path == Path::new("docs/CFEPatch/CFEPATCH_RA.INI.tmp")
                    && contents == b"[FEATURES]\nRALLY_POINTS=1\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_promote().times(1).returning(|_, _| Ok(()));
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        // Act
        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        // Assert
        assert_eq!(result.user_file, UserFileStatus::Reconciled);
        assert!(result.config.enable_rally_points);
    }

    #[test]
    fn test_run_keeps_going_when_rewrite_fails() {
        let mut fs = fs_with(&[
            (DEFAULT, "[FEATURES]\nRALLY_POINTS=1\nOOM_REPAIR=1\n"),
            (USER, "[FEATURES]\nOOM_REPAIR=0\n"),
        ]);
        fs.expect_ensure_dir().returning(|_| Ok(()));
        fs.expect_write_synced()
            .returning(|_, _| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        fs.expect_promote().never();
        fs.expect_remove_file().returning(|_| Ok(()));

        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        assert_eq!(result.user_file, UserFileStatus::ReconcileNotPersisted);
        assert!(result.config.enable_rally_points);
        assert!(!result.config.enable_oom_repair);
    }

    #[test]
    fn test_run_seeds_missing_user_file_from_default() {
        let mut fs = fs_with(&[(DEFAULT, "[FEATURES]\nRALLY_POINTS=1\n")]);
        fs.expect_ensure_dir()
            .withf(|dir| dir == Path::new("docs/CFEPatch"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_copy_new()
            .withf(|from, to| from == Path::new(DEFAULT) && to == Path::new(USER))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_synced().never();

        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        assert_eq!(result.user_file, UserFileStatus::Seeded);
        assert!(result.config.enable_rally_points);
    }

    #[test]
    fn test_run_does_not_seed_when_directory_creation_fails() {
        let mut fs = fs_with(&[(DEFAULT, "[FEATURES]\nRALLY_POINTS=1\n")]);
        fs.expect_ensure_dir()
            .returning(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        fs.expect_copy_new().never();

        let result = Bootstrapper::new(&fs, options()).run::<RedAlertConfig>();

        assert_eq!(result.user_file, UserFileStatus::Missing);
        assert!(result.config.enable_rally_points);
    }
}
