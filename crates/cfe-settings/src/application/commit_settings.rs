//! Durable writer: persists a settings document without ever leaving a
//! half-written file at the destination.
//!
//! # Commit protocol (for beginners)
//!
//! Writing a file in place is risky: if the process dies halfway through, the
//! user is left with a truncated settings file and loses their edits.  The
//! writer avoids that by staging:
//!
//! ```text
//! 1. ensure_dir(parent)            ── fails → abort, nothing written
//! 2. write + sync  <dest>.tmp      ── fails → abort, destination untouched
//! 3. promote <dest>.tmp → <dest>   ── rename, replacing the old file
//! 4. remove <dest>.tmp             ── always, success or not
//! ```
//!
//! The destination only changes in step 3, and only after the staged copy is
//! complete and flushed to storage.  A crash between steps 3 and 4 can leave a
//! stray `.tmp` file behind; the next commit simply overwrites it.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cfe_core::Document;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::settings_fs::SettingsFs;

/// Suffix appended to the destination path to form the staging file.
pub const STAGING_SUFFIX: &str = ".tmp";

/// Errors from a single commit attempt.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The destination directory could not be created.
    #[error("failed to create settings directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The staging file could not be created, written, or flushed.
    #[error("failed to stage settings at {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The staged file could not replace the destination.
    #[error("failed to replace {path} with staged settings: {source}")]
    Promote {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the staging path for `destination` (`<destination>.tmp`).
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut staged = OsString::from(destination.as_os_str());
    staged.push(STAGING_SUFFIX);
    PathBuf::from(staged)
}

/// Writes settings documents using the staged commit protocol.
pub struct DurableWriter<'a, F: ?Sized> {
    fs: &'a F,
}

impl<'a, F> DurableWriter<'a, F>
where
    F: SettingsFs + ?Sized,
{
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Commits `document` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns the [`CommitError`] of the first step that failed.  On any
    /// error the destination file is left exactly as it was.
    pub fn commit(&self, document: &Document, destination: &Path) -> Result<(), CommitError> {
        if let Some(dir) = destination.parent() {
            self.fs
                .ensure_dir(dir)
                .map_err(|source| CommitError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let staging = staging_path(destination);
        let result = self.stage_and_promote(document, &staging, destination);
        self.discard_staging(&staging);
        result
    }

    /// Commits `document` only when `changed` is set, logging the outcome.
    ///
    /// Returns `true` when the destination is up to date afterwards: either
    /// nothing needed writing or the commit succeeded.
    pub fn commit_if_changed(
        &self,
        document: &Document,
        changed: bool,
        destination: &Path,
    ) -> bool {
        if !changed {
            debug!("{} unchanged, skipping write", destination.display());
            return true;
        }

        match self.commit(document, destination) {
            Ok(()) => {
                info!("updated settings file {}", destination.display());
                true
            }
            Err(e) => {
                warn!("settings not persisted: {e}");
                false
            }
        }
    }

    fn stage_and_promote(
        &self,
        document: &Document,
        staging: &Path,
        destination: &Path,
    ) -> Result<(), CommitError> {
        self.fs
            .write_synced(staging, &document.to_bytes())
            .map_err(|source| CommitError::Stage {
                path: staging.to_path_buf(),
                source,
            })?;

        self.fs
            .promote(staging, destination)
            .map_err(|source| CommitError::Promote {
                path: destination.to_path_buf(),
                source,
            })
    }

    fn discard_staging(&self, staging: &Path) {
        match self.fs.remove_file(staging) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove staging file {}: {e}", staging.display()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings_fs::MockSettingsFs;
    use mockall::Sequence;

    const DEST: &str = "mods/CFEPatch/CFEPATCH_RA.INI";
    const STAGED: &str = "mods/CFEPatch/CFEPATCH_RA.INI.tmp";

    fn sample() -> Document {
        Document::parse("[FEATURES]\nRALLY_POINTS=1\n")
    }

    fn io_err(kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, "simulated")
    }

    #[test]
    fn test_staging_path_appends_tmp_suffix() {
        assert_eq!(staging_path(Path::new(DEST)), PathBuf::from(STAGED));
    }

    #[test]
    fn test_commit_runs_steps_in_order() {
        // Arrange
        let mut fs = MockSettingsFs::new();
        let mut seq = Sequence::new();
        fs.expect_ensure_dir()
            .withf(|dir| dir == Path::new("mods/CFEPatch"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_write_synced()
            .withf(|path, contents| {
                path == Path::new(STAGED) && contents == b"[FEATURES]\nRALLY_POINTS=1\n"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_promote()
            .withf(|from, to| from == Path::new(STAGED) && to == Path::new(DEST))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_remove_file()
            .withf(|path| path == Path::new(STAGED))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(io_err(io::ErrorKind::NotFound)));

        // Act
        let result = DurableWriter::new(&fs).commit(&sample(), Path::new(DEST));

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_commit_aborts_before_writing_when_directory_fails() {
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir()
            .returning(|_| Err(io_err(io::ErrorKind::PermissionDenied)));
        fs.expect_write_synced().never();
        fs.expect_promote().never();
        fs.expect_remove_file().never();

        let result = DurableWriter::new(&fs).commit(&sample(), Path::new(DEST));

        assert!(matches!(result, Err(CommitError::CreateDir { .. })));
    }

    #[test]
    fn test_commit_never_promotes_a_failed_stage_but_still_cleans_up() {
        // Arrange: the staging write fails part-way
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir().returning(|_| Ok(()));
        fs.expect_write_synced()
            .returning(|_, _| Err(io_err(io::ErrorKind::WriteZero)));
        fs.expect_promote().never();
        fs.expect_remove_file()
            .withf(|path| path == Path::new(STAGED))
            .times(1)
            .returning(|_| Ok(()));

        // Act
        let result = DurableWriter::new(&fs).commit(&sample(), Path::new(DEST));

        // Assert
        assert!(matches!(result, Err(CommitError::Stage { .. })));
    }

    #[test]
    fn test_commit_reports_promote_failure_and_cleans_up() {
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir().returning(|_| Ok(()));
        fs.expect_write_synced().returning(|_, _| Ok(()));
        fs.expect_promote()
            .returning(|_, _| Err(io_err(io::ErrorKind::PermissionDenied)));
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        let result = DurableWriter::new(&fs).commit(&sample(), Path::new(DEST));

        match result {
            Err(CommitError::Promote { path, .. }) => assert_eq!(path, PathBuf::from(DEST)),
            other => panic!("expected promote error, got {other:?}"),
        }
    }

    #[test]
    fn test_commit_if_changed_skips_unchanged_documents() {
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir().never();
        fs.expect_write_synced().never();

        assert!(DurableWriter::new(&fs).commit_if_changed(&sample(), false, Path::new(DEST)));
    }

    #[test]
    fn test_commit_if_changed_returns_false_on_failure() {
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir()
            .returning(|_| Err(io_err(io::ErrorKind::PermissionDenied)));

        assert!(!DurableWriter::new(&fs).commit_if_changed(&sample(), true, Path::new(DEST)));
    }

    #[test]
    fn test_commit_tolerates_cleanup_failure() {
        let mut fs = MockSettingsFs::new();
        fs.expect_ensure_dir().returning(|_| Ok(()));
        fs.expect_write_synced().returning(|_, _| Ok(()));
        fs.expect_promote().returning(|_, _| Ok(()));
        fs.expect_remove_file()
            .returning(|_| Err(io_err(io::ErrorKind::PermissionDenied)));

        assert!(DurableWriter::new(&fs).commit(&sample(), Path::new(DEST)).is_ok());
    }
}
