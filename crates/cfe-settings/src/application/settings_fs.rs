//! File-system port used by the settings use cases.
//!
//! The loader, the durable writer, and the bootstrapper never call `std::fs`
//! directly.  They go through [`SettingsFs`], which the infrastructure layer
//! implements with real files (`infrastructure::local_fs::LocalFs`) and unit
//! tests replace with a `mockall` mock to simulate I/O failures at any step.
//!
//! Every operation is synchronous and blocking; bootstrap runs once at
//! startup before any other subsystem exists.

use std::io;
use std::path::Path;

/// The handful of file operations the settings bootstrap needs.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsFs {
    /// Returns `true` if `path` names an existing regular file.
    fn is_available(&self, path: &Path) -> bool;

    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Creates `dir` and any missing parents.  Succeeds if it already exists.
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// Creates (or truncates) `path`, writes `contents`, and flushes the file
    /// to storage before closing it.
    fn write_synced(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Moves `from` over `to`, replacing any existing file at `to`.
    fn promote(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies `from` to `to`.  Fails with [`io::ErrorKind::AlreadyExists`] if
    /// `to` already exists.
    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
