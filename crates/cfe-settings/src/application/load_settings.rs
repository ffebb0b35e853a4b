//! Settings loader: reads one INI file through the [`SettingsFs`] port.
//!
//! A missing file is the normal first-run situation, not an error, so
//! [`load_document_into`] reports it as `false` and logs at debug level.  A
//! file that exists but cannot be read is logged as a warning and otherwise
//! treated the same way.

use std::io;
use std::path::{Path, PathBuf};

use cfe_core::Document;
use thiserror::Error;
use tracing::{debug, warn};

use super::settings_fs::SettingsFs;

/// Why a settings file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist (or is not a regular file).
    #[error("settings file {0} is not available")]
    Unavailable(PathBuf),

    /// The file exists but reading it failed.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads and parses the settings file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Unavailable`] when the file is missing and
/// [`LoadError::Read`] when it exists but cannot be read.  Malformed content
/// is never an error; see [`Document::parse`].
pub fn load_document<F>(fs: &F, path: &Path) -> Result<Document, LoadError>
where
    F: SettingsFs + ?Sized,
{
    if !fs.is_available(path) {
        return Err(LoadError::Unavailable(path.to_path_buf()));
    }

    let bytes = fs.read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document::from_bytes(&bytes))
}

/// Loads `path` into `document`, returning whether the file was found.
///
/// This is [`load_document`] with its errors logged: an unavailable file
/// leaves `document` exactly as it was, a successful load replaces it, and a
/// failed read leaves it cleared.
pub fn load_document_into<F>(fs: &F, path: &Path, document: &mut Document) -> bool
where
    F: SettingsFs + ?Sized,
{
    match load_document(fs, path) {
        Ok(loaded) => {
            debug!("loaded settings file {}", path.display());
            *document = loaded;
            true
        }
        Err(err @ LoadError::Unavailable(_)) => {
            debug!("{err}");
            false
        }
        Err(err @ LoadError::Read { .. }) => {
            warn!("{err}");
            document.clear();
            false
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
