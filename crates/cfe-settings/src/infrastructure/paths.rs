//! Per-user Documents directory resolution.
//!
//! The user settings file lives under the Documents folder, the same place the
//! Remastered launcher keeps its mods:
//!
//! - Windows: `%USERPROFILE%\Documents` (the shell's "My Documents" folder)
//! - Linux:   `$XDG_DOCUMENTS_DIR`, falling back to `~/Documents`
//! - macOS:   `~/Documents`

use std::path::PathBuf;

/// Resolves the per-user Documents directory, if the platform exposes one.
pub fn documents_dir() -> Option<PathBuf> {
    dirs::document_dir().or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_dir_is_some_when_home_is_set() {
        if dirs::home_dir().is_some() {
            assert!(documents_dir().is_some());
        }
    }
}
