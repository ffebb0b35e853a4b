//! [`SettingsFs`] backed by the real file system.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::application::settings_fs::SettingsFs;

/// Local disk adapter built on `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl SettingsFs for LocalFs {
    fn is_available(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn write_synced(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(contents)?;
        file.sync_all()
    }

    fn promote(&self, from: &Path, to: &Path) -> io::Result<()> {
        // Replaces an existing `to` on every supported platform.
        fs::rename(from, to)
    }

    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut source = File::open(from)?;
        let mut target = OpenOptions::new().write(true).create_new(true).open(to)?;
        io::copy(&mut source, &mut target)?;
        target.sync_all()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
