//! Product identities and their settings file names.
//!
//! The patch ships for both Remastered titles.  They share the reconciliation
//! logic but each has its own mod folder and its own pair of INI files:
//!
//! | Product        | Mod folder       | Shipped default            | User file          |
//! |----------------|------------------|----------------------------|--------------------|
//! | Red Alert      | `Red_Alert`      | `DEFAULT.CFEPATCH_RA.INI`  | `CFEPATCH_RA.INI`  |
//! | Tiberian Dawn  | `Tiberian_Dawn`  | `DEFAULT.CFEPATCH.INI`     | `CFEPATCH.INI`     |
//!
//! The user file lives at
//! `<Documents>/CnCRemastered/Mods/<mod folder>/CFEPatch/<user file>`.

use std::fmt;
use std::path::PathBuf;

/// Folder under the per-user Documents directory that holds all Remastered mods.
pub const MODS_ROOT: [&str; 2] = ["CnCRemastered", "Mods"];

/// Subfolder of a product's mod folder that holds the patch settings.
pub const PATCH_FOLDER: &str = "CFEPatch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    RedAlert,
    TiberianDawn,
}

impl Product {
    pub const fn mod_folder(self) -> &'static str {
        match self {
            Product::RedAlert => "Red_Alert",
            Product::TiberianDawn => "Tiberian_Dawn",
        }
    }

    /// File name of the shipped default, resolved against the game directory.
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Product::RedAlert => "DEFAULT.CFEPATCH_RA.INI",
            Product::TiberianDawn => "DEFAULT.CFEPATCH.INI",
        }
    }

    pub const fn user_file_name(self) -> &'static str {
        match self {
            Product::RedAlert => "CFEPATCH_RA.INI",
            Product::TiberianDawn => "CFEPATCH.INI",
        }
    }

    /// Directory of the user file, relative to the Documents directory.
    pub fn relative_user_dir(self) -> PathBuf {
        let mut dir: PathBuf = MODS_ROOT.iter().collect();
        dir.push(self.mod_folder());
        dir.push(PATCH_FOLDER);
        dir
    }

    /// Path of the user file, relative to the Documents directory.
    pub fn relative_user_path(self) -> PathBuf {
        self.relative_user_dir().join(self.user_file_name())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::RedAlert => f.write_str("Red Alert"),
            Product::TiberianDawn => f.write_str("Tiberian Dawn"),
        }
    }
}
