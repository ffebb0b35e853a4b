//! Wiring of the real file system and platform paths into the bootstrapper.

use cfe_core::{PatchSchema, Product};
use tracing::info;

use crate::application::bootstrap::{BootstrapOptions, Bootstrapper};
use crate::infrastructure::{local_fs::LocalFs, paths};

/// Standard bootstrap locations for `product` on this machine.
pub fn default_options(product: Product) -> BootstrapOptions {
    BootstrapOptions::for_product(product, paths::documents_dir().as_deref())
}

/// Runs the startup sequence for schema `S` against the real file system and
/// returns the frozen configuration.
pub fn initialise<S: PatchSchema>() -> S {
    let options = default_options(S::PRODUCT);
    let result = Bootstrapper::new(&LocalFs, options).run::<S>();
    info!("{} patch settings ready ({:?})", S::PRODUCT, result.user_file);
    result.config
}
