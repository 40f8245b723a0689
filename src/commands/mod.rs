pub mod apply;
pub mod check;
pub mod render;

use pageveil::{Installer, Result, VeilConfig};

/// Build an installer from the CLI's config/seed pair.
pub(crate) fn installer(config: VeilConfig, seed: Option<u64>) -> Result<Installer> {
    match seed {
        Some(seed) => Installer::with_seed(config, seed),
        None => Installer::new(config),
    }
}
