//! pageveil — fingerprint presentation layer for CDP-driven browsers.
//!
//! Automated browsing sessions leak identity through a handful of
//! browser-exposed surfaces: the automation flag, hardware descriptors,
//! WebGL identity strings, canvas read-back hashes, the connection
//! descriptor, and permission query results. This crate renders a single
//! init script that overrides a configured subset of those surfaces with
//! plausible, internally consistent values and registers it on a page
//! before any page script can observe the originals.
//!
//! ```no_run
//! # async fn run(page: chromiumoxide::Page) -> pageveil::Result<()> {
//! use pageveil::{Installer, VeilConfig};
//!
//! let installer = Installer::new(VeilConfig::recommended())?;
//! installer.install(&page).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Randomized surfaces (hardware concurrency, device memory, WebGL renderer,
//! connection timings) are sampled once per [`Installer`] and baked into the
//! script as constants; repeated reads inside one context always agree, and
//! independent installers never share draws.

pub mod config;
pub mod error;
pub mod installer;
pub mod launch;
pub mod sampler;
pub mod surfaces;

pub use config::{
    ConnectionConfig, MimeTypeEntry, PermissionState, PluginEntry, VeilConfig, WebglConfig,
};
pub use error::{Result, VeilError};
pub use installer::Installer;
pub use launch::stealth_launch_args;
pub use sampler::{SampledValues, Sampler};
pub use surfaces::{SignalOverride, Surface};
