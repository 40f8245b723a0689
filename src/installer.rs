//! One-shot installer for a browsing context.
//!
//! `Installer::new` validates the config, draws the randomized values once,
//! and renders the full init script up front. The script is cached: applying
//! the same installer to a context any number of times re-applies the
//! identical overrides, and the in-page nonce sentinel makes the re-run a
//! no-op, so intercepted methods are never double-wrapped.
//!
//! Each context should get its own `Installer`; two concurrently automated
//! contexts then hold independently sampled values with no shared state.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chromiumoxide::Page;

use crate::config::VeilConfig;
use crate::error::{Result, VeilError};
use crate::sampler::{SampledValues, Sampler};
use crate::surfaces::{self, SignalOverride};

pub struct Installer {
    config: VeilConfig,
    sampled: SampledValues,
    overrides: Vec<SignalOverride>,
    script: String,
}

impl Installer {
    pub fn new(config: VeilConfig) -> Result<Self> {
        Self::build(config, Sampler::new())
    }

    /// Deterministic variant for reproducible installs.
    pub fn with_seed(config: VeilConfig, seed: u64) -> Result<Self> {
        Self::build(config, Sampler::with_seed(seed))
    }

    fn build(config: VeilConfig, mut sampler: Sampler) -> Result<Self> {
        config.validate()?;
        let sampled = sampler.draw(&config)?;
        let overrides = surfaces::render_all(&config, &sampled);
        let script = assemble(&sampled, &overrides)?;

        Ok(Self {
            config,
            sampled,
            overrides,
            script,
        })
    }

    /// The complete init script, ready for a pre-navigation hook.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// The values drawn for this install.
    pub fn sampled(&self) -> &SampledValues {
        &self.sampled
    }

    /// The overrides this installer carries, in application order.
    pub fn overrides(&self) -> &[SignalOverride] {
        &self.overrides
    }

    pub fn config(&self) -> &VeilConfig {
        &self.config
    }

    /// Register the override script on the page so it runs before any page
    /// script of every subsequent navigation. Safe to call repeatedly.
    pub async fn install(&self, page: &Page) -> Result<()> {
        page.evaluate_on_new_document(self.script.clone())
            .await
            .map_err(|e| {
                VeilError::JavaScriptError(format!("failed to register init script: {e}"))
            })?;

        tracing::debug!(
            surfaces = self.overrides.len(),
            "fingerprint overrides registered on page"
        );
        Ok(())
    }
}

/// Wrap the fragments in a nonce-guarded IIFE. The nonce is derived from the
/// rendered overrides and sampled values, so re-running the same install is a
/// no-op while a genuinely different install still applies.
fn assemble(sampled: &SampledValues, overrides: &[SignalOverride]) -> Result<String> {
    let nonce = nonce(sampled, overrides)?;

    let mut script = String::new();
    script.push_str("(() => {\n");
    script.push_str("'use strict';\n");
    script.push_str(&format!("const NONCE = '{nonce}';\n"));
    script.push_str("if (window.__veil && window.__veil.nonce === NONCE) { return; }\n");
    script.push_str("const veil = { nonce: NONCE, installed: [], skipped: [], orig: {} };\n");
    script.push_str(
        "const patch = (name, fn) => { try { fn(); veil.installed.push(name); } catch (e) { veil.skipped.push(name); } };\n",
    );
    script.push_str("Object.defineProperty(window, '__veil', { value: veil, configurable: true });\n");

    for fragment in overrides {
        script.push_str(&fragment.script);
        script.push('\n');
    }

    script.push_str("})();\n");
    Ok(script)
}

fn nonce(sampled: &SampledValues, overrides: &[SignalOverride]) -> Result<String> {
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(sampled)?.hash(&mut hasher);
    for fragment in overrides {
        fragment.script.hash(&mut hasher);
    }
    Ok(format!("{:016x}", hasher.finish()))
}
