//! Hardware descriptors: CPU core count and device memory.
//!
//! The values are drawn once per install and emitted as constants, so every
//! read within one context returns the same number.

use super::{SignalOverride, Surface};
use crate::sampler::SampledValues;

pub(super) fn render(sampled: &SampledValues) -> Option<SignalOverride> {
    if sampled.hardware_concurrency.is_none() && sampled.device_memory.is_none() {
        return None;
    }

    let mut body = String::new();
    if let Some(cores) = sampled.hardware_concurrency {
        body.push_str(&format!(
            "  Object.defineProperty(navigator, 'hardwareConcurrency', {{ get: () => {cores}, configurable: true }});\n"
        ));
    }
    if let Some(memory) = sampled.device_memory {
        body.push_str(&format!(
            "  Object.defineProperty(navigator, 'deviceMemory', {{ get: () => {memory}, configurable: true }});\n"
        ));
    }

    Some(SignalOverride {
        surface: Surface::Hardware,
        script: format!("patch('hardware', () => {{\n{body}}});"),
    })
}
