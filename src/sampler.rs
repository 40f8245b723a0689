//! Per-install sampling of randomized surface values.
//!
//! Every randomized surface is drawn exactly once, when the installer is
//! built, and the draw is baked into the generated script as a constant.
//! Repeated reads within one installed context therefore always return the
//! same value; re-sampling on every property read is a detectable anomaly.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::VeilConfig;
use crate::error::{Result, VeilError};

/// Random source for surface draws. Seeded for reproducible installs in
/// tests, thread RNG otherwise.
pub enum Sampler {
    Random(ThreadRng),
    Seeded(StdRng),
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    pub fn new() -> Self {
        Self::Random(thread_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Draw the per-install values for every randomized surface the config
    /// enables. Unconfigured surfaces stay `None`.
    pub fn draw(&mut self, config: &VeilConfig) -> Result<SampledValues> {
        let hardware_concurrency = match &config.hardware_concurrency_choices {
            Some(choices) => Some(*self.choose(choices, "hardware_concurrency_choices")?),
            None => None,
        };

        let device_memory = match &config.device_memory_choices {
            Some(choices) => Some(*self.choose(choices, "device_memory_choices")?),
            None => None,
        };

        let webgl_renderer = match &config.webgl {
            Some(webgl) => Some(
                self.choose(&webgl.renderer_choices, "webgl.renderer_choices")?
                    .clone(),
            ),
            None => None,
        };

        let (rtt_ms, downlink_mbps) = match &config.connection {
            Some(connection) => (
                Some(self.range_u32(connection.rtt_ms[0], connection.rtt_ms[1])),
                Some(self.range_f64(connection.downlink_mbps[0], connection.downlink_mbps[1])),
            ),
            None => (None, None),
        };

        Ok(SampledValues {
            hardware_concurrency,
            device_memory,
            webgl_renderer,
            rtt_ms,
            downlink_mbps,
        })
    }

    fn choose<'a, T>(&mut self, choices: &'a [T], what: &str) -> Result<&'a T> {
        let picked = match self {
            Self::Random(rng) => choices.choose(rng),
            Self::Seeded(rng) => choices.choose(rng),
        };
        picked.ok_or_else(|| VeilError::InvalidConfig(format!("{what} is empty")))
    }

    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        match self {
            Self::Random(rng) => rng.gen_range(low..=high),
            Self::Seeded(rng) => rng.gen_range(low..=high),
        }
    }

    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        // Two decimals, matching the precision real connection descriptors report.
        let raw = match self {
            Self::Random(rng) => rng.gen_range(low..=high),
            Self::Seeded(rng) => rng.gen_range(low..=high),
        };
        (raw * 100.0).round() / 100.0
    }
}

/// The values drawn for one install, cached for the context's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledValues {
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<u32>,
    pub webgl_renderer: Option<String>,
    pub rtt_ms: Option<u32>,
    pub downlink_mbps: Option<f64>,
}
