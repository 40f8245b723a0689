//! Network descriptor: report a stable connection profile. RTT and downlink
//! are sampled once per install within the configured bounds, matching the
//! stability rule for the hardware descriptors.

use super::{js_str, SignalOverride, Surface};
use crate::config::VeilConfig;
use crate::sampler::SampledValues;

pub(super) fn render(config: &VeilConfig, sampled: &SampledValues) -> Option<SignalOverride> {
    let connection = config.connection.as_ref()?;
    let rtt = sampled.rtt_ms?;
    let downlink = sampled.downlink_mbps?;

    let script = format!(
        "\
patch('connection', () => {{
  const profile = Object.freeze({{
    effectiveType: {effective_type},
    rtt: {rtt},
    downlink: {downlink},
    saveData: {save_data},
    onchange: null,
    addEventListener: () => {{}},
    removeEventListener: () => {{}},
  }});
  Object.defineProperty(navigator, 'connection', {{ get: () => profile, configurable: true }});
}});",
        effective_type = js_str(&connection.effective_type),
        save_data = connection.save_data,
    );

    Some(SignalOverride {
        surface: Surface::Connection,
        script,
    })
}
