//! GPU identity: intercept `getParameter` and substitute the configured
//! vendor/renderer strings for the two unmasked-identity parameter codes.
//! Every other code passes through to the saved original implementation.

use super::{js_str, SignalOverride, Surface};
use crate::config::VeilConfig;
use crate::sampler::SampledValues;

// WEBGL_debug_renderer_info parameter codes.
const UNMASKED_VENDOR_WEBGL: u32 = 37445;
const UNMASKED_RENDERER_WEBGL: u32 = 37446;

pub(super) fn render(config: &VeilConfig, sampled: &SampledValues) -> Option<SignalOverride> {
    let webgl = config.webgl.as_ref()?;
    let renderer = sampled.webgl_renderer.as_ref()?;

    let script = format!(
        "\
patch('webgl', () => {{
  if (typeof WebGLRenderingContext === 'undefined') {{ throw new Error('no WebGL support'); }}
  const vendor = {vendor};
  const renderer = {renderer};
  const wrap = (proto, key) => {{
    const orig = proto.getParameter;
    veil.orig[key] = orig;
    proto.getParameter = function (parameter) {{
      if (parameter === {vendor_code}) {{ return vendor; }}
      if (parameter === {renderer_code}) {{ return renderer; }}
      return orig.apply(this, arguments);
    }};
  }};
  wrap(WebGLRenderingContext.prototype, 'webgl.getParameter');
  if (typeof WebGL2RenderingContext !== 'undefined') {{
    wrap(WebGL2RenderingContext.prototype, 'webgl2.getParameter');
  }}
}});",
        vendor = js_str(&webgl.vendor),
        renderer = js_str(renderer),
        vendor_code = UNMASKED_VENDOR_WEBGL,
        renderer_code = UNMASKED_RENDERER_WEBGL,
    );

    Some(SignalOverride {
        surface: Surface::Webgl,
        script,
    })
}
