//! Canvas read-back noise: defeat canvas-hash fingerprinting by adding small
//! bounded noise to pixel reads. Only the read path is touched; draw
//! operations and the canvas backing store stay untouched (`toDataURL` and
//! `toBlob` render through an offscreen copy). The noise is drawn per read,
//! so repeated reads are never bit-identical.

use super::{SignalOverride, Surface};
use crate::config::VeilConfig;

pub(super) fn render(config: &VeilConfig) -> Option<SignalOverride> {
    let amplitude = config.canvas_noise_amplitude?;
    if amplitude == 0.0 {
        return None;
    }

    let script = format!(
        "\
patch('canvas', () => {{
  if (typeof CanvasRenderingContext2D === 'undefined') {{ throw new Error('no 2D canvas support'); }}
  const amplitude = {amplitude};
  const addNoise = (data) => {{
    for (let i = 0; i < data.length; i += 4) {{
      for (let c = 0; c < 3; c += 1) {{
        const delta = Math.round((Math.random() * 2 - 1) * amplitude);
        data[i + c] = Math.max(0, Math.min(255, data[i + c] + delta));
      }}
    }}
  }};
  const origGetImageData = CanvasRenderingContext2D.prototype.getImageData;
  veil.orig['canvas.getImageData'] = origGetImageData;
  CanvasRenderingContext2D.prototype.getImageData = function () {{
    const image = origGetImageData.apply(this, arguments);
    addNoise(image.data);
    return image;
  }};
  const readThroughCopy = (canvas, orig, args) => {{
    const copy = document.createElement('canvas');
    copy.width = canvas.width;
    copy.height = canvas.height;
    const ctx = copy.getContext('2d');
    if (!ctx || copy.width === 0 || copy.height === 0) {{ return orig.apply(canvas, args); }}
    ctx.drawImage(canvas, 0, 0);
    const image = origGetImageData.call(ctx, 0, 0, copy.width, copy.height);
    addNoise(image.data);
    ctx.putImageData(image, 0, 0);
    return orig.apply(copy, args);
  }};
  const origToDataURL = HTMLCanvasElement.prototype.toDataURL;
  veil.orig['canvas.toDataURL'] = origToDataURL;
  HTMLCanvasElement.prototype.toDataURL = function () {{
    return readThroughCopy(this, origToDataURL, arguments);
  }};
  const origToBlob = HTMLCanvasElement.prototype.toBlob;
  veil.orig['canvas.toBlob'] = origToBlob;
  HTMLCanvasElement.prototype.toBlob = function () {{
    return readThroughCopy(this, origToBlob, arguments);
  }};
}});"
    );

    Some(SignalOverride {
        surface: Surface::Canvas,
        script,
    })
}
