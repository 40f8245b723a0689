//! Interception script fragments, one per identity-revealing surface.
//!
//! Each configured surface renders to one [`SignalOverride`]: a JavaScript
//! fragment that patches the surface inside the page. Fragments run inside
//! the installer's `patch(name, fn)` wrapper, which catches any failure
//! (missing capability, sealed prototype) and records the surface name in
//! `__veil.skipped` instead of propagating, so one unsupported surface never
//! blocks the rest of the install. Fragments that delegate to native
//! behavior save the original member in the in-page `__veil.orig` table and
//! call it through that saved reference.

mod canvas;
mod connection;
mod hardware;
mod navigator;
mod permissions;
mod webgl;
mod window;

use crate::config::VeilConfig;
use crate::sampler::SampledValues;

/// One intercepted property or method on a browser-global object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Webdriver,
    Languages,
    Plugins,
    Hardware,
    WindowSize,
    Webgl,
    Canvas,
    Connection,
    Permissions,
    DebugChannel,
}

impl Surface {
    /// Name used in the in-page installed/skipped bookkeeping.
    pub fn name(self) -> &'static str {
        match self {
            Self::Webdriver => "webdriver",
            Self::Languages => "languages",
            Self::Plugins => "plugins",
            Self::Hardware => "hardware",
            Self::WindowSize => "window-size",
            Self::Webgl => "webgl",
            Self::Canvas => "canvas",
            Self::Connection => "connection",
            Self::Permissions => "permissions",
            Self::DebugChannel => "console-debug",
        }
    }
}

/// A rendered override: the surface it targets and the script fragment that
/// installs it.
#[derive(Debug, Clone)]
pub struct SignalOverride {
    pub surface: Surface,
    pub script: String,
}

/// Render the override fragments for every surface the config enables, in a
/// fixed order so the assembled script is deterministic.
pub fn render_all(config: &VeilConfig, sampled: &SampledValues) -> Vec<SignalOverride> {
    let mut overrides = Vec::new();

    if config.webdriver {
        overrides.push(navigator::render_webdriver());
    }
    if let Some(fragment) = navigator::render_languages(config) {
        overrides.push(fragment);
    }
    if let Some(fragment) = navigator::render_plugins(config) {
        overrides.push(fragment);
    }
    if let Some(fragment) = hardware::render(sampled) {
        overrides.push(fragment);
    }
    if config.match_outer_to_inner {
        overrides.push(window::render());
    }
    if let Some(fragment) = webgl::render(config, sampled) {
        overrides.push(fragment);
    }
    if let Some(fragment) = canvas::render(config) {
        overrides.push(fragment);
    }
    if let Some(fragment) = connection::render(config, sampled) {
        overrides.push(fragment);
    }
    if let Some(fragment) = permissions::render(config) {
        overrides.push(fragment);
    }
    if config.silence_console_debug {
        overrides.push(SignalOverride {
            surface: Surface::DebugChannel,
            script: "\
patch('console-debug', () => {
  veil.orig['console.debug'] = console.debug;
  console.debug = () => {};
});"
            .to_string(),
        });
    }

    overrides
}

/// Escape a Rust string into a JavaScript string literal.
pub(crate) fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

/// Escape a list of strings into a JavaScript array literal.
pub(crate) fn js_str_array(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}
