//! Configuration for the fingerprint presentation layer.
//!
//! Every surface is optional: a missing key leaves the corresponding browser
//! surface untouched (native behavior preserved), and unknown keys in a config
//! file are ignored. `VeilConfig::default()` therefore overrides nothing;
//! `VeilConfig::recommended()` is the full profile used by the CLI when no
//! config file is given.

use std::collections::HashMap;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeilError};

/// Forced grant state returned for an intercepted permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

impl PermissionState {
    /// The string the Permissions API exposes as `PermissionStatus.state`.
    pub fn as_js(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
        }
    }
}

/// One entry of the spoofed `navigator.plugins` sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    pub filename: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of the spoofed `navigator.mimeTypes` sequence.
///
/// `enabled_plugin` must name an entry of the plugin list so the two
/// sequences stay internally consistent; `validate` rejects dangling
/// references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MimeTypeEntry {
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default)]
    pub suffixes: String,
    #[serde(default)]
    pub description: String,
    pub enabled_plugin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebglConfig {
    /// Returned for UNMASKED_VENDOR_WEBGL (0x9245).
    #[serde(default = "default_webgl_vendor")]
    pub vendor: String,
    /// One of these is sampled per install for UNMASKED_RENDERER_WEBGL (0x9246).
    #[serde(default = "default_webgl_renderers")]
    pub renderer_choices: Vec<String>,
}

impl Default for WebglConfig {
    fn default() -> Self {
        Self {
            vendor: default_webgl_vendor(),
            renderer_choices: default_webgl_renderers(),
        }
    }
}

fn default_webgl_vendor() -> String {
    "Mozilla".to_string()
}

fn default_webgl_renderers() -> Vec<String> {
    vec!["Mozilla Firefox".to_string()]
}

/// Spoofed `navigator.connection` descriptor. RTT and downlink are sampled
/// once per install from the configured inclusive ranges; reads within one
/// context always see the same values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_effective_type")]
    pub effective_type: String,
    /// Inclusive [low, high] bounds in milliseconds.
    #[serde(default = "default_rtt_range")]
    pub rtt_ms: [u32; 2],
    /// Inclusive [low, high] bounds in megabits per second.
    #[serde(default = "default_downlink_range")]
    pub downlink_mbps: [f64; 2],
    #[serde(default)]
    pub save_data: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            effective_type: default_effective_type(),
            rtt_ms: default_rtt_range(),
            downlink_mbps: default_downlink_range(),
            save_data: false,
        }
    }
}

fn default_effective_type() -> String {
    "4g".to_string()
}

fn default_rtt_range() -> [u32; 2] {
    [50, 150]
}

fn default_downlink_range() -> [f64; 2] {
    [5.0, 10.0]
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    /// Hide the automation flag. The flag is reported as absent, never as a
    /// spoofed `false` (some detectors check presence, not value).
    pub webdriver: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_types: Option<Vec<MimeTypeEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    /// Candidate values for `navigator.hardwareConcurrency`, sampled
    /// uniformly once per install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_concurrency_choices: Option<Vec<u32>>,

    /// Candidate values for `navigator.deviceMemory`, sampled uniformly once
    /// per install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_memory_choices: Option<Vec<u32>>,

    /// Force `window.outerWidth/Height` to track the inner dimensions.
    pub match_outer_to_inner: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<WebglConfig>,

    /// Amplitude of the live per-channel noise added to canvas read-back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_noise_amplitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionConfig>,

    /// Permission name -> forced state. Unmapped names delegate to the
    /// native query, preserving its asynchronous resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<HashMap<String, PermissionState>>,

    /// Replace `console.debug` with a no-op.
    pub silence_console_debug: bool,
}

impl VeilConfig {
    /// Full profile covering every surface, with the values an ordinary
    /// Firefox session would present.
    pub fn recommended() -> Self {
        let mut permissions = HashMap::new();
        permissions.insert("notifications".to_string(), PermissionState::Denied);

        Self {
            webdriver: true,
            plugins: Some(vec![PluginEntry {
                name: "Shockwave Flash".to_string(),
                filename: "libflashplayer.so".to_string(),
                description: "Shockwave Flash 32.0 r0".to_string(),
            }]),
            mime_types: Some(vec![MimeTypeEntry {
                mime_type: "application/x-shockwave-flash".to_string(),
                suffixes: "swf".to_string(),
                description: "Shockwave Flash".to_string(),
                enabled_plugin: "Shockwave Flash".to_string(),
            }]),
            languages: Some(vec!["en-US".to_string(), "en".to_string()]),
            hardware_concurrency_choices: Some(vec![4, 8, 12]),
            device_memory_choices: Some(vec![4, 8, 16]),
            match_outer_to_inner: true,
            webgl: Some(WebglConfig::default()),
            canvas_noise_amplitude: Some(1.0),
            connection: Some(ConnectionConfig::default()),
            permissions: Some(permissions),
            silence_console_debug: true,
        }
    }

    /// Load configuration from a TOML file (if given) and `PAGEVEIL_*`
    /// environment variables, layered over the empty defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(VeilConfig::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        let config: VeilConfig = figment
            .merge(Env::prefixed("PAGEVEIL_").split("__"))
            .extract()
            .map_err(|e| VeilError::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot be installed: empty randomized
    /// choice sets, negative noise amplitude, inverted sampling ranges, and
    /// MIME entries pointing at plugins that are not in the plugin list.
    pub fn validate(&self) -> Result<()> {
        if let Some(choices) = &self.hardware_concurrency_choices {
            if choices.is_empty() {
                return Err(VeilError::InvalidConfig(
                    "hardware_concurrency_choices is empty".to_string(),
                ));
            }
        }

        if let Some(choices) = &self.device_memory_choices {
            if choices.is_empty() {
                return Err(VeilError::InvalidConfig(
                    "device_memory_choices is empty".to_string(),
                ));
            }
        }

        if let Some(languages) = &self.languages {
            if languages.is_empty() {
                return Err(VeilError::InvalidConfig("languages is empty".to_string()));
            }
        }

        if let Some(webgl) = &self.webgl {
            if webgl.renderer_choices.is_empty() {
                return Err(VeilError::InvalidConfig(
                    "webgl.renderer_choices is empty".to_string(),
                ));
            }
        }

        if let Some(amplitude) = self.canvas_noise_amplitude {
            if amplitude < 0.0 {
                return Err(VeilError::InvalidConfig(format!(
                    "canvas_noise_amplitude must be non-negative, got {amplitude}"
                )));
            }
        }

        if let Some(connection) = &self.connection {
            if connection.rtt_ms[0] > connection.rtt_ms[1] {
                return Err(VeilError::InvalidConfig(format!(
                    "connection.rtt_ms range is inverted: [{}, {}]",
                    connection.rtt_ms[0], connection.rtt_ms[1]
                )));
            }
            if connection.downlink_mbps[0] > connection.downlink_mbps[1]
                || connection.downlink_mbps[0] < 0.0
            {
                return Err(VeilError::InvalidConfig(format!(
                    "connection.downlink_mbps range is invalid: [{}, {}]",
                    connection.downlink_mbps[0], connection.downlink_mbps[1]
                )));
            }
        }

        if let Some(mime_types) = &self.mime_types {
            let plugins = self.plugins.as_deref().unwrap_or(&[]);
            for entry in mime_types {
                if !plugins.iter().any(|p| p.name == entry.enabled_plugin) {
                    return Err(VeilError::InvalidConfig(format!(
                        "mime type {} references unknown plugin {:?}",
                        entry.mime_type, entry.enabled_plugin
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_overrides_nothing() {
        let config = VeilConfig::default();
        assert!(!config.webdriver);
        assert!(config.plugins.is_none());
        assert!(config.webgl.is_none());
        assert!(config.permissions.is_none());
        assert!(!config.match_outer_to_inner);
        config.validate().unwrap();
    }

    #[test]
    fn recommended_config_is_valid() {
        let config = VeilConfig::recommended();
        config.validate().unwrap();
        assert!(config.webdriver);
        assert_eq!(config.hardware_concurrency_choices, Some(vec![4, 8, 12]));
        assert_eq!(config.device_memory_choices, Some(vec![4, 8, 16]));
    }

    #[test]
    fn empty_choice_set_is_rejected() {
        let config = VeilConfig {
            hardware_concurrency_choices: Some(vec![]),
            ..VeilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VeilError::InvalidConfig(_))
        ));
    }

    #[test]
    fn negative_noise_amplitude_is_rejected() {
        let config = VeilConfig {
            canvas_noise_amplitude: Some(-0.5),
            ..VeilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VeilError::InvalidConfig(_))
        ));
    }

    #[test]
    fn dangling_mime_plugin_reference_is_rejected() {
        let config = VeilConfig {
            mime_types: Some(vec![MimeTypeEntry {
                mime_type: "application/pdf".to_string(),
                suffixes: "pdf".to_string(),
                description: String::new(),
                enabled_plugin: "Nonexistent Plugin".to_string(),
            }]),
            ..VeilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VeilError::InvalidConfig(_))
        ));
    }

    #[test]
    fn inverted_rtt_range_is_rejected() {
        let config = VeilConfig {
            connection: Some(ConnectionConfig {
                rtt_ms: [200, 100],
                ..ConnectionConfig::default()
            }),
            ..VeilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VeilError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: VeilConfig = toml::from_str(
            r#"
            webdriver = true
            languages = ["en-US", "en"]
            some_future_key = "ignored"
            "#,
        )
        .unwrap();
        assert!(config.webdriver);
        assert_eq!(config.languages.as_deref().unwrap().len(), 2);
    }

    #[test]
    fn permission_states_parse_lowercase() {
        let config: VeilConfig = toml::from_str(
            r#"
            [permissions]
            notifications = "denied"
            geolocation = "granted"
            midi = "prompt"
            "#,
        )
        .unwrap();
        let permissions = config.permissions.unwrap();
        assert_eq!(permissions["notifications"], PermissionState::Denied);
        assert_eq!(permissions["geolocation"], PermissionState::Granted);
        assert_eq!(permissions["midi"].as_js(), "prompt");
    }
}
