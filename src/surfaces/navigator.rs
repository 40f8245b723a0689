//! Navigator identity surfaces: the automation flag, language list, and the
//! plugin/MIME enumeration.

use super::{js_str, js_str_array, SignalOverride, Surface};
use crate::config::VeilConfig;

/// The automation flag must read as absent, not as a spoofed `false`:
/// detectors check `'webdriver' in navigator` as well as the value.
pub(super) fn render_webdriver() -> SignalOverride {
    let script = "\
patch('webdriver', () => {
  const proto = Object.getPrototypeOf(navigator);
  if ('webdriver' in proto) { delete proto.webdriver; }
  if ('webdriver' in navigator) { delete navigator.webdriver; }
  if ('webdriver' in navigator) { throw new Error('webdriver flag is not removable'); }
});"
    .to_string();

    SignalOverride {
        surface: Surface::Webdriver,
        script,
    }
}

pub(super) fn render_languages(config: &VeilConfig) -> Option<SignalOverride> {
    let languages = config.languages.as_ref()?;
    let first = languages.first()?;

    let script = format!(
        "\
patch('languages', () => {{
  const languages = Object.freeze({langs});
  Object.defineProperty(navigator, 'languages', {{ get: () => languages, configurable: true }});
  Object.defineProperty(navigator, 'language', {{ get: () => {first}, configurable: true }});
}});",
        langs = js_str_array(languages),
        first = js_str(first),
    );

    Some(SignalOverride {
        surface: Surface::Languages,
        script,
    })
}

/// Fixed ordered plugin and MIME sequences. Entries keep the native shape
/// (`name`/`filename`/`description`/`length`), and each MIME entry's
/// `enabledPlugin` points at the live plugin object it belongs to.
pub(super) fn render_plugins(config: &VeilConfig) -> Option<SignalOverride> {
    let plugins = config.plugins.as_ref()?;

    let mut body = String::new();
    for (i, plugin) in plugins.iter().enumerate() {
        body.push_str(&format!(
            "  const p{i} = {{ name: {name}, filename: {filename}, description: {description}, length: 0 }};\n",
            name = js_str(&plugin.name),
            filename = js_str(&plugin.filename),
            description = js_str(&plugin.description),
        ));
    }

    let mime_types = config.mime_types.as_deref().unwrap_or(&[]);
    for (i, mime) in mime_types.iter().enumerate() {
        // validate() guarantees the reference resolves.
        let plugin_index = plugins
            .iter()
            .position(|p| p.name == mime.enabled_plugin)
            .unwrap_or(0);
        body.push_str(&format!(
            "  const m{i} = {{ type: {mime_type}, suffixes: {suffixes}, description: {description}, enabledPlugin: p{plugin_index} }};\n",
            mime_type = js_str(&mime.mime_type),
            suffixes = js_str(&mime.suffixes),
            description = js_str(&mime.description),
        ));
        body.push_str(&format!("  p{plugin_index}.length += 1;\n"));
    }

    let plugin_refs: Vec<String> = (0..plugins.len()).map(|i| format!("p{i}")).collect();
    let mime_refs: Vec<String> = (0..mime_types.len()).map(|i| format!("m{i}")).collect();

    let script = format!(
        "\
patch('plugins', () => {{
{body}  const plugins = Object.freeze([{plugin_refs}]);
  const mimeTypes = Object.freeze([{mime_refs}]);
  Object.defineProperty(navigator, 'plugins', {{ get: () => plugins, configurable: true }});
  Object.defineProperty(navigator, 'mimeTypes', {{ get: () => mimeTypes, configurable: true }});
}});",
        plugin_refs = plugin_refs.join(", "),
        mime_refs = mime_refs.join(", "),
    );

    Some(SignalOverride {
        surface: Surface::Plugins,
        script,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MimeTypeEntry, PluginEntry};

    #[test]
    fn webdriver_fragment_deletes_rather_than_spoofs() {
        let fragment = render_webdriver();
        assert!(fragment.script.contains("delete proto.webdriver"));
        assert!(!fragment.script.contains("=> false"));
        assert!(!fragment.script.contains("=> true"));
    }

    #[test]
    fn languages_fragment_exposes_first_entry_as_language() {
        let config = VeilConfig {
            languages: Some(vec!["de-DE".to_string(), "de".to_string()]),
            ..VeilConfig::default()
        };
        let fragment = render_languages(&config).unwrap();
        assert!(fragment.script.contains(r#"["de-DE","de"]"#));
        assert!(fragment.script.contains(r#"'language', { get: () => "de-DE""#));
    }

    #[test]
    fn mime_entries_link_to_their_plugin() {
        let config = VeilConfig {
            plugins: Some(vec![
                PluginEntry {
                    name: "Chrome PDF Viewer".to_string(),
                    filename: "internal-pdf-viewer".to_string(),
                    description: "Portable Document Format".to_string(),
                },
                PluginEntry {
                    name: "Native Client".to_string(),
                    filename: "internal-nacl-plugin".to_string(),
                    description: String::new(),
                },
            ]),
            mime_types: Some(vec![MimeTypeEntry {
                mime_type: "application/x-nacl".to_string(),
                suffixes: String::new(),
                description: "Native Client Executable".to_string(),
                enabled_plugin: "Native Client".to_string(),
            }]),
            ..VeilConfig::default()
        };
        let fragment = render_plugins(&config).unwrap();
        assert!(fragment.script.contains("enabledPlugin: p1"));
        assert!(fragment.script.contains("p1.length += 1;"));
        assert!(fragment.script.contains("Object.freeze([p0, p1])"));
    }

    #[test]
    fn no_plugins_configured_means_no_fragment() {
        assert!(render_plugins(&VeilConfig::default()).is_none());
        assert!(render_languages(&VeilConfig::default()).is_none());
    }
}
