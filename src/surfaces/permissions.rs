//! Permission query interception: configured names resolve to their forced
//! state; every other name delegates to the saved native query, keeping its
//! asynchronous resolution contract intact.

use super::{js_str, SignalOverride, Surface};
use crate::config::VeilConfig;

pub(super) fn render(config: &VeilConfig) -> Option<SignalOverride> {
    let permissions = config.permissions.as_ref()?;
    if permissions.is_empty() {
        return None;
    }

    // Sorted for a deterministic script; HashMap order is not.
    let mut entries: Vec<(&String, &str)> = permissions
        .iter()
        .map(|(name, state)| (name, state.as_js()))
        .collect();
    entries.sort_by_key(|(name, _)| name.as_str());

    let forced = entries
        .iter()
        .map(|(name, state)| format!("    {}: {},", js_str(name), js_str(state)))
        .collect::<Vec<_>>()
        .join("\n");

    let script = format!(
        "\
patch('permissions', () => {{
  if (!navigator.permissions || !navigator.permissions.query) {{ throw new Error('no Permissions API'); }}
  const forced = {{
{forced}
  }};
  const origQuery = navigator.permissions.query.bind(navigator.permissions);
  veil.orig['permissions.query'] = origQuery;
  navigator.permissions.query = (parameters) => {{
    const name = parameters && parameters.name;
    if (typeof name === 'string' && Object.prototype.hasOwnProperty.call(forced, name)) {{
      return Promise.resolve({{ state: forced[name], onchange: null }});
    }}
    return origQuery(parameters);
  }};
}});"
    );

    Some(SignalOverride {
        surface: Surface::Permissions,
        script,
    })
}
