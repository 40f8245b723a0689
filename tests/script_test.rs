//! End-to-end assertions over the rendered init script.

use std::collections::HashMap;
use std::io::Write;

use pageveil::{Installer, PermissionState, VeilConfig};

#[test]
fn full_profile_script_covers_every_surface() {
    let installer = Installer::with_seed(VeilConfig::recommended(), 7).unwrap();
    let script = installer.script();

    // Automation flag reported as absent, never as a boolean.
    assert!(script.contains("delete proto.webdriver"));
    assert!(!script.contains("'webdriver', { get: () => false"));

    // Plugin/MIME sequences with native shape and internal consistency.
    assert!(script.contains(r#"name: "Shockwave Flash""#));
    assert!(script.contains("enabledPlugin: p0"));

    // Window sizing rule.
    assert!(script.contains("'outerWidth', { get: () => window.innerWidth"));

    // GPU identity codes with pass-through for everything else.
    assert!(script.contains("parameter === 37445"));
    assert!(script.contains("parameter === 37446"));
    assert!(script.contains("return orig.apply(this, arguments);"));

    // Live canvas read-back noise.
    assert!(script.contains("getImageData"));
    assert!(script.contains("Math.random()"));

    // Stable connection descriptor and permission delegation.
    assert!(script.contains("Object.freeze"));
    assert!(script.contains("return origQuery(parameters);"));

    // Debug channel suppression.
    assert!(script.contains("console.debug = () => {};"));
}

#[test]
fn hardware_draw_is_stable_within_an_install_and_uniform_across_installs() {
    let mut counts: HashMap<u32, u32> = HashMap::new();

    for seed in 0..1000 {
        let installer = Installer::with_seed(VeilConfig::recommended(), seed).unwrap();
        let cores = installer.sampled().hardware_concurrency.unwrap();

        // The drawn value is baked into the script as a constant, so every
        // read in the installed context returns the same number.
        assert!(installer
            .script()
            .contains(&format!("'hardwareConcurrency', {{ get: () => {cores}")));

        *counts.entry(cores).or_default() += 1;
    }

    for candidate in [4u32, 8, 12] {
        let count = counts.get(&candidate).copied().unwrap_or(0);
        assert!(
            (233..=433).contains(&count),
            "candidate {candidate} drawn {count}/1000 times"
        );
    }
}

#[test]
fn independent_installs_do_not_share_sampled_values() {
    // Across many unseeded installers, at least two distinct draws must show
    // up; a shared cached value would collapse them all to one.
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        let installer = Installer::new(VeilConfig::recommended()).unwrap();
        seen.insert((
            installer.sampled().hardware_concurrency,
            installer.sampled().device_memory,
        ));
    }
    assert!(seen.len() > 1, "100 independent installs drew identical values");
}

#[test]
fn reapplying_the_same_install_is_a_noop() {
    let installer = Installer::with_seed(VeilConfig::recommended(), 11).unwrap();
    let script = installer.script();

    // The script guards on its own nonce before touching anything.
    let guard_pos = script
        .find("if (window.__veil && window.__veil.nonce === NONCE) { return; }")
        .expect("nonce guard missing");
    let first_patch = script.find("patch('").expect("no patches rendered");
    assert!(guard_pos < first_patch, "guard must run before any patch");

    // Rendering twice from the same installer is byte-identical.
    assert_eq!(script, installer.script());
}

#[test]
fn unmapped_surfaces_pass_through_untouched() {
    let mut permissions = HashMap::new();
    permissions.insert("geolocation".to_string(), PermissionState::Granted);
    let config = VeilConfig {
        permissions: Some(permissions),
        ..VeilConfig::default()
    };

    let installer = Installer::with_seed(config, 0).unwrap();
    let script = installer.script();

    assert!(script.contains(r#""geolocation": "granted","#));
    // Nothing else is touched: no navigator/webgl/canvas patches rendered.
    assert!(!script.contains("hardwareConcurrency"));
    assert!(!script.contains("WebGLRenderingContext"));
    assert!(!script.contains("getImageData"));
    assert!(!script.contains("webdriver"));
}

#[test]
fn config_file_layers_over_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        webdriver = true
        languages = ["fr-FR", "fr"]
        hardware_concurrency_choices = [6]

        [webgl]
        vendor = "Intel Inc."
        renderer_choices = ["Intel Iris Xe Graphics"]
        "#
    )
    .unwrap();

    let config = VeilConfig::load(Some(file.path())).unwrap();
    assert!(config.webdriver);
    assert_eq!(config.languages.as_deref().unwrap(), ["fr-FR", "fr"]);
    assert_eq!(config.hardware_concurrency_choices, Some(vec![6]));
    assert!(config.connection.is_none());

    let installer = Installer::with_seed(config, 0).unwrap();
    assert_eq!(installer.sampled().hardware_concurrency, Some(6));
    assert!(installer
        .script()
        .contains(r#"const renderer = "Intel Iris Xe Graphics";"#));
}

#[test]
fn invalid_config_file_fails_before_any_install() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "canvas_noise_amplitude = -1.0").unwrap();
    assert!(VeilConfig::load(Some(file.path())).is_err());
}
