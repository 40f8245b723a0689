use colored::Colorize;

use pageveil::{Result, VeilConfig, VeilError};

pub fn run(config: VeilConfig, seed: Option<u64>, verbose: bool) -> Result<()> {
    let installer = super::installer(config, seed)?;

    println!("{}", "Configuration OK".green().bold());
    println!(
        "{} surface override(s) will be installed:",
        installer.overrides().len()
    );
    for fragment in installer.overrides() {
        println!("  {} {}", "✓".green(), fragment.surface.name());
    }

    let sampled = installer.sampled();
    if let Some(cores) = sampled.hardware_concurrency {
        println!("  hardwareConcurrency -> {cores}");
    }
    if let Some(memory) = sampled.device_memory {
        println!("  deviceMemory -> {memory}");
    }
    if let Some(renderer) = &sampled.webgl_renderer {
        println!("  WebGL renderer -> {renderer}");
    }
    if let (Some(rtt), Some(downlink)) = (sampled.rtt_ms, sampled.downlink_mbps) {
        println!("  connection -> rtt {rtt}ms, downlink {downlink} Mbps");
    }

    if verbose {
        let rendered = toml::to_string_pretty(installer.config())
            .map_err(|e| VeilError::ConfigError(e.to_string()))?;
        println!("\n{}", "Effective configuration:".bold());
        println!("{rendered}");
    }

    Ok(())
}
