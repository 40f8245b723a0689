//! Launch flags for hosts that also control the browser process. The init
//! script cannot reach signals baked into the binary at startup; these flags
//! cover that gap.

/// Chromium arguments that remove automation signals at the process level.
pub fn stealth_launch_args() -> Vec<String> {
    vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--force-webrtc-ip-handling-policy=disable_non_proxied_udp".to_string(),
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-features=IsolateOrigins,site-per-process".to_string(),
        "--disable-site-isolation-trials".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automation_controlled_flag_is_present() {
        let args = stealth_launch_args();
        assert!(args.contains(&"--disable-blink-features=AutomationControlled".to_string()));
        assert!(args.contains(
            &"--force-webrtc-ip-handling-policy=disable_non_proxied_udp".to_string()
        ));
    }
}
