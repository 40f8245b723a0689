//! Window sizing: a mismatch between outer and inner dimensions is a common
//! headless tell. Getters delegate to the inner dimensions, so the reported
//! values track any later resize.

use super::{SignalOverride, Surface};

pub(super) fn render() -> SignalOverride {
    let script = "\
patch('window-size', () => {
  Object.defineProperty(window, 'outerWidth', { get: () => window.innerWidth, configurable: true });
  Object.defineProperty(window, 'outerHeight', { get: () => window.innerHeight, configurable: true });
});"
    .to_string();

    SignalOverride {
        surface: Surface::WindowSize,
        script,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_dimensions_delegate_to_inner() {
        let fragment = render();
        assert!(fragment.script.contains("'outerWidth', { get: () => window.innerWidth"));
        assert!(fragment.script.contains("'outerHeight', { get: () => window.innerHeight"));
        // Reactive getters, not snapshots of the current size.
        assert!(!fragment.script.contains("value:"));
    }
}
