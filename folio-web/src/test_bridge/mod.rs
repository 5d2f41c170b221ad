//! `window.__folioTest` hooks for browser automation, enabled with `?test=1`.

#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

/// Name of the bridge object on `window`.
pub const BRIDGE_GLOBAL: &str = "__folioTest";

/// Whether a `location.search` string opts into the test bridge.
#[must_use]
pub fn test_mode_requested(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "test=1")
}

/// Thumbnail index passed from script. Only whole, non-negative numbers
/// name a thumbnail.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn index_arg(value: Option<f64>) -> Option<usize> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as usize)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn install_test_bridge() {
    stub::install_test_bridge();
}

#[cfg(target_arch = "wasm32")]
pub fn install_test_bridge() {
    wasm::install_test_bridge();
}
