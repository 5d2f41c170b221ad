use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

pub mod lightbox;
pub mod nav;
pub mod reveal;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

// Browser half: drives a live page through WebDriver and the test bridge.
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// A scenario checked both against the pure models and in a browser.
pub trait CombinedScenario: BrowserScenario {
    fn name(&self) -> &'static str;

    fn run_logic(&self) -> Result<()>;
}

const SCENARIOS: &[(&str, &str)] = &[
    ("smoke", "Page mounts and exposes the test bridge"),
    ("nav-toggle", "Menu toggle flips aria-expanded and the panel class"),
    ("lightbox-cycle", "Lightbox opens, wraps in both directions and closes"),
    ("lightbox-keyboard", "Keyboard control and focus handling of the lightbox"),
    ("reveal", "Scroll reveal activates every watched element"),
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "nav-toggle" | "nav" => Some(Box::new(nav::NavToggleScenario)),
        "lightbox-cycle" | "lightbox" => Some(Box::new(lightbox::LightboxCycleScenario)),
        "lightbox-keyboard" | "keyboard" => Some(Box::new(lightbox::LightboxKeyboardScenario)),
        "reveal" | "scroll-reveal" => Some(Box::new(reveal::RevealScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

/// Expand `all` into every known scenario, keeping any explicit names.
pub fn expand_scenarios(names: Vec<String>) -> Vec<String> {
    let mut scenarios = names;
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in SCENARIOS {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push((*key).to_string());
            }
        }
    }
    scenarios
}
