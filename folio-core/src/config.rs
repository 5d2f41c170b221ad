//! Site configuration: DOM hooks, class names and timings.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const DEFAULT_SITE_DATA: &str = include_str!("../data/site.json");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid log level: {0}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub log_level: String,
    pub year_id: String,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub lightbox: LightboxConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_id: String,
    pub panel_id: String,
    pub active_class: String,
    pub link_selector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub section_selector: String,
    pub element_selector: String,
    pub pending_class: String,
    pub active_class: String,
    pub stagger_step_ms: u32,
    pub settle_ms: u32,
    pub nav_reveal_delay_ms: u32,
    pub hash_reveal_delay_ms: u32,
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub gallery_id: String,
    pub item_selector: String,
    pub title_selector: String,
    pub meta_selector: String,
    pub large_attribute: String,
    pub overlay_id: String,
    pub image_id: String,
    pub caption_id: String,
    pub close_id: String,
    pub prev_id: String,
    pub next_id: String,
    pub focus_delay_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            year_id: "year".to_string(),
            nav: NavConfig::default(),
            reveal: RevealConfig::default(),
            lightbox: LightboxConfig::default(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "navToggle".to_string(),
            panel_id: "primaryNav".to_string(),
            active_class: "is-active".to_string(),
            link_selector: ".primary-nav a[href^=\"#\"]".to_string(),
        }
    }
}

const REVEAL_ELEMENTS: &str = "h1,h2,h3,p,img,figure,.service,.about-media,\
.about-content,.hero-title,.hero-lead,.btn";

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section_selector: "section".to_string(),
            element_selector: REVEAL_ELEMENTS.to_string(),
            pending_class: "reveal".to_string(),
            active_class: "reveal--active".to_string(),
            stagger_step_ms: 90,
            settle_ms: 30,
            nav_reveal_delay_ms: 250,
            hash_reveal_delay_ms: 120,
            threshold: 0.06,
            root_margin: "0px 0px -8% 0px".to_string(),
        }
    }
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            gallery_id: "gallery".to_string(),
            item_selector: ".gallery-item".to_string(),
            title_selector: ".caption-title".to_string(),
            meta_selector: ".caption-meta".to_string(),
            large_attribute: "data-large".to_string(),
            overlay_id: "lightbox".to_string(),
            image_id: "lightboxImg".to_string(),
            caption_id: "lightboxCaption".to_string(),
            close_id: "lightboxClose".to_string(),
            prev_id: "lightboxPrev".to_string(),
            next_id: "lightboxNext".to_string(),
            focus_delay_ms: 60,
        }
    }
}

impl SiteConfig {
    /// Parse a configuration document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the log level is unknown.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.log_filter()?;
        Ok(cfg)
    }

    /// The configuration bundled with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SITE_DATA).unwrap_or_default()
    }

    /// Maximum log level for the console sink.
    ///
    /// # Errors
    ///
    /// Returns an error if `log_level` is not a `log` level name.
    pub fn log_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        log::LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
