use std::time::Duration;
use thirtyfour::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chrome" => Some(Self::Chrome),
            "edge" => Some(Self::Edge),
            "firefox" => Some(Self::Firefox),
            "safari" => Some(Self::Safari),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
        }
    }

    /// Chromium browsers accept a switch forcing the reduced-motion query.
    const fn emulates_reduced_motion(self) -> bool {
        matches!(self, Self::Chrome | Self::Edge)
    }

    /// Where a locally started driver listens by default.
    const fn local_driver_url(self) -> &'static str {
        match self {
            Self::Chrome => "http://localhost:9515",
            Self::Edge => "http://localhost:17556",
            Self::Firefox => "http://localhost:4444",
            Self::Safari => "http://localhost:4445",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub implicit_wait_secs: u64,
    pub remote_hub: Option<String>,
    /// Ask the browser to emulate `prefers-reduced-motion: reduce`.
    pub reduced_motion: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            implicit_wait_secs: 3,
            remote_hub: None,
            reduced_motion: false,
        }
    }
}

impl BrowserConfig {
    fn driver_url(&self, kind: BrowserKind) -> &str {
        self.remote_hub
            .as_deref()
            .unwrap_or_else(|| kind.local_driver_url())
    }
}

pub async fn new_session(kind: BrowserKind, cfg: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let url = cfg.driver_url(kind);
    if cfg.reduced_motion && !kind.emulates_reduced_motion() {
        log::warn!("{} cannot emulate reduced motion; using its own setting", kind.label());
    }
    let driver = match kind {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if cfg.headless {
                caps.set_headless()?;
            }
            if cfg.reduced_motion {
                caps.add_arg("--force-prefers-reduced-motion")?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if cfg.headless {
                caps.set_headless()?;
            }
            if cfg.reduced_motion {
                caps.add_arg("--force-prefers-reduced-motion")?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if cfg.headless {
                caps.set_headless()?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Safari => {
            let caps = DesiredCapabilities::safari();
            WebDriver::new(url, caps).await?
        }
    };

    driver
        .set_implicit_wait_timeout(Duration::from_secs(cfg.implicit_wait_secs))
        .await?;
    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_names_parse_case_insensitively() {
        assert_eq!(BrowserKind::parse("Chrome"), Some(BrowserKind::Chrome));
        assert_eq!(BrowserKind::parse("firefox"), Some(BrowserKind::Firefox));
        assert_eq!(BrowserKind::parse("netscape"), None);
    }

    #[test]
    fn hub_overrides_local_driver() {
        let mut cfg = BrowserConfig::default();
        assert_eq!(cfg.driver_url(BrowserKind::Edge), "http://localhost:17556");
        cfg.remote_hub = Some("http://grid:4444/wd/hub".into());
        assert_eq!(cfg.driver_url(BrowserKind::Edge), "http://grid:4444/wd/hub");
    }
}
