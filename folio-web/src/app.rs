//! Start-up: load configuration, mount each feature and keep the result
//! alive for the page session.

use std::cell::RefCell;

use folio_core::{MotionPreference, SiteConfig, SiteSnapshot};
use gloo::events::EventListener;
use log::LevelFilter;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom;
use crate::lightbox::LightboxGallery;
use crate::nav_toggle::NavToggle;
use crate::reveal::RevealController;

/// Id of the optional `<script type="application/json">` configuration block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("document unavailable")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl MountError {
    pub(crate) fn missing(id: &str) -> Self {
        Self::MissingElement(id.to_string())
    }

    pub(crate) fn from_js(value: JsValue) -> Self {
        Self::Js(dom::js_error_message(&value))
    }
}

/// Read the page's configuration block, falling back to the bundled
/// defaults when it is absent or invalid.
#[must_use]
pub fn load_config() -> SiteConfig {
    let block = dom::element_by_id::<Element>(CONFIG_ELEMENT_ID);
    let Some(json) = block.and_then(|el| el.text_content()) else {
        return SiteConfig::load_from_static();
    };
    match SiteConfig::from_json(&json) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            SiteConfig::load_from_static()
        }
    }
}

/// Route `log` records to the browser console at `warn` until the
/// configuration is read. Later calls keep the sink already installed.
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Warn);
}

/// Apply the configured console level, falling back to `warn`.
pub fn apply_log_level(cfg: &SiteConfig) -> LevelFilter {
    let level = cfg.log_filter().unwrap_or(LevelFilter::Warn);
    log::set_max_level(level);
    level
}

/// Fill the year placeholder with the current full year.
pub fn stamp_year(id: &str) {
    if let Some(el) = dom::element_by_id::<Element>(id) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

/// Run `f` once the document has been parsed.
pub fn when_ready(f: impl FnOnce() + 'static) {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    EventListener::once(&document, "DOMContentLoaded", move |_event| f()).forget();
}

fn mounted<T>(feature: &str, result: Result<T, MountError>) -> Option<T> {
    match result {
        Ok(component) => Some(component),
        Err(err) => {
            log::debug!("{feature} disabled: {err}");
            None
        }
    }
}

/// The page's behaviour, constructed once at start-up. Each feature is
/// optional: a feature whose elements are missing simply stays unmounted.
/// Dropping the site removes every listener it registered.
pub struct Site {
    nav: Option<NavToggle>,
    reveal: Option<RevealController>,
    lightbox: Option<LightboxGallery>,
}

impl Site {
    /// Mount with the motion preference reported by the browser.
    #[must_use]
    pub fn mount(cfg: &SiteConfig) -> Self {
        let motion = MotionPreference::from_reduce_query(dom::prefers_reduced_motion());
        Self::mount_with_motion(cfg, motion)
    }

    #[must_use]
    pub fn mount_with_motion(cfg: &SiteConfig, motion: MotionPreference) -> Self {
        stamp_year(&cfg.year_id);
        Self {
            nav: mounted("nav toggle", NavToggle::mount(&cfg.nav)),
            reveal: mounted("reveal", RevealController::mount(cfg, motion)),
            lightbox: mounted("lightbox", LightboxGallery::mount(&cfg.lightbox)),
        }
    }

    #[must_use]
    pub const fn nav(&self) -> Option<&NavToggle> {
        self.nav.as_ref()
    }

    #[must_use]
    pub const fn reveal(&self) -> Option<&RevealController> {
        self.reveal.as_ref()
    }

    #[must_use]
    pub const fn lightbox(&self) -> Option<&LightboxGallery> {
        self.lightbox.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> SiteSnapshot {
        let (revealed, reveal_total) = self
            .reveal
            .as_ref()
            .map_or((0, 0), RevealController::counts);
        SiteSnapshot {
            menu_expanded: self.nav.as_ref().map(|nav| nav.state().is_expanded()),
            lightbox_index: self.lightbox.as_ref().and_then(LightboxGallery::current),
            gallery_len: self.lightbox.as_ref().map_or(0, LightboxGallery::len),
            revealed,
            reveal_total,
            reduced_motion: self
                .reveal
                .as_ref()
                .is_some_and(|reveal| reveal.motion().is_reduced()),
        }
    }
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Install `site` as the page's live instance, dropping any previous one.
pub fn install(site: Site) {
    SITE.with(|slot| slot.replace(Some(site)));
}

/// Run `f` against the live instance, if one is installed.
pub fn with_site<R>(f: impl FnOnce(&Site) -> R) -> Option<R> {
    SITE.with(|slot| slot.borrow().as_ref().map(f))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::{MountError, apply_log_level, init_logging};
    use folio_core::SiteConfig;
    use log::LevelFilter;

    #[test]
    fn configured_level_bounds_the_console_sink() {
        init_logging();
        init_logging();
        let cfg = SiteConfig::from_json(r#"{ "log_level": "error" }"#).expect("config");
        assert_eq!(apply_log_level(&cfg), LevelFilter::Error);
        assert_eq!(log::max_level(), LevelFilter::Error);
    }

    #[test]
    fn mount_errors_name_the_element() {
        assert_eq!(
            MountError::missing("lightboxImg").to_string(),
            "missing element #lightboxImg"
        );
        assert_eq!(MountError::NoDocument.to_string(), "document unavailable");
    }
}
