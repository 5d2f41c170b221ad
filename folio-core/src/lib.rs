//! Folio Core
//!
//! Platform-agnostic page-behaviour state for the Folio portfolio site.
//! This crate holds the menu, reveal and lightbox models without any DOM or
//! browser dependencies; the web crate mirrors these models into the page.

pub mod anchor;
pub mod config;
pub mod lightbox;
pub mod nav;
pub mod reveal;
pub mod snapshot;

// Re-export commonly used types
pub use anchor::{hash_fragment, in_page_target};
pub use config::{ConfigError, LightboxConfig, NavConfig, RevealConfig, SiteConfig};
pub use lightbox::{GalleryItem, Lightbox, LightboxAction, caption_text};
pub use nav::MenuState;
pub use reveal::{MotionPreference, RevealPhase, RevealSet, RevealStep, RevealTiming};
pub use snapshot::SiteSnapshot;
