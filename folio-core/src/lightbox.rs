//! Lightbox gallery model.
//!
//! The gallery is an ordered list of [`GalleryItem`]s discovered once at
//! start-up, plus the index of the item currently shown in the overlay.

use serde::{Deserialize, Serialize};

/// Separator placed between a caption title and its meta line.
pub const CAPTION_SEPARATOR: &str = " — ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub meta: String,
}

impl GalleryItem {
    /// Build an item from the raw values read off a thumbnail.
    ///
    /// A non-empty `large` source wins over the thumbnail's own source.
    #[must_use]
    pub fn from_thumbnail(
        large: Option<&str>,
        thumb_src: &str,
        alt: &str,
        title: &str,
        meta: &str,
    ) -> Self {
        let src = large
            .filter(|s| !s.is_empty())
            .unwrap_or(thumb_src)
            .to_string();
        Self {
            src,
            alt: alt.to_string(),
            title: title.to_string(),
            meta: meta.to_string(),
        }
    }

    #[must_use]
    pub fn caption(&self) -> String {
        caption_text(&self.title, &self.meta)
    }
}

/// Caption shown under the enlarged image: the title alone, or
/// `title — meta` when there is meta text.
#[must_use]
pub fn caption_text(title: &str, meta: &str) -> String {
    let title = title.trim();
    let meta = meta.trim();
    if meta.is_empty() {
        title.to_string()
    } else {
        format!("{title}{CAPTION_SEPARATOR}{meta}")
    }
}

/// Overlay commands reachable from the keyboard while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    Next,
    Previous,
}

impl LightboxAction {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            _ => None,
        }
    }

    /// Step direction for navigation actions.
    #[must_use]
    pub const fn direction(self) -> Option<isize> {
        match self {
            Self::Close => None,
            Self::Next => Some(1),
            Self::Previous => Some(-1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    items: Vec<GalleryItem>,
    current: Option<usize>,
}

impl Lightbox {
    #[must_use]
    pub const fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            current: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Show the item at `index`. Out-of-range indices leave the state alone
    /// and return `None`.
    pub fn open(&mut self, index: usize) -> Option<&GalleryItem> {
        if index >= self.items.len() {
            log::debug!("lightbox: ignoring open({index}) on {} items", self.items.len());
            return None;
        }
        self.current = Some(index);
        self.items.get(index)
    }

    /// Hide the overlay and return the index that was open, so focus can go
    /// back to that thumbnail.
    pub fn close(&mut self) -> Option<usize> {
        self.current.take()
    }

    /// Index reached by moving `direction` steps from the current item,
    /// wrapping at both ends. A closed lightbox counts as sitting just before
    /// the first item.
    #[must_use]
    pub fn step_target(&self, direction: isize) -> Option<usize> {
        let count = i64::try_from(self.items.len()).ok().filter(|n| *n > 0)?;
        let current = self
            .current
            .and_then(|c| i64::try_from(c).ok())
            .unwrap_or(-1);
        let direction = i64::try_from(direction).ok()?;
        let target = (current + direction + count).rem_euclid(count);
        usize::try_from(target).ok()
    }

    /// Move `direction` steps and show the resulting item. No-op on an empty
    /// gallery.
    pub fn step(&mut self, direction: isize) -> Option<&GalleryItem> {
        let target = self.step_target(direction)?;
        self.open(target)
    }

    /// Keyboard action for `key`, or `None` while the overlay is closed.
    #[must_use]
    pub fn action_for_key(&self, key: &str) -> Option<LightboxAction> {
        if !self.is_open() {
            return None;
        }
        LightboxAction::from_key(key)
    }
}
