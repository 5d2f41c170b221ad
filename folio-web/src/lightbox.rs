//! Accessible lightbox over the portfolio gallery.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{GalleryItem, Lightbox, LightboxAction, LightboxConfig};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::app::MountError;
use crate::dom;
use crate::input::{is_activation_key, normalize_key};

fn read_item(thumb: &HtmlElement, cfg: &LightboxConfig) -> GalleryItem {
    let img = thumb
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    let thumb_src = img.as_ref().map(HtmlImageElement::src).unwrap_or_default();
    let alt = img.as_ref().map(HtmlImageElement::alt).unwrap_or_default();
    let large = thumb.get_attribute(&cfg.large_attribute);
    GalleryItem::from_thumbnail(
        large.as_deref(),
        &thumb_src,
        &alt,
        &dom::child_text(thumb, &cfg.title_selector),
        &dom::child_text(thumb, &cfg.meta_selector),
    )
}

struct LightboxView {
    overlay: HtmlElement,
    image: HtmlImageElement,
    caption: Element,
    close: Option<HtmlElement>,
    thumbnails: Vec<HtmlElement>,
    focus_delay_ms: u32,
    model: RefCell<Lightbox>,
}

impl LightboxView {
    fn open(&self, index: usize) -> bool {
        let item = {
            let mut model = self.model.borrow_mut();
            match model.open(index) {
                Some(item) => item.clone(),
                None => return false,
            }
        };

        self.image.set_src(&item.src);
        self.image.set_alt(&item.alt);
        self.caption.set_text_content(Some(&item.caption()));
        let _ = self.overlay.set_attribute("aria-hidden", "false");
        if let Some(body) = dom::document().and_then(|doc| doc.body()) {
            dom::set_style(&body, "overflow", "hidden");
        }
        if let Some(close) = self.close.clone() {
            dom::defer(self.focus_delay_ms, move || {
                let _ = close.focus();
            });
        }
        log::debug!("lightbox: showing item {index}");
        true
    }

    fn close(&self) -> Option<usize> {
        let _ = self.overlay.set_attribute("aria-hidden", "true");
        if let Some(body) = dom::document().and_then(|doc| doc.body()) {
            dom::set_style(&body, "overflow", "");
        }
        let previous = self.model.borrow_mut().close();
        if let Some(thumb) = previous.and_then(|index| self.thumbnails.get(index)) {
            let _ = thumb.focus();
        }
        previous
    }

    fn step(&self, direction: isize) -> bool {
        let target = self.model.borrow().step_target(direction);
        target.is_some_and(|index| self.open(index))
    }

    fn handle_key(&self, key: &str) -> bool {
        let action = self.model.borrow().action_for_key(normalize_key(key));
        match action {
            Some(LightboxAction::Close) => {
                self.close();
                true
            }
            Some(nav) => nav.direction().is_some_and(|dir| self.step(dir)),
            None => false,
        }
    }
}

/// Owns the gallery model, the overlay handles and every listener.
pub struct LightboxGallery {
    view: Rc<LightboxView>,
    _listeners: Vec<EventListener>,
}

impl LightboxGallery {
    /// Discover gallery items and wire thumbnails, overlay controls and the
    /// document-level keyboard handler.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::MissingElement`] when the gallery, overlay,
    /// image or caption element is absent.
    pub fn mount(cfg: &LightboxConfig) -> Result<Self, MountError> {
        let gallery: Element = dom::element_by_id(&cfg.gallery_id)
            .ok_or_else(|| MountError::missing(&cfg.gallery_id))?;
        let overlay: HtmlElement = dom::element_by_id(&cfg.overlay_id)
            .ok_or_else(|| MountError::missing(&cfg.overlay_id))?;
        let image: HtmlImageElement = dom::element_by_id(&cfg.image_id)
            .ok_or_else(|| MountError::missing(&cfg.image_id))?;
        let caption: Element = dom::element_by_id(&cfg.caption_id)
            .ok_or_else(|| MountError::missing(&cfg.caption_id))?;
        let close: Option<HtmlElement> = dom::element_by_id(&cfg.close_id);
        let prev: Option<HtmlElement> = dom::element_by_id(&cfg.prev_id);
        let next: Option<HtmlElement> = dom::element_by_id(&cfg.next_id);

        let thumbnails = dom::query_all_html(&gallery, &cfg.item_selector);
        let items: Vec<GalleryItem> = thumbnails.iter().map(|t| read_item(t, cfg)).collect();
        log::info!("lightbox: {} gallery items", items.len());

        let view = Rc::new(LightboxView {
            overlay,
            image,
            caption,
            close: close.clone(),
            thumbnails,
            focus_delay_ms: cfg.focus_delay_ms,
            model: RefCell::new(Lightbox::new(items)),
        });

        let mut listeners = Vec::new();
        for (index, thumb) in view.thumbnails.iter().enumerate() {
            let on_click = view.clone();
            listeners.push(EventListener::new_with_options(
                thumb,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    on_click.open(index);
                },
            ));
            let on_key = view.clone();
            listeners.push(EventListener::new_with_options(
                thumb,
                "keydown",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if !is_activation_key(normalize_key(&key_event.key())) {
                        return;
                    }
                    event.prevent_default();
                    on_key.open(index);
                },
            ));
        }

        if let Some(close) = &close {
            let view = view.clone();
            listeners.push(EventListener::new(close, "click", move |_event| {
                view.close();
            }));
        }
        for (control, direction) in [(prev, -1_isize), (next, 1)] {
            if let Some(control) = control {
                let view = view.clone();
                listeners.push(EventListener::new(&control, "click", move |_event| {
                    view.step(direction);
                }));
            }
        }

        {
            let backdrop: EventTarget = view.overlay.clone().into();
            let overlay = view.overlay.clone();
            let view = view.clone();
            listeners.push(EventListener::new(&overlay, "click", move |event| {
                // Clicks inside the figure bubble up with a different target.
                if event.target().as_ref() == Some(&backdrop) {
                    view.close();
                }
            }));
        }

        if let Some(document) = dom::document() {
            let view = view.clone();
            listeners.push(EventListener::new(&document, "keydown", move |event| {
                if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                    view.handle_key(&key_event.key());
                }
            }));
        }

        Ok(Self {
            view,
            _listeners: listeners,
        })
    }

    /// Show the item at `index`; returns `false` when the index is invalid.
    pub fn open(&self, index: usize) -> bool {
        self.view.open(index)
    }

    /// Hide the overlay, returning the index that was open.
    pub fn close(&self) -> Option<usize> {
        self.view.close()
    }

    /// Move `direction` items with wrap-around; `false` on an empty gallery.
    pub fn step(&self, direction: isize) -> bool {
        self.view.step(direction)
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.view.model.borrow().current()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.view.model.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.model.borrow().is_empty()
    }

    #[must_use]
    pub fn items(&self) -> Vec<GalleryItem> {
        self.view.model.borrow().items().to_vec()
    }
}
