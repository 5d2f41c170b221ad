//! Staggered section reveal.
//!
//! Elements are revealed by three triggers: a click on an in-page navigation
//! link, a `hashchange`, or the element scrolling into view. The per-element
//! phases live in [`folio_core::RevealSet`]; this module mirrors them into
//! the `reveal` / `reveal--active` classes and inline `transition-delay`.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    MotionPreference, RevealConfig, RevealSet, RevealTiming, SiteConfig, hash_fragment,
    in_page_target,
};
use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::app::MountError;
use crate::dom;

struct SectionReveal {
    root: Element,
    items: Vec<HtmlElement>,
    state: RevealSet,
}

struct RevealInner {
    cfg: RevealConfig,
    timing: RevealTiming,
    motion: MotionPreference,
    sections: RefCell<Vec<SectionReveal>>,
}

impl RevealInner {
    fn collect_section(&self, root: Element) -> SectionReveal {
        let items = dom::query_all_html(&root, &self.cfg.element_selector);
        let state = RevealSet::new(items.len());
        SectionReveal { root, items, state }
    }

    /// Index of the section rooted at `target`, registering it on first use
    /// so that any element id can be a navigation target.
    fn section_index(&self, target: &Element) -> usize {
        let mut sections = self.sections.borrow_mut();
        if let Some(index) = sections.iter().position(|s| &s.root == target) {
            return index;
        }
        let section = self.collect_section(target.clone());
        sections.push(section);
        sections.len() - 1
    }

    fn sync_from_dom(&self, section: &mut SectionReveal) {
        for (index, item) in section.items.iter().enumerate() {
            if item.class_list().contains(&self.cfg.active_class) {
                section.state.activate(index);
            }
        }
    }

    fn show(&self, item: &HtmlElement, drop_pending: bool) {
        let classes = item.class_list();
        if drop_pending {
            let _ = classes.remove_1(&self.cfg.pending_class);
        }
        let _ = classes.add_1(&self.cfg.active_class);
        dom::set_style(item, "transition-delay", "");
    }

    fn hold(&self, item: &HtmlElement, delay_ms: u32) {
        let _ = item.class_list().add_1(&self.cfg.pending_class);
        dom::set_style(item, "transition-delay", &format!("{delay_ms}ms"));
    }

    fn reveal_section_now(&self, section: &mut SectionReveal) {
        section.state.reveal_all();
        for item in &section.items {
            self.show(item, true);
        }
    }

    /// Navigation path: cascade the section's unrevealed elements.
    fn reveal_section(self: &Rc<Self>, target: &Element) {
        let section_index = self.section_index(target);
        let steps = {
            let mut sections = self.sections.borrow_mut();
            let Some(section) = sections.get_mut(section_index) else {
                return;
            };
            if self.motion.is_reduced() {
                self.reveal_section_now(section);
                return;
            }
            self.sync_from_dom(section);
            let steps = section.state.schedule(self.timing);
            for step in &steps {
                if let Some(item) = section.items.get(step.index) {
                    self.hold(item, step.transition_delay_ms);
                }
            }
            steps
        };

        log::debug!(
            "reveal: scheduling {} elements in section {section_index}",
            steps.len()
        );
        for step in steps {
            let inner = self.clone();
            dom::defer(step.activate_after_ms, move || {
                inner.activate(section_index, step.index);
            });
        }
    }

    fn activate(&self, section_index: usize, item_index: usize) {
        let mut sections = self.sections.borrow_mut();
        let Some(section) = sections.get_mut(section_index) else {
            return;
        };
        if section.state.activate(item_index)
            && let Some(item) = section.items.get(item_index)
        {
            self.show(item, false);
        }
    }

    /// Observer path: activate every occurrence of `target`.
    fn activate_element(&self, target: &Element) {
        let mut sections = self.sections.borrow_mut();
        for section in sections.iter_mut() {
            for (index, item) in section.items.iter().enumerate() {
                let item_el: &Element = item;
                if item_el == target && section.state.activate(index) {
                    self.show(item, false);
                }
            }
        }
    }

    /// Assign scroll delays and return the elements to observe.
    fn prepare_scroll(&self) -> Vec<HtmlElement> {
        let mut observed = Vec::new();
        let mut sections = self.sections.borrow_mut();
        for section in sections.iter_mut() {
            self.sync_from_dom(section);
            for (index, delay_ms) in section.state.prepare_for_scroll(self.timing) {
                if let Some(item) = section.items.get(index) {
                    self.hold(item, delay_ms);
                    observed.push(item.clone());
                }
            }
        }
        observed
    }

    fn reveal_everything(&self) -> usize {
        let mut sections = self.sections.borrow_mut();
        let mut total = 0;
        for section in sections.iter_mut() {
            self.reveal_section_now(section);
            total += section.items.len();
        }
        total
    }

    /// Distinct elements revealed and tracked. A lazily registered target
    /// can share elements with a section, so each element counts once.
    fn counts(&self) -> (usize, usize) {
        let sections = self.sections.borrow();
        let mut seen: Vec<(&Element, bool)> = Vec::new();
        for section in sections.iter() {
            for (index, item) in section.items.iter().enumerate() {
                let item: &Element = item;
                let revealed = section.state.is_revealed(index);
                match seen.iter_mut().find(|(el, _)| *el == item) {
                    Some((_, was_revealed)) => *was_revealed |= revealed,
                    None => seen.push((item, revealed)),
                }
            }
        }
        let revealed = seen.iter().filter(|(_, revealed)| *revealed).count();
        (revealed, seen.len())
    }

    fn is_revealed(&self, target: &Element) -> bool {
        let sections = self.sections.borrow();
        sections.iter().any(|section| {
            section.items.iter().enumerate().any(|(index, item)| {
                let item_el: &Element = item;
                item_el == target && section.state.is_revealed(index)
            })
        })
    }
}

/// One-shot intersection observer; disconnects when dropped.
struct ScrollObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl ScrollObserver {
    fn new(inner: &Rc<RevealInner>) -> Result<Self, MountError> {
        let callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        inner.activate_element(&target);
                        observer.unobserve(&target);
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&inner.cfg.root_margin);
        init.set_threshold(&JsValue::from_f64(inner.cfg.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(MountError::from_js)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe(&self, item: &Element) {
        self.observer.observe(item);
    }
}

impl Drop for ScrollObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn scroll_to(target: &Element, motion: MotionPreference) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(if motion.is_reduced() {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    });
    opts.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

fn push_hash(id: &str) {
    let Some(history) = dom::window().and_then(|win| win.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&format!("#{id}"))) {
        log::debug!("reveal: pushState failed: {}", dom::js_error_message(&err));
    }
}

pub struct RevealController {
    inner: Rc<RevealInner>,
    _observer: Option<ScrollObserver>,
    _links: Vec<EventListener>,
    _hashchange: Option<EventListener>,
}

impl RevealController {
    /// Collect sections, then either reveal everything (reduced motion) or
    /// arm the scroll observer, and wire navigation links and `hashchange`.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is unavailable or the intersection
    /// observer cannot be created.
    pub fn mount(cfg: &SiteConfig, motion: MotionPreference) -> Result<Self, MountError> {
        let document = dom::document().ok_or(MountError::NoDocument)?;
        let root = document.document_element().ok_or(MountError::NoDocument)?;

        let inner = Rc::new(RevealInner {
            cfg: cfg.reveal.clone(),
            timing: RevealTiming::from(&cfg.reveal),
            motion,
            sections: RefCell::new(Vec::new()),
        });
        let sections: Vec<SectionReveal> = dom::query_all(&root, &cfg.reveal.section_selector)
            .into_iter()
            .map(|section| inner.collect_section(section))
            .collect();
        inner.sections.replace(sections);

        let observer = if motion.is_reduced() {
            let total = inner.reveal_everything();
            log::info!("reveal: reduced motion, {total} elements shown immediately");
            None
        } else {
            let observer = ScrollObserver::new(&inner)?;
            for item in inner.prepare_scroll() {
                observer.observe(&item);
            }
            Some(observer)
        };

        let links = dom::query_all(&root, &cfg.nav.link_selector)
            .into_iter()
            .map(|link| link_listener(&inner, link))
            .collect();

        let hashchange = dom::window().map(|win| {
            let inner = inner.clone();
            EventListener::new(&win, "hashchange", move |_event| {
                let hash = dom::window()
                    .and_then(|w| w.location().hash().ok())
                    .unwrap_or_default();
                let Some(target) =
                    hash_fragment(&hash).and_then(dom::element_by_id::<Element>)
                else {
                    return;
                };
                let inner = inner.clone();
                dom::defer(inner.cfg.hash_reveal_delay_ms, move || {
                    inner.reveal_section(&target);
                });
            })
        });

        Ok(Self {
            inner,
            _observer: observer,
            _links: links,
            _hashchange: hashchange,
        })
    }

    /// Trigger the navigation cascade for the section rooted at `target`.
    pub fn reveal(&self, target: &Element) {
        self.inner.reveal_section(target);
    }

    /// `(revealed, total)` across all known sections.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        self.inner.counts()
    }

    #[must_use]
    pub fn is_revealed(&self, element: &Element) -> bool {
        self.inner.is_revealed(element)
    }

    #[must_use]
    pub fn motion(&self) -> MotionPreference {
        self.inner.motion
    }
}

fn link_listener(inner: &Rc<RevealInner>, link: Element) -> EventListener {
    let inner = inner.clone();
    let target_link = link.clone();
    EventListener::new_with_options(
        &link,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(href) = target_link.get_attribute("href") else {
                return;
            };
            let Some(id) = in_page_target(&href) else {
                return;
            };
            let Some(target) = dom::element_by_id::<Element>(id) else {
                return;
            };
            event.prevent_default();

            scroll_to(&target, inner.motion);
            let delay_ms = if inner.motion.is_reduced() {
                0
            } else {
                inner.cfg.nav_reveal_delay_ms
            };
            let reveal_inner = inner.clone();
            dom::defer(delay_ms, move || reveal_inner.reveal_section(&target));
            push_hash(id);
        },
    )
}
