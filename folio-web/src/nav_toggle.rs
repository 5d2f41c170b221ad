//! Mobile navigation toggle.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::{MenuState, NavConfig};
use gloo::events::EventListener;
use web_sys::{Element, HtmlElement};

use crate::app::MountError;
use crate::dom;

struct NavView {
    toggle: HtmlElement,
    panel: Option<Element>,
    active_class: String,
    state: Cell<MenuState>,
}

impl NavView {
    fn render(&self) {
        let state = self.state.get();
        let _ = self.toggle.set_attribute("aria-expanded", state.aria_value());
        if let Some(panel) = &self.panel {
            let classes = panel.class_list();
            let _ = if state.is_expanded() {
                classes.add_1(&self.active_class)
            } else {
                classes.remove_1(&self.active_class)
            };
        }
    }

    fn flip(&self) -> MenuState {
        let mut state = self.state.get();
        let next = state.toggle();
        self.state.set(next);
        self.render();
        log::debug!("nav: menu expanded={}", next.is_expanded());
        next
    }
}

/// Owns the menu state and the click listener on the toggle control.
pub struct NavToggle {
    view: Rc<NavView>,
    _click: EventListener,
}

impl NavToggle {
    /// Wire the toggle control. A missing panel is tolerated: only the ARIA
    /// attribute is maintained then.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::MissingElement`] when the toggle control is absent.
    pub fn mount(cfg: &NavConfig) -> Result<Self, MountError> {
        let toggle: HtmlElement = dom::element_by_id(&cfg.toggle_id)
            .ok_or_else(|| MountError::missing(&cfg.toggle_id))?;
        let panel: Option<Element> = dom::element_by_id(&cfg.panel_id);
        if panel.is_none() {
            log::debug!("nav: panel #{} not found, toggling ARIA only", cfg.panel_id);
        }

        let initial = MenuState::from_aria(toggle.get_attribute("aria-expanded").as_deref());
        let view = Rc::new(NavView {
            toggle,
            panel,
            active_class: cfg.active_class.clone(),
            state: Cell::new(initial),
        });
        view.render();

        let click = {
            let target = view.toggle.clone();
            let view = view.clone();
            EventListener::new(&target, "click", move |_event| {
                view.flip();
            })
        };

        Ok(Self {
            view,
            _click: click,
        })
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.view.state.get()
    }

    /// Flip the menu as if the toggle had been clicked.
    pub fn toggle(&self) -> MenuState {
        self.view.flip()
    }
}
