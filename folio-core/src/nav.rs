//! Mobile navigation menu state.

use serde::{Deserialize, Serialize};

/// Expanded/collapsed state of the primary navigation menu.
///
/// The value is mirrored into `aria-expanded` on the toggle control and into
/// the active class on the navigation panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    expanded: bool,
}

impl MenuState {
    #[must_use]
    pub const fn collapsed() -> Self {
        Self { expanded: false }
    }

    #[must_use]
    pub const fn expanded() -> Self {
        Self { expanded: true }
    }

    /// Read the state from an `aria-expanded` attribute value.
    ///
    /// Anything other than the literal `"true"` counts as collapsed, which
    /// also covers a missing attribute.
    #[must_use]
    pub fn from_aria(value: Option<&str>) -> Self {
        Self {
            expanded: value == Some("true"),
        }
    }

    #[must_use]
    pub const fn is_expanded(self) -> bool {
        self.expanded
    }

    /// Flip the state and return the new value.
    pub fn toggle(&mut self) -> Self {
        self.expanded = !self.expanded;
        *self
    }

    /// Value to write into `aria-expanded`.
    #[must_use]
    pub const fn aria_value(self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }
}
