//! Serializable view of the page-behaviour state, shared by the browser test
//! bridge and the QA tester.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    /// `None` when the navigation toggle is not mounted.
    pub menu_expanded: Option<bool>,
    pub lightbox_index: Option<usize>,
    pub gallery_len: usize,
    pub revealed: usize,
    pub reveal_total: usize,
    pub reduced_motion: bool,
}

impl SiteSnapshot {
    #[must_use]
    pub const fn all_revealed(&self) -> bool {
        self.revealed == self.reveal_total
    }
}
