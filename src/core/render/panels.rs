//! Expand/collapse panels.
//!
//! A toggler element `toggler-<id>` shows or hides the panel `<id>`.

use std::collections::HashMap;

/// Panel a toggler controls: everything after the first `-`.
///
/// An id without a dash names the panel itself.
pub fn panel_for_toggler(toggler_id: &str) -> &str {
    match toggler_id.find('-') {
        Some(idx) => &toggler_id[idx + 1..],
        None => toggler_id,
    }
}

pub fn toggler_for_panel(panel_id: &str) -> String {
    format!("toggler-{}", panel_id)
}

/// Visibility of panels; panels never toggled are visible
#[derive(Debug, Clone, Default)]
pub struct PanelToggles {
    hidden: HashMap<String, bool>,
}

impl PanelToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel named by a toggler id, returning its new visibility
    pub fn toggle(&mut self, toggler_id: &str) -> bool {
        let panel = panel_for_toggler(toggler_id).to_string();
        let hidden = self.hidden.entry(panel).or_insert(false);
        *hidden = !*hidden;
        !*hidden
    }

    pub fn is_visible(&self, panel_id: &str) -> bool {
        !self.hidden.get(panel_id).copied().unwrap_or(false)
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }
}
