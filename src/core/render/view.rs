//! Rendered views: what a poll tick wants written, and where.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a rendered value goes, addressed like a CSS selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisplayTarget {
    /// `#id`
    Id(String),
    /// `.class`, used for fragment containers
    Class(String),
}

impl DisplayTarget {
    pub fn id<S: Into<String>>(id: S) -> Self {
        DisplayTarget::Id(id.into())
    }

    pub fn class<S: Into<String>>(class: S) -> Self {
        DisplayTarget::Class(class.into())
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayTarget::Id(name) | DisplayTarget::Class(name) => name,
        }
    }
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTarget::Id(id) => write!(f, "#{}", id),
            DisplayTarget::Class(class) => write!(f, ".{}", class),
        }
    }
}

/// One mutation of a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Write {
    Text(String),
    /// Bar width in percent, not clamped
    Width(f64),
    Tooltip(String),
    /// Markup injected verbatim
    Markup(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetUpdate {
    pub target: DisplayTarget,
    pub write: Write,
}

/// Ordered updates produced by a render function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedView {
    pub updates: Vec<TargetUpdate>,
}

impl RenderedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text<S: Into<String>>(mut self, id: &str, text: S) -> Self {
        self.push(DisplayTarget::id(id), Write::Text(text.into()));
        self
    }

    pub fn width(mut self, id: &str, width: f64) -> Self {
        self.push(DisplayTarget::id(id), Write::Width(width));
        self
    }

    pub fn tooltip<S: Into<String>>(mut self, id: &str, tooltip: S) -> Self {
        self.push(DisplayTarget::id(id), Write::Tooltip(tooltip.into()));
        self
    }

    pub fn markup<S: Into<String>>(mut self, class: &str, markup: S) -> Self {
        self.push(DisplayTarget::class(class), Write::Markup(markup.into()));
        self
    }

    pub fn push(&mut self, target: DisplayTarget, write: Write) {
        self.updates.push(TargetUpdate { target, write });
    }

    pub fn extend(&mut self, other: RenderedView) {
        self.updates.extend(other.updates);
    }

    /// Distinct targets in first-write order
    pub fn targets(&self) -> Vec<DisplayTarget> {
        let mut seen = Vec::new();
        for update in &self.updates {
            if !seen.contains(&update.target) {
                seen.push(update.target.clone());
            }
        }
        seen
    }

    /// Last write of a kind to a target, mostly for assertions
    pub fn find(&self, target: &DisplayTarget, kind: fn(&Write) -> bool) -> Option<&Write> {
        self.updates
            .iter()
            .rev()
            .find(|u| &u.target == target && kind(&u.write))
            .map(|u| &u.write)
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}
