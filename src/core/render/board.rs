//! In-memory display surface.
//!
//! The scheduler writes every rendered view through the [`Renderer`] trait.
//! [`DisplayBoard`] keeps the latest state of each target so that any surface
//! (terminal dashboard, JSON snapshot) can draw it.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

use super::markup::markup_text;
use super::panels::PanelToggles;
use super::view::{DisplayTarget, RenderedView, Write};

/// Sink for rendered views
pub trait Renderer: Send {
    /// Apply every update of a successful tick
    fn apply(&mut self, view: &RenderedView);

    /// A tick failed; keep the values of `targets` but flag them
    fn mark_stale(&mut self, targets: &[DisplayTarget], reason: &str);

    /// Forget targets a task no longer writes
    fn remove(&mut self, targets: &[DisplayTarget]);

    /// Note that the task's latest tick failed, even if it never wrote anything
    fn record_failure(&mut self, task: &str, reason: &str);

    fn clear_failure(&mut self, task: &str);
}

/// Latest state of one target
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Percent, unclamped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Local>>,
}

impl TargetState {
    /// Width clamped to 0..=1 for gauges that cannot overflow; NaN and infinities give 0
    pub fn ratio(&self) -> f64 {
        self.width
            .filter(|w| w.is_finite())
            .map(|w| (w / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Text content of the markup, if any
    pub fn markup_text(&self) -> Option<String> {
        self.markup.as_deref().map(markup_text)
    }
}

/// A task whose latest tick failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskFailure {
    pub reason: String,
    /// Consecutive failed ticks
    pub attempts: u32,
    pub since: DateTime<Local>,
}

#[derive(Debug, Default, Serialize)]
pub struct DisplayBoard {
    targets: BTreeMap<String, TargetState>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    failures: BTreeMap<String, TaskFailure>,
    #[serde(skip)]
    panels: PanelToggles,
    #[serde(skip)]
    last_tick: Option<DateTime<Local>>,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a target by selector, e.g. `"#ping"`
    pub fn get(&self, selector: &str) -> Option<&TargetState> {
        self.targets.get(selector)
    }

    pub fn text(&self, selector: &str) -> Option<&str> {
        self.get(selector).and_then(|t| t.text.as_deref())
    }

    pub fn width(&self, selector: &str) -> Option<f64> {
        self.get(selector).and_then(|t| t.width)
    }

    pub fn tooltip(&self, selector: &str) -> Option<&str> {
        self.get(selector).and_then(|t| t.tooltip.as_deref())
    }

    pub fn is_stale(&self, selector: &str) -> bool {
        self.get(selector).map(|t| t.stale).unwrap_or(false)
    }

    /// Every target, ordered by selector
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TargetState)> {
        self.targets.iter()
    }

    /// Names of storage paths currently shown, `total` last
    pub fn storage_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .targets
            .keys()
            .filter_map(|k| k.strip_prefix("#progressbar-"))
            .filter(|p| *p != "total")
            .map(str::to_string)
            .collect();
        if self.targets.contains_key("#progressbar-total") {
            paths.push("total".to_string());
        }
        paths
    }

    /// Failing tasks by name
    pub fn failures(&self) -> &BTreeMap<String, TaskFailure> {
        &self.failures
    }

    pub fn panels(&self) -> &PanelToggles {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelToggles {
        &mut self.panels
    }

    pub fn last_tick(&self) -> Option<DateTime<Local>> {
        self.last_tick
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Renderer for DisplayBoard {
    fn apply(&mut self, view: &RenderedView) {
        let now = Local::now();
        for update in &view.updates {
            let state = self.targets.entry(update.target.to_string()).or_default();
            match &update.write {
                Write::Text(text) => state.text = Some(text.clone()),
                Write::Width(width) => state.width = Some(*width),
                Write::Tooltip(tooltip) => state.tooltip = Some(tooltip.clone()),
                Write::Markup(markup) => state.markup = Some(markup.clone()),
            }
            state.stale = false;
            state.error = None;
            state.updated_at = Some(now);
        }
        self.last_tick = Some(now);
    }

    fn mark_stale(&mut self, targets: &[DisplayTarget], reason: &str) {
        for target in targets {
            if let Some(state) = self.targets.get_mut(&target.to_string()) {
                state.stale = true;
                state.error = Some(reason.to_string());
            }
        }
    }

    fn remove(&mut self, targets: &[DisplayTarget]) {
        for target in targets {
            self.targets.remove(&target.to_string());
        }
    }

    fn record_failure(&mut self, task: &str, reason: &str) {
        let failure = self
            .failures
            .entry(task.to_string())
            .or_insert_with(|| TaskFailure {
                reason: String::new(),
                attempts: 0,
                since: Local::now(),
            });
        failure.reason = reason.to_string();
        failure.attempts += 1;
    }

    fn clear_failure(&mut self, task: &str) {
        self.failures.remove(task);
    }
}
