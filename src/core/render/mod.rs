//! Turning fetched metrics into display updates.
//!
//! Render functions are pure (`views`), formatting rules live in `format`,
//! and the only place that holds display state is the [`DisplayBoard`].

mod board;
pub mod format;
mod markup;
pub mod panels;
mod view;
pub mod views;

pub use board::{DisplayBoard, Renderer, TargetState, TaskFailure};
pub use markup::markup_text;
pub use panels::{panel_for_toggler, toggler_for_panel, PanelToggles};
pub use view::{DisplayTarget, RenderedView, TargetUpdate, Write};
