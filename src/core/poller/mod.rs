//! Timer-driven fetch-and-render.
//!
//! Each [`PollTask`] pairs a fetch with a pure render function. The
//! [`PollingRenderer`] runs every task on its own interval and writes the
//! rendered views into a shared [`Renderer`](crate::core::render::Renderer).

pub mod registry;
mod runtime;
mod scheduler;
mod sequence;
mod task;

pub use registry::dashboard_tasks;
pub use runtime::PollRuntime;
pub use scheduler::PollingRenderer;
pub use sequence::{CompletionOrder, SequenceGuard};
pub use task::{PollTask, Tier, TickFuture};
