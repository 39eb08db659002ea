// Core business logic module

pub mod api;
pub mod config;
pub mod poller;
pub mod render;

// Re-export commonly used items
pub use api::ApiClient;
pub use config::Config;
pub use poller::{PollRuntime, PollingRenderer};
pub use render::{DisplayBoard, Renderer};
