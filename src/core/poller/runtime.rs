//! Tokio runtime wrapper for the dashboard's poll tasks.
//!
//! Synchronous callers (the terminal UI loop, CLI commands) own a
//! [`PollRuntime`] and read the shared [`DisplayBoard`] while the tasks write
//! into it on the runtime's worker threads.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use super::registry::dashboard_tasks;
use super::scheduler::PollingRenderer;
use crate::core::api::ApiClient;
use crate::core::config::Config;
use crate::core::render::DisplayBoard;

pub struct PollRuntime {
    /// Latest rendered state, shared with the surfaces
    pub board: Arc<Mutex<DisplayBoard>>,
    scheduler: PollingRenderer<DisplayBoard>,
    runtime: tokio::runtime::Runtime,
}

impl PollRuntime {
    /// Build the runtime and register the dashboard tasks without starting them
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("poll-worker")
            .build()
            .context("Failed to build tokio runtime")?;

        let client = ApiClient::new(config).context("Failed to create API client")?;
        let board = Arc::new(Mutex::new(DisplayBoard::new()));
        let mut scheduler = PollingRenderer::new(Arc::clone(&board), config.completion_order);

        for task in dashboard_tasks(&client, config) {
            scheduler
                .add(task)
                .context("Failed to register poll task")?;
        }

        log::info!(
            "Registered {} poll tasks against {}",
            scheduler.task_names().len(),
            config.server_url
        );

        Ok(Self {
            board,
            scheduler,
            runtime,
        })
    }

    /// Start every task; each runs once right away, then on its tier's period
    pub fn start(&mut self) {
        let _guard = self.runtime.enter();
        self.scheduler.start();
    }

    /// Refresh everything now without disturbing the schedules
    pub fn refresh_all(&self) {
        let _guard = self.runtime.enter();
        self.scheduler.refresh_all();
    }

    /// One tick of every task, blocking until all completed
    pub fn run_once(&self) {
        self.runtime.block_on(self.scheduler.run_once());
    }

    pub fn task_names(&self) -> Vec<String> {
        self.scheduler.task_names()
    }

    /// Stop the timers; the runtime and its in-flight fetches go away on drop
    pub fn shutdown(mut self) {
        log::info!("Shutting down poll runtime");
        let _guard = self.runtime.enter();
        self.scheduler.shutdown();
    }
}
