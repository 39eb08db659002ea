//! The polling-and-render scheduler.
//!
//! Every registered task gets its own timer loop. Each tick spawns its fetch
//! as a separate tokio task, so a slow response never delays the next tick;
//! the [`SequenceGuard`] decides which completions reach the renderer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::sequence::{CompletionOrder, SequenceGuard};
use super::task::PollTask;
use crate::core::render::{DisplayTarget, RenderedView, Renderer};
use crate::error::{Result, StatusError};

/// State shared between a task's timer loop and its in-flight fetches
#[derive(Debug)]
struct TaskShared {
    name: String,
    order: CompletionOrder,
    guard: SequenceGuard,
    /// Targets of the last applied view, flagged stale when a tick fails
    written: Mutex<Vec<DisplayTarget>>,
}

struct TaskHandle {
    stop_tx: watch::Sender<bool>,
    _join: JoinHandle<()>,
}

struct Registered {
    task: PollTask,
    shared: Arc<TaskShared>,
    handle: Option<TaskHandle>,
}

/// Owns the poll tasks and the renderer they write into.
///
/// `start`, `refresh_all` and `stop` spawn onto the current tokio runtime and
/// must be called from within one.
pub struct PollingRenderer<R: Renderer + 'static> {
    renderer: Arc<Mutex<R>>,
    order: CompletionOrder,
    tasks: Vec<Registered>,
}

impl<R: Renderer + 'static> PollingRenderer<R> {
    pub fn new(renderer: Arc<Mutex<R>>, order: CompletionOrder) -> Self {
        Self {
            renderer,
            order,
            tasks: Vec::new(),
        }
    }

    /// Register a repeating fetch-and-render task
    pub fn schedule<T, F, Fut, V>(
        &mut self,
        name: &str,
        period: Duration,
        fetch: F,
        render: V,
    ) -> Result<()>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        V: Fn(&T) -> RenderedView + Send + Sync + 'static,
    {
        self.add(PollTask::new(name, period, fetch, render))
    }

    pub fn add(&mut self, task: PollTask) -> Result<()> {
        if task.period().is_zero() {
            return Err(StatusError::scheduler(format!(
                "task '{}' has a zero period",
                task.name()
            )));
        }
        if self.find(task.name()).is_some() {
            return Err(StatusError::scheduler(format!(
                "task '{}' is already scheduled",
                task.name()
            )));
        }

        let shared = Arc::new(TaskShared {
            name: task.name().to_string(),
            order: self.order,
            guard: SequenceGuard::new(),
            written: Mutex::new(Vec::new()),
        });
        self.tasks.push(Registered {
            task,
            shared,
            handle: None,
        });
        Ok(())
    }

    /// Start every task that is not running.
    ///
    /// The first tick of each task fires immediately, then every period.
    pub fn start(&mut self) {
        for registered in &mut self.tasks {
            if registered.handle.is_some() {
                continue;
            }
            log::info!(
                "Starting poll task '{}' every {:?}",
                registered.task.name(),
                registered.task.period()
            );

            let (stop_tx, stop_rx) = watch::channel(false);
            let join = tokio::spawn(task_loop(
                registered.task.clone(),
                Arc::clone(&registered.shared),
                Arc::clone(&self.renderer),
                stop_rx,
            ));
            registered.handle = Some(TaskHandle {
                stop_tx,
                _join: join,
            });
        }
    }

    /// Stop one task's timer. Fetches already in flight still complete.
    pub fn stop(&mut self, name: &str) -> bool {
        let Some(registered) = self.tasks.iter_mut().find(|r| r.task.name() == name) else {
            return false;
        };
        match registered.handle.take() {
            Some(handle) => {
                log::info!("Stopping poll task '{}'", name);
                let _ = handle.stop_tx.send(true);
                true
            }
            None => false,
        }
    }

    pub fn shutdown(&mut self) {
        let names: Vec<String> = self.task_names();
        for name in names {
            self.stop(&name);
        }
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.find(name)
            .map(|r| r.handle.is_some())
            .unwrap_or(false)
    }

    pub fn task_names(&self) -> Vec<String> {
        self.tasks.iter().map(|r| r.task.name().to_string()).collect()
    }

    /// Fire one extra tick of every task now, outside their schedules
    pub fn refresh_all(&self) {
        for registered in &self.tasks {
            spawn_tick(
                &registered.task,
                &registered.shared,
                &self.renderer,
            );
        }
    }

    /// Tick every task once and wait until all of them completed
    pub async fn run_once(&self) {
        let ticks = self.tasks.iter().map(|registered| {
            let seq = registered.shared.guard.issue();
            complete_tick(
                seq,
                registered.task.clone(),
                Arc::clone(&registered.shared),
                Arc::clone(&self.renderer),
            )
        });
        join_all(ticks).await;
    }

    /// Sequence numbers issued and applied for a task
    pub fn sequence(&self, name: &str) -> Option<(u64, u64)> {
        self.find(name).map(|r| {
            (
                r.shared.guard.issued(),
                r.shared.guard.latest_applied(),
            )
        })
    }

    fn find(&self, name: &str) -> Option<&Registered> {
        self.tasks.iter().find(|r| r.task.name() == name)
    }
}

async fn task_loop<R: Renderer + 'static>(
    task: PollTask,
    shared: Arc<TaskShared>,
    renderer: Arc<Mutex<R>>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = interval(task.period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                spawn_tick(&task, &shared, &renderer);
            }
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    log::debug!("Poll task '{}' loop finished", shared.name);
                    break;
                }
            }
        }
    }
}

/// Take a sequence number now and let the fetch finish in the background
fn spawn_tick<R: Renderer + 'static>(
    task: &PollTask,
    shared: &Arc<TaskShared>,
    renderer: &Arc<Mutex<R>>,
) {
    let seq = shared.guard.issue();
    tokio::spawn(complete_tick(
        seq,
        task.clone(),
        Arc::clone(shared),
        Arc::clone(renderer),
    ));
}

async fn complete_tick<R: Renderer + 'static>(
    seq: u64,
    task: PollTask,
    shared: Arc<TaskShared>,
    renderer: Arc<Mutex<R>>,
) {
    let outcome = task.tick().await;

    let applied = shared.guard.complete(seq, shared.order, || match &outcome {
        Ok(view) => {
            let targets = view.targets();
            // e.g. a storage path that is no longer mounted
            let vanished: Vec<DisplayTarget> = shared
                .written
                .lock()
                .drain(..)
                .filter(|t| !targets.contains(t))
                .collect();
            *shared.written.lock() = targets;

            let mut renderer = renderer.lock();
            if !vanished.is_empty() {
                log::debug!(
                    "Poll task '{}' no longer writes {} target(s)",
                    shared.name,
                    vanished.len()
                );
                renderer.remove(&vanished);
            }
            renderer.apply(view);
            renderer.clear_failure(&shared.name);
            log::trace!("Poll task '{}' tick {} applied", shared.name, seq);
        }
        Err(e) => {
            log::warn!("Poll task '{}' tick {} failed: {}", shared.name, seq, e);
            let reason = e.short_reason();
            let targets = shared.written.lock().clone();
            let mut renderer = renderer.lock();
            renderer.mark_stale(&targets, &reason);
            renderer.record_failure(&shared.name, &reason);
        }
    });

    if !applied {
        log::debug!(
            "Poll task '{}' dropped tick {}: a newer tick already completed",
            shared.name,
            seq
        );
    }
}
