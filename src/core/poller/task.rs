use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::core::render::RenderedView;
use crate::error::Result;

/// One fetch followed by its render, ready to be applied
pub type TickFuture = BoxFuture<'static, Result<RenderedView>>;

type TickFn = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Refresh tiers of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// System info
    Fast,
    /// Network speed, ping, media
    Medium,
    /// Addresses, storage, services, forecast
    Slow,
}

impl Tier {
    pub const fn period(self) -> Duration {
        match self {
            Tier::Fast => Duration::from_secs(30),
            Tier::Medium => Duration::from_secs(60),
            Tier::Slow => Duration::from_secs(600),
        }
    }
}

/// A named (period, fetch, render) triple
#[derive(Clone)]
pub struct PollTask {
    name: String,
    period: Duration,
    tick: TickFn,
}

impl PollTask {
    /// Build a task from a fetch and a pure render function.
    ///
    /// `fetch` is called once per tick; `render` only sees successful results.
    pub fn new<T, F, Fut, R>(name: impl Into<String>, period: Duration, fetch: F, render: R) -> Self
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        R: Fn(&T) -> RenderedView + Send + Sync + 'static,
    {
        let render = Arc::new(render);
        let tick: TickFn = Arc::new(move || {
            let pending = fetch();
            let render = Arc::clone(&render);
            async move {
                let data = pending.await?;
                Ok(render(&data))
            }
            .boxed()
        });

        Self {
            name: name.into(),
            period,
            tick,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start one fetch
    pub fn tick(&self) -> TickFuture {
        (self.tick)()
    }
}

impl fmt::Debug for PollTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollTask")
            .field("name", &self.name)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}
