use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serverstatus::core::api::ApiClient;
use serverstatus::core::config::Config;
use serverstatus::core::poller::{dashboard_tasks, CompletionOrder, Tier};
use serverstatus::core::render::{DisplayTarget, RenderedView, Renderer};
use serverstatus::core::PollingRenderer;
use serverstatus::StatusError;

/// Keeps every call so tests can check what reached the surface and in which order
#[derive(Default)]
struct RecordingRenderer {
    applied: Vec<String>,
    stale: Vec<(String, String)>,
    removed: Vec<String>,
    failures: Vec<(String, String)>,
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, view: &RenderedView) {
        for target in view.targets() {
            self.applied.push(target.to_string());
        }
    }

    fn mark_stale(&mut self, targets: &[DisplayTarget], reason: &str) {
        for target in targets {
            self.stale.push((target.to_string(), reason.to_string()));
        }
    }

    fn remove(&mut self, targets: &[DisplayTarget]) {
        self.removed.extend(targets.iter().map(ToString::to_string));
    }

    fn record_failure(&mut self, task: &str, reason: &str) {
        self.failures.push((task.to_string(), reason.to_string()));
    }

    fn clear_failure(&mut self, task: &str) {
        self.failures.retain(|(name, _)| name != task);
    }
}

#[test]
fn test_dashboard_registers_every_tier() {
    let config = Config::default();
    let client = ApiClient::new(&config).unwrap();
    let tasks = dashboard_tasks(&client, &config);

    let period_of = |name: &str| {
        tasks
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.period())
            .unwrap()
    };

    assert_eq!(tasks.len(), 11);
    assert_eq!(period_of("system_info"), Tier::Fast.period());
    assert_eq!(period_of("html/system_info"), Duration::from_secs(30));
    assert_eq!(period_of("network_speed"), Duration::from_secs(60));
    assert_eq!(period_of("ping"), Duration::from_secs(60));
    assert_eq!(period_of("html/media"), Duration::from_secs(60));
    assert_eq!(period_of("storage"), Duration::from_secs(600));
    assert_eq!(period_of("html/forecast"), Duration::from_secs(600));
}

#[test]
fn test_fragments_can_be_disabled() {
    let config = Config {
        html_fragments: false,
        ..Config::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let names: Vec<String> = dashboard_tasks(&client, &config)
        .iter()
        .map(|t| t.name().to_string())
        .collect();

    assert_eq!(names.len(), 6);
    assert!(names.iter().all(|n| !n.starts_with("html/")));
}

#[tokio::test(start_paused = true)]
async fn test_tiers_tick_independently() {
    let renderer = Arc::new(Mutex::new(RecordingRenderer::default()));
    let mut scheduler = PollingRenderer::new(renderer.clone(), CompletionOrder::LastIssued);

    for (name, tier) in [("fast", Tier::Fast), ("medium", Tier::Medium), ("slow", Tier::Slow)] {
        scheduler
            .schedule(
                name,
                tier.period(),
                || async { Ok::<_, StatusError>(()) },
                move |_: &()| RenderedView::new().text(name, "ok"),
            )
            .unwrap();
    }

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(601)).await;

    let applied = renderer.lock().applied.clone();
    let count = |target: &str| applied.iter().filter(|t| t.as_str() == target).count();
    // initial tick plus one per elapsed period
    assert_eq!(count("#fast"), 21);
    assert_eq!(count("#medium"), 11);
    assert_eq!(count("#slow"), 2);

    scheduler.shutdown();
    assert!(!scheduler.is_running("fast"));
}

#[tokio::test(start_paused = true)]
async fn test_failure_reports_short_reason() {
    let renderer = Arc::new(Mutex::new(RecordingRenderer::default()));
    let mut scheduler = PollingRenderer::new(renderer.clone(), CompletionOrder::LastIssued);
    let attempts = Arc::new(std::sync::atomic::AtomicU32::new(0));
    let counter = attempts.clone();

    scheduler
        .schedule(
            "storage",
            Tier::Slow.period(),
            move || {
                let n = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Ok(42.6)
                    } else {
                        Err(StatusError::BadStatus {
                            url: "http://localhost:5000/api/storage".to_string(),
                            status: 503,
                        })
                    }
                }
            },
            |pct: &f64| RenderedView::new().width("progressbar-root", *pct),
        )
        .unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(601)).await;

    let recorded = renderer.lock();
    assert_eq!(recorded.applied, vec!["#progressbar-root".to_string()]);
    assert_eq!(
        recorded.stale,
        vec![("#progressbar-root".to_string(), "HTTP 503".to_string())]
    );
    assert_eq!(
        recorded.failures,
        vec![("storage".to_string(), "HTTP 503".to_string())]
    );
    assert!(recorded.removed.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_server_down_from_the_start_is_reported() {
    let renderer = Arc::new(Mutex::new(RecordingRenderer::default()));
    let mut scheduler = PollingRenderer::new(renderer.clone(), CompletionOrder::LastIssued);
    scheduler
        .schedule(
            "ip_address",
            Tier::Slow.period(),
            || async { Err::<String, _>(StatusError::fetch("connection refused")) },
            |ip: &String| RenderedView::new().text("server_ip", ip.clone()),
        )
        .unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let recorded = renderer.lock();
    assert!(recorded.applied.is_empty());
    assert!(recorded.stale.is_empty());
    assert_eq!(
        recorded.failures,
        vec![("ip_address".to_string(), "connection refused".to_string())]
    );
}

#[tokio::test]
async fn test_run_once_applies_every_task() {
    let renderer = Arc::new(Mutex::new(RecordingRenderer::default()));
    let mut scheduler = PollingRenderer::new(renderer.clone(), CompletionOrder::LastIssued);
    for name in ["ping", "client_ip"] {
        scheduler
            .schedule(
                name,
                Duration::from_secs(60),
                || async { Ok::<_, StatusError>(1u8) },
                move |_: &u8| RenderedView::new().text(name, "1"),
            )
            .unwrap();
    }

    scheduler.run_once().await;

    let mut applied = renderer.lock().applied.clone();
    applied.sort();
    assert_eq!(applied, vec!["#client_ip", "#ping"]);
    assert!(!scheduler.is_running("ping"));
}
