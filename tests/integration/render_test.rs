use serverstatus::core::api::{NetworkSpeed, StorageReport, SystemInfo};
use serverstatus::core::render::views::{
    network_speed_view, render_storage_path, storage_view, system_info_view,
};
use serverstatus::core::render::{DisplayBoard, DisplayTarget, RenderedView, Renderer};

fn board_with(view: RenderedView) -> DisplayBoard {
    let mut board = DisplayBoard::new();
    board.apply(&view);
    board
}

#[test]
fn test_storage_payload_reaches_board() {
    let json = r#"{
        "total": {"pct": 61.2, "free": "120GB", "total": "310GB"},
        "paths": {
            "root": {"pct": 42.6, "free": "10GB", "total": "50GB"},
            "Home": {"pct": 44.4, "free": "85.3 GB", "total": "168.8 GB"}
        }
    }"#;
    let report: StorageReport = serde_json::from_str(json).unwrap();
    let board = board_with(storage_view(&report));

    assert_eq!(board.text("#root-storage"), Some("43%"));
    assert_eq!(board.tooltip("#tooltip-root"), Some("10GB free out of 50GB"));
    assert_eq!(board.width("#progressbar-root"), Some(42.6));
    assert_eq!(board.text("#total-storage"), Some("61%"));
    assert_eq!(board.storage_paths().last().map(String::as_str), Some("total"));
}

#[test]
fn test_percent_text_rounds_half_up() {
    for (pct, expected) in [(0.0, "0%"), (12.5, "13%"), (99.4, "99%"), (100.0, "100%")] {
        let usage = serde_json::from_value(serde_json::json!({
            "pct": pct, "free": "1GB", "total": "2GB"
        }))
        .unwrap();
        let board = board_with(render_storage_path("data", &usage));
        assert_eq!(board.text("#data-storage"), Some(expected), "pct {}", pct);
    }
}

#[test]
fn test_throughput_bar_is_not_clamped() {
    let speed = NetworkSpeed { up: 3.0, down: 90.0 };
    let board = board_with(network_speed_view(&speed, 60.0));

    assert_eq!(board.width("#progress-bar-up"), Some(5.0));
    assert_eq!(board.width("#progress-bar-down"), Some(150.0));
    assert_eq!(board.get("#progress-bar-down").map(|s| s.ratio()), Some(1.0));
}

#[test]
fn test_system_info_load_slots_are_independent() {
    let json = r#"{
        "mem_total": 7876.88671875,
        "mem_available": 4623.8671875,
        "mem_used_pct": 41.3,
        "mem_bars": {"xmin": 41.3, "xmid": 0, "xmax": 0},
        "load_avg": [0.52, 1.5, 0.07],
        "uptime_formatted": {"days": "6 days", "hours": "2 hours", "min": 0}
    }"#;
    let info: SystemInfo = serde_json::from_str(json).unwrap();
    let board = board_with(system_info_view(&info));

    assert_eq!(board.text("#1-min-load"), Some("52%"));
    assert_eq!(board.text("#5-min-load"), Some("150%"));
    assert_eq!(board.text("#15-min-load"), Some("7%"));
    assert_eq!(board.text("#memory-progress-bar-base"), Some("41%"));
    assert_eq!(
        board.tooltip("#memory-tooltip"),
        Some("4,624 MB free out of 7,877 MB")
    );
    assert_eq!(board.text("#uptime"), Some("6 days, 2 hours, 0"));
}

#[test]
fn test_failed_refresh_keeps_last_known_good() {
    let mut board = board_with(RenderedView::new().text("ping", "23 ms"));
    board.mark_stale(&[DisplayTarget::id("ping")], "timed out");

    assert_eq!(board.text("#ping"), Some("23 ms"));
    assert!(board.is_stale("#ping"));

    board.apply(&RenderedView::new().text("ping", "19 ms"));
    assert_eq!(board.text("#ping"), Some("19 ms"));
    assert!(!board.is_stale("#ping"));
}
