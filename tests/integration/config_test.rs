use serverstatus::core::config::{Config, DEFAULT_FULL_SCALE_MBPS, DEFAULT_SERVER_URL};
use serverstatus::core::poller::CompletionOrder;
use tempfile::TempDir;

#[test]
fn test_config_load_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();

    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert_eq!(config.throughput_full_scale_mbps, DEFAULT_FULL_SCALE_MBPS);
    assert_eq!(config.completion_order, CompletionOrder::LastIssued);
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_server_url("http://nas.lan:5000");
    config.set_full_scale_mbps(100.0).unwrap();
    config.completion_order = CompletionOrder::LastResolved;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.server_url, "http://nas.lan:5000/");
    assert_eq!(loaded.throughput_full_scale_mbps, 100.0);
    assert_eq!(loaded.completion_order, CompletionOrder::LastResolved);
}

#[test]
fn test_corrupt_config_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
}

#[test]
fn test_empty_config_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, b"").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.html_fragments);
}

#[test]
fn test_reset_restores_defaults() {
    let mut config = Config::default();
    config.set_server_url("http://other/");
    config.log_file = Some("/tmp/serverstatus.log".to_string());

    config.reset_to_defaults();
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert!(config.log_file.is_none());
}
