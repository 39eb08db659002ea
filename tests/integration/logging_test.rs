use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serverstatus::core::config::Config;
use tempfile::TempDir;

/// Log pipe the test can read back
#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_config_warnings_reach_an_initialized_logger() {
    let log = SharedLog::default();
    serverstatus::init_logging(Some(Box::new(log.clone())));

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, br#"{ "throughput_full_scale_mbps": 0 }"#).unwrap();
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.throughput_full_scale_mbps, 60.0);

    std::fs::write(&path, b"{ not json").unwrap();
    Config::load_from(&path).unwrap();

    let written = String::from_utf8_lossy(&log.0.lock()).to_string();
    assert!(written.contains("Ignoring throughput_full_scale_mbps = 0"));
    assert!(written.contains("Ignoring unreadable config file"));
}
