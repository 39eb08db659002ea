use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::poller::CompletionOrder;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000/";
pub const DEFAULT_CLIENT_IP_URL: &str = "http://api.hostip.info/get_json.php";
/// Throughput that fills a network bar. 60 Mbps gives the `10/6` factor.
pub const DEFAULT_FULL_SCALE_MBPS: f64 = 60.0;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the status server; `api/` and `html/` are resolved against it
    pub server_url: String,
    /// Third-party service answering `{ "ip": "..." }` for the caller
    pub client_ip_url: String,
    pub throughput_full_scale_mbps: f64,
    pub request_timeout_secs: u64,
    /// Also poll the server-rendered HTML fragments
    pub html_fragments: bool,
    pub completion_order: CompletionOrder,
    /// Where logs go while the dashboard owns the terminal
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            client_ip_url: DEFAULT_CLIENT_IP_URL.to_string(),
            throughput_full_scale_mbps: DEFAULT_FULL_SCALE_MBPS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            html_fragments: true,
            completion_order: CompletionOrder::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // An empty or outdated file falls back to defaults instead of failing startup
        if data.is_empty() {
            return Ok(Config::default());
        }

        let mut config = serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring unreadable config file {:?}: {}",
                config_path,
                e
            );
            Config::default()
        });
        config.replace_unusable_values(config_path);
        Ok(config)
    }

    /// Hand-edited values the pollers cannot run with go back to their defaults
    fn replace_unusable_values(&mut self, config_path: &Path) {
        if !valid_full_scale(self.throughput_full_scale_mbps) {
            log::warn!(
                "Ignoring throughput_full_scale_mbps = {} in {:?}, using {}",
                self.throughput_full_scale_mbps,
                config_path,
                DEFAULT_FULL_SCALE_MBPS
            );
            self.throughput_full_scale_mbps = DEFAULT_FULL_SCALE_MBPS;
        }
        if self.request_timeout_secs == 0 {
            log::warn!(
                "Ignoring request_timeout_secs = 0 in {:?}, using {}",
                config_path,
                DEFAULT_REQUEST_TIMEOUT_SECS
            );
            self.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("serverstatus").join("config.json"))
    }

    /// Replace the server root, keeping a trailing slash so relative joins stay below it
    pub fn set_server_url(&mut self, url: &str) {
        self.server_url = normalize_base(url);
    }

    pub fn set_full_scale_mbps(&mut self, mbps: f64) -> Result<()> {
        if !valid_full_scale(mbps) {
            anyhow::bail!("Full scale must be a positive number of Mbps, got {}", mbps);
        }
        self.throughput_full_scale_mbps = mbps;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Config::default();
    }
}

fn valid_full_scale(mbps: f64) -> bool {
    mbps.is_finite() && mbps > 0.0
}

pub fn normalize_base(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
