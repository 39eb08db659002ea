//! Payloads returned by the status API.
//!
//! Field names follow the server's JSON. Several values arrive either as
//! numbers or as preformatted strings depending on the server version, so
//! those fields use small untagged enums instead of a fixed type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `api/ip_address`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpAddress {
    pub wan_ip: String,
    #[serde(default)]
    pub internal_ip: Option<String>,
}

/// Answer of the third-party client IP service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientIp {
    pub ip: String,
}

/// `api/ping`; the server formats the value as `"{:.0f}"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub ping: Numeric,
}

/// `api/network_speed`, both directions in Mbps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpeed {
    pub up: f64,
    pub down: f64,
}

/// Usage of one partition. Sizes come preformatted (`"85.3 GB"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathUsage {
    pub pct: f64,
    pub free: String,
    pub total: String,
    #[serde(default)]
    pub used: Option<String>,
}

/// `api/storage`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageReport {
    /// Sum over every mounted partition
    #[serde(default)]
    pub total: Option<PathUsage>,
    /// Configured partitions by display name, kept in name order
    #[serde(default)]
    pub paths: BTreeMap<String, PathUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uptime {
    pub days: UptimePart,
    pub hours: UptimePart,
    pub min: UptimePart,
}

/// One uptime component: `0` when empty, otherwise text like `"2 hours"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UptimePart {
    Count(i64),
    Text(String),
}

impl fmt::Display for UptimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UptimePart::Count(n) => write!(f, "{}", n),
            UptimePart::Text(s) => f.write_str(s),
        }
    }
}

/// Widths of the three memory bar segments (below 50%, 50-80%, above 80%)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryBars {
    pub xmin: f64,
    pub xmid: f64,
    pub xmax: f64,
}

/// `api/system_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub uptime_formatted: Uptime,
    pub mem_used_pct: f64,
    /// Megabytes
    pub mem_available: f64,
    /// Megabytes
    pub mem_total: f64,
    pub mem_bars: MemoryBars,
    /// 1, 5 and 15 minute load averages
    pub load_avg: Vec<f64>,
}

/// A number that may be sent as JSON number or numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}
