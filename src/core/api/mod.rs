//! Access to the status API.
//!
//! `client` performs the HTTP requests, `models` holds the typed payloads.

mod client;
pub mod models;

pub use client::{cache_busted, same_address, ApiClient, Endpoint, Fragment};
pub use models::{
    ClientIp, IpAddress, MemoryBars, NetworkSpeed, Numeric, PathUsage, Ping, StorageReport,
    SystemInfo, Uptime, UptimePart,
};
