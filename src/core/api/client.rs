use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use super::models::{ClientIp, IpAddress, NetworkSpeed, Ping, StorageReport, SystemInfo};
use crate::core::config::{normalize_base, Config};
use crate::error::{Result, StatusError};

const USER_AGENT: &str = concat!("serverstatus/", env!("CARGO_PKG_VERSION"));

/// JSON endpoints below `<server>/api/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    IpAddress,
    Ping,
    NetworkSpeed,
    Storage,
    SystemInfo,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::IpAddress => "ip_address",
            Endpoint::Ping => "ping",
            Endpoint::NetworkSpeed => "network_speed",
            Endpoint::Storage => "storage",
            Endpoint::SystemInfo => "system_info",
        }
    }
}

/// Server-rendered fragments below `<server>/html/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    SystemInfo,
    Storage,
    Services,
    Forecast,
    Media,
}

impl Fragment {
    pub const ALL: [Fragment; 5] = [
        Fragment::SystemInfo,
        Fragment::Storage,
        Fragment::Services,
        Fragment::Forecast,
        Fragment::Media,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Fragment::SystemInfo => "system_info",
            Fragment::Storage => "storage",
            Fragment::Services => "services",
            Fragment::Forecast => "forecast",
            Fragment::Media => "media",
        }
    }

    /// Class of the container the markup is injected into
    pub fn container(self) -> &'static str {
        match self {
            Fragment::SystemInfo => "system-info",
            Fragment::Storage => "storage",
            Fragment::Services => "services",
            Fragment::Forecast => "weather",
            Fragment::Media => "media",
        }
    }
}

/// Async client for the status API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: Url,
    html_base: Url,
    client_ip_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let server = Url::parse(&normalize_base(&config.server_url))?;

        Ok(Self {
            http,
            api_base: server.join("api/")?,
            html_base: server.join("html/")?,
            client_ip_url: Url::parse(&config.client_ip_url)?,
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        Ok(self.api_base.join(endpoint.path())?)
    }

    pub fn fragment_url(&self, fragment: Fragment) -> Result<Url> {
        Ok(self.html_base.join(fragment.path())?)
    }

    pub async fn ip_address(&self) -> Result<IpAddress> {
        self.get_json(self.endpoint_url(Endpoint::IpAddress)?).await
    }

    pub async fn ping(&self) -> Result<Ping> {
        self.get_json(self.endpoint_url(Endpoint::Ping)?).await
    }

    pub async fn network_speed(&self) -> Result<NetworkSpeed> {
        self.get_json(self.endpoint_url(Endpoint::NetworkSpeed)?).await
    }

    pub async fn storage(&self) -> Result<StorageReport> {
        self.get_json(self.endpoint_url(Endpoint::Storage)?).await
    }

    pub async fn system_info(&self) -> Result<SystemInfo> {
        self.get_json(self.endpoint_url(Endpoint::SystemInfo)?).await
    }

    pub async fn client_ip(&self) -> Result<ClientIp> {
        self.get_json(self.client_ip_url.clone()).await
    }

    /// Raw markup of a server-rendered fragment
    pub async fn fragment(&self, fragment: Fragment) -> Result<String> {
        let response = self.send(self.fragment_url(fragment)?).await?;
        Ok(response.text().await?)
    }

    /// Whether this client reaches the internet through the server's WAN address.
    ///
    /// Both lookups run concurrently and the comparison waits for both.
    pub async fn on_local_network(&self) -> Result<bool> {
        let (client, server) = tokio::try_join!(self.client_ip(), self.ip_address())?;
        log::debug!("client ip {} server wan ip {}", client.ip, server.wan_ip);
        if client.ip.trim().is_empty() || server.wan_ip.trim().is_empty() {
            return Err(StatusError::fetch("address lookup returned an empty address"));
        }
        Ok(same_address(&client.ip, &server.wan_ip))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response> {
        let url = cache_busted(url);
        log::trace!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StatusError::BadStatus {
                url: strip_query(&url),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

/// Appends `_=<unix millis>` so intermediaries never answer from cache
pub fn cache_busted(mut url: Url) -> Url {
    let stamp = chrono::Utc::now().timestamp_millis();
    url.query_pairs_mut().append_pair("_", &stamp.to_string());
    url
}

fn strip_query(url: &Url) -> String {
    let mut bare = url.clone();
    bare.set_query(None);
    bare.to_string()
}

/// The WAN lookup on some servers returns the raw body of an IP echo service,
/// trailing newline included.
pub fn same_address(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a == b
}
