use std::time::Duration;

use reqwest::{Client, Proxy};

use crate::ClientError;

pub const ENV_TIMEOUT_SECS: &str = "HMS_HTTP_TIMEOUT_SECS";
pub const ENV_PROXY: &str = "HMS_HTTP_PROXY";
pub const ENV_INSECURE_SKIP_VERIFY: &str = "HMS_HTTP_INSECURE_SKIP_VERIFY";

/// Settings for outbound HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Proxy URL including scheme and port (http, https, socks5).
    pub proxy_url: Option<String>,
    /// Accept any server certificate.
    pub insecure_skip_verify: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            proxy_url: None,
            insecure_skip_verify: true,
        }
    }
}

impl TransportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Malformed values
    /// are logged and leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(err) => log::error!("{ENV_TIMEOUT_SECS}: bad value '{raw}': {err}"),
            }
        }

        if let Some(raw) = lookup(ENV_PROXY) {
            let raw = raw.trim();
            if !raw.is_empty() {
                config.proxy_url = Some(raw.to_string());
            }
        }

        if let Some(raw) = lookup(ENV_INSECURE_SKIP_VERIFY) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.insecure_skip_verify = true,
                "0" | "false" | "no" | "off" => config.insecure_skip_verify = false,
                other => log::error!("{ENV_INSECURE_SKIP_VERIFY}: bad value '{other}'"),
            }
        }

        config
    }
}

/// Client honoring `config`. An unparsable proxy URL is logged and the client
/// is built without a proxy.
pub fn build_http_client(config: &TransportConfig) -> Result<Client, ClientError> {
    let mut builder = Client::builder().danger_accept_invalid_certs(config.insecure_skip_verify);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy_url) = &config.proxy_url {
        match Proxy::all(proxy_url.as_str()) {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(err) => log::error!("can't parse proxy '{proxy_url}', not using proxy: {err}"),
        }
    }
    builder.build().map_err(ClientError::Build)
}
