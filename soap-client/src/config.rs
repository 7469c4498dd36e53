//! Transport configuration

use std::time::Duration;

use tracing::warn;

/// Port every Sonos player serves its UPnP interface on
pub const DEFAULT_PORT: u16 = 1400;

/// Configuration for [`SoapClient`](crate::SoapClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapConfig {
    /// Port appended to the device address
    /// Default: 1400
    pub port: u16,

    /// Time allowed to establish the TCP connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Time allowed for reading the response
    /// Default: 10 seconds
    pub read_timeout: Duration,
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl SoapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Defaults overridden by environment variables
    ///
    /// - `SOCO_PORT`
    /// - `SOCO_CONNECT_TIMEOUT_SECS`
    /// - `SOCO_READ_TIMEOUT_SECS`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = parse_var(&lookup, "SOCO_PORT") {
            config.port = port;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SOCO_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SOCO_READ_TIMEOUT_SECS") {
            config.read_timeout = Duration::from_secs(secs);
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %value, "ignoring invalid configuration value");
            None
        }
    }
}
