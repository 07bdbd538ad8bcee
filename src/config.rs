//! Connection configuration and endpoint selection.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Where the search daemon listens.
///
/// The daemon accepts either a TCP endpoint or a local filesystem socket;
/// which form is used is decided by whether a port is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// TCP endpoint.
    Tcp {
        /// Hostname or IP address.
        host: String,
        /// Port number of the daemon's SQL listener.
        port: u16,
    },
    /// Unix domain socket path.
    Unix(PathBuf),
}

impl Target {
    /// TCP target at `host:port`.
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Target::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Unix domain socket target.
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Target::Unix(path.into())
    }

    /// Parse a `searchd://` URL into a target and configuration.
    ///
    /// Formats:
    /// - `searchd://host[:port][?option=value&..]` (default port 9306)
    /// - `searchd:///path/to/daemon.sock[?option=value&..]`
    ///
    /// Supported query parameters:
    /// - `connect_timeout`, `write_timeout`, `read_timeout`: seconds
    /// - `protocol`: transport protocol selector (0 = transport default)
    pub fn parse_url(input: &str) -> Result<(Target, Config)> {
        let url =
            Url::parse(input).map_err(|e| Error::Usage(format!("invalid URL: {}", e)))?;

        if !["searchd", "sphinx"].contains(&url.scheme()) {
            return Err(Error::Usage(format!(
                "invalid scheme: expected 'searchd://' or 'sphinx://', got '{}://'",
                url.scheme()
            )));
        }

        let target = match url.host_str() {
            Some(host) if !host.is_empty() => Target::Tcp {
                host: host.to_string(),
                port: url.port().unwrap_or(9306),
            },
            _ => {
                if url.path().is_empty() || url.path() == "/" {
                    return Err(Error::Usage(
                        "URL has neither a host nor a socket path".into(),
                    ));
                }
                Target::Unix(PathBuf::from(url.path()))
            }
        };

        let mut config = Config::default();
        for (key, value) in url.query_pairs() {
            let parse_secs = |raw: &str| -> Result<Duration> {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| Error::Usage(format!("invalid {}: {}", key, raw)))
            };
            match key.as_ref() {
                "connect_timeout" => config.connect_timeout = parse_secs(&value)?,
                "write_timeout" => config.write_timeout = parse_secs(&value)?,
                "read_timeout" => config.read_timeout = parse_secs(&value)?,
                "protocol" => {
                    config.protocol = value.parse().map_err(|_| {
                        Error::Usage(format!("invalid protocol: {}", value))
                    })?;
                }
                _ => {
                    return Err(Error::Usage(format!("unknown option: {}", key)));
                }
            }
        }

        Ok((target, config))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Tcp { host, port } => write!(f, "{}:{}", host, port),
            Target::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Connection options handed to the transport at connect time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Timeout for establishing the connection.
    ///
    /// Default: 1s
    pub connect_timeout: Duration,

    /// Timeout for writing a payload.
    ///
    /// Default: 3s
    pub write_timeout: Duration,

    /// Timeout for reading a reply.
    ///
    /// Default: 3s
    pub read_timeout: Duration,

    /// Transport protocol selector; `0` keeps the transport's default.
    ///
    /// Default: `0`
    pub protocol: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(1),
            write_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(3),
            protocol: 0,
        }
    }
}
