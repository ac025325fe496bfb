use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use relay_api::forwarder::DEFAULT_FORWARD_TIMEOUT;

/// Node configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_path: PathBuf,
    pub peer_url: Option<String>,
    pub node_name: String,
    pub forward_timeout: Duration,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = non_empty("RELAY_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("RELAY_PORT must be a port number")?;
        let log_path = non_empty("RELAY_LOG_PATH")
            .unwrap_or_else(|| "messages.json".into())
            .into();
        let peer_url = non_empty("RELAY_PEER_URL").or_else(|| non_empty("PEER_URL"));
        let node_name = non_empty("RELAY_NODE_NAME").unwrap_or_else(|| format!("{}:{}", host, port));
        let forward_timeout = match non_empty("RELAY_FORWARD_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .context("RELAY_FORWARD_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            None => DEFAULT_FORWARD_TIMEOUT,
        };
        let static_dir = non_empty("RELAY_STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_path,
            peer_url,
            node_name,
            forward_timeout,
            static_dir,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.log_path, PathBuf::from("messages.json"));
        assert_eq!(cfg.peer_url, None);
        assert_eq!(cfg.node_name, "0.0.0.0:5000");
        assert_eq!(cfg.forward_timeout, DEFAULT_FORWARD_TIMEOUT);
        assert_eq!(cfg.static_dir, None);
    }

    #[test]
    fn peer_url_falls_back_to_legacy_name() {
        let cfg = config(&[("PEER_URL", "http://10.0.0.2:80")]).unwrap();
        assert_eq!(cfg.peer_url.as_deref(), Some("http://10.0.0.2:80"));

        let cfg = config(&[
            ("PEER_URL", "http://old"),
            ("RELAY_PEER_URL", "http://new"),
        ])
        .unwrap();
        assert_eq!(cfg.peer_url.as_deref(), Some("http://new"));
    }

    #[test]
    fn blank_values_mean_unset() {
        let cfg = config(&[("RELAY_PEER_URL", "  "), ("RELAY_NODE_NAME", "")]).unwrap();
        assert_eq!(cfg.peer_url, None);
        assert_eq!(cfg.node_name, "0.0.0.0:5000");
    }

    #[test]
    fn explicit_values() {
        let cfg = config(&[
            ("RELAY_HOST", "127.0.0.1"),
            ("RELAY_PORT", "8081"),
            ("RELAY_NODE_NAME", "node-a"),
            ("RELAY_FORWARD_TIMEOUT_MS", "250"),
            ("RELAY_LOG_PATH", "/var/lib/relay/log.json"),
            ("RELAY_STATIC_DIR", "static"),
        ])
        .unwrap();
        assert_eq!(cfg.node_name, "node-a");
        assert_eq!(cfg.forward_timeout, Duration::from_millis(250));
        assert_eq!(cfg.bind_addr().unwrap(), "127.0.0.1:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.static_dir, Some(PathBuf::from("static")));
    }

    #[test]
    fn bad_numbers_fail() {
        assert!(config(&[("RELAY_PORT", "eighty")]).is_err());
        assert!(config(&[("RELAY_FORWARD_TIMEOUT_MS", "-1")]).is_err());
    }
}
