use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cart_store: CartStoreConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 7070, worker_threads: None }
    }
}

/// Backing store selection. An absent (or blank) `redis_addr` selects the
/// in-memory store.
#[derive(Debug, Clone, Deserialize)]
pub struct CartStoreConfig {
    #[serde(default)]
    pub redis_addr: Option<String>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            redis_addr: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            response_timeout_ms: default_response_timeout_ms(),
        }
    }
}

/// Artificial per-request delay applied by the request adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_latency_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_latency_max_ms")]
    pub max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { enabled: false, min_ms: default_latency_min_ms(), max_ms: default_latency_max_ms() }
    }
}

fn default_connect_timeout_ms() -> u64 { 5_000 }
fn default_response_timeout_ms() -> u64 { 2_000 }
fn default_latency_min_ms() -> u64 { 25 }
fn default_latency_max_ms() -> u64 { 250 }

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        // REDIS_ADDR 环境变量优先于配置文件
        self.cart_store.normalize_from_env();
        self.cart_store.validate()?;
        self.latency.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        let port = std::env::var("SERVER_PORT").or_else(|_| std::env::var("PORT"));
        if let Some(p) = port.ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = p;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CartStoreConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(addr) = std::env::var("REDIS_ADDR") {
            self.redis_addr = Some(addr);
        }
        self.normalize();
    }

    /// Blank addresses count as "not configured".
    pub fn normalize(&mut self) {
        self.redis_addr = self
            .redis_addr
            .take()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_ms == 0 || self.response_timeout_ms == 0 {
            return Err(anyhow!("cart_store timeouts must be positive milliseconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl LatencyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(anyhow!("latency.min_ms must be <= latency.max_ms"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 7070);
        assert!(cfg.cart_store.redis_addr.is_none());
        assert_eq!(cfg.cart_store.connect_timeout_ms, 5_000);
        assert!(!cfg.latency.enabled);
        assert_eq!((cfg.latency.min_ms, cfg.latency.max_ms), (25, 250));
    }

    #[test]
    fn parses_full_document() {
        let cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            worker_threads = 2

            [cart_store]
            redis_addr = "redis-cart:6379"
            response_timeout_ms = 500

            [latency]
            enabled = true
            min_ms = 1
            max_ms = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.cart_store.redis_addr.as_deref(), Some("redis-cart:6379"));
        assert_eq!(cfg.cart_store.response_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.cart_store.connect_timeout(), Duration::from_millis(5_000));
        assert!(cfg.latency.enabled);
    }

    #[test]
    fn blank_redis_addr_means_in_memory() {
        let mut store = CartStoreConfig { redis_addr: Some("   ".into()), ..Default::default() };
        store.normalize();
        assert!(store.redis_addr.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        let store = CartStoreConfig { connect_timeout_ms: 0, ..Default::default() };
        assert!(store.validate().is_err());

        let latency = LatencyConfig { enabled: true, min_ms: 10, max_ms: 5 };
        assert!(latency.validate().is_err());

        let mut server = ServerConfig { port: 0, ..Default::default() };
        assert!(server.normalize().is_err());
    }
}
