use std::io::ErrorKind;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(DEFAULT_WORKER_THREADS),
        }
    }
}

/// `format` is `compact` or `json`; `filter` is used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format(), filter: None }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_log_format() -> String { "compact".to_string() }

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// `CONFIG_PATH` if set, otherwise `config.toml`.
pub fn config_path(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("CONFIG_PATH").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Read and parse a config file. `Ok(None)` when the file does not exist;
/// any other read failure is an error.
pub fn load_from_file(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow!("cannot read config file {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl AppConfig {
    /// Config file from the process environment, falling back to
    /// `SERVER_HOST` / `SERVER_PORT` / `TOKIO_WORKER_THREADS` when it is absent.
    pub fn load_or_env() -> Result<Self> {
        Self::load_with(process_env)
    }

    /// Same as [`AppConfig::load_or_env`] with variables read through `lookup`.
    /// A config file that exists but cannot be read or parsed is an error.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = config_path(&lookup);
        let mut cfg = match load_from_file(&path)? {
            Some(cfg) => cfg,
            None => Self::from_lookup(&lookup),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build from variables; unset or unparseable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("SERVER_HOST").unwrap_or_else(default_host);
        let port = lookup("SERVER_PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let worker_threads = lookup("TOKIO_WORKER_THREADS")
            .and_then(|v| v.trim().parse::<usize>().ok());
        Self {
            server: ServerConfig { host, port, worker_threads },
            logging: LoggingConfig::default(),
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.filter = None;
        }
    }
}
