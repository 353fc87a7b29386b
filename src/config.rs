use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::types::{GroupBy, ReportKind};
use crate::live::ReconnectPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub live: LiveConfig,
  #[serde(default)]
  pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the portal API (e.g. "https://portal.example.com")
  pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  /// Disable to always hit the network (in-flight requests are still shared)
  pub enabled: bool,
  /// How long a fetched report stays fresh
  pub ttl_secs: u64,
  /// Upper bound on a single report request
  pub fetch_timeout_secs: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      ttl_secs: 300,
      fetch_timeout_secs: 30,
    }
  }
}

impl CacheConfig {
  pub fn ttl(&self) -> Duration {
    Duration::from_secs(self.ttl_secs)
  }

  pub fn fetch_timeout(&self) -> Duration {
    Duration::from_secs(self.fetch_timeout_secs)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
  pub base_delay_ms: u64,
  pub max_delay_ms: u64,
  /// Reconnect attempts before falling back to polling
  pub max_attempts: u32,
  pub poll_interval_secs: u64,
}

impl Default for LiveConfig {
  fn default() -> Self {
    let policy = ReconnectPolicy::default();
    Self {
      base_delay_ms: policy.base_delay.as_millis() as u64,
      max_delay_ms: policy.max_delay.as_millis() as u64,
      max_attempts: policy.max_attempts,
      poll_interval_secs: policy.poll_interval.as_secs(),
    }
  }
}

impl LiveConfig {
  pub fn reconnect_policy(&self) -> ReconnectPolicy {
    ReconnectPolicy {
      base_delay: Duration::from_millis(self.base_delay_ms),
      max_delay: Duration::from_millis(self.max_delay_ms),
      max_attempts: self.max_attempts,
      poll_interval: Duration::from_secs(self.poll_interval_secs),
    }
  }

  fn validate(&self) -> Result<()> {
    if self.base_delay_ms == 0 {
      return Err(eyre!("live.base_delay_ms must be greater than 0"));
    }
    if self.max_delay_ms < self.base_delay_ms {
      return Err(eyre!(
        "live.max_delay_ms ({}) must not be below live.base_delay_ms ({})",
        self.max_delay_ms,
        self.base_delay_ms
      ));
    }
    if self.poll_interval_secs == 0 {
      return Err(eyre!("live.poll_interval_secs must be greater than 0"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
  /// Reports loaded by the dashboard, by API name
  pub reports: Vec<String>,
  pub group_by: GroupBy,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      reports: ReportKind::ALL.iter().map(|k| k.name().to_string()).collect(),
      group_by: GroupBy::default(),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./dealer-portal.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/dealer-portal/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/dealer-portal/config.yaml"
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("dealer-portal.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("dealer-portal").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.cache.fetch_timeout_secs == 0 {
      return Err(eyre!("cache.fetch_timeout_secs must be greater than 0"));
    }
    config.live.validate()?;
    Ok(config)
  }

  /// Get the portal API token from environment variables.
  ///
  /// Checks DEALER_PORTAL_TOKEN first, then PORTAL_API_TOKEN as fallback.
  /// Returns None when neither is set; the live channel turns that into an
  /// auth error, report requests go out unauthenticated.
  pub fn get_api_token() -> Option<String> {
    std::env::var("DEALER_PORTAL_TOKEN")
      .or_else(|_| std::env::var("PORTAL_API_TOKEN"))
      .ok()
      .filter(|token| !token.trim().is_empty())
  }
}
