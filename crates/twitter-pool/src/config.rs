//! Pool configuration
//!
//! Defaults match the service's documented 15-minute rate-limit window.
//! Loadable from a TOML file for deployments; `Default` for inline
//! construction. Validation happens at load so a bad file fails before
//! any handshake runs.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use twitter_client::constants::DEFAULT_API_BASE;

/// What the router does when a slot reports a rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetryMode {
    /// Rotate to the next eligible slot and keep going; callers never see
    /// the limit, only latency.
    #[default]
    Transparent,
    /// Surface the distinguished rate-limit error so callers can switch
    /// work instead of waiting (e.g. rotate search terms).
    Break,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Cool-down before a throttled (slot, operation) pair is reused.
    #[serde(default = "default_wait_window_secs")]
    pub wait_window_secs: u64,
    /// Double the pool with application-only slots, one per credential.
    #[serde(default = "default_app_auth")]
    pub app_auth: bool,
    #[serde(default)]
    pub mode: RetryMode,
    /// Optional cap on rate-limit rotations per call. Absent means
    /// unbounded: a fully limited pool keeps sleeping rather than failing.
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Optional wall-clock budget for one routed call, waits included.
    #[serde(default)]
    pub call_timeout_secs: Option<u64>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_wait_window_secs() -> u64 {
    15 * 60
}

fn default_app_auth() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            wait_window_secs: default_wait_window_secs(),
            app_auth: default_app_auth(),
            mode: RetryMode::Transparent,
            max_retries: None,
            call_timeout_secs: None,
            api_base: default_api_base(),
        }
    }
}

impl PoolConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| common::Error::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: PoolConfig = toml::from_str(&contents).map_err(|source| common::Error::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the router misbehave silently.
    pub fn validate(&self) -> common::Result<()> {
        if self.wait_window_secs == 0 {
            return Err(common::Error::Config(
                "wait_window_secs must be greater than 0".into(),
            ));
        }
        if self.call_timeout_secs == Some(0) {
            return Err(common::Error::Config(
                "call_timeout_secs must be greater than 0 when set".into(),
            ));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(common::Error::Config(format!(
                "api_base must start with http:// or https://, got: {}",
                self.api_base
            )));
        }
        Ok(())
    }

    pub fn wait_window(&self) -> Duration {
        Duration::from_secs(self.wait_window_secs)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}
