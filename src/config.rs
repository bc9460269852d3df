use std::time::Duration;

use anyhow::{Result, bail};
use solana_sdk::commitment_config::CommitmentLevel;

use crate::constants::{
    CONFIRMATION_INTERVAL_MS, CONFIRMATION_MAX_ATTEMPTS, CUSTOM_RPC_URL_ENV, DEFAULT_RPC_URL,
    DISCOVERY_MAX_RETRIES, DISCOVERY_RETRY_BASE_DELAY_MS, DISCOVERY_RETRY_MAX_DELAY_MS,
    DISCOVERY_STALE_TIME_SECS, HEAVY_RPC_URL_ENV, RPC_URL_ENV,
};

/// Signature polling settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: CONFIRMATION_MAX_ATTEMPTS,
            interval: Duration::from_millis(CONFIRMATION_INTERVAL_MS),
        }
    }
}

/// Position discovery cache and retry settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
    /// How long a successful result is served from cache
    pub stale_time: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: DISCOVERY_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(DISCOVERY_RETRY_BASE_DELAY_MS),
            retry_max_delay: Duration::from_millis(DISCOVERY_RETRY_MAX_DELAY_MS),
            stale_time: Duration::from_secs(DISCOVERY_STALE_TIME_SECS),
        }
    }
}

impl DiscoveryConfig {
    /// Delay before retry number `retry_index` (0-based): doubles from the base, capped
    pub fn retry_delay(&self, retry_index: u32) -> Duration {
        let factor = 2u32.checked_pow(retry_index).unwrap_or(u32::MAX);
        self.retry_base_delay
            .checked_mul(factor)
            .unwrap_or(self.retry_max_delay)
            .min(self.retry_max_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Endpoint used to send and confirm transactions
    pub rpc_url: String,
    /// Endpoint used for heavy position discovery calls
    pub discovery_rpc_url: String,
    pub commitment: CommitmentLevel,
    pub confirmation: ConfirmationConfig,
    pub discovery: DiscoveryConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            discovery_rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentLevel::Confirmed,
            confirmation: ConfirmationConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl SdkConfig {
    /// Build a config for a single endpoint
    pub fn new(rpc_url: &str, commitment: CommitmentLevel) -> Result<Self> {
        let config = Self {
            rpc_url: rpc_url.to_string(),
            discovery_rpc_url: rpc_url.to_string(),
            commitment,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve endpoints from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve endpoints through `lookup`.
    ///
    /// Transactions go to `SOLANA_RPC_URL`. Discovery prefers `SOLANA_RPC_URL`,
    /// then `CUSTOM_RPC_URL`, then `HEAVY_RPC_URL`. Both fall back to mainnet-beta.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rpc_url = non_empty(RPC_URL_ENV).unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let discovery_rpc_url = non_empty(RPC_URL_ENV)
            .or_else(|| non_empty(CUSTOM_RPC_URL_ENV))
            .or_else(|| non_empty(HEAVY_RPC_URL_ENV))
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let config = Self {
            rpc_url,
            discovery_rpc_url,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationConfig) -> Result<Self> {
        self.confirmation = confirmation;
        self.validate()?;
        Ok(self)
    }

    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Result<Self> {
        self.discovery = discovery;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for url in [&self.rpc_url, &self.discovery_rpc_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("RPC url must be http(s), got {}", url);
            }
        }

        if self.confirmation.max_attempts == 0 {
            bail!("Confirmation max_attempts must be at least 1");
        }

        if self.discovery.retry_base_delay > self.discovery.retry_max_delay {
            bail!("Discovery retry base delay exceeds max delay");
        }

        Ok(())
    }
}
