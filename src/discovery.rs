use std::{collections::HashMap, sync::Arc};

use solana_sdk::pubkey::Pubkey;
use tokio::time::{Instant, sleep};

use crate::{
    config::DiscoveryConfig,
    error::DiscoveryError,
    position::{PositionMap, PositionSource},
    rpc::RpcGateway,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    endpoint: String,
    owner: Pubkey,
}

#[derive(Debug, Clone)]
struct CachedPositions {
    positions: PositionMap,
    fetched_at: Instant,
}

/// Cached, retried lookup of every DLMM position an address owns
pub struct PositionDiscovery {
    rpc: Arc<dyn RpcGateway>,
    source: Arc<dyn PositionSource>,
    config: DiscoveryConfig,
    cache: HashMap<CacheKey, CachedPositions>,
    last_error: Option<DiscoveryError>,
}

impl PositionDiscovery {
    pub fn new(
        rpc: Arc<dyn RpcGateway>,
        source: Arc<dyn PositionSource>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            rpc,
            source,
            config,
            cache: HashMap::new(),
            last_error: None,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Error behind the most recent empty fallback, cleared by the next success
    pub fn last_error(&self) -> Option<&DiscoveryError> {
        self.last_error.as_ref()
    }

    /// Positions owned by `owner`. Never fails: once retries are exhausted or
    /// the error is not worth retrying, the failure is logged and an empty map
    /// is returned.
    pub async fn get_positions(&mut self, owner: &Pubkey) -> PositionMap {
        match self.try_get_positions(owner).await {
            Ok(positions) => positions,
            Err(e) => {
                log::warn!("{}", e);
                for hint in e.kind.guidance() {
                    log::warn!("  - {}", hint);
                }
                self.last_error = Some(e);
                PositionMap::new()
            }
        }
    }

    /// Like [`get_positions`](Self::get_positions) but reports the classified error
    pub async fn try_get_positions(&mut self, owner: &Pubkey) -> Result<PositionMap, DiscoveryError> {
        let key = CacheKey {
            endpoint: self.rpc.endpoint(),
            owner: *owner,
        };

        self.evict_stale();
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Serving cached positions for {}", owner);
            return Ok(cached.positions.clone());
        }

        let positions = self.fetch_with_retry(owner).await?;
        self.last_error = None;
        self.cache.insert(
            key,
            CachedPositions {
                positions: positions.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(positions)
    }

    /// Drop the cached entry for `owner` so the next lookup hits the network
    pub fn invalidate(&mut self, owner: &Pubkey) {
        self.cache.retain(|key, _| key.owner != *owner);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of owners currently served from cache
    pub fn cached_owners(&self) -> usize {
        self.cache.len()
    }

    fn evict_stale(&mut self) {
        let stale_time = self.config.stale_time;
        self.cache
            .retain(|_, cached| cached.fetched_at.elapsed() < stale_time);
    }

    async fn fetch_with_retry(&self, owner: &Pubkey) -> Result<PositionMap, DiscoveryError> {
        let mut failures = 0;
        loop {
            match self.fetch_once(owner).await {
                Ok(positions) => {
                    log::info!("Discovery complete, found {} pair(s) for {}", positions.len(), owner);
                    return Ok(positions);
                }
                Err(e) => {
                    if !e.kind.is_retryable() {
                        log::warn!("Not retrying {:?} discovery error: {}", e.kind, e.message);
                        return Err(e);
                    }
                    if failures >= self.config.max_retries {
                        return Err(e);
                    }

                    let delay = self.config.retry_delay(failures);
                    failures += 1;
                    log::info!(
                        "Retrying position discovery (attempt {}/{}) in {:?}: {}",
                        failures + 1,
                        self.config.max_retries + 1,
                        delay,
                        e.message
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn fetch_once(&self, owner: &Pubkey) -> Result<PositionMap, DiscoveryError> {
        if let Err(e) = self.rpc.get_version().await {
            return Err(DiscoveryError::new(format!("RPC connection failed: {:#}", e)));
        }

        Ok(self.source.positions_by_owner(owner).await?)
    }
}
