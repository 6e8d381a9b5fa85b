use std::sync::Arc;
use std::time::Duration;

use crate::cache::ResolutionCache;

/// Settings for the navigator core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// How long a resolved child list is served from cache (default: 5 minutes)
    pub staleness: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            staleness: Duration::from_secs(5 * 60),
        }
    }
}

impl NavigatorConfig {
    /// Create config from environment variables
    ///
    /// `STRUCTURE_CACHE_TTL_SECS` overrides the staleness window.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STRUCTURE_CACHE_TTL_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.staleness = Duration::from_secs(secs);
            }
        }

        config
    }

    /// A fresh cache using this config's staleness window
    pub fn build_cache(&self) -> Arc<ResolutionCache> {
        Arc::new(ResolutionCache::new(self.staleness))
    }
}
