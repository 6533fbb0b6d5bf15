use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::services::{Recommender, DEFAULT_TOP_N};

/// Shared application state.
///
/// The recommender is immutable after load, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn Recommender>,
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub request_timeout: Duration,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Wraps a loaded recommender with default request limits
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        Self {
            recommender,
            default_top_n: DEFAULT_TOP_N,
            max_top_n: 100,
            request_timeout: Duration::from_secs(5),
            loaded_at: Utc::now(),
        }
    }

    /// Applies request limits from configuration
    pub fn with_config(mut self, config: &Config) -> Self {
        self.default_top_n = config.default_top_n;
        self.max_top_n = config.max_top_n;
        self.request_timeout = Duration::from_secs(config.request_timeout_secs);
        self
    }

    /// Resolves a requested count: missing uses the default, negatives give
    /// zero, and anything above the limit is capped.
    pub fn effective_top_n(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_top_n.min(self.max_top_n),
            Some(n) if n <= 0 => 0,
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX).min(self.max_top_n),
        }
    }
}
