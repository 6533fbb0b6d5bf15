use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::ArtifactPaths;
use crate::services::DEFAULT_TOP_N;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Item metadata table (JSON records, one per position)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Title to position mapping
    #[serde(default = "default_title_index_path")]
    pub title_index_path: PathBuf,

    /// TF-IDF matrix in CSR layout
    #[serde(default = "default_feature_matrix_path")]
    pub feature_matrix_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when a request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound on the count a request may ask for
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_title_index_path() -> PathBuf {
    PathBuf::from("data/title_index.json")
}

fn default_feature_matrix_path() -> PathBuf {
    PathBuf::from("data/feature_matrix.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_top_n() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_top_n > config.max_top_n {
            anyhow::bail!(
                "default_top_n ({}) exceeds max_top_n ({})",
                config.default_top_n,
                config.max_top_n
            );
        }

        Ok(config)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            catalog: self.catalog_path.clone(),
            title_index: self.title_index_path.clone(),
            feature_matrix: self.feature_matrix_path.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
