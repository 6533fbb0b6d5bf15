use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod item;

pub use item::{Item, Recommendation};

/// Request for titles similar to a known title
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    /// Requested result count. Negative values yield an empty list.
    #[serde(default)]
    pub top_n: Option<i64>,
}

/// Ranked recommendations for a query title
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// The title as the caller sent it
    pub query: String,
    /// Whether the title resolved to a catalog entry.
    /// When false, callers should fall back to another source.
    pub matched: bool,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub items: usize,
    pub loaded_at: DateTime<Utc>,
}
