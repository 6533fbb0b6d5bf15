use serde::{Deserialize, Serialize};

/// One catalog entry, addressed by its row position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// 0-based row in the catalog and feature matrix
    pub position: usize,
    /// Display title
    pub title: String,
    /// External catalog id, used by callers to fetch artwork and details
    pub id: Option<u64>,
    pub overview: Option<String>,
}

/// A ranked result from the similarity engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub position: usize,
    pub title: String,
    pub id: Option<u64>,
    /// Cosine similarity with the query item
    pub score: f64,
}

impl Recommendation {
    pub fn new(item: &Item, score: f64) -> Self {
        Self {
            position: item.position,
            title: item.title.clone(),
            id: item.id,
            score,
        }
    }
}
