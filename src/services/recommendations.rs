use std::io::Read;

use crate::catalog::{
    self, ArtifactPaths, CatalogStore, FeatureMatrix, LoadedArtifacts, TitleIndex,
};
use crate::error::LoadResult;
use crate::models::{Item, Recommendation};
use crate::services::ranking::{top_k, Scored};

/// Default number of recommendations per query
pub const DEFAULT_TOP_N: usize = 10;

/// Read-only access to the loaded catalog for request handlers
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    /// Titles most similar to `title`, best first, never including `title` itself.
    ///
    /// An unknown title yields an empty list.
    fn recommend_scored(&self, title: &str, top_n: usize) -> Vec<Recommendation>;

    /// The catalog entry a title resolves to
    fn lookup(&self, title: &str) -> Option<Item>;

    fn item_count(&self) -> usize;
}

/// Content-based similarity over a fixed catalog snapshot.
///
/// Built once at startup and never mutated, so a single instance can be shared
/// behind an `Arc` by any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: CatalogStore,
    title_index: TitleIndex,
    features: FeatureMatrix,
}

impl RecommendationEngine {
    /// Loads and validates the artifacts at `paths`
    pub fn load(paths: &ArtifactPaths) -> LoadResult<Self> {
        catalog::load_from_paths(paths).map(Self::from)
    }

    pub fn from_readers<C: Read, T: Read, F: Read>(
        catalog: C,
        title_index: T,
        features: F,
    ) -> LoadResult<Self> {
        catalog::load_from_readers(catalog, title_index, features).map(Self::from)
    }

    /// Assembles an engine from already-built parts after checking they agree
    pub fn from_parts(
        catalog: CatalogStore,
        title_index: TitleIndex,
        features: FeatureMatrix,
    ) -> LoadResult<Self> {
        catalog::validate(&catalog, &title_index, &features)?;
        Ok(Self {
            catalog,
            title_index,
            features,
        })
    }

    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.title_index.get(title)
    }

    pub fn item(&self, position: usize) -> Option<&Item> {
        self.catalog.get(position)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Cosine similarity between two positions
    pub fn score(&self, a: usize, b: usize) -> Option<f64> {
        let a = self.features.row(a)?;
        let b = self.features.row(b)?;
        Some(a.dot(&b))
    }

    /// Ranks every other position against `position`
    pub fn rank(&self, position: usize, top_n: usize) -> Vec<Scored> {
        let Some(query) = self.features.row(position) else {
            tracing::error!(
                position,
                rows = self.features.rows(),
                "Query position has no feature row"
            );
            return Vec::new();
        };

        let scores = self.features.similarities(&query);
        top_k(&scores, Some(position), top_n)
    }

    /// Titles most similar to `title`, best first
    pub fn recommend(&self, title: &str, top_n: usize) -> Vec<String> {
        self.recommend_scored(title, top_n)
            .into_iter()
            .map(|rec| rec.title)
            .collect()
    }

    pub fn recommend_scored(&self, title: &str, top_n: usize) -> Vec<Recommendation> {
        let Some(position) = self.resolve(title) else {
            tracing::debug!(title = %title, "No catalog match for title");
            return Vec::new();
        };

        let ranked = self.rank(position, top_n);

        tracing::debug!(
            title = %title,
            position,
            top_n,
            returned = ranked.len(),
            "Computed recommendations"
        );

        ranked
            .into_iter()
            .filter_map(|scored| match self.catalog.get(scored.position) {
                Some(item) => Some(Recommendation::new(item, scored.score)),
                None => {
                    tracing::error!(
                        position = scored.position,
                        "Ranked position missing from catalog"
                    );
                    None
                }
            })
            .collect()
    }
}

impl From<LoadedArtifacts> for RecommendationEngine {
    fn from(loaded: LoadedArtifacts) -> Self {
        Self {
            catalog: loaded.catalog,
            title_index: loaded.title_index,
            features: loaded.features,
        }
    }
}

impl Recommender for RecommendationEngine {
    fn recommend_scored(&self, title: &str, top_n: usize) -> Vec<Recommendation> {
        RecommendationEngine::recommend_scored(self, title, top_n)
    }

    fn lookup(&self, title: &str) -> Option<Item> {
        self.resolve(title)
            .and_then(|position| self.catalog.get(position))
            .cloned()
    }

    fn item_count(&self) -> usize {
        self.catalog.len()
    }
}
