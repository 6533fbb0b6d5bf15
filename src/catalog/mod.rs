//! In-memory catalog snapshot: item metadata, title lookup, and TF-IDF rows

mod loader;
mod matrix;
mod store;
mod title_index;

pub use loader::{load_from_paths, load_from_readers, validate, ArtifactPaths, LoadedArtifacts};
pub use matrix::{FeatureMatrix, NormalizationReport, SparseRow};
pub use store::CatalogStore;
pub use title_index::{normalize_title, TitleIndex};
