use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::catalog::{CatalogStore, FeatureMatrix, TitleIndex};
use crate::error::{Artifact, LoadError, LoadResult};

/// Locations of the three precomputed artifacts
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub catalog: PathBuf,
    pub title_index: PathBuf,
    pub feature_matrix: PathBuf,
}

/// A consistent catalog snapshot
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub catalog: CatalogStore,
    pub title_index: TitleIndex,
    pub features: FeatureMatrix,
}

fn open_artifact(artifact: Artifact, path: &Path) -> LoadResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::MissingArtifact {
            artifact,
            path: path.to_path_buf(),
        }),
        Err(e) => Err(LoadError::corrupt(
            artifact,
            format!("cannot read {}: {}", path.display(), e),
        )),
    }
}

/// Reads all three artifacts from disk.
///
/// Every file is checked for presence before any is parsed, so a missing
/// artifact is always reported as such rather than masked by a parse error.
pub fn load_from_paths(paths: &ArtifactPaths) -> LoadResult<LoadedArtifacts> {
    tracing::info!(
        catalog = %paths.catalog.display(),
        title_index = %paths.title_index.display(),
        feature_matrix = %paths.feature_matrix.display(),
        "Loading recommendation artifacts"
    );

    let catalog = open_artifact(Artifact::Catalog, &paths.catalog)?;
    let title_index = open_artifact(Artifact::TitleIndex, &paths.title_index)?;
    let features = open_artifact(Artifact::FeatureMatrix, &paths.feature_matrix)?;

    load_from_readers(catalog, title_index, features)
}

/// Parses the artifacts from byte streams and checks they agree with each other
pub fn load_from_readers<C, T, F>(catalog: C, title_index: T, features: F) -> LoadResult<LoadedArtifacts>
where
    C: Read,
    T: Read,
    F: Read,
{
    let catalog = CatalogStore::from_reader(catalog)?;
    let title_index = TitleIndex::from_reader(title_index)?;
    let features = FeatureMatrix::from_reader(features)?;

    validate(&catalog, &title_index, &features)?;

    Ok(LoadedArtifacts {
        catalog,
        title_index,
        features,
    })
}

/// Cross-artifact consistency checks
pub fn validate(
    catalog: &CatalogStore,
    title_index: &TitleIndex,
    features: &FeatureMatrix,
) -> LoadResult<()> {
    if features.rows() != catalog.len() {
        return Err(LoadError::corrupt(
            Artifact::FeatureMatrix,
            format!(
                "{} rows but catalog has {} items",
                features.rows(),
                catalog.len()
            ),
        ));
    }

    if let Some(max) = title_index.max_position() {
        if max >= catalog.len() {
            return Err(LoadError::corrupt(
                Artifact::TitleIndex,
                format!(
                    "position {} is out of range for catalog of {} items",
                    max,
                    catalog.len()
                ),
            ));
        }
    }

    if title_index.len() != catalog.len() {
        tracing::warn!(
            index_size = title_index.len(),
            items = catalog.len(),
            "Title index size differs from catalog size; some items are unreachable by title"
        );
    }

    let report = features.normalization_report();
    if report.rescaled_rows > 0 {
        tracing::warn!(
            rows = report.rescaled_rows,
            "Feature rows were not unit length and were normalized at load"
        );
    }
    if report.zero_rows > 0 {
        tracing::warn!(rows = report.zero_rows, "Feature rows with no terms");
    }

    tracing::info!(
        items = catalog.len(),
        vocabulary = features.cols(),
        nnz = features.nnz(),
        "Recommendation artifacts loaded"
    );

    Ok(())
}
