use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::CatalogStore;
use crate::error::{Artifact, LoadError, LoadResult};

/// Canonical lookup key for a title: surrounding whitespace removed, lowercased.
///
/// Applied to every key at load time and to every query, so the two always agree.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Column export: parallel `index` (titles) and `values` (positions) arrays
#[derive(Debug, Deserialize)]
struct SeriesArtifact {
    index: Vec<String>,
    values: Vec<i64>,
}

/// Shapes accepted for the serialized title index
#[derive(Debug)]
enum TitleIndexArtifact {
    Series { index: Vec<String>, values: Vec<i64> },
    /// Plain object of title to position
    Mapping(Map<String, Value>),
}

impl TitleIndexArtifact {
    /// Chooses the shape once from the top-level keys: an object holding
    /// exactly `index` and `values` is a series, any other object a mapping.
    fn from_value(value: Value) -> LoadResult<Self> {
        let Value::Object(map) = value else {
            return Err(LoadError::corrupt(
                Artifact::TitleIndex,
                "expected a JSON object of titles or an index/values series",
            ));
        };

        let is_series =
            map.len() == 2 && map.contains_key("index") && map.contains_key("values");
        if !is_series {
            return Ok(TitleIndexArtifact::Mapping(map));
        }

        let series: SeriesArtifact = serde_json::from_value(Value::Object(map))
            .map_err(|e| LoadError::corrupt(Artifact::TitleIndex, format!("series: {}", e)))?;
        Ok(TitleIndexArtifact::Series {
            index: series.index,
            values: series.values,
        })
    }

    /// Flattens either shape into ordered (title, position) pairs
    fn into_entries(self) -> LoadResult<Vec<(String, usize)>> {
        match self {
            TitleIndexArtifact::Series { index, values } => {
                if index.len() != values.len() {
                    return Err(LoadError::corrupt(
                        Artifact::TitleIndex,
                        format!(
                            "series has {} titles but {} positions",
                            index.len(),
                            values.len()
                        ),
                    ));
                }
                index
                    .into_iter()
                    .zip(values)
                    .map(|(title, value)| {
                        to_position(&title, value).map(|position| (title, position))
                    })
                    .collect()
            }
            TitleIndexArtifact::Mapping(map) => map
                .into_iter()
                .map(|(title, value)| {
                    let position = value.as_i64().ok_or_else(|| {
                        LoadError::corrupt(
                            Artifact::TitleIndex,
                            format!("position for {:?} is not an integer: {}", title, value),
                        )
                    })?;
                    to_position(&title, position).map(|position| (title, position))
                })
                .collect(),
        }
    }
}

fn to_position(title: &str, value: i64) -> LoadResult<usize> {
    usize::try_from(value).map_err(|_| {
        LoadError::corrupt(
            Artifact::TitleIndex,
            format!("position for {:?} is negative: {}", title, value),
        )
    })
}

/// Normalized title to position mapping
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    positions: HashMap<String, usize>,
}

impl TitleIndex {
    /// Builds the index from (title, position) pairs in load order.
    ///
    /// Titles that normalize to the same key keep the last position seen.
    pub fn from_entries<I, S>(entries: I) -> LoadResult<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut positions = HashMap::new();
        let mut collisions = 0usize;

        for (title, position) in entries {
            let key = normalize_title(title.as_ref());
            if key.is_empty() {
                return Err(LoadError::corrupt(
                    Artifact::TitleIndex,
                    format!("blank title for position {}", position),
                ));
            }
            if let Some(previous) = positions.insert(key, position) {
                if previous != position {
                    collisions += 1;
                    tracing::debug!(
                        title = %title.as_ref(),
                        previous,
                        position,
                        "Duplicate normalized title, keeping later position"
                    );
                }
            }
        }

        if collisions > 0 {
            tracing::warn!(
                collisions,
                "Title index contains duplicate normalized titles; later entries win"
            );
        }

        Ok(Self { positions })
    }

    /// Derives the index directly from catalog titles
    pub fn from_catalog(catalog: &CatalogStore) -> LoadResult<Self> {
        Self::from_entries(catalog.iter().map(|item| (item.title.as_str(), item.position)))
    }

    /// Parses either the mapping or the series shape
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| LoadError::corrupt(Artifact::TitleIndex, e.to_string()))?;
        let artifact = TitleIndexArtifact::from_value(value)?;
        Self::from_entries(artifact.into_entries()?)
    }

    /// Position for a title, after normalization
    pub fn get(&self, title: &str) -> Option<usize> {
        self.positions.get(&normalize_title(title)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest position referenced by any key
    pub fn max_position(&self) -> Option<usize> {
        self.positions.values().copied().max()
    }
}
