use std::io::Read;

use serde::Deserialize;

use crate::error::{Artifact, LoadError, LoadResult};
use crate::models::Item;

/// Raw catalog record as exported with the feature matrix
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    title: String,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    overview: Option<String>,
}

/// Item metadata addressed by position
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Vec<Item>,
}

impl CatalogStore {
    /// Builds a store from titles, assigning positions in order
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = titles
            .into_iter()
            .enumerate()
            .map(|(position, title)| Item {
                position,
                title: title.into(),
                id: None,
                overview: None,
            })
            .collect();
        Self { items }
    }

    /// Parses a JSON array of records. Array order defines positions.
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let records: Vec<CatalogRecord> = serde_json::from_reader(reader)
            .map_err(|e| LoadError::corrupt(Artifact::Catalog, e.to_string()))?;

        let items = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| Item {
                position,
                title: record.title,
                id: record.id,
                overview: record.overview,
            })
            .collect();

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn title(&self, position: usize) -> Option<&str> {
        self.items.get(position).map(|item| item.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
