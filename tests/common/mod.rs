#![allow(dead_code)]

use std::fs;
use std::path::Path;

use cinema_recs::catalog::ArtifactPaths;
use serde_json::{json, Value};

pub const CATALOG: &str = r#"[
    {"title": "Inception", "id": 27205, "overview": "A thief who steals corporate secrets through dream-sharing"},
    {"title": "Interstellar", "id": 157336},
    {"title": "The Matrix", "id": 603},
    {"title": "Toy Story", "id": 862},
    {"title": "Finding Nemo", "id": 12},
    {"title": "Up"}
]"#;

pub const TITLE_INDEX: &str = r#"{
    "index": ["Inception", "Interstellar", "The Matrix", "Toy Story", "Finding Nemo", "Up"],
    "values": [0, 1, 2, 3, 4, 5]
}"#;

/// Vocabulary: 0 dream, 1 space, 2 heist, 3 simulation, 4 toys, 5 fish, 6 ocean, 7 balloon, 8 family
pub fn feature_matrix() -> Value {
    let rows: Vec<Vec<(usize, f64)>> = vec![
        vec![(0, 0.8), (2, 0.6)],
        vec![(0, 0.3), (1, 0.9)],
        vec![(0, 0.2), (3, 0.9), (2, 0.4)],
        vec![(4, 0.9), (8, 0.4)],
        vec![(5, 0.7), (6, 0.6), (8, 0.4)],
        vec![(7, 0.8), (8, 0.6)],
    ];
    csr(9, &rows)
}

pub fn csr(cols: usize, rows: &[Vec<(usize, f64)>]) -> Value {
    let mut indptr = vec![0usize];
    let mut indices = Vec::new();
    let mut data = Vec::new();
    for row in rows {
        let mut row = row.clone();
        row.sort_by_key(|&(col, _)| col);
        for (col, weight) in row {
            indices.push(col);
            data.push(weight);
        }
        indptr.push(indices.len());
    }
    json!({
        "shape": [rows.len(), cols],
        "indptr": indptr,
        "indices": indices,
        "data": data,
    })
}

pub fn write_artifacts(dir: &Path, catalog: &str, title_index: &str, matrix: &Value) -> ArtifactPaths {
    let paths = ArtifactPaths {
        catalog: dir.join("catalog.json"),
        title_index: dir.join("title_index.json"),
        feature_matrix: dir.join("feature_matrix.json"),
    };
    fs::write(&paths.catalog, catalog).unwrap();
    fs::write(&paths.title_index, title_index).unwrap();
    fs::write(&paths.feature_matrix, matrix.to_string()).unwrap();
    paths
}
