use std::cmp::Ordering;
use std::io::Read;

use serde::Deserialize;

use crate::error::{Artifact, LoadError, LoadResult};

/// Rows whose L2 norm is within this distance of 1.0 count as already unit length
const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Serialized compressed sparse row matrix
#[derive(Debug, Deserialize)]
struct CsrArtifact {
    shape: [usize; 2],
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

/// Euclidean length, scaled by the largest magnitude so squaring cannot overflow
fn l2_norm(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max == 0.0 {
        return 0.0;
    }
    let sum = values.iter().map(|v| (v / max) * (v / max)).sum::<f64>();
    max * sum.sqrt()
}

/// Borrowed view of one sparse row. Column indices are strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

impl SparseRow<'_> {
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn norm(&self) -> f64 {
        l2_norm(self.values)
    }

    /// Inner product by merging the two sorted index lists
    pub fn dot(&self, other: &SparseRow<'_>) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// What load-time normalization found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Rows that were not unit length and were rescaled
    pub rescaled_rows: usize,
    /// Rows with no non-zero weight; these score 0 against everything
    pub zero_rows: usize,
}

/// TF-IDF weights, one sparse row per catalog position.
///
/// Every non-zero row is scaled to unit length on construction, so the inner
/// product of two rows is their cosine similarity.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
    report: NormalizationReport,
}

impl FeatureMatrix {
    /// Validates CSR components and normalizes rows
    pub fn from_csr(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> LoadResult<Self> {
        let corrupt = |message: String| LoadError::corrupt(Artifact::FeatureMatrix, message);

        let expected_indptr = rows
            .checked_add(1)
            .ok_or_else(|| corrupt(format!("row count {} is out of range", rows)))?;
        if indptr.len() != expected_indptr {
            return Err(corrupt(format!(
                "indptr has {} entries, expected {} for {} rows",
                indptr.len(),
                expected_indptr,
                rows
            )));
        }
        if indices.len() != data.len() {
            return Err(corrupt(format!(
                "{} column indices but {} values",
                indices.len(),
                data.len()
            )));
        }
        if indptr[0] != 0 || indptr[rows] != indices.len() {
            return Err(corrupt(format!(
                "indptr must span 0..{}, found {}..{}",
                indices.len(),
                indptr[0],
                indptr[rows]
            )));
        }

        if let Some(row) = indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(corrupt(format!("indptr decreases at row {}", row)));
        }

        for row in 0..rows {
            let (start, end) = (indptr[row], indptr[row + 1]);
            let cols_in_row = &indices[start..end];
            if let Some(&col) = cols_in_row.iter().find(|&&c| c >= cols) {
                return Err(corrupt(format!(
                    "row {} references column {} outside vocabulary of {}",
                    row, col, cols
                )));
            }
            if cols_in_row.windows(2).any(|w| w[0] >= w[1]) {
                return Err(corrupt(format!(
                    "row {} column indices are not strictly increasing",
                    row
                )));
            }
            if data[start..end].iter().any(|v| !v.is_finite()) {
                return Err(corrupt(format!("row {} contains a non-finite weight", row)));
            }
        }

        let mut matrix = Self {
            rows,
            cols,
            indptr,
            indices,
            data,
            report: NormalizationReport::default(),
        };
        matrix.report = matrix.normalize_rows();

        Ok(matrix)
    }

    /// Builds a matrix from per-row (column, weight) pairs in any column order
    pub fn from_rows(cols: usize, rows: Vec<Vec<(usize, f64)>>) -> LoadResult<Self> {
        let row_count = rows.len();
        let mut indptr = Vec::with_capacity(row_count + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);
        for mut row in rows {
            row.sort_by_key(|&(col, _)| col);
            for (col, weight) in row {
                indices.push(col);
                data.push(weight);
            }
            indptr.push(indices.len());
        }

        Self::from_csr(row_count, cols, indptr, indices, data)
    }

    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let artifact: CsrArtifact = serde_json::from_reader(reader)
            .map_err(|e| LoadError::corrupt(Artifact::FeatureMatrix, e.to_string()))?;
        let [rows, cols] = artifact.shape;
        Self::from_csr(rows, cols, artifact.indptr, artifact.indices, artifact.data)
    }

    fn normalize_rows(&mut self) -> NormalizationReport {
        let mut report = NormalizationReport::default();

        for row in 0..self.rows {
            let range = self.indptr[row]..self.indptr[row + 1];
            let values = &mut self.data[range];
            let norm = l2_norm(values);

            if norm == 0.0 {
                report.zero_rows += 1;
            } else if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
                report.rescaled_rows += 1;
                values.iter_mut().for_each(|v| *v /= norm);
            }
        }

        report
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn normalization_report(&self) -> NormalizationReport {
        self.report
    }

    pub fn row(&self, position: usize) -> Option<SparseRow<'_>> {
        if position >= self.rows {
            return None;
        }
        let range = self.indptr[position]..self.indptr[position + 1];
        Some(SparseRow {
            indices: &self.indices[range.clone()],
            values: &self.data[range],
        })
    }

    /// Similarity of `query` against every row, indexed by position.
    ///
    /// `query` must be a row of this matrix.
    pub fn similarities(&self, query: &SparseRow<'_>) -> Vec<f64> {
        let mut dense = vec![0.0; self.cols];
        for (&col, &value) in query.indices.iter().zip(query.values) {
            dense[col] = value;
        }

        (0..self.rows)
            .map(|row| {
                let range = self.indptr[row]..self.indptr[row + 1];
                self.indices[range.clone()]
                    .iter()
                    .zip(&self.data[range])
                    .map(|(&col, &value)| dense[col] * value)
                    .sum::<f64>()
            })
            .collect()
    }
}
