use super::LoadError;

/// Square matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Flattens `rows` after checking the matrix is square and every score is finite
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(LoadError::NotSquare {
                    row,
                    len: values.len(),
                    dim,
                });
            }
            if let Some(col) = values.iter().position(|score| !score.is_finite()) {
                return Err(LoadError::NonFiniteScore { row, col });
            }
            scores.extend(values);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.dim {
            return None;
        }
        let start = row * self.dim;
        Some(&self.scores[start..start + self.dim])
    }
}
