use std::cmp::Ordering;

use crate::catalog::Catalog;

/// Number of similar titles returned per request
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Rows most similar to `row`, best first, at most [`MAX_RECOMMENDATIONS`]
///
/// Returns `None` if `row` is not a catalog row.
pub fn rank(row: usize, catalog: &Catalog) -> Option<Vec<usize>> {
    rank_top(row, catalog, MAX_RECOMMENDATIONS)
}

/// Rows most similar to `row`, best first, at most `limit`
///
/// Scores are sorted descending with a stable sort over row-ascending
/// candidates, so numerically equal scores (`-0.0` and `0.0` included) keep
/// row order. The query row itself is never returned.
pub fn rank_top(row: usize, catalog: &Catalog, limit: usize) -> Option<Vec<usize>> {
    let scores = catalog.similarity_row(row)?;

    let mut candidates: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(candidate, _)| candidate != row)
        .collect();
    // Scores are finite (checked at load), so partial_cmp never fails here
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    Some(
        candidates
            .into_iter()
            .take(limit)
            .map(|(candidate, _)| candidate)
            .collect(),
    )
}
