use std::cmp::Ordering;

/// A candidate position with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub position: usize,
    pub score: f64,
}

/// Higher score first; equal scores by ascending position.
///
/// Scores are finite (the matrix rejects non-finite weights), so `partial_cmp`
/// always succeeds; it also treats `-0.0` and `0.0` as equal.
fn rank_order(a: &Scored, b: &Scored) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.position.cmp(&b.position))
}

/// Selects the `k` best positions from `scores`, skipping `exclude`.
///
/// Partitions around the k-th candidate and then sorts only the kept prefix,
/// so the result is fully ordered by [`rank_order`] and independent of the
/// input order of equal scores.
pub fn top_k(scores: &[f64], exclude: Option<usize>, k: usize) -> Vec<Scored> {
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Scored> = scores
        .iter()
        .enumerate()
        .filter(|&(position, _)| Some(position) != exclude)
        .map(|(position, &score)| Scored { position, score })
        .collect();

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, rank_order);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(rank_order);

    candidates
}
