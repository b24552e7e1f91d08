//! Cosine similarity of one vector against every row of an index.

use crate::vector::VectorOps;

/// Cosine similarity of `u` and `v`; zero when either has no magnitude.
pub fn cosine_similarity<V: VectorOps + ?Sized>(u: &V, v: &V) -> f64 {
    cosine_with_norm(u, u.magnitude(), v)
}

/// Score `vector` against every row, in row order.
///
/// The result has exactly one entry per row. Rows (or a query) with zero
/// magnitude score 0.
pub fn score_all<'a, V, I>(vector: &V, rows: I) -> Vec<f64>
where
    V: VectorOps + ?Sized + 'a,
    I: IntoIterator<Item = &'a V>,
{
    let norm = vector.magnitude();
    rows.into_iter()
        .map(|row| cosine_with_norm(vector, norm, row))
        .collect()
}

fn cosine_with_norm<V: VectorOps + ?Sized>(u: &V, u_norm: f64, v: &V) -> f64 {
    let v_norm = v.magnitude();
    if u_norm == 0.0 || v_norm == 0.0 {
        return 0.0;
    }
    u.dot(v) / (u_norm * v_norm)
}
