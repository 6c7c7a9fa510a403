use crate::libs::clique::Clique;
use crate::libs::error::CasmError;
use crate::libs::matrix::DistanceMatrix;

/// Angle between the two vectorized distance matrices, rescaled from
/// `[0°, 90°]` to `[0, 100]`. 0 means identical structures.
///
/// The vectors are the flattened strict upper triangles in row-major `i < j`
/// order. Two all-zero matrices count as identical; one all-zero matrix
/// against a non-zero one scores the maximum of 100.
pub fn angular_distance(a: &DistanceMatrix, b: &DistanceMatrix) -> anyhow::Result<f64> {
    if a.size() != b.size() {
        return Err(CasmError::DimensionMismatch {
            expected: a.size(),
            found: b.size(),
        }
        .into());
    }

    let va = a.upper_triangle();
    let vb = b.upper_triangle();
    let dot: f64 = va.iter().zip(vb).map(|(x, y)| x * y).sum();
    let norm_a = va.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = vb.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 && norm_b == 0.0 {
        return Ok(0.0);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(100.0);
    }

    let cos = (dot / (norm_a * norm_b)).clamp(-1.0, 1.0);
    let degrees = cos.acos().to_degrees();
    Ok(degrees * 100.0 / 90.0)
}

/// One `(size, size / ref_total)` row per region, then an aggregate row
/// holding the arithmetic mean of both columns. `ref_total` is the residue
/// count of the reference structure, which can differ from the alignment
/// length when unmatched residues were dropped.
pub fn region_scores(regions: &[Clique], ref_total: usize) -> Vec<(f64, f64)> {
    if regions.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<(f64, f64)> = Vec::with_capacity(regions.len() + 1);
    for region in regions {
        let size = region.len() as f64;
        rows.push((size, size / ref_total as f64));
    }
    let count = regions.len() as f64;
    let size_avg = rows.iter().map(|r| r.0).sum::<f64>() / count;
    let percent_avg = rows.iter().map(|r| r.1).sum::<f64>() / count;
    rows.push((size_avg, percent_avg));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mat(upper: Vec<f64>, n: usize) -> DistanceMatrix {
        DistanceMatrix::from_upper(n, upper).unwrap()
    }

    #[test]
    fn identical_matrices_score_zero() {
        let a = mat(vec![1.0, 2.0, 3.0], 3);
        assert_relative_eq!(angular_distance(&a, &a).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn symmetric_and_in_range() {
        let a = mat(vec![1.0, 2.0, 2.0], 3);
        let b = mat(vec![2.0, 1.0, 2.0], 3);
        let ab = angular_distance(&a, &b).unwrap();
        let ba = angular_distance(&b, &a).unwrap();
        assert_relative_eq!(ab, ba);
        assert!(ab > 0.0 && ab <= 100.0);
        // cos = 8/9
        let expected = (8.0f64 / 9.0).acos().to_degrees() * 100.0 / 90.0;
        assert_relative_eq!(ab, expected, epsilon = 1e-10);
    }

    #[test]
    fn orthogonal_vectors_score_hundred() {
        let a = mat(vec![1.0, 0.0, 0.0], 3);
        let b = mat(vec![0.0, 1.0, 0.0], 3);
        assert_relative_eq!(angular_distance(&a, &b).unwrap(), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_sizes_rejected() {
        let a = mat(vec![1.0], 2);
        let b = mat(vec![1.0, 2.0, 3.0], 3);
        assert!(angular_distance(&a, &b).is_err());
    }

    #[test]
    fn score_table_has_aggregate_row() {
        let regions = vec![
            Clique {
                nodes: vec![0, 1, 2, 3, 4, 5],
                exact: true,
            },
            Clique {
                nodes: vec![6, 7],
                exact: true,
            },
        ];
        let rows = region_scores(&regions, 8);
        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0].0, 6.0);
        assert_relative_eq!(rows[0].1, 0.75);
        assert_relative_eq!(rows[1].0, 2.0);
        assert_relative_eq!(rows[1].1, 0.25);
        assert_relative_eq!(rows[2].0, 4.0);
        assert_relative_eq!(rows[2].1, 0.5);
    }

    #[test]
    fn empty_region_list_scores_empty() {
        assert!(region_scores(&[], 10).is_empty());
    }
}
