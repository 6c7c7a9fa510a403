use crate::libs::error::CasmError;

/// A symmetric pairwise Cα distance matrix with a zero diagonal.
///
/// Only the strict upper triangle (`i < j`) is stored; `get()` presents the
/// symmetric view. Values are flattened in row-major `i < j` order, which is
/// also the vectorization order used by the angular distance.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    upper: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from full square rows. Cells at or below the diagonal are
    /// ignored; each row must span the full dimension.
    pub fn from_rows(rows: &[Vec<f64>]) -> anyhow::Result<Self> {
        let n = rows.len();
        let mut upper = Vec::with_capacity(n * (n.saturating_sub(1)) / 2);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(CasmError::DimensionMismatch {
                    expected: n,
                    found: row.len(),
                }
                .into());
            }
            for j in (i + 1)..n {
                upper.push(row[j]);
            }
        }
        Ok(Self { n, upper })
    }

    /// Build directly from the flattened strict upper triangle,
    /// `n * (n - 1) / 2` values in row-major `i < j` order.
    pub fn from_upper(n: usize, upper: Vec<f64>) -> anyhow::Result<Self> {
        let expected = n * n.saturating_sub(1) / 2;
        if upper.len() != expected {
            return Err(CasmError::DimensionMismatch {
                expected,
                found: upper.len(),
            }
            .into());
        }
        Ok(Self { n, upper })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Symmetric accessor. The diagonal is zero by definition.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.upper[Self::tri_index(self.n, i, j)]
    }

    /// The strict upper triangle, flattened in row-major `i < j` order.
    pub fn upper_triangle(&self) -> &[f64] {
        &self.upper
    }

    // Offset of (i, j), i < j, within the flattened upper triangle.
    fn tri_index(n: usize, i: usize, j: usize) -> usize {
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }
}

/// The element-wise differences of two aligned distance matrices.
///
/// Entry `(i, j)` with `i < j` holds `|a[i][j] - b[i][j]|`. Everything at or
/// below the diagonal is undefined and reads as `None`, so a genuine zero
/// difference stays distinguishable from "no value here".
#[derive(Debug, Clone, PartialEq)]
pub struct DiffMatrix {
    n: usize,
    upper: Vec<f64>,
}

impl DiffMatrix {
    /// Compute the differences once, from the upper triangles only.
    /// Mismatched dimensions are rejected, never truncated or padded.
    pub fn new(a: &DistanceMatrix, b: &DistanceMatrix) -> anyhow::Result<Self> {
        if a.size() != b.size() {
            return Err(CasmError::DimensionMismatch {
                expected: a.size(),
                found: b.size(),
            }
            .into());
        }
        let upper = a
            .upper_triangle()
            .iter()
            .zip(b.upper_triangle())
            .map(|(x, y)| (x - y).abs())
            .collect();
        Ok(Self { n: a.size(), upper })
    }

    /// Build from a precomputed flattened upper triangle.
    pub fn from_upper(n: usize, upper: Vec<f64>) -> anyhow::Result<Self> {
        let expected = n * n.saturating_sub(1) / 2;
        if upper.len() != expected {
            return Err(CasmError::DimensionMismatch {
                expected,
                found: upper.len(),
            }
            .into());
        }
        Ok(Self { n, upper })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// `Some(difference)` for `i < j`, `None` elsewhere.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= j || j >= self.n {
            return None;
        }
        Some(self.upper[DistanceMatrix::tri_index(self.n, i, j)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mat3() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn distance_matrix_symmetric_view() {
        let m = mat3();
        assert_eq!(m.size(), 3);
        assert_relative_eq!(m.get(0, 1), 1.0);
        assert_relative_eq!(m.get(1, 0), 1.0);
        assert_relative_eq!(m.get(2, 2), 0.0);
        assert_eq!(m.upper_triangle(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn diff_matrix_upper_only() {
        let a = mat3();
        let b = DistanceMatrix::from_rows(&[
            vec![0.0, 1.5, 2.0],
            vec![1.5, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .unwrap();
        let d = DiffMatrix::new(&a, &b).unwrap();
        assert_relative_eq!(d.get(0, 1).unwrap(), 0.5);
        assert_relative_eq!(d.get(0, 2).unwrap(), 0.0);
        assert_relative_eq!(d.get(1, 2).unwrap(), 2.0);
        // at or below the diagonal: undefined, not zero
        assert_eq!(d.get(1, 1), None);
        assert_eq!(d.get(2, 0), None);
    }

    #[test]
    fn diff_matrix_dimension_mismatch() {
        let a = mat3();
        let rows: Vec<Vec<f64>> = (0..5).map(|_| vec![0.0; 5]).collect();
        let b = DistanceMatrix::from_rows(&rows).unwrap();
        let err = DiffMatrix::new(&a, &b).unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
    }

    #[test]
    fn ragged_rows_rejected() {
        let res = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]);
        assert!(res.is_err());
    }
}
