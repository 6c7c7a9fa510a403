use crate::libs::clique::{Clique, MaxCliqueSolver};
use crate::libs::error::CasmError;
use crate::libs::graph::{neighborhood, similarity_graph_complete};
use crate::libs::matrix::{DiffMatrix, DistanceMatrix};
use crate::libs::score;

/// Default threshold for local similarity, in angstroms.
pub const LOCAL_THRESHOLD: f64 = 1.0;

/// Default ascending thresholds for global similarity, in angstroms.
pub const GLOBAL_THRESHOLDS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

/// A pairwise comparison of two aligned structures.
///
/// Holds the aligned residue identifiers of both structures (index `i` in one
/// corresponds to index `i` in the other; the correspondence comes from an
/// external alignment and is never recomputed here), the two source distance
/// matrices, and their difference matrix. All of it is computed at
/// construction and immutable afterwards, so independent region computations
/// can read it concurrently.
#[derive(Debug, Clone)]
pub struct StructureComparison {
    ref_id: String,
    alt_id: String,
    ref_residues: Vec<String>,
    alt_residues: Vec<String>,
    distances: Option<(DistanceMatrix, DistanceMatrix)>,
    differences: DiffMatrix,
    ref_total: usize,
}

impl StructureComparison {
    /// Compare two aligned structures given their residue identifiers and
    /// distance matrices. All four inputs must agree on the alignment length;
    /// mismatches are rejected, never truncated.
    ///
    /// The reference residue total used for percent scores defaults to the
    /// alignment length; use [`with_reference_total`](Self::with_reference_total)
    /// when the reference structure has residues the alignment dropped.
    pub fn new(
        ref_id: &str,
        ref_residues: Vec<String>,
        ref_matrix: DistanceMatrix,
        alt_id: &str,
        alt_residues: Vec<String>,
        alt_matrix: DistanceMatrix,
    ) -> anyhow::Result<Self> {
        check_len(ref_residues.len(), ref_matrix.size())?;
        check_len(alt_residues.len(), alt_matrix.size())?;
        check_len(ref_residues.len(), alt_residues.len())?;
        let differences = DiffMatrix::new(&ref_matrix, &alt_matrix)?;
        let ref_total = ref_residues.len();
        Ok(Self {
            ref_id: ref_id.to_string(),
            alt_id: alt_id.to_string(),
            ref_residues,
            alt_residues,
            distances: Some((ref_matrix, alt_matrix)),
            differences,
            ref_total,
        })
    }

    /// Build from a precomputed difference matrix. Region operations work as
    /// usual; the angular distance is unavailable and reports missing data.
    pub fn from_difference(
        ref_id: &str,
        ref_residues: Vec<String>,
        alt_id: &str,
        alt_residues: Vec<String>,
        differences: DiffMatrix,
    ) -> anyhow::Result<Self> {
        check_len(ref_residues.len(), differences.size())?;
        check_len(ref_residues.len(), alt_residues.len())?;
        let ref_total = ref_residues.len();
        Ok(Self {
            ref_id: ref_id.to_string(),
            alt_id: alt_id.to_string(),
            ref_residues,
            alt_residues,
            distances: None,
            differences,
            ref_total,
        })
    }

    /// Override the reference structure's residue count `R`. Percent scores
    /// are `size / R`, independent of the alignment length.
    pub fn with_reference_total(mut self, ref_total: usize) -> Self {
        self.ref_total = ref_total;
        self
    }

    /// Alignment length `N`.
    pub fn size(&self) -> usize {
        self.differences.size()
    }

    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn alt_id(&self) -> &str {
        &self.alt_id
    }

    pub fn ref_residue_ids(&self) -> &[String] {
        &self.ref_residues
    }

    pub fn alt_residue_ids(&self) -> &[String] {
        &self.alt_residues
    }

    pub fn differences(&self) -> &DiffMatrix {
        &self.differences
    }

    pub fn ref_distances(&self) -> Option<&DistanceMatrix> {
        self.distances.as_ref().map(|(a, _)| a)
    }

    pub fn alt_distances(&self) -> Option<&DistanceMatrix> {
        self.distances.as_ref().map(|(_, b)| b)
    }

    /// Angle between the two vectorized distance matrices, scaled to
    /// `[0, 100]` where 0 is identical.
    pub fn angular_distance(&self) -> anyhow::Result<f64> {
        let (a, b) = self.distances.as_ref().ok_or_else(|| {
            CasmError::MissingData(
                "no source distance matrices; angular distance needs both".to_string(),
            )
        })?;
        score::angular_distance(a, b)
    }

    /// Local similarity: the clique cover of the similarity graph at
    /// `threshold`, over all residues. Every residue lands in exactly one
    /// region; residues with no similar partner become singletons. Regions
    /// come out in greedy extraction order.
    pub fn local_regions(&self, threshold: f64, solver: &dyn MaxCliqueSolver) -> Vec<Clique> {
        let graph = similarity_graph_complete(&self.differences, threshold);
        solver.clique_cover(&graph)
    }

    /// Global similarity: one region per threshold, ascending.
    ///
    /// The first region is the maximum clique at the first threshold. Each
    /// later threshold rebuilds the graph over all residues, restricts it to
    /// the neighborhood of the previous region, and takes the maximum clique
    /// there. The previous region travels as a plain accumulator through the
    /// loop; the engine itself stays immutable.
    pub fn global_regions(
        &self,
        thresholds: &[f64],
        solver: &dyn MaxCliqueSolver,
    ) -> anyhow::Result<Vec<Clique>> {
        if thresholds.is_empty() {
            return Err(
                CasmError::InvalidThresholdSequence("no thresholds supplied".to_string()).into(),
            );
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CasmError::InvalidThresholdSequence(format!(
                "thresholds must be strictly ascending, got {:?}",
                thresholds
            ))
            .into());
        }
        if self.size() == 0 {
            return Ok(Vec::new());
        }

        let mut regions: Vec<Clique> = Vec::with_capacity(thresholds.len());
        let mut last: Option<Clique> = None;
        for &threshold in thresholds {
            let graph = similarity_graph_complete(&self.differences, threshold);
            let clique = match &last {
                None => solver.find_max_clique(&graph),
                Some(prev) => {
                    let restricted = neighborhood(&graph, &prev.nodes);
                    solver.find_max_clique(&restricted)
                }
            };
            regions.push(clique.clone());
            last = Some(clique);
        }
        Ok(regions)
    }

    /// Per-region `(size, size / R)` rows with a trailing aggregate row.
    pub fn region_scores(&self, regions: &[Clique]) -> Vec<(f64, f64)> {
        score::region_scores(regions, self.ref_total)
    }

    /// The reference structure's residue identifiers for a region.
    pub fn region_ref_ids(&self, region: &Clique) -> Vec<String> {
        project(&region.nodes, &self.ref_residues)
    }

    /// The compared structure's residue identifiers for a region.
    pub fn region_alt_ids(&self, region: &Clique) -> Vec<String> {
        project(&region.nodes, &self.alt_residues)
    }
}

fn check_len(expected: usize, found: usize) -> Result<(), CasmError> {
    if expected != found {
        return Err(CasmError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn project(nodes: &[u32], ids: &[String]) -> Vec<String> {
    nodes
        .iter()
        .map(|&i| ids[i as usize].trim().to_string())
        .collect()
}
