//! `casm` compares two protein structures that have been reduced to aligned
//! Cα distance matrices.
//!
//! Three similarity metrics are provided:
//!
//! * **Angular distance**: vectorize both distance matrices and measure the
//!   angle between the vectors, scaled to `[0, 100]` (0 = identical).
//! * **Local similarity**: take the element-wise differences of the two
//!   matrices, build a graph with an edge wherever two residues sit at "the
//!   same" distance in both structures (difference below a threshold), and
//!   peel off maximum cliques until every residue belongs to a region. Each
//!   region is internally consistent: all its residue pairs agree in both
//!   structures.
//! * **Global similarity**: one maximum clique per ascending threshold, each
//!   search restricted to the neighborhood of the previous region so the
//!   region grows as the notion of "the same" relaxes. Averaging the percent
//!   of residues captured under each threshold gives the aggregate score
//!   (credit to Zemla for the recipe).
//!
//! Maximum clique is NP-hard; the search sits behind the
//! [`MaxCliqueSolver`](libs::clique::MaxCliqueSolver) trait so the default
//! branch-and-bound solver can be swapped out without touching callers.

pub mod libs;

pub use crate::libs::clique::{BranchBound, Clique, MaxCliqueSolver};
pub use crate::libs::compare::{StructureComparison, GLOBAL_THRESHOLDS, LOCAL_THRESHOLD};
pub use crate::libs::dmat::{read_distance_csv, reader, writer};
pub use crate::libs::error::CasmError;
pub use crate::libs::matrix::{DiffMatrix, DistanceMatrix};
