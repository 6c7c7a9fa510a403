use petgraph::graphmap::UnGraphMap;

use crate::libs::matrix::DiffMatrix;

/// Build the similarity graph for one threshold.
///
/// Nodes are residue indices `0..N`. An edge `(i, j)` is drawn iff the
/// difference is defined (`i < j`) and strictly below the threshold, i.e. the
/// two residues are "the same" distance apart in both structures.
///
/// Residues that gain no edge are *absent* from this graph. Callers that need
/// one node per residue regardless of edges (the clique cover must place every
/// residue in a region, and global search must see every residue) should use
/// [`similarity_graph_complete`] instead.
pub fn similarity_graph(diff: &DiffMatrix, threshold: f64) -> UnGraphMap<u32, ()> {
    let n = diff.size();
    let mut graph = UnGraphMap::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(val) = diff.get(i, j) {
                if val < threshold {
                    graph.add_edge(i as u32, j as u32, ());
                }
            }
        }
    }
    graph
}

/// Like [`similarity_graph`], but inserts all `N` residues up front so
/// isolated residues are present. A threshold of `0.0` then yields `N`
/// disconnected nodes.
pub fn similarity_graph_complete(diff: &DiffMatrix, threshold: f64) -> UnGraphMap<u32, ()> {
    let mut graph = similarity_graph(diff, threshold);
    for i in 0..diff.size() {
        graph.add_node(i as u32);
    }
    graph
}

/// The induced subgraph over `seed` and every neighbor of `seed`.
///
/// This is the restriction step of global similarity: searching only the
/// neighborhood of the previous region keeps the next region anchored to it
/// instead of re-discovering an unrelated clique elsewhere.
pub fn neighborhood(graph: &UnGraphMap<u32, ()>, seed: &[u32]) -> UnGraphMap<u32, ()> {
    let mut keep: Vec<u32> = Vec::new();
    for &v in seed {
        if !graph.contains_node(v) {
            continue;
        }
        if !keep.contains(&v) {
            keep.push(v);
        }
        for w in graph.neighbors(v) {
            if !keep.contains(&w) {
                keep.push(w);
            }
        }
    }

    let mut sub = UnGraphMap::new();
    for &v in &keep {
        sub.add_node(v);
    }
    for (idx, &v) in keep.iter().enumerate() {
        for &w in &keep[(idx + 1)..] {
            if graph.contains_edge(v, w) {
                sub.add_edge(v, w, ());
            }
        }
    }
    sub
}
