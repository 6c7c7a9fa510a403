use fixedbitset::FixedBitSet;
use petgraph::graphmap::UnGraphMap;

/// One internally consistent region: a set of residues that are pairwise
/// connected in the similarity graph they were drawn from.
///
/// `exact` is false only when a solver ran out of its search budget and
/// returned the best clique found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clique {
    /// Residue indices, sorted ascending.
    pub nodes: Vec<u32>,
    pub exact: bool,
}

impl Clique {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Strategy interface for the maximum-clique search.
///
/// Maximum clique is NP-hard, so the engine never commits to one algorithm:
/// an exact branch and bound, a heuristic, or a third-party solver can all sit
/// behind this trait. Implementations must be deterministic for a fixed graph
/// and document their tie-break policy.
pub trait MaxCliqueSolver {
    /// One clique of maximum size in `graph`. An empty graph yields an empty
    /// exact clique.
    fn find_max_clique(&self, graph: &UnGraphMap<u32, ()>) -> Clique;

    /// Greedy clique cover: repeatedly peel off a maximum clique of the
    /// remaining graph, delete its nodes, and continue until no nodes remain.
    /// Isolated nodes fall out as singleton regions.
    ///
    /// This is a heuristic cover, not a minimum-cardinality partition; the
    /// downstream scoring relies on exactly this greedy behavior.
    fn clique_cover(&self, graph: &UnGraphMap<u32, ()>) -> Vec<Clique> {
        let mut work = graph.clone();
        let mut regions = Vec::new();
        while work.node_count() > 0 {
            let clique = self.find_max_clique(&work);
            if clique.is_empty() {
                // every residue still needs a region; emit what is left as
                // singletons rather than losing them
                let mut left: Vec<u32> = work.nodes().collect();
                left.sort_unstable();
                for v in left {
                    regions.push(Clique {
                        nodes: vec![v],
                        exact: clique.exact,
                    });
                }
                break;
            }
            for &v in &clique.nodes {
                work.remove_node(v);
            }
            regions.push(clique);
        }
        regions
    }
}

/// Exact branch-and-bound maximum-clique search with greedy-coloring bounds
/// (Tomita-style pruning) over bitset adjacency rows.
///
/// Tie-break policy: candidates are colored greedily in ascending index order
/// and explored from the highest color class downward, and the incumbent is
/// replaced only by a strictly larger clique. Among cliques of equal maximum
/// size, the first one reached in that fixed order wins, so a given graph
/// always produces the same clique.
#[derive(Debug, Clone, Default)]
pub struct BranchBound {
    /// Optional cap on branch expansions. When exhausted, the best clique
    /// found so far is returned with `exact = false`; on a non-empty graph it
    /// is at worst a greedily extended clique, never empty. `None` runs the
    /// unbounded exact search.
    pub step_budget: Option<u64>,
}

impl BranchBound {
    pub fn new() -> Self {
        Self { step_budget: None }
    }

    pub fn with_budget(step_budget: u64) -> Self {
        Self {
            step_budget: Some(step_budget),
        }
    }
}

impl MaxCliqueSolver for BranchBound {
    fn find_max_clique(&self, graph: &UnGraphMap<u32, ()>) -> Clique {
        let mut verts: Vec<u32> = graph.nodes().collect();
        verts.sort_unstable();
        let n = verts.len();
        if n == 0 {
            return Clique {
                nodes: Vec::new(),
                exact: true,
            };
        }

        // Local adjacency over 0..n, sorted by residue index.
        let mut adj = vec![FixedBitSet::with_capacity(n); n];
        for (i, &v) in verts.iter().enumerate() {
            for w in graph.neighbors(v) {
                // verts is sorted, so the position lookup is a binary search
                if let Ok(j) = verts.binary_search(&w) {
                    adj[i].insert(j);
                }
            }
        }

        let mut cand = FixedBitSet::with_capacity(n);
        cand.insert_range(..);

        let mut search = Search {
            adj: &adj,
            best: Vec::new(),
            current: Vec::new(),
            steps_left: self.step_budget,
            exhausted: false,
        };
        search.expand(cand);

        // An exhausted search can bail before reaching any leaf. Fall back to
        // a greedy extension from the lowest vertex so a non-empty graph never
        // yields an empty clique.
        if search.best.is_empty() {
            let mut cand = FixedBitSet::with_capacity(n);
            cand.insert_range(..);
            let mut v = 0;
            loop {
                search.best.push(v);
                cand.intersect_with(&adj[v]);
                match cand.ones().next() {
                    Some(w) => v = w,
                    None => break,
                }
            }
        }

        let mut nodes: Vec<u32> = search.best.iter().map(|&i| verts[i]).collect();
        nodes.sort_unstable();
        Clique {
            nodes,
            exact: !search.exhausted,
        }
    }
}

struct Search<'a> {
    adj: &'a [FixedBitSet],
    best: Vec<usize>,
    current: Vec<usize>,
    steps_left: Option<u64>,
    exhausted: bool,
}

impl Search<'_> {
    /// Expand the current clique into the candidate set `cand`.
    fn expand(&mut self, cand: FixedBitSet) {
        if self.exhausted {
            return;
        }
        if let Some(left) = self.steps_left.as_mut() {
            if *left == 0 {
                self.exhausted = true;
                return;
            }
            *left -= 1;
        }

        let colored = color_sort(&cand, self.adj);
        let mut cand = cand;
        // Highest colors first; once a color cannot beat the incumbent,
        // neither can any earlier one.
        for &(v, color) in colored.iter().rev() {
            if self.current.len() + color <= self.best.len() {
                return;
            }
            self.current.push(v);
            let mut next = cand.clone();
            next.intersect_with(&self.adj[v]);
            if next.count_ones(..) == 0 {
                if self.current.len() > self.best.len() {
                    self.best = self.current.clone();
                }
            } else {
                self.expand(next);
            }
            self.current.pop();
            if self.exhausted {
                return;
            }
            cand.set(v, false);
        }
    }
}

/// Greedy coloring of the candidate set, ascending vertex order.
///
/// Returns `(vertex, color)` pairs sorted by color (1-based); a vertex's color
/// bounds the size of any clique containing it within `cand`.
fn color_sort(cand: &FixedBitSet, adj: &[FixedBitSet]) -> Vec<(usize, usize)> {
    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut class_bits: Vec<FixedBitSet> = Vec::new();
    for v in cand.ones() {
        let mut placed = false;
        for (k, bits) in class_bits.iter_mut().enumerate() {
            // fits a class iff not adjacent to any member
            let mut overlap = bits.clone();
            overlap.intersect_with(&adj[v]);
            if overlap.count_ones(..) == 0 {
                bits.insert(v);
                classes[k].push(v);
                placed = true;
                break;
            }
        }
        if !placed {
            let mut bits = FixedBitSet::with_capacity(adj.len());
            bits.insert(v);
            class_bits.push(bits);
            classes.push(vec![v]);
        }
    }

    let mut out = Vec::with_capacity(cand.count_ones(..));
    for (k, class) in classes.iter().enumerate() {
        for &v in class {
            out.push((v, k + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32)], nodes: &[u32]) -> UnGraphMap<u32, ()> {
        let mut g = UnGraphMap::new();
        for &n in nodes {
            g.add_node(n);
        }
        for &(a, b) in edges {
            g.add_edge(a, b, ());
        }
        g
    }

    /// Brute-force maximum clique size, for cross-checking small graphs.
    fn brute_force_max(g: &UnGraphMap<u32, ()>) -> usize {
        let nodes: Vec<u32> = g.nodes().collect();
        let mut best = 0;
        for mask in 0u32..(1 << nodes.len()) {
            let members: Vec<u32> = (0..nodes.len())
                .filter(|&i| mask & (1 << i) != 0)
                .map(|i| nodes[i])
                .collect();
            let is_clique = members
                .iter()
                .enumerate()
                .all(|(i, &a)| members[(i + 1)..].iter().all(|&b| g.contains_edge(a, b)));
            if is_clique {
                best = best.max(members.len());
            }
        }
        best
    }

    #[test]
    fn empty_graph_yields_empty_clique() {
        let g = UnGraphMap::new();
        let clique = BranchBound::new().find_max_clique(&g);
        assert!(clique.is_empty());
        assert!(clique.exact);
        assert!(BranchBound::new().clique_cover(&g).is_empty());
    }

    #[test]
    fn triangle_with_tail() {
        let g = graph(&[(0, 1), (1, 2), (0, 2), (2, 3)], &[]);
        let clique = BranchBound::new().find_max_clique(&g);
        assert_eq!(clique.nodes, vec![0, 1, 2]);
        assert!(clique.exact);
    }

    #[test]
    fn matches_brute_force() {
        // two overlapping cliques {0,1,2,3} and {3,4,5}, plus stragglers
        let g = graph(
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 4),
                (3, 5),
                (4, 5),
                (5, 6),
            ],
            &[7],
        );
        let clique = BranchBound::new().find_max_clique(&g);
        assert_eq!(clique.len(), brute_force_max(&g));
        assert_eq!(clique.nodes, vec![0, 1, 2, 3]);
        // returned region is an actual clique of the source graph
        for (i, &a) in clique.nodes.iter().enumerate() {
            for &b in &clique.nodes[(i + 1)..] {
                assert!(g.contains_edge(a, b));
            }
        }
    }

    #[test]
    fn deterministic_tie_break() {
        // two disjoint triangles of equal size; every run must settle on the
        // same one, and insertion order must not matter
        let g1 = graph(&[(0, 1), (1, 2), (0, 2), (5, 6), (6, 7), (5, 7)], &[]);
        let g2 = graph(&[(5, 7), (6, 7), (5, 6), (0, 2), (1, 2), (0, 1)], &[]);
        let first = BranchBound::new().find_max_clique(&g1);
        assert_eq!(first.len(), 3);
        for _ in 0..3 {
            assert_eq!(BranchBound::new().find_max_clique(&g1), first);
            assert_eq!(BranchBound::new().find_max_clique(&g2), first);
        }
    }

    #[test]
    fn cover_is_complete_and_disjoint() {
        let g = graph(&[(0, 1), (1, 2), (0, 2), (2, 3), (4, 5)], &[6]);
        let cover = BranchBound::new().clique_cover(&g);
        let mut seen: Vec<u32> = cover.iter().flat_map(|c| c.nodes.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn each_cover_step_is_max_of_remaining() {
        let solver = BranchBound::new();
        let g = graph(&[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)], &[]);
        let cover = solver.clique_cover(&g);

        let mut work = g.clone();
        for region in &cover {
            assert_eq!(region.len(), brute_force_max(&work));
            for &v in &region.nodes {
                work.remove_node(v);
            }
        }
        assert_eq!(work.node_count(), 0);
    }

    #[test]
    fn budget_exhaustion_reports_inexact() {
        // complete graph on 10 vertices; one expansion step cannot finish
        let mut g = UnGraphMap::new();
        for a in 0..10u32 {
            for b in (a + 1)..10 {
                g.add_edge(a, b, ());
            }
        }
        let clique = BranchBound::with_budget(1).find_max_clique(&g);
        assert!(!clique.exact);
        assert!(!clique.is_empty());
        assert!(clique.len() <= 10);

        let clique = BranchBound::new().find_max_clique(&g);
        assert!(clique.exact);
        assert_eq!(clique.len(), 10);
    }

    #[test]
    fn budget_cover_keeps_every_residue() {
        let mut g = UnGraphMap::new();
        for a in 0..6u32 {
            for b in (a + 1)..6 {
                g.add_edge(a, b, ());
            }
        }
        let cover = BranchBound::with_budget(1).clique_cover(&g);
        let mut seen: Vec<u32> = cover.iter().flat_map(|c| c.nodes.clone()).collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(total, seen.len());
        assert_eq!(seen, (0..6).collect::<Vec<u32>>());
    }

    /// A solver that never finds anything, to drive the cover's last-resort
    /// path directly.
    struct GivesUp;

    impl MaxCliqueSolver for GivesUp {
        fn find_max_clique(&self, _graph: &UnGraphMap<u32, ()>) -> Clique {
            Clique {
                nodes: Vec::new(),
                exact: false,
            }
        }
    }

    #[test]
    fn cover_degrades_to_singletons_when_solver_gives_up() {
        let g = graph(&[(0, 1), (1, 2)], &[5]);
        let cover = GivesUp.clique_cover(&g);
        let mut seen: Vec<u32> = cover.iter().flat_map(|c| c.nodes.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 5]);
        assert!(cover.iter().all(|c| c.len() == 1 && !c.exact));
    }
}
