//! Open-path TSP approximation with fixed endpoints.
//!
//! Adapted Christofides–Serdyukov scheme: minimum spanning tree, a
//! minimum-weight perfect matching over the parity-adjusted odd-degree
//! set, an Eulerian circuit over the merged multigraph carrying one
//! artificial start–end edge, then a cut at that edge and shortcutting
//! into a Hamiltonian path. All graph work happens on dense integer
//! indices into the node slice.

use std::cmp::Ordering;

use tracing::debug;

use crate::cost::CostMatrix;
use crate::place::Place;
use crate::route::Route;

/// Largest odd-degree set still matched exactly; greedy pairing above.
pub const EXACT_MATCHING_LIMIT: usize = 16;

/// Path construction knobs.
#[derive(Debug, Clone, Default)]
pub struct PathOptions {
    /// Run a Floyd–Warshall closure over the resolved distances before
    /// constructing the graph.
    ///
    /// The 1.5× approximation bound only holds on a metric cost matrix,
    /// and raw sparse measurements do not guarantee one. Off by default
    /// so production routes price edges exactly as measured.
    pub metric_closure: bool,
}

/// Builds a route from `start` through every place in `mandatory` exactly
/// once to `end`.
///
/// The total distance is within 1.5× of the optimal open path whenever
/// the resolved costs satisfy the triangle inequality (see
/// [`PathOptions::metric_closure`]).
///
/// # Panics
///
/// Panics if an internal algorithm invariant breaks (the merged
/// multigraph failing to be Eulerian, or the Eulerian circuit not using
/// the artificial start–end edge). Both are defects, not input errors.
pub fn build_path(start: &Place, end: &Place, mandatory: &[Place], options: &PathOptions) -> Route {
    match mandatory {
        [] => return Route::new(vec![start.clone(), end.clone()]),
        [only] => return Route::new(vec![start.clone(), only.clone(), end.clone()]),
        _ => {}
    }

    let mut nodes = Vec::with_capacity(mandatory.len() + 2);
    nodes.push(start.clone());
    nodes.extend_from_slice(mandatory);
    nodes.push(end.clone());
    let start_idx = 0;
    let end_idx = nodes.len() - 1;

    let mut matrix = CostMatrix::build(&nodes);
    if options.metric_closure {
        matrix.metric_closure();
    }

    let mst = minimum_spanning_tree(&matrix);
    let odd = parity_adjusted_odd_set(nodes.len(), &mst, start_idx, end_idx);
    let matching = min_weight_matching(&odd, &matrix);
    debug!(
        nodes = nodes.len(),
        odd = odd.len(),
        exact = odd.len() <= EXACT_MATCHING_LIMIT,
        "matched odd-degree set"
    );

    let mut multi = Multigraph::new(nodes.len());
    for &(u, v) in &mst {
        multi.add_edge(u, v);
    }
    for &(u, v) in &matching {
        multi.add_edge(u, v);
    }
    // Pins the eventual cut point and restores even degree at both
    // endpoints, so the whole multigraph is Eulerian.
    let artificial = multi.add_edge(start_idx, end_idx);

    let circuit = multi.eulerian_circuit(start_idx);
    let walk = cut_at_edge(&circuit, artificial, start_idx);

    // Shortcut: the first occurrence of each vertex wins.
    let mut seen = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());
    for &v in &walk {
        if !seen[v] {
            seen[v] = true;
            order.push(v);
        }
    }

    // The walk starts at the start vertex, so shortcutting keeps it in
    // front; the end vertex can be displaced by a mid-walk revisit.
    // Relocate either one if needed.
    if order.last() != Some(&end_idx) {
        order.retain(|&v| v != end_idx);
        order.push(end_idx);
    }
    if order.first() != Some(&start_idx) {
        order.retain(|&v| v != start_idx);
        order.insert(0, start_idx);
    }

    debug!(stops = order.len(), "constructed path");
    Route::new(order.into_iter().map(|i| nodes[i].clone()).collect())
}

/// Kruskal over the complete graph. Edges tie-break by `(weight, i, j)`
/// so repeated runs agree.
fn minimum_spanning_tree(matrix: &CostMatrix) -> Vec<(usize, usize)> {
    let n = matrix.len();
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((i, j));
        }
    }
    edges.sort_by(|&(a, b), &(c, d)| {
        matrix
            .distance_m(a, b)
            .total_cmp(&matrix.distance_m(c, d))
            .then(a.cmp(&c))
            .then(b.cmp(&d))
    });

    let mut components = UnionFind::new(n);
    let mut mst = Vec::with_capacity(n.saturating_sub(1));
    for (u, v) in edges {
        if components.union(u, v) {
            mst.push((u, v));
            if mst.len() == n - 1 {
                break;
            }
        }
    }
    mst
}

/// Vertices left with odd parity once the artificial start–end edge is
/// counted in. Equivalent to the symmetric difference of the MST's
/// odd-degree set with `{start, end}`.
fn parity_adjusted_odd_set(
    n: usize,
    mst: &[(usize, usize)],
    start_idx: usize,
    end_idx: usize,
) -> Vec<usize> {
    let mut degree = vec![0usize; n];
    for &(u, v) in mst {
        degree[u] += 1;
        degree[v] += 1;
    }
    degree[start_idx] += 1;
    degree[end_idx] += 1;
    (0..n).filter(|&v| degree[v] % 2 == 1).collect()
}

/// Minimum-weight perfect matching on the induced subgraph over `odd`.
///
/// Exact bitmask DP up to [`EXACT_MATCHING_LIMIT`] vertices; greedy
/// nearest-unmatched pairing above, trading the optimal matching for
/// tractability on large odd sets.
fn min_weight_matching(odd: &[usize], matrix: &CostMatrix) -> Vec<(usize, usize)> {
    debug_assert!(odd.len() % 2 == 0, "odd-degree set has even cardinality");
    if odd.len() <= EXACT_MATCHING_LIMIT {
        exact_matching(odd, matrix)
    } else {
        greedy_matching(odd, matrix)
    }
}

fn exact_matching(odd: &[usize], matrix: &CostMatrix) -> Vec<(usize, usize)> {
    let k = odd.len();
    if k == 0 {
        return Vec::new();
    }
    let full = (1usize << k) - 1;
    let mut best = vec![f64::INFINITY; full + 1];
    let mut choice: Vec<Option<(usize, usize)>> = vec![None; full + 1];
    best[0] = 0.0;

    for mask in 1..=full {
        // Always pair the lowest unmatched vertex; every perfect matching
        // pairs it with someone, so this loses no solutions.
        let first = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << first);
        let mut others = rest;
        while others != 0 {
            let j = others.trailing_zeros() as usize;
            others &= others - 1;
            let prev = rest & !(1 << j);
            let weight = best[prev] + matrix.distance_m(odd[first], odd[j]);
            // Strict improvement only: ties keep the lowest partner index.
            if weight < best[mask] {
                best[mask] = weight;
                choice[mask] = Some((first, j));
            }
        }
    }

    let mut pairs = Vec::with_capacity(k / 2);
    let mut mask = full;
    while mask != 0 {
        let (a, b) =
            choice[mask].expect("algorithm invariant broken: matching DP left a mask unpaired");
        pairs.push((odd[a], odd[b]));
        mask &= !(1 << a);
        mask &= !(1 << b);
    }
    pairs
}

fn greedy_matching(odd: &[usize], matrix: &CostMatrix) -> Vec<(usize, usize)> {
    let mut unmatched = odd.to_vec();
    let mut pairs = Vec::with_capacity(odd.len() / 2);
    while unmatched.len() >= 2 {
        let u = unmatched.remove(0);
        let mut nearest = 0;
        for i in 1..unmatched.len() {
            if matrix.distance_m(u, unmatched[i]) < matrix.distance_m(u, unmatched[nearest]) {
                nearest = i;
            }
        }
        pairs.push((u, unmatched.remove(nearest)));
    }
    pairs
}

/// Undirected multigraph over arena indices. Edges carry ids so parallel
/// edges stay distinct during the Eulerian walk.
struct Multigraph {
    adj: Vec<Vec<(usize, usize)>>,
    edges: usize,
}

impl Multigraph {
    fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            edges: 0,
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) -> usize {
        let id = self.edges;
        self.edges += 1;
        self.adj[u].push((v, id));
        self.adj[v].push((u, id));
        id
    }

    /// Iterative Hierholzer walk from `from`, marking edges used as it
    /// traverses them. Returns the closed walk as `(vertex, edge id taken
    /// into it)` pairs; the first entry carries a sentinel edge id.
    fn eulerian_circuit(self, from: usize) -> Vec<(usize, usize)> {
        let mut used = vec![false; self.edges];
        let mut cursor = vec![0usize; self.adj.len()];
        let mut stack = vec![(from, usize::MAX)];
        let mut circuit = Vec::with_capacity(self.edges + 1);

        while let Some(&(v, _)) = stack.last() {
            let mut advanced = false;
            while cursor[v] < self.adj[v].len() {
                let (to, id) = self.adj[v][cursor[v]];
                cursor[v] += 1;
                if !used[id] {
                    used[id] = true;
                    stack.push((to, id));
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                let entry = stack.pop().expect("stack holds the vertex just peeked");
                circuit.push(entry);
            }
        }

        let closed = circuit.first().map(|e| e.0) == circuit.last().map(|e| e.0);
        if circuit.len() != self.edges + 1 || !closed {
            panic!(
                "algorithm invariant broken: multigraph is not Eulerian \
                 ({} of {} edges walked, closed: {closed})",
                circuit.len().saturating_sub(1),
                self.edges
            );
        }
        circuit.reverse();
        circuit
    }
}

/// Cuts the closed walk at the artificial start–end edge, yielding an
/// open walk between the two endpoints, oriented start-first.
fn cut_at_edge(circuit: &[(usize, usize)], artificial: usize, start_idx: usize) -> Vec<usize> {
    let pos = circuit
        .iter()
        .position(|&(_, id)| id == artificial)
        .unwrap_or_else(|| {
            panic!(
                "algorithm invariant broken: Eulerian circuit never used the \
                 artificial start-end edge"
            )
        });

    // circuit[pos] was entered through the artificial edge; the open walk
    // runs from there around the cycle back to the edge's other endpoint.
    let mut walk = Vec::with_capacity(circuit.len() - 1);
    walk.extend(circuit[pos..].iter().map(|&(v, _)| v));
    walk.extend(circuit[1..pos].iter().map(|&(v, _)| v));
    if walk.first() != Some(&start_idx) {
        walk.reverse();
    }
    walk
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = v;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}
