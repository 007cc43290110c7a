//! Index-arena multigraph used to pick which rails merge which cycles.
//!
//! Vertices and edges live in two owned vectors; adjacency lists hold [`EdgeId`]s, so the graph
//! is plain data and can be moved between threads freely.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub v0: VertexId,
    pub v1: VertexId,
}

impl Edge {
    /// The endpoint that is not `v`.
    #[inline]
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.v0 == v {
            self.v1
        } else {
            self.v0
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Vertex {
    pub edges: Vec<EdgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Multigraph {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

/// Result of [`Multigraph::random_bfs_spanning_forest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanningForest {
    /// Tree edges, in discovery order.
    pub edges: Vec<EdgeId>,
    /// One per BFS root, i.e. the number of connected components.
    pub trees: usize,
}

impl Multigraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertices: vec![Vertex::default(); vertex_count],
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.vertices[v].edges.len()
    }

    /// Add an edge between `i` and `j` and return its id.
    ///
    /// Self-loops and out-of-range endpoints are ignored (`None`). Parallel edges are kept.
    pub fn insert_edge(&mut self, i: VertexId, j: VertexId) -> Option<EdgeId> {
        let n = self.vertices.len();
        if i == j || i >= n || j >= n {
            return None;
        }
        let id = self.edges.len();
        self.edges.push(Edge { v0: i, v1: j });
        self.vertices[i].edges.push(id);
        self.vertices[j].edges.push(id);
        Some(id)
    }

    #[inline]
    pub fn other_endpoint(&self, e: EdgeId, v: VertexId) -> VertexId {
        self.edges[e].other(v)
    }

    /// Multi-source BFS spanning forest with randomised tie-breaking.
    ///
    /// Each adjacency list is shuffled in place before it is scanned, so which of several
    /// parallel edges becomes the tree edge is uniform.
    pub fn random_bfs_spanning_forest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpanningForest {
        let n = self.vertices.len();
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        let mut forest = SpanningForest {
            edges: Vec::with_capacity(n.saturating_sub(1)),
            trees: 0,
        };

        for root in 0..n {
            if visited[root] {
                continue;
            }
            forest.trees += 1;
            visited[root] = true;
            queue.push_back(root);

            while let Some(v) = queue.pop_front() {
                self.vertices[v].edges.shuffle(rng);
                for &e in &self.vertices[v].edges {
                    let w = self.edges[e].other(v);
                    if !visited[w] {
                        visited[w] = true;
                        forest.edges.push(e);
                        queue.push_back(w);
                    }
                }
            }
        }
        forest
    }
}
