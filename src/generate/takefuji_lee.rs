//! Takefuji-Lee neural network for knight's tourneys.
//!
//! One neuron per knight's move on the board. A neuron's state climbs while the cells at its
//! two ends have fewer than two active moves between them and falls while they have more; its
//! output switches on above 3 and off below 0. A stable network in which every cell has
//! exactly two active moves is a tourney.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{check_coverable, finish_tourney, CycleKind, Generator, GeneratorKind};
use crate::board::Board;
use crate::config::{Config, JoinLimits};
use crate::error::{Result, TourneyError};
use crate::graph::{EdgeId, Multigraph};

const NAME: &str = "takefuji-lee";

pub struct TakefujiLee {
    rng: StdRng,
    join: JoinLimits,
    max_restarts: u64,
    sweeps: usize,
    cancel: Arc<AtomicBool>,
}

/// Neuron states and outputs, indexed by edge id of the move graph.
struct Network {
    graph: Multigraph,
    order: Vec<EdgeId>,
    state: Vec<i32>,
    output: Vec<bool>,
}

impl Network {
    fn new(board: &Board) -> Self {
        let mut graph = Multigraph::new(board.size());
        for src in 0..board.size() {
            for dest in board.knight_neighbours(src).filter(|&d| src < d) {
                graph.insert_edge(src, dest);
            }
        }
        let m = graph.edge_count();
        Self {
            graph,
            order: (0..m).collect(),
            state: vec![0; m],
            output: vec![false; m],
        }
    }

    /// Random outputs, zero states, fresh update order.
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for o in &mut self.output {
            *o = rng.gen_bool(0.5);
        }
        self.state.fill(0);
        self.order.shuffle(rng);
    }

    #[inline]
    fn active_degree(&self, v: usize) -> i32 {
        self.graph.vertices[v].edges.iter().filter(|&&e| self.output[e]).count() as i32
    }

    /// One in-place sweep over all neurons. Returns true if no state changed.
    fn update(&mut self) -> bool {
        let mut stable = true;
        for i in 0..self.order.len() {
            let e = self.order[i];
            let edge = self.graph.edges[e];
            let next = self.state[e] + 4 - self.active_degree(edge.v0) - self.active_degree(edge.v1);
            if next != self.state[e] {
                stable = false;
                self.state[e] = next;
            }
            if next > 3 {
                self.output[e] = true;
            } else if next < 0 {
                self.output[e] = false;
            }
        }
        stable
    }

    fn has_degree_two(&self) -> bool {
        (0..self.graph.vertex_count()).all(|v| self.active_degree(v) == 2)
    }

    /// Write the active moves into `board` as an undirected tourney.
    fn write_to(&self, board: &mut Board) -> Result<()> {
        board.clear();
        board.make_directed();
        for (e, edge) in self.graph.edges.iter().enumerate() {
            if self.output[e] {
                board.insert_directed_move(edge.v0, edge.v1)?;
            }
        }
        board.make_undirected()
    }
}

impl TakefujiLee {
    pub fn new(rng: StdRng, config: &Config, cancel: Arc<AtomicBool>) -> Self {
        Self {
            rng,
            join: config.join,
            max_restarts: config.search.max_network_restarts,
            sweeps: config.search.network_sweeps,
            cancel,
        }
    }

    fn search(&mut self, board: &mut Board) -> Result<()> {
        let mut net = Network::new(board);
        let mut restarts: u64 = 0;
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(TourneyError::Cancelled {
                    generator: NAME,
                    attempts: restarts,
                });
            }
            if restarts >= self.max_restarts {
                return Err(TourneyError::AttemptsExhausted {
                    generator: NAME,
                    attempts: restarts,
                });
            }
            restarts += 1;

            net.reset(&mut self.rng);
            let mut sweeps = 0;
            while sweeps < self.sweeps {
                sweeps += 1;
                if net.update() {
                    break;
                }
            }
            if net.has_degree_two() {
                debug!("{NAME}: converged on restart {restarts} after {sweeps} sweeps");
                return net.write_to(board);
            }
            trace!("{NAME}: restart {restarts} did not settle");
        }
    }
}

impl Generator for TakefujiLee {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::TakefujiLee
    }

    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()> {
        check_coverable(NAME, board)?;
        if kind == CycleKind::Tour {
            return Err(TourneyError::UnsupportedCycleKind { generator: NAME });
        }
        self.search(board)?;
        finish_tourney(NAME, board, kind, &mut self.rng, &self.join)
    }
}
