use log::{debug, warn};
use rand::Rng;

use super::Rail;
use crate::board::Board;
use crate::config::{JoinLimits, ObfuscateConfig};
use crate::error::{Mode, Result, TourneyError};
use crate::graph::Multigraph;

impl Board {
    /// One join pass. Returns the number of cycles left afterwards.
    ///
    /// Rails that bridge two different cycles are kept greedily while they stay cell-disjoint,
    /// each one becoming an edge between cycle ids. Flipping the rails of a random BFS spanning
    /// forest of that graph merges every connected group of cycles into one.
    pub fn join<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        self.require("join", Mode::Directed)?;

        let ids = self.tourney_ids();
        if ids.count <= 1 {
            return Ok(ids.count);
        }

        let rails = self.find_rails(rng)?;
        let mut claimed = vec![false; self.size()];
        let mut graph = Multigraph::new(ids.count);
        let mut bridges: Vec<Rail> = Vec::new();

        for rail in rails {
            if rail.cells().iter().any(|&c| claimed[c]) {
                continue;
            }
            let (a, b) = (ids.of(rail.src0), ids.of(rail.src1));
            if ids.of(rail.dest0) != a || ids.of(rail.dest1) != b || a == b {
                continue;
            }
            if graph.insert_edge(a, b).is_some() {
                for c in rail.cells() {
                    claimed[c] = true;
                }
                bridges.push(rail);
            }
        }

        let forest = graph.random_bfs_spanning_forest(rng);
        for &e in &forest.edges {
            self.flip_rail(&bridges[e])?;
        }
        debug!(
            "join: {} cycles, {} bridging rails, {} flipped, {} cycles left",
            ids.count,
            bridges.len(),
            forest.edges.len(),
            forest.trees
        );
        Ok(forest.trees)
    }

    /// Join passes until a single cycle remains. Returns the number of passes used.
    ///
    /// The board must be a tourney. It is made directed for the duration and handed back in
    /// the mode it arrived in, whether or not the join converged.
    pub fn join_until_tour<R: Rng + ?Sized>(&mut self, rng: &mut R, limits: &JoinLimits) -> Result<usize> {
        if !self.is_tourney() {
            return Err(TourneyError::NotATourney);
        }
        let was_undirected = self.is_undirected();
        self.make_directed();

        let mut cycles = self.tourney_ids().count;
        let mut passes = 0;
        while cycles > 1 && passes < limits.max_passes {
            let before = cycles;
            cycles = self.join(rng)?;
            passes += 1;
            if cycles == before {
                // No bridging rail was flipped, so the next pass would see the same board.
                debug!("join_until_tour: stalled at {cycles} cycles after {passes} passes");
                break;
            }
        }

        if was_undirected {
            self.make_undirected()?;
        }
        if cycles > 1 {
            warn!("join_until_tour: {cycles} cycles remain after {passes} passes");
            return Err(TourneyError::NotConverged { passes, cycles });
        }
        Ok(passes)
    }

    /// Shatter the tourney repeatedly, then join it back into a tour.
    ///
    /// A join that stalls is retried from a fresh shatter, up to `max_rounds` rounds. The board
    /// is always returned undirected. With no rounds at all, a board of several cycles is
    /// reported as [`TourneyError::NotConverged`] with zero passes.
    pub fn obfuscate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ObfuscateConfig) -> Result<()> {
        if !self.is_tourney() {
            return Err(TourneyError::NotATourney);
        }
        self.make_directed();

        let cycles = self.tourney_ids().count;
        let mut outcome = if cycles > 1 {
            Err(TourneyError::NotConverged { passes: 0, cycles })
        } else {
            Ok(())
        };
        for round in 0..config.max_rounds {
            for _ in 0..config.shatter_passes {
                self.shatter(rng)?;
            }
            match self.join_until_tour(rng, &config.join) {
                Ok(passes) => {
                    debug!("obfuscate: joined in {passes} passes on round {}", round + 1);
                    outcome = Ok(());
                    break;
                }
                Err(e @ TourneyError::NotConverged { .. }) => {
                    warn!("obfuscate: round {} failed ({e}), shattering again", round + 1);
                    outcome = Err(e);
                }
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.make_undirected()?;
        outcome
    }
}
