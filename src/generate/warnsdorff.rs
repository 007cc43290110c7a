//! Randomised Warnsdorff walks.
//!
//! A walk always moves to an unvisited cell with the fewest onward moves, breaking ties at
//! random. Tours come from one walk over the whole board that happens to end a knight's move
//! from where it started; tourneys from short closed walks laid one after another.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use super::{check_coverable, CycleKind, Generator, GeneratorKind};
use crate::board::{Board, Cell};
use crate::config::{Config, JoinLimits};
use crate::error::{Result, TourneyError};

const NAME: &str = "warnsdorff";

/// Shortest cycle a tourney walk may close.
const MIN_CYCLE: usize = 6;

pub struct Warnsdorff {
    rng: StdRng,
    join: JoinLimits,
    max_attempts: u64,
    cancel: Arc<AtomicBool>,
}

impl Warnsdorff {
    pub fn new(rng: StdRng, config: &Config, cancel: Arc<AtomicBool>) -> Self {
        Self {
            rng,
            join: config.join,
            max_attempts: config.search.max_warnsdorff_attempts,
            cancel,
        }
    }

    #[inline]
    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Warnsdorff's rule from `cur`: a random unvisited neighbour of minimum onward degree.
    fn next_cell(&mut self, board: &Board, cur: Cell) -> Option<Cell> {
        let mut best = usize::MAX;
        let mut preferred: Vec<Cell> = Vec::with_capacity(8);
        for c in board.knight_neighbours(cur).filter(|&c| board.get(c).is_none()) {
            let exits = board.available_move_count(c);
            if exits < best {
                best = exits;
                preferred.clear();
            }
            if exits == best {
                preferred.push(c);
            }
        }
        preferred.choose(&mut self.rng).copied()
    }

    /// One attempt at a closed tour from a random start.
    fn tour_attempt(&mut self, board: &mut Board) -> Result<bool> {
        board.clear();
        let n = board.size();
        let start = self.rng.gen_range(0..n);
        // Neighbours of the start still unvisited. Once they run out the walk can never close.
        let mut exits: FxHashSet<Cell> = board.knight_neighbours(start).collect();

        let mut cur = start;
        let mut visited = 1;
        while let Some(next) = self.next_cell(board, cur) {
            board.insert_undirected_move(cur, next)?;
            cur = next;
            visited += 1;
            exits.remove(&cur);
            if exits.is_empty() || self.cancelled() {
                break;
            }
        }

        if visited == n && board.is_knight_move(cur, start) && !self.cancelled() {
            board.insert_undirected_move(cur, start)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Walk from `start` until a cycle of at least [`MIN_CYCLE`] cells can close, or the step
    /// budget runs out. Returns the last cell reached.
    fn closed_walk(&mut self, board: &mut Board, start: Cell) -> Result<(Cell, usize)> {
        let budget = 4 * board.width();
        let mut cur = start;
        let mut visited = 1;
        for _ in 0..budget {
            if visited >= MIN_CYCLE && board.is_knight_move(cur, start) {
                break;
            }
            let Some(next) = self.next_cell(board, cur) else {
                break;
            };
            board.insert_undirected_move(cur, next)?;
            cur = next;
            visited += 1;
        }
        Ok((cur, visited))
    }

    /// One attempt at covering the board with closed walks. Failed walks are erased.
    fn tourney_attempt(&mut self, board: &mut Board) -> Result<bool> {
        board.clear();
        let n = board.size();
        let mut first = 0;
        for _ in 0..4 * board.width() {
            while first < n && board.get(first).is_some() {
                first += 1;
            }
            if first >= n || self.cancelled() {
                break;
            }

            let (last, len) = self.closed_walk(board, first)?;
            if len >= 4 && board.is_knight_move(first, last) {
                board.insert_undirected_move(last, first)?;
                continue;
            }

            let mut cur = first;
            while cur != last {
                let Some(next) = board.get(cur) else { break };
                board.delete_move(cur, next)?;
                cur = next;
            }
        }
        Ok((first..n).all(|c| board.get(c).is_some()))
    }

    fn run(&mut self, board: &mut Board, tour: bool) -> Result<()> {
        let mut attempts: u64 = 0;
        loop {
            if self.cancelled() {
                return Err(TourneyError::Cancelled {
                    generator: NAME,
                    attempts,
                });
            }
            if attempts >= self.max_attempts {
                return Err(TourneyError::AttemptsExhausted {
                    generator: NAME,
                    attempts,
                });
            }
            attempts += 1;
            let done = if tour {
                self.tour_attempt(board)?
            } else {
                self.tourney_attempt(board)?
            };
            if done {
                debug!("{NAME}: {}x{} after {attempts} attempts", board.width(), board.height());
                return Ok(());
            }
            trace!("{NAME}: attempt {attempts} failed");
        }
    }
}

impl Generator for Warnsdorff {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Warnsdorff
    }

    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()> {
        check_coverable(NAME, board)?;
        match kind {
            CycleKind::Tour => self.run(board, true),
            CycleKind::Tourney => self.run(board, false),
            CycleKind::TourFromTourney => {
                self.run(board, false)?;
                board.join_until_tour(&mut self.rng, &self.join).map(|_| ())
            }
        }
    }
}
