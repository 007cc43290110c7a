use rustc_hash::FxHashSet;

use super::{Board, Cell, MoveTable};
use crate::error::{Result, TourneyError};

/// Cycle membership of every cell, as produced by [`Board::tourney_ids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourneyIds {
    /// `ids[cell]` is the id (`0..count`) of the cycle through `cell`.
    pub ids: Vec<usize>,
    pub count: usize,
}

impl TourneyIds {
    #[inline]
    pub fn of(&self, cell: Cell) -> usize {
        self.ids[cell]
    }
}

impl Board {
    /// Switch to the directed representation. No-op on a board that is already directed.
    pub fn make_directed(&mut self) {
        let MoveTable::Undirected { moves } = &self.table else {
            return;
        };
        let mut out2 = vec![None; moves.len()];
        for (i, m) in moves.iter().enumerate() {
            if let Some(j) = *m {
                out2[j] = Some(i);
            }
        }
        self.table = MoveTable::Directed {
            out1: moves.clone(),
            out2,
        };
    }

    /// Switch back to the undirected representation by walking every cycle once.
    ///
    /// Fails with [`TourneyError::NotATourney`] (board left directed and unchanged) unless the
    /// board is a tourney. No-op on an undirected board.
    pub fn make_undirected(&mut self) -> Result<()> {
        if self.is_undirected() {
            return Ok(());
        }
        if !self.is_tourney() {
            return Err(TourneyError::NotATourney);
        }

        let n = self.size();
        let mut moves: Vec<Option<Cell>> = vec![None; n];
        for start in 0..n {
            if moves[start].is_some() {
                continue;
            }
            let mut prev = start;
            let mut cur = self.get(start);
            while let Some(c) = cur {
                moves[prev] = Some(c);
                if c == start {
                    break;
                }
                cur = self.step(prev, c);
                prev = c;
            }
        }
        self.table = MoveTable::Undirected { moves };
        Ok(())
    }

    /// The cell after `cur` when arriving from `prev`.
    ///
    /// On a directed board this is whichever slot does not lead straight back.
    #[inline]
    pub(crate) fn step(&self, prev: Cell, cur: Cell) -> Option<Cell> {
        match &self.table {
            MoveTable::Undirected { moves } => moves[cur],
            MoveTable::Directed { out1, out2 } => {
                if out1[cur] == Some(prev) {
                    out2[cur]
                } else {
                    out1[cur]
                }
            }
        }
    }

    /// Every cell has degree exactly 2 and no edge is a self-loop.
    ///
    /// A degree count, not a connectivity check: a tour is a tourney with one cycle.
    pub fn is_tourney(&self) -> bool {
        let n = self.size();
        let mut degree = vec![0u8; n];
        match &self.table {
            MoveTable::Undirected { moves } => {
                for (i, m) in moves.iter().enumerate() {
                    let Some(j) = *m else { return false };
                    if i == j {
                        return false;
                    }
                    degree[i] = degree[i].saturating_add(1);
                    degree[j] = degree[j].saturating_add(1);
                }
            }
            MoveTable::Directed { out1, out2 } => {
                for i in 0..n {
                    for slot in [out1[i], out2[i]] {
                        let Some(j) = slot else { return false };
                        if i == j || (out1[j] != Some(i) && out2[j] != Some(i)) {
                            return false;
                        }
                        degree[j] = degree[j].saturating_add(1);
                    }
                }
            }
        }
        degree.iter().all(|&d| d == 2)
    }

    /// True if the board is a tourney whose cycle through cell 0 covers every cell.
    pub fn is_tour(&self) -> bool {
        if !self.is_tourney() {
            return false;
        }
        let n = self.size();
        let mut prev = 0;
        let mut cur = self.get(0);
        let mut visited = 1;
        while let Some(c) = cur {
            if c == 0 || visited > n {
                break;
            }
            cur = self.step(prev, c);
            prev = c;
            visited += 1;
        }
        visited == n && cur == Some(0)
    }

    /// Label every cell with the id of the cycle through it.
    ///
    /// Walks stop at an empty slot or at an already labelled cell, so partial boards still get
    /// one id per cell.
    pub fn tourney_ids(&self) -> TourneyIds {
        const UNSEEN: usize = usize::MAX;
        let n = self.size();
        let mut ids = vec![UNSEEN; n];
        let mut count = 0;
        for start in 0..n {
            if ids[start] != UNSEEN {
                continue;
            }
            ids[start] = count;
            let mut prev = start;
            let mut cur = self.get(start);
            while let Some(c) = cur {
                if ids[c] != UNSEEN {
                    break;
                }
                ids[c] = count;
                cur = self.step(prev, c);
                prev = c;
            }
            count += 1;
        }
        TourneyIds { ids, count }
    }

    /// The cells of the cycle through `start`, in walk order beginning at `start`.
    ///
    /// On a partial board the walk ends at the first empty slot.
    pub fn cycle_from(&self, start: Cell) -> Result<Vec<Cell>> {
        self.check_cell(start)?;
        let n = self.size();
        let mut cycle = vec![start];
        let mut prev = start;
        let mut cur = self.get(start);
        while let Some(c) = cur {
            if c == start || cycle.len() >= n {
                break;
            }
            cycle.push(c);
            cur = self.step(prev, c);
            prev = c;
        }
        Ok(cycle)
    }

    /// All edges as `(min, max)` pairs, for comparing boards independently of representation.
    pub fn edge_set(&self) -> FxHashSet<(Cell, Cell)> {
        self.edges()
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRAID_4X4: [i32; 16] = [6, 7, 4, 5, 13, 12, 15, 14, 1, 0, 3, 2, 10, 11, 8, 9];

    #[test]
    fn braid_centre_is_four_four_cycles() {
        let b = Board::from_moves(&BRAID_4X4, 4, 4).unwrap();
        assert!(b.is_tourney());
        assert!(!b.is_tour());
        assert_eq!(b.cycle_from(0).unwrap(), vec![0, 6, 15, 9]);
        let ids = b.tourney_ids();
        assert_eq!(ids.count, 4);
        assert_eq!(ids.of(0), ids.of(15));
        assert_ne!(ids.of(0), ids.of(1));
    }

    #[test]
    fn directed_round_trip_keeps_edges() {
        let mut b = Board::from_moves(&BRAID_4X4, 4, 4).unwrap();
        let before = b.edge_set();
        b.make_directed();
        b.make_directed();
        assert!(b.is_directed());
        assert!(b.is_tourney());
        assert_eq!(b.edge_set(), before);
        assert_eq!(b.tourney_ids().count, 4);

        b.make_undirected().unwrap();
        assert!(b.is_undirected());
        assert_eq!(b.edge_set(), before);
    }

    #[test]
    fn make_undirected_rejects_non_tourney() {
        let mut b = Board::square(4);
        b.make_directed();
        b.insert_directed_move(0, 6).unwrap();
        let before = b.clone();
        assert!(matches!(b.make_undirected(), Err(TourneyError::NotATourney)));
        assert_eq!(b, before);
    }

    #[test]
    fn partial_board_still_gets_ids() {
        let mut b = Board::square(4);
        b.insert_undirected_move(0, 6).unwrap();
        let ids = b.tourney_ids();
        assert_eq!(ids.ids.len(), 16);
        assert_eq!(ids.of(0), ids.of(6));
        assert_eq!(ids.count, 15);
        assert_eq!(b.cycle_from(0).unwrap(), vec![0, 6]);
    }
}
