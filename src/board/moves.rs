use log::trace;

use super::{Board, Cell, MoveTable};
use crate::error::{Mode, Result, TourneyError};

impl Board {
    /// Insert the edge `{src, dest}` into an undirected board.
    ///
    /// The edge goes into `src`'s slot if it is free, else into `dest`'s. Returns `Ok(false)`
    /// with no mutation when both slots are taken.
    pub fn insert_undirected_move(&mut self, src: Cell, dest: Cell) -> Result<bool> {
        self.require("insert_undirected_move", Mode::Undirected)?;
        self.check_cell(src)?;
        self.check_cell(dest)?;

        let MoveTable::Undirected { moves } = &mut self.table else {
            unreachable!("mode checked above");
        };
        if moves[src].is_none() {
            moves[src] = Some(dest);
        } else if moves[dest].is_none() {
            moves[dest] = Some(src);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Insert the edge `{src, dest}` into a directed board, recording it from both endpoints.
    ///
    /// Both endpoints need a free slot; otherwise nothing changes and `Ok(false)` is returned.
    pub fn insert_directed_move(&mut self, src: Cell, dest: Cell) -> Result<bool> {
        self.require("insert_directed_move", Mode::Directed)?;
        self.check_cell(src)?;
        self.check_cell(dest)?;
        if src == dest {
            return Ok(false);
        }

        let MoveTable::Directed { out1, out2 } = &mut self.table else {
            unreachable!("mode checked above");
        };
        let free = |out1: &[Option<Cell>], out2: &[Option<Cell>], c: Cell| {
            out1[c].is_none() || out2[c].is_none()
        };
        if !free(out1, out2, src) || !free(out1, out2, dest) {
            return Ok(false);
        }

        for (from, to) in [(src, dest), (dest, src)] {
            if out1[from].is_none() {
                out1[from] = Some(to);
            } else {
                out2[from] = Some(to);
            }
        }
        Ok(true)
    }

    /// Insert with whichever rule matches the board's current mode.
    pub fn insert_move(&mut self, src: Cell, dest: Cell) -> Result<bool> {
        if self.is_directed() {
            self.insert_directed_move(src, dest)
        } else {
            self.insert_undirected_move(src, dest)
        }
    }

    /// Delete the edge `{src, dest}` from every slot that records it.
    ///
    /// Returns `Ok(false)` without touching the board when the edge is absent.
    pub fn delete_move(&mut self, src: Cell, dest: Cell) -> Result<bool> {
        self.check_cell(src)?;
        self.check_cell(dest)?;
        if !self.is_move(src, dest) {
            return Ok(false);
        }

        let clear = |slots: &mut [Option<Cell>]| {
            if slots[src] == Some(dest) {
                slots[src] = None;
            }
            if slots[dest] == Some(src) {
                slots[dest] = None;
            }
        };
        match &mut self.table {
            MoveTable::Undirected { moves } => clear(moves),
            MoveTable::Directed { out1, out2 } => {
                clear(out1);
                clear(out2);
            }
        }
        Ok(true)
    }

    /// Every edge once, as `(a, b)` pairs in storage order.
    ///
    /// Directed boards list each edge from its lower-numbered endpoint.
    pub fn edges(&self) -> Vec<(Cell, Cell)> {
        let mut out = Vec::with_capacity(self.size());
        match &self.table {
            MoveTable::Undirected { moves } => {
                for (i, m) in moves.iter().enumerate() {
                    if let Some(j) = *m {
                        // A two-cycle stores the same edge from both ends.
                        if !(moves[j] == Some(i) && j < i) {
                            out.push((i, j));
                        }
                    }
                }
            }
            MoveTable::Directed { out1, out2 } => {
                for i in 0..self.size() {
                    for j in [out1[i], out2[i]].into_iter().flatten() {
                        if i < j {
                            out.push((i, j));
                        }
                    }
                }
            }
        }
        out
    }

    /// Stamp every edge of `source` into the sub-rectangle anchored at column `x0`, row `y0`.
    ///
    /// Edges are inserted with the rule matching this board's mode. Returns the number of
    /// edges that found free slots.
    pub fn copy_to_sub_board(&mut self, source: &Board, x0: usize, y0: usize) -> Result<usize> {
        if x0 + source.width > self.width || y0 + source.height > self.height {
            return Err(TourneyError::SubBoardOutOfBounds {
                sub_width: source.width,
                sub_height: source.height,
                x: x0,
                y: y0,
                width: self.width,
                height: self.height,
            });
        }

        let (w, sw) = (self.width, source.width);
        let map = |c: Cell| (c / sw + y0) * w + c % sw + x0;
        let edges = source.edges();
        let mut placed = 0;
        for (a, b) in edges.iter().copied() {
            if self.insert_move(map(a), map(b))? {
                placed += 1;
            }
        }
        if placed < edges.len() {
            trace!(
                "copy_to_sub_board: {} of {} edges collided at ({x0},{y0})",
                edges.len() - placed,
                edges.len()
            );
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_insert_fills_src_then_dest() {
        let mut b = Board::square(6);
        assert!(b.insert_undirected_move(0, 13).unwrap());
        assert_eq!(b.get(0), Some(13));
        assert!(b.insert_undirected_move(0, 8).unwrap());
        assert_eq!(b.get(8), Some(0));
        // Both slots taken.
        assert!(!b.insert_undirected_move(0, 8).unwrap());
    }

    #[test]
    fn directed_insert_is_atomic() {
        let mut b = Board::square(6);
        b.make_directed();
        assert!(b.insert_directed_move(0, 13).unwrap());
        assert!(b.insert_directed_move(0, 8).unwrap());
        // 0 is full, so 13 must not gain a half edge.
        let before = b.clone();
        assert!(!b.insert_directed_move(13, 0).unwrap());
        assert!(!b.insert_directed_move(0, 15).unwrap());
        assert_eq!(b, before);
    }

    #[test]
    fn mode_mismatch_is_an_error() {
        let mut b = Board::square(6);
        assert!(matches!(
            b.insert_directed_move(0, 13),
            Err(TourneyError::InvalidMode {
                required: Mode::Directed,
                ..
            })
        ));
        b.make_directed();
        assert!(matches!(
            b.insert_undirected_move(0, 13),
            Err(TourneyError::InvalidMode { .. })
        ));
    }

    #[test]
    fn delete_missing_move_is_a_no_op() {
        let mut b = Board::square(6);
        b.insert_undirected_move(0, 13).unwrap();
        let before = b.clone();
        assert!(!b.delete_move(0, 8).unwrap());
        assert_eq!(b, before);

        b.make_directed();
        assert!(!b.delete_move(0, 8).unwrap());
        assert!(b.delete_move(13, 0).unwrap());
        assert!(!b.is_move(0, 13));
        assert_eq!(b.neighbours(0), [None, None]);
        assert_eq!(b.neighbours(13), [None, None]);
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut b = Board::square(6);
        assert!(matches!(
            b.insert_undirected_move(0, 36),
            Err(TourneyError::CellOutOfRange { cell: 36, size: 36 })
        ));
    }

    #[test]
    fn sub_board_must_fit() {
        let mut big = Board::square(8);
        let small = Board::square(6);
        assert!(big.copy_to_sub_board(&small, 2, 2).is_ok());
        assert!(matches!(
            big.copy_to_sub_board(&small, 3, 0),
            Err(TourneyError::SubBoardOutOfBounds { .. })
        ));
    }
}
