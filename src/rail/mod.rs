//! Rails: pairs of parallel knight's moves that can be switched to their crosswise partners.
//!
//! Flipping a rail deletes the edges `s0-d0` and `s1-d1` and inserts `s0-s1` and `d0-d1`.
//! Every cell keeps degree 2, so a tourney stays a tourney; only its cycle structure changes.
//! All rail operations work on directed boards.

mod join;

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::core::coord::{DOWNWARD, KNIGHT_STEPS};
use crate::error::{Mode, Result};

/// Two present edges `src0-dest0` and `src1-dest1` whose cross pairs are absent knight's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rail {
    pub src0: Cell,
    pub dest0: Cell,
    pub src1: Cell,
    pub dest1: Cell,
}

impl Rail {
    #[inline]
    pub const fn new(src0: Cell, dest0: Cell, src1: Cell, dest1: Cell) -> Self {
        Self {
            src0,
            dest0,
            src1,
            dest1,
        }
    }

    #[inline]
    pub fn edge0(&self) -> (Cell, Cell) {
        (self.src0, self.dest0)
    }

    #[inline]
    pub fn edge1(&self) -> (Cell, Cell) {
        (self.src1, self.dest1)
    }

    /// The rail that is live after this one has been flipped. Flipping it undoes the flip.
    #[inline]
    pub fn flipped(&self) -> Rail {
        Rail::new(self.src0, self.src1, self.dest0, self.dest1)
    }

    #[inline]
    pub fn cells(&self) -> [Cell; 4] {
        [self.src0, self.dest0, self.src1, self.dest1]
    }
}

impl Board {
    /// True if `rail` can be flipped on this board right now.
    pub fn is_rail(&self, rail: &Rail) -> bool {
        let Rail {
            src0,
            dest0,
            src1,
            dest1,
        } = *rail;
        self.is_knight_move(src0, dest0)
            && self.is_knight_move(src1, dest1)
            && self.is_knight_move(src0, src1)
            && self.is_knight_move(dest0, dest1)
            && self.is_move(src0, dest0)
            && self.is_move(src1, dest1)
            && !self.is_move(src0, src1)
            && !self.is_move(dest0, dest1)
    }

    /// Every rail on the board, exactly once, in random order.
    ///
    /// Only edges leaving `src0` in a downward direction are scanned, and the second source is
    /// probed along the other downward directions. Each rail has exactly one such orientation.
    pub fn find_rails<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Rail>> {
        self.require("find_rails", Mode::Directed)?;

        let mut rails = Vec::new();
        for src0 in 0..self.size() {
            for dest0 in self.neighbours(src0).into_iter().flatten() {
                let Some(i) = self.move_index(src0, dest0) else {
                    continue;
                };
                if !DOWNWARD.contains(&i) {
                    continue;
                }
                for j in DOWNWARD.filter(|&j| j != i) {
                    let Some(src1) = self.dest(src0, KNIGHT_STEPS[j]) else {
                        continue;
                    };
                    for dest1 in self.neighbours(src1).into_iter().flatten() {
                        let rail = Rail::new(src0, dest0, src1, dest1);
                        if self.is_rail(&rail) {
                            rails.push(rail);
                        }
                    }
                }
            }
        }

        rails.shuffle(rng);
        Ok(rails)
    }

    /// Switch `rail` to its cross edges. The caller checks [`Board::is_rail`] first.
    pub fn flip_rail(&mut self, rail: &Rail) -> Result<()> {
        self.require("flip_rail", Mode::Directed)?;
        self.delete_move(rail.src0, rail.dest0)?;
        self.delete_move(rail.src1, rail.dest1)?;
        self.insert_directed_move(rail.src0, rail.src1)?;
        self.insert_directed_move(rail.dest0, rail.dest1)?;
        Ok(())
    }

    /// Flip every rail that is still live when its turn comes. Returns the number flipped.
    pub fn shatter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let rails = self.find_rails(rng)?;
        let mut flipped = 0;
        for rail in &rails {
            if self.is_rail(rail) {
                self.flip_rail(rail)?;
                flipped += 1;
            }
        }
        trace!("shatter: flipped {flipped} of {} rails", rails.len());
        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;
    use crate::error::TourneyError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// On 6x6: 0=(0,0), 13=(1,2), 8=(2,1), 21=(3,3).
    fn one_rail_board() -> (Board, Rail) {
        let mut b = Board::square(6);
        b.make_directed();
        b.insert_directed_move(0, 13).unwrap();
        b.insert_directed_move(8, 21).unwrap();
        (b, Rail::new(0, 13, 8, 21))
    }

    #[test]
    fn finds_the_single_rail() {
        let (b, rail) = one_rail_board();
        assert!(b.is_rail(&rail));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(b.find_rails(&mut rng).unwrap(), vec![rail]);
    }

    #[test]
    fn flipping_twice_restores_edges() {
        let (mut b, rail) = one_rail_board();
        let before = b.edge_set();
        b.flip_rail(&rail).unwrap();
        assert!(b.is_move(0, 8) && b.is_move(13, 21));
        assert!(!b.is_rail(&rail));
        assert!(b.is_rail(&rail.flipped()));
        b.flip_rail(&rail.flipped()).unwrap();
        assert_eq!(b.edge_set(), before);
    }

    #[test]
    fn rails_need_a_directed_board() {
        let b = Board::square(6);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            b.find_rails(&mut rng),
            Err(TourneyError::InvalidMode { op: "find_rails", .. })
        ));
    }

    #[test]
    fn every_orientation_class_is_found_and_flips_back() {
        let mut classes = 0;
        for i in DOWNWARD {
            for j in DOWNWARD.filter(|&j| j != i) {
                let mut b = Board::square(12);
                b.make_directed();
                let src0 = b.cell_at(Coord::new(5, 3)).unwrap();
                let dest0 = b.dest(src0, KNIGHT_STEPS[i]).unwrap();
                let src1 = b.dest(src0, KNIGHT_STEPS[j]).unwrap();
                let dest1 = b.dest(src1, KNIGHT_STEPS[i]).unwrap();
                b.insert_directed_move(src0, dest0).unwrap();
                b.insert_directed_move(src1, dest1).unwrap();
                let rail = Rail::new(src0, dest0, src1, dest1);

                let mut rng = StdRng::seed_from_u64(i as u64 * 8 + j as u64);
                assert_eq!(b.find_rails(&mut rng).unwrap(), vec![rail], "steps {i},{j}");

                let before = b.edge_set();
                b.flip_rail(&rail).unwrap();
                assert_ne!(b.edge_set(), before);
                assert!(b.is_rail(&rail.flipped()), "steps {i},{j}");
                b.flip_rail(&rail.flipped()).unwrap();
                assert_eq!(b.edge_set(), before, "steps {i},{j}");
                classes += 1;
            }
        }
        assert_eq!(classes, 12);
    }
}
