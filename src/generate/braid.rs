//! Concentric braids: rings of interleaved cycles around a small hard-coded centre.

use log::debug;
use rand::rngs::StdRng;

use super::{finish_tourney, CycleKind, Generator, GeneratorKind};
use crate::board::{Board, Cell};
use crate::config::JoinLimits;
use crate::error::{Result, TourneyError};

const NAME: &str = "concentric-braid";

/// Four 4-cycles.
#[rustfmt::skip]
pub const CENTRE_4X4: [i32; 16] = [
    6, 7, 4, 5,
    13, 12, 15, 14,
    1, 0, 3, 2,
    10, 11, 8, 9,
];

/// Three cycles.
#[rustfmt::skip]
pub const CENTRE_6X6: [i32; 36] = [
    8, 12, 6, 7, 17, 9,
    19, 18, 4, 1, 2, 3,
    25, 0, 22, 11, 5, 28,
    31, 30, 16, 34, 35, 10,
    13, 33, 15, 14, 32, 21,
    26, 20, 24, 29, 23, 27,
];

pub struct ConcentricBraid {
    rng: StdRng,
    join: JoinLimits,
}

impl ConcentricBraid {
    pub fn new(rng: StdRng, join: JoinLimits) -> Self {
        Self { rng, join }
    }

    /// Square boards with an even side of at least 4.
    pub fn supports(width: usize, height: usize) -> bool {
        width == height && width >= 4 && width % 2 == 0
    }

    /// Lay the four braided strands of every ring, outermost first, then the centre.
    fn braid(board: &mut Board) -> Result<()> {
        let w = board.width();
        let at = |row: usize, col: usize| -> Cell { row * w + col };
        let rings = if w % 4 == 2 { w / 2 - 3 } else { w / 2 - 2 };

        for offset in (0..rings).step_by(2) {
            let (lo, hi) = (offset, w - offset - 1);
            for k in 0..4 {
                let (mut i, mut j) = (offset, offset + k);

                // Top edge, moving right.
                while j < hi - 1 {
                    let cur = at(i, j);
                    i = if i == lo { lo + 1 } else { lo };
                    j += 2;
                    board.insert_undirected_move(cur, at(i, j))?;
                }
                // Right edge, moving down.
                while i < hi - 1 {
                    let cur = at(i, j);
                    i += 2;
                    j = if j == hi { hi - 1 } else { hi };
                    board.insert_undirected_move(cur, at(i, j))?;
                }
                // Bottom edge, moving left.
                while j >= lo + 2 {
                    let cur = at(i, j);
                    i = if i == hi { hi - 1 } else { hi };
                    j -= 2;
                    board.insert_undirected_move(cur, at(i, j))?;
                }
                // Left edge, moving up.
                while i >= lo + 2 {
                    let cur = at(i, j);
                    i -= 2;
                    j = if j == lo { lo + 1 } else { lo };
                    board.insert_undirected_move(cur, at(i, j))?;
                }
                if i != lo {
                    board.insert_undirected_move(at(i, j), at(i - 1, j + 2))?;
                }
            }
        }

        let m = 4 + w % 4;
        let centre = if m == 4 {
            Board::from_moves(&CENTRE_4X4, 4, 4)?
        } else {
            Board::from_moves(&CENTRE_6X6, 6, 6)?
        };
        let offset = (w - m) / 2;
        board.copy_to_sub_board(&centre, offset, offset)?;
        Ok(())
    }
}

impl Generator for ConcentricBraid {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ConcentricBraid
    }

    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()> {
        if !Self::supports(board.width(), board.height()) {
            return Err(TourneyError::UnsupportedDimensions {
                generator: NAME,
                width: board.width(),
                height: board.height(),
                reason: "board must be square with an even side of at least 4",
            });
        }
        if kind == CycleKind::Tour {
            return Err(TourneyError::UnsupportedCycleKind { generator: NAME });
        }

        board.clear();
        Self::braid(board)?;
        debug!("{NAME}: {} cycles on {}x{}", board.tourney_ids().count, board.width(), board.height());
        finish_tourney(NAME, board, kind, &mut self.rng, &self.join)
    }
}
