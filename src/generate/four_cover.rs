use log::debug;
use rand::rngs::StdRng;

use super::{finish_tourney, CycleKind, Generator, GeneratorKind};
use crate::board::{Board, Cell};
use crate::config::JoinLimits;
use crate::error::{Result, TourneyError};

const NAME: &str = "four-cover";

/// Covers the board with four knight's-move 4-cycles per 4x4 block.
pub struct FourCover {
    rng: StdRng,
    join: JoinLimits,
}

impl FourCover {
    pub fn new(rng: StdRng, join: JoinLimits) -> Self {
        Self { rng, join }
    }

    pub fn supports(width: usize, height: usize) -> bool {
        width > 0 && height > 0 && width % 4 == 0 && height % 4 == 0
    }

    /// The four cycles of the block whose top-left cell is `base`, as `(col, row)` offsets.
    const BLOCK: [[(usize, usize); 4]; 4] = [
        [(0, 0), (2, 1), (3, 3), (1, 2)],
        [(1, 0), (3, 1), (2, 3), (0, 2)],
        [(2, 0), (3, 2), (1, 3), (0, 1)],
        [(3, 0), (2, 2), (0, 3), (1, 1)],
    ];

    fn cover(board: &mut Board) -> Result<()> {
        let w = board.width();
        for top in (0..board.height()).step_by(4) {
            for left in (0..w).step_by(4) {
                for cycle in Self::BLOCK {
                    let cells: Vec<Cell> = cycle.iter().map(|&(x, y)| (top + y) * w + left + x).collect();
                    for k in 0..4 {
                        board.insert_undirected_move(cells[k], cells[(k + 1) % 4])?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Generator for FourCover {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::FourCover
    }

    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()> {
        if !Self::supports(board.width(), board.height()) {
            return Err(TourneyError::UnsupportedDimensions {
                generator: NAME,
                width: board.width(),
                height: board.height(),
                reason: "width and height must be multiples of 4",
            });
        }
        if kind == CycleKind::Tour {
            return Err(TourneyError::UnsupportedCycleKind { generator: NAME });
        }

        board.clear();
        Self::cover(board)?;
        debug!("{NAME}: {}x{} covered", board.width(), board.height());
        finish_tourney(NAME, board, kind, &mut self.rng, &self.join)
    }
}
