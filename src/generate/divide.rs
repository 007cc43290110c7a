//! Linear-time divide-and-conquer knight's tours.
//!
//! Boards with both sides at least 12 are split into four quadrants with even sides, each
//! quadrant is toured recursively, and the four tours are spliced into one by swapping four
//! moves around the centre point. Smaller rectangles are covered by a base tile.

use log::debug;
use rand::rngs::StdRng;

use super::tiles::{base_tile, has_tile};
use super::{check_coverable, finish_tourney, CycleKind, Generator, GeneratorKind};
use crate::board::{Board, Cell};
use crate::config::JoinLimits;
use crate::core::rect::Rect;
use crate::error::{Result, TourneyError};

const NAME: &str = "divide-and-conquer";

/// Smallest side length that is split rather than tiled.
const SPLIT_AT: usize = 12;

pub struct DivideAndConquer {
    rng: StdRng,
    join: JoinLimits,
}

/// Split point of `left..right` keeping both halves even.
#[inline]
pub fn split(left: usize, right: usize) -> usize {
    (left + right) / 2 - usize::from((right - left) % 4 == 2)
}

/// True if the recursion over a `width x height` rectangle bottoms out in base tiles everywhere.
pub fn supports(width: usize, height: usize) -> bool {
    if width < SPLIT_AT || height < SPLIT_AT {
        return has_tile(width, height);
    }
    let mx = split(0, width);
    let my = split(0, height);
    [mx, width - mx]
        .into_iter()
        .all(|w| [my, height - my].into_iter().all(|h| supports(w, h)))
}

impl DivideAndConquer {
    pub fn new(rng: StdRng, join: JoinLimits) -> Self {
        Self { rng, join }
    }

    fn fill(&self, board: &mut Board, rect: Rect, join: bool) -> Result<()> {
        if rect.width() < SPLIT_AT || rect.height() < SPLIT_AT {
            let tile = base_tile(rect.width(), rect.height()).ok_or(TourneyError::UnsupportedDimensions {
                generator: NAME,
                width: rect.width(),
                height: rect.height(),
                reason: "no base tile of this size",
            })?;
            board.copy_to_sub_board(&tile, rect.left, rect.top)?;
            return Ok(());
        }

        let mx = split(rect.left, rect.right);
        let my = split(rect.top, rect.bottom);
        for quadrant in rect.quadrants(mx, my) {
            self.fill(board, quadrant, join)?;
        }
        if join {
            splice(board, mx, my)?;
        }
        Ok(())
    }
}

/// Merge the four quadrant tours meeting at column `mx`, row `my` into one.
///
/// Deletes one move near the centre from each quadrant and reconnects the eight loose ends
/// crosswise.
fn splice(board: &mut Board, mx: usize, my: usize) -> Result<()> {
    let w = board.width();
    let at = |x: usize, y: usize| -> Cell { y * w + x };

    let a = (at(mx - 3, my - 1), at(mx - 1, my - 2));
    let b = (at(mx, my - 1), at(mx + 1, my - 3));
    let c = (at(mx, my + 1), at(mx + 2, my));
    let d = (at(mx - 2, my + 2), at(mx - 1, my));

    let failed = |src: Cell, dest: Cell, reason: &'static str| TourneyError::Splice {
        x: mx,
        y: my,
        src,
        dest,
        reason,
    };
    for (src, dest) in [a, b, c, d] {
        if !board.delete_move(src, dest)? {
            return Err(failed(src, dest, "is missing from its quadrant"));
        }
    }
    for (src, dest) in [(a.1, b.1), (b.0, c.1), (c.0, d.0), (d.1, a.0)] {
        if !board.insert_directed_move(src, dest)? {
            return Err(failed(src, dest, "found no free slot"));
        }
    }
    Ok(())
}

impl Generator for DivideAndConquer {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::DivideAndConquer
    }

    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()> {
        check_coverable(NAME, board)?;
        if !supports(board.width(), board.height()) {
            return Err(TourneyError::UnsupportedDimensions {
                generator: NAME,
                width: board.width(),
                height: board.height(),
                reason: "sides do not split down to the base tile sizes",
            });
        }

        board.clear();
        board.make_directed();
        let rect = Rect::board(board.width(), board.height());
        self.fill(board, rect, kind == CycleKind::Tour)?;
        board.make_undirected()?;
        debug!("{NAME}: {}x{} {kind} built", board.width(), board.height());

        if kind == CycleKind::Tour {
            return Ok(());
        }
        finish_tourney(NAME, board, kind, &mut self.rng, &self.join)
    }
}
