//! The chessboard: a tourney stored as per-cell move tables.
//!
//! A board is either **undirected** or **directed**, modelled by [`MoveTable`]:
//!
//! - Undirected: one slot per cell. Every edge `{i, j}` is stored from exactly one endpoint
//!   (`moves[i] == Some(j)`), so a tourney reads as a successor function and each cycle is
//!   walked by following `moves`.
//! - Directed: two slots per cell, each listing one neighbour. Every edge appears from both
//!   endpoints. Walking a cycle means taking whichever slot does not lead straight back.
//!
//! Generators and the rail engine prefer the directed form because edge deletion and insertion
//! are local there. Boards are handed to callers undirected.

mod cycles;
mod moves;

pub use cycles::TourneyIds;

use std::fmt;

use crate::core::coord::{move_index, Coord, KNIGHT_STEPS};
use crate::error::{Mode, Result, TourneyError};

/// Index of a cell: `y * width + x`.
pub type Cell = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTable {
    Undirected {
        moves: Vec<Option<Cell>>,
    },
    Directed {
        out1: Vec<Option<Cell>>,
        out2: Vec<Option<Cell>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    table: MoveTable,
}

impl Board {
    /// An empty undirected `width x height` board.
    ///
    /// Any dimensions are accepted here; generators reject the ones they cannot cover.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            table: MoveTable::Undirected {
                moves: vec![None; width * height],
            },
        }
    }

    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// An undirected board from a literal successor table (`-1` marks an unused cell).
    ///
    /// Used for the hard-coded tiles.
    pub fn from_moves(table: &[i32], width: usize, height: usize) -> Result<Self> {
        let size = width * height;
        if table.len() != size {
            return Err(TourneyError::TableLength {
                expected: size,
                found: table.len(),
            });
        }

        let mut moves = Vec::with_capacity(size);
        for &m in table {
            if m < 0 {
                moves.push(None);
            } else if (m as usize) < size {
                moves.push(Some(m as Cell));
            } else {
                return Err(TourneyError::CellOutOfRange {
                    cell: m as Cell,
                    size,
                });
            }
        }

        Ok(Self {
            width,
            height,
            table: MoveTable::Undirected { moves },
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn table(&self) -> &MoveTable {
        &self.table
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        matches!(self.table, MoveTable::Directed { .. })
    }

    #[inline]
    pub fn is_undirected(&self) -> bool {
        !self.is_directed()
    }

    /// Remove every move. The board becomes undirected.
    pub fn clear(&mut self) {
        self.table = MoveTable::Undirected {
            moves: vec![None; self.size()],
        };
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.size()
    }

    pub(crate) fn check_cell(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(TourneyError::CellOutOfRange {
                cell,
                size: self.size(),
            })
        }
    }

    pub(crate) fn require(&self, op: &'static str, required: Mode) -> Result<()> {
        let ok = match required {
            Mode::Directed => self.is_directed(),
            Mode::Undirected => self.is_undirected(),
        };
        if ok {
            Ok(())
        } else {
            Err(TourneyError::InvalidMode { op, required })
        }
    }

    #[inline]
    pub fn coord_of(&self, cell: Cell) -> Coord {
        Coord::new((cell % self.width) as i32, (cell / self.width) as i32)
    }

    #[inline]
    pub fn cell_at(&self, c: Coord) -> Option<Cell> {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            None
        } else {
            Some(c.y as usize * self.width + c.x as usize)
        }
    }

    /// Destination of `delta` from `cell`, if it stays on the board.
    #[inline]
    pub fn dest(&self, cell: Cell, delta: Coord) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }
        self.cell_at(self.coord_of(cell) + delta)
    }

    #[inline]
    pub fn is_on_board(&self, cell: Cell, delta: Coord) -> bool {
        self.dest(cell, delta).is_some()
    }

    pub fn is_knight_move(&self, i: Cell, j: Cell) -> bool {
        self.contains(i) && self.contains(j) && (self.coord_of(j) - self.coord_of(i)).is_knight_step()
    }

    /// Canonical direction id (0..8) of the move `src -> dest`; `None` if it is not a knight's move.
    pub fn move_index(&self, src: Cell, dest: Cell) -> Option<usize> {
        if !self.contains(src) || !self.contains(dest) {
            return None;
        }
        move_index(self.coord_of(dest) - self.coord_of(src))
    }

    /// Cells a knight's move away from `cell`, in move-index order.
    pub fn knight_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        KNIGHT_STEPS.iter().filter_map(move |&d| self.dest(cell, d))
    }

    /// The primary slot of `cell`: its successor on an undirected board.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Cell> {
        let primary = match &self.table {
            MoveTable::Undirected { moves } => moves,
            MoveTable::Directed { out1, .. } => out1,
        };
        primary.get(cell).copied().flatten()
    }

    /// Both slots of `cell`. The second is always `None` on an undirected board.
    #[inline]
    pub fn neighbours(&self, cell: Cell) -> [Option<Cell>; 2] {
        match &self.table {
            MoveTable::Undirected { moves } => [moves.get(cell).copied().flatten(), None],
            MoveTable::Directed { out1, out2 } => [
                out1.get(cell).copied().flatten(),
                out2.get(cell).copied().flatten(),
            ],
        }
    }

    /// True if the edge `{i, j}` is present, stored from either endpoint in either table.
    pub fn is_move(&self, i: Cell, j: Cell) -> bool {
        if !self.contains(i) || !self.contains(j) {
            return false;
        }
        match &self.table {
            MoveTable::Undirected { moves } => moves[i] == Some(j) || moves[j] == Some(i),
            MoveTable::Directed { out1, out2 } => {
                out1[i] == Some(j) || out2[i] == Some(j) || out1[j] == Some(i) || out2[j] == Some(i)
            }
        }
    }

    /// Number of knight's moves from `cell` to a cell whose primary slot is still empty.
    pub fn available_move_count(&self, cell: Cell) -> usize {
        self.knight_neighbours(cell)
            .filter(|&c| self.get(c).is_none())
            .count()
    }
}

impl fmt::Display for Board {
    /// One row per line, one move-index digit per cell (`.` for an empty primary slot).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = y * self.width + x;
                match self.get(cell).and_then(|d| self.move_index(cell, d)) {
                    Some(i) => write!(f, "{i}")?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
