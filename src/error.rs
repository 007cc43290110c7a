//! Structured errors returned by board, rail and generator operations.

use thiserror::Error;

use crate::board::Cell;

/// Which move-table representation an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Directed,
    Undirected,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Directed => f.write_str("directed"),
            Mode::Undirected => f.write_str("undirected"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TourneyError {
    /// A directed-only operation was called on an undirected board, or vice versa.
    #[error("invalid board mode for {op}: requires a {required} board")]
    InvalidMode { op: &'static str, required: Mode },

    #[error("cell {cell} out of range for a board of {size} cells")]
    CellOutOfRange { cell: Cell, size: usize },

    #[error("move table has {found} entries, expected {expected}")]
    TableLength { expected: usize, found: usize },

    /// `make_undirected` needs every cell to have degree exactly 2.
    #[error("board is not a tourney")]
    NotATourney,

    #[error("{generator} cannot build a {width}x{height} board: {reason}")]
    UnsupportedDimensions {
        generator: &'static str,
        width: usize,
        height: usize,
        reason: &'static str,
    },

    #[error("{generator} only produces tourneys; ask for a tourney or a tour joined from one")]
    UnsupportedCycleKind { generator: &'static str },

    #[error("sub-board {sub_width}x{sub_height} at ({x},{y}) does not fit in {width}x{height}")]
    SubBoardOutOfBounds {
        sub_width: usize,
        sub_height: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Joining quadrant tours needs the four corner moves present and their cross moves free.
    #[error("cannot splice quadrants at ({x},{y}): move {src}-{dest} {reason}")]
    Splice {
        x: usize,
        y: usize,
        src: Cell,
        dest: Cell,
        reason: &'static str,
    },

    /// Rail joining ran out of passes before reaching a single cycle.
    #[error("failed to converge to a tour after {passes} passes ({cycles} cycles remain)")]
    NotConverged { passes: usize, cycles: usize },

    /// A sibling worker already produced the board this search was working towards.
    #[error("{generator} search cancelled after {attempts} attempts")]
    Cancelled { generator: &'static str, attempts: u64 },

    #[error("{generator} search gave up after {attempts} attempts")]
    AttemptsExhausted { generator: &'static str, attempts: u64 },

    #[error("malformed board file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("I/O failure at {stage} ({path}): {error}")]
    Io {
        stage: &'static str,
        path: String,
        error: String,
    },
}

pub type Result<T> = std::result::Result<T, TourneyError>;
