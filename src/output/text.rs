use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::io_error;
use crate::board::Board;
use crate::core::coord::KNIGHT_STEPS;
use crate::error::{Mode, Result, TourneyError};

/// Write one line per row, one move-index digit per cell.
pub fn write_text(board: &Board, path: &Path) -> Result<()> {
    board.require("write_text", Mode::Undirected)?;
    let f = fs::File::create(path).map_err(io_error("text_create", path))?;
    let mut w = BufWriter::new(f);
    write!(w, "{board}").map_err(io_error("text_write", path))?;
    w.flush().map_err(io_error("text_flush", path))
}

pub fn read_text(path: &Path) -> Result<Board> {
    let s = fs::read_to_string(path).map_err(io_error("text_read", path))?;
    parse_text(&s, &path.display().to_string())
}

/// Parse a move-index grid back into an undirected board. `.` marks a cell with no move.
pub fn parse_text(s: &str, origin: &str) -> Result<Board> {
    let parse_error = |reason: String| TourneyError::Parse {
        path: origin.to_string(),
        reason,
    };

    let rows: Vec<&str> = s.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.chars().count());
    if width == 0 {
        return Err(parse_error("empty board".to_string()));
    }

    // Geometry only; the moves go into `table`.
    let grid = Board::new(width, height);
    let mut table = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(parse_error(format!("row {y} has {} cells, expected {width}", row.chars().count())));
        }
        for (x, ch) in row.chars().enumerate() {
            let cell = y * width + x;
            let dest = match ch {
                '.' => -1,
                '0'..='7' => {
                    let step = KNIGHT_STEPS[ch as usize - '0' as usize];
                    let dest = grid
                        .dest(cell, step)
                        .ok_or_else(|| parse_error(format!("move {ch} leaves the board at ({x},{y})")))?;
                    dest as i32
                }
                other => return Err(parse_error(format!("unexpected {other:?} at ({x},{y})"))),
            };
            table.push(dest);
        }
    }
    Board::from_moves(&table, width, height)
}
