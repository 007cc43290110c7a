//! Move-direction histograms over generated boards.
//!
//! A board contributes one count per cell to the single-move histogram (the move index of the
//! cell's successor) and one to the double-move histogram (the index of the following move,
//! taken relative to the first, modulo 8).

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Result;
use crate::output::io_error;

pub const BINS: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    pub single: [u64; BINS],
    pub double: [u64; BINS],
}

impl MoveStats {
    /// Histogram an undirected board by following each cell's primary successor.
    /// Cells without a move are skipped.
    pub fn of_board(board: &Board) -> Self {
        let mut stats = Self::default();
        for cell in 0..board.size() {
            let Some(dest) = board.get(cell) else { continue };
            let Some(first) = board.move_index(cell, dest) else { continue };
            stats.single[first] += 1;
            let second = board.get(dest).and_then(|d2| board.move_index(dest, d2));
            if let Some(second) = second {
                stats.double[(second + BINS - first) % BINS] += 1;
            }
        }
        stats
    }

    pub fn total(&self) -> u64 {
        self.single.iter().sum()
    }
}

/// Per-bin mean and sample standard deviation of normalised counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub samples: usize,
    pub single_mean: [f64; BINS],
    pub single_stdev: [f64; BINS],
    pub double_mean: [f64; BINS],
    pub double_stdev: [f64; BINS],
}

fn mean_and_stdev(rows: &[[f64; BINS]]) -> ([f64; BINS], [f64; BINS]) {
    let mut mean = [0.0; BINS];
    let mut stdev = [0.0; BINS];
    let n = rows.len();
    if n == 0 {
        return (mean, stdev);
    }
    for row in rows {
        for (m, x) in mean.iter_mut().zip(row) {
            *m += x;
        }
    }
    for m in &mut mean {
        *m /= n as f64;
    }
    if n > 1 {
        for row in rows {
            for i in 0..BINS {
                let d = row[i] - mean[i];
                stdev[i] += d * d;
            }
        }
        for s in &mut stdev {
            *s = (*s / (n - 1) as f64).sqrt();
        }
    }
    (mean, stdev)
}

impl StatsSummary {
    /// Counts are divided by `board_size` before averaging so that summaries of different
    /// board sizes are comparable.
    pub fn from_samples(samples: &[MoveStats], board_size: usize) -> Self {
        let scale = board_size.max(1) as f64;
        let normalise = |h: &[u64; BINS]| (*h).map(|c| c as f64 / scale);
        let singles: Vec<_> = samples.iter().map(|s| normalise(&s.single)).collect();
        let doubles: Vec<_> = samples.iter().map(|s| normalise(&s.double)).collect();
        let (single_mean, single_stdev) = mean_and_stdev(&singles);
        let (double_mean, double_stdev) = mean_and_stdev(&doubles);
        Self {
            samples: samples.len(),
            single_mean,
            single_stdev,
            double_mean,
            double_stdev,
        }
    }

    pub fn file_name(base: &str, samples: usize) -> String {
        format!("Stats{base}-{samples}.txt")
    }

    pub fn render(&self) -> String {
        let row = |a: &[f64; BINS]| a.iter().map(|x| format!("{x:.4}")).collect::<Vec<_>>().join("\t");
        format!(
            "Single\nMean\t{}\nStdev\t{}\n\nDouble\nMean\t{}\nStdev\t{}\n",
            row(&self.single_mean),
            row(&self.single_stdev),
            row(&self.double_mean),
            row(&self.double_stdev),
        )
    }

    /// Write `Stats<base>-<samples>.txt` into `dir`.
    pub fn write(&self, dir: &Path, base: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(io_error("stats_create_dir", dir))?;
        let path = dir.join(Self::file_name(base, self.samples));
        let f = fs::File::create(&path).map_err(io_error("stats_create", &path))?;
        let mut w = BufWriter::new(f);
        w.write_all(self.render().as_bytes())
            .map_err(io_error("stats_write", &path))?;
        w.flush().map_err(io_error("stats_flush", &path))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tiles::base_tile;

    #[test]
    fn one_count_per_cell() {
        let b = base_tile(8, 8).unwrap();
        let s = MoveStats::of_board(&b);
        assert_eq!(s.total(), 64);
        assert_eq!(s.double.iter().sum::<u64>(), 64);
    }

    #[test]
    fn empty_board_has_no_counts() {
        assert_eq!(MoveStats::of_board(&Board::square(6)), MoveStats::default());
    }

    #[test]
    fn summary_of_identical_samples_has_zero_spread() {
        let s = MoveStats::of_board(&base_tile(6, 6).unwrap());
        let summary = StatsSummary::from_samples(&[s, s, s], 36);
        assert_eq!(summary.samples, 3);
        assert!(summary.single_stdev.iter().all(|&x| x < 1e-12));
        let mass: f64 = summary.single_mean.iter().sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sample_stdev_uses_n_minus_one() {
        let mut a = MoveStats::default();
        let mut b = MoveStats::default();
        a.single[0] = 2;
        b.single[0] = 4;
        let summary = StatsSummary::from_samples(&[a, b], 1);
        assert_eq!(summary.single_mean[0], 3.0);
        assert!((summary.single_stdev[0] - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rendered_table_layout() {
        let summary = StatsSummary::from_samples(&[MoveStats::default()], 4);
        let text = summary.render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Single");
        assert_eq!(lines[1].split('\t').count(), 1 + BINS);
        assert_eq!(lines[4], "Double");
        assert_eq!(StatsSummary::file_name("WarnsdTour8", 100), "StatsWarnsdTour8-100.txt");
    }
}
