//! The three things the binary can do with a [`TourneyDesc`]: generate one board and save it,
//! measure move statistics over many boards, or time generation across a range of sizes.

pub mod pool;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::config::Config;
use crate::error::{Result, TourneyError};
use crate::generate::TourneyDesc;
use crate::output::{self, io_error};
use crate::stats::{MoveStats, StatsSummary};

pub use pool::{PoolRun, WorkerPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    pub desc: TourneyDesc,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    /// Keep only the statistics, not the board.
    pub discard: bool,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub desc: TourneyDesc,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    /// Present only for requests that keep their board.
    pub board: Option<Board>,
    pub stats: MoveStats,
}

/// Settings shared by every task.
#[derive(Debug, Clone, Copy)]
pub struct TaskOptions<'a> {
    pub threads: usize,
    /// Base seed; request `i` of a run uses `seed + i`.
    pub seed: u64,
    pub config: &'a Config,
    pub out_dir: &'a Path,
}

fn batch(desc: TourneyDesc, size: (usize, usize), seed: u64, n: usize, discard: bool) -> Vec<SearchRequest> {
    (0..n)
        .map(|i| SearchRequest {
            desc,
            width: size.0,
            height: size.1,
            seed: seed.wrapping_add(i as u64),
            discard,
        })
        .collect()
}

/// Surface the first failure when a run produced nothing usable.
fn first_failure(failures: Vec<TourneyError>, generator: &'static str, attempts: usize) -> TourneyError {
    failures.into_iter().next().unwrap_or(TourneyError::AttemptsExhausted {
        generator,
        attempts: attempts as u64,
    })
}

/// Generate one board and write its text, SVG and manifest files into `out_dir`.
///
/// Search generators race one request per thread with consecutive seeds; the pattern
/// generators are deterministic, so they get a single request.
pub fn generate(
    desc: TourneyDesc,
    width: usize,
    height: usize,
    opts: &TaskOptions<'_>,
) -> Result<PathBuf> {
    let threads = if desc.generator.is_search() { opts.threads } else { 1 };
    let pool = WorkerPool::new(threads, opts.config);
    info!(
        "generating {} {width}x{height} ({}) on {} thread(s)",
        desc.generator,
        desc.cycle,
        pool.threads()
    );
    let run = pool.run(batch(desc, (width, height), opts.seed, pool.threads(), false));

    let elapsed = run.elapsed;
    let kept = run.results.into_iter().find_map(|r| r.board.map(|b| (r.seed, b)));
    let Some((kept_seed, board)) = kept else {
        return Err(first_failure(run.failures, "generate", pool.threads()));
    };
    let mut rng = StdRng::seed_from_u64(kept_seed);
    let base = output::save(&board, &desc, Some(kept_seed), opts.out_dir, &mut rng)?;
    info!(
        "{} cycle(s), written to {} in {:.2?}",
        board.tourney_ids().count,
        base.display(),
        elapsed
    );
    Ok(base)
}

/// Generate `samples` boards, keep only their move histograms, and write the summary.
pub fn measure(
    desc: TourneyDesc,
    width: usize,
    height: usize,
    samples: usize,
    opts: &TaskOptions<'_>,
) -> Result<(StatsSummary, PathBuf)> {
    let pool = WorkerPool::new(opts.threads, opts.config);
    info!("measuring {samples} {width}x{height} sample(s) of {}", desc.file_base(width));
    let run = pool.run(batch(desc, (width, height), opts.seed, samples, true));
    if run.results.is_empty() {
        return Err(first_failure(run.failures, "measure", samples));
    }
    if !run.failures.is_empty() {
        warn!("{} of {samples} sample(s) failed", run.failures.len());
    }

    let stats: Vec<MoveStats> = run.results.iter().map(|r| r.stats).collect();
    let summary = StatsSummary::from_samples(&stats, width * height);
    let path = summary.write(opts.out_dir, &desc.file_base(width))?;
    info!("statistics written to {} in {:.2?}", path.display(), run.elapsed);
    Ok((summary, path))
}

/// One line of a timing file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub width: usize,
    pub cpu_secs: f64,
    pub elapsed_secs: f64,
}

impl Timing {
    pub fn line(&self) -> String {
        format!("{}\t{:.2}\t{:.2}\n", self.width, self.cpu_secs, self.elapsed_secs)
    }
}

/// Time `samples` square boards for every even width from `lo` to `hi`, appending one line
/// per width to `Time<stem>-<samples>.txt`.
pub fn time(
    desc: TourneyDesc,
    lo: usize,
    hi: usize,
    samples: usize,
    opts: &TaskOptions<'_>,
) -> Result<(Vec<Timing>, PathBuf)> {
    let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
    fs::create_dir_all(opts.out_dir).map_err(io_error("time_create_dir", opts.out_dir))?;
    let path = opts.out_dir.join(format!("Time{}-{samples}.txt", desc.file_stem()));
    let pool = WorkerPool::new(opts.threads, opts.config);

    let mut timings = Vec::new();
    for width in (lo..=hi).filter(|w| w % 2 == 0) {
        let run = pool.run(batch(desc, (width, width), opts.seed, samples, true));
        if run.results.is_empty() {
            return Err(first_failure(run.failures, "time", samples));
        }
        let t = Timing {
            width,
            cpu_secs: run.busy.as_secs_f64(),
            elapsed_secs: run.elapsed.as_secs_f64(),
        };
        info!("{width}x{width}: cpu {:.2}s, elapsed {:.2}s", t.cpu_secs, t.elapsed_secs);

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error("time_open", &path))?;
        f.write_all(t.line().as_bytes())
            .map_err(io_error("time_write", &path))?;
        timings.push(t);
    }
    Ok((timings, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{CycleKind, GeneratorKind};

    #[test]
    fn batches_use_consecutive_seeds() {
        let desc = TourneyDesc::new(GeneratorKind::Warnsdorff, CycleKind::Tour);
        let b = batch(desc, (8, 6), u64::MAX, 3, true);
        let seeds: Vec<u64> = b.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![u64::MAX, 0, 1]);
        assert!(b.iter().all(|r| r.discard && r.width == 8 && r.height == 6));
    }

    #[test]
    fn timing_line_is_tab_separated() {
        let t = Timing {
            width: 12,
            cpu_secs: 1.234,
            elapsed_secs: 0.5,
        };
        assert_eq!(t.line(), "12\t1.23\t0.50\n");
    }
}
