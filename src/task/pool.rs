//! A fixed set of worker threads draining one request channel.
//!
//! Channels and the "finished" flag belong to a single [`WorkerPool::run`] call, so runs
//! never share state. Requests that keep their board race each other: the first worker to
//! finish one raises the flag, which cancels sibling searches and drops their late results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{SearchRequest, SearchResult};
use crate::board::Board;
use crate::config::Config;
use crate::error::{Result, TourneyError};
use crate::stats::MoveStats;

/// Mixed into a request seed so obfuscation does not replay the generator's random stream.
const OBFUSCATE_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Default)]
pub struct PoolRun {
    pub results: Vec<SearchResult>,
    /// Requests that ended in an error other than cancellation.
    pub failures: Vec<TourneyError>,
    /// Sum over requests of the time spent generating; an estimate of CPU time.
    pub busy: Duration,
    pub elapsed: Duration,
}

impl PoolRun {
    /// The kept board, if any request produced one.
    pub fn kept(&self) -> Option<&SearchResult> {
        self.results.iter().find(|r| r.board.is_some())
    }
}

pub struct WorkerPool<'a> {
    threads: usize,
    config: &'a Config,
}

enum Outcome {
    Done(SearchResult),
    Cancelled,
    Failed(TourneyError),
}

impl<'a> WorkerPool<'a> {
    pub fn new(threads: usize, config: &'a Config) -> Self {
        Self {
            threads: threads.max(1),
            config,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn run(&self, requests: Vec<SearchRequest>) -> PoolRun {
        let start = Instant::now();
        let (req_tx, req_rx) = unbounded::<SearchRequest>();
        let (res_tx, res_rx) = unbounded::<(Outcome, Duration)>();
        let finished = Arc::new(AtomicBool::new(false));

        let workers = self.threads.min(requests.len()).max(1);
        for r in requests {
            // The receiver is alive until the scope below ends.
            let _ = req_tx.send(r);
        }
        drop(req_tx);

        thread::scope(|s| {
            for id in 0..workers {
                let req_rx = req_rx.clone();
                let res_tx = res_tx.clone();
                let finished = Arc::clone(&finished);
                s.spawn(move || self.worker_loop(id, req_rx, res_tx, finished));
            }
        });
        drop(res_tx);

        let mut run = PoolRun::default();
        for (outcome, spent) in res_rx.try_iter() {
            run.busy += spent;
            match outcome {
                Outcome::Done(r) => run.results.push(r),
                Outcome::Cancelled => {}
                Outcome::Failed(e) => run.failures.push(e),
            }
        }
        run.elapsed = start.elapsed();
        run
    }

    fn worker_loop(
        &self,
        id: usize,
        requests: Receiver<SearchRequest>,
        results: Sender<(Outcome, Duration)>,
        finished: Arc<AtomicBool>,
    ) {
        for req in requests.iter() {
            if !req.discard && finished.load(Ordering::Relaxed) {
                continue;
            }
            let t0 = Instant::now();
            let outcome = match self.process(&req, &finished) {
                Ok(Some(r)) => Outcome::Done(r),
                Ok(None) | Err(TourneyError::Cancelled { .. }) => Outcome::Cancelled,
                Err(e) => {
                    warn!(
                        "worker {id}: {} {}x{} seed {} failed: {e}",
                        req.desc.generator, req.width, req.height, req.seed
                    );
                    Outcome::Failed(e)
                }
            };
            if results.send((outcome, t0.elapsed())).is_err() {
                break;
            }
        }
        debug!("worker {id}: request channel drained");
    }

    /// Generate one board. `Ok(None)` means another worker already produced the kept board.
    fn process(&self, req: &SearchRequest, finished: &Arc<AtomicBool>) -> Result<Option<SearchResult>> {
        let cancel = if req.discard {
            Arc::new(AtomicBool::new(false))
        } else {
            Arc::clone(finished)
        };
        let mut board = Board::new(req.width, req.height);
        let mut generator = req.desc.generator.build(req.seed, self.config, cancel);
        generator.generate(&mut board, req.desc.cycle)?;
        if req.desc.obfuscate {
            let mut rng = StdRng::seed_from_u64(req.seed ^ OBFUSCATE_SALT);
            board.obfuscate(&mut rng, &self.config.obfuscate)?;
        }

        let stats = MoveStats::of_board(&board);
        let board = if req.discard {
            None
        } else if finished.swap(true, Ordering::AcqRel) {
            return Ok(None);
        } else {
            Some(board)
        };
        Ok(Some(SearchResult {
            desc: req.desc,
            width: req.width,
            height: req.height,
            seed: req.seed,
            board,
            stats,
        }))
    }
}
