use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use tourney::task::{self, TaskOptions};
use tourney::{Config, CycleKind, GeneratorKind, TourneyDesc};

#[derive(Debug, Parser)]
#[command(name = "tourney", about = "Knight's tour and tourney generator")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Generate one board and write its .txt, .svg and .json files
    Generate {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        size: Size,
    },
    /// Generate many boards and write move-direction statistics
    Measure {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        size: Size,
        /// Number of boards to sample
        #[arg(long, default_value_t = 100)]
        samples: usize,
    },
    /// Time generation of square boards over a range of even widths
    Time {
        #[command(flatten)]
        common: Common,
        /// Smallest width
        #[arg(long, default_value_t = 6)]
        lo: usize,
        /// Largest width
        #[arg(long, default_value_t = 40)]
        hi: usize,
        /// Boards generated per width
        #[arg(long, default_value_t = 10)]
        samples: usize,
    },
}

#[derive(Debug, Args)]
struct Common {
    /// warnsdorff, takefuji-lee, divide-and-conquer, concentric-braid or four-cover
    #[arg(long, short, default_value = "divide-and-conquer")]
    generator: GeneratorKind,
    /// tour, tourney or tour-from-tourney
    #[arg(long, short, default_value = "tour")]
    cycle: CycleKind,
    /// Scramble with rail shattering and rejoin before saving
    #[arg(long)]
    obfuscate: bool,
    /// Worker threads (defaults to the number of CPUs)
    #[arg(long, short)]
    threads: Option<usize>,
    /// Base seed (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for output files
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,
    /// JSON file overriding join, obfuscation and search limits
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct Size {
    /// Width and height of a square board
    #[arg(long, short, default_value_t = 8)]
    size: usize,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
}

impl Size {
    fn dims(&self) -> (usize, usize) {
        (self.width.unwrap_or(self.size), self.height.unwrap_or(self.size))
    }
}

struct Prepared {
    desc: TourneyDesc,
    config: Config,
    threads: usize,
    seed: u64,
    out_dir: PathBuf,
}

impl Common {
    fn prepare(&self) -> Result<Prepared> {
        let config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        let threads = match self.threads {
            Some(0) => bail!("--threads must be at least 1"),
            Some(n) => n,
            None => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        };
        let seed = self.seed.unwrap_or_else(rand::random);
        info!("seed {seed}");
        Ok(Prepared {
            desc: TourneyDesc {
                generator: self.generator,
                cycle: self.cycle,
                obfuscate: self.obfuscate,
            },
            config,
            threads,
            seed,
            out_dir: self.out_dir.clone(),
        })
    }
}

impl Prepared {
    fn options(&self) -> TaskOptions<'_> {
        TaskOptions {
            threads: self.threads,
            seed: self.seed,
            config: &self.config,
            out_dir: &self.out_dir,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.cmd {
        Cmd::Generate { common, size } => {
            let p = common.prepare()?;
            let (w, h) = size.dims();
            let base = task::generate(p.desc, w, h, &p.options())
                .with_context(|| format!("generating a {w}x{h} {}", p.desc.file_stem()))?;
            println!("{}", base.display());
        }
        Cmd::Measure { common, size, samples } => {
            let p = common.prepare()?;
            let (w, h) = size.dims();
            let (_, path) = task::measure(p.desc, w, h, *samples, &p.options())
                .with_context(|| format!("measuring {samples} {w}x{h} boards"))?;
            println!("{}", path.display());
        }
        Cmd::Time { common, lo, hi, samples } => {
            let p = common.prepare()?;
            let (timings, path) = task::time(p.desc, *lo, *hi, *samples, &p.options())
                .with_context(|| format!("timing widths {lo}..={hi}"))?;
            for t in &timings {
                print!("{}", t.line());
            }
            println!("{}", path.display());
        }
    }
    Ok(())
}
