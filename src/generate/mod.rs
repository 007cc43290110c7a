//! Tourney and tour generators.
//!
//! Each generator fills a caller-owned [`Board`] in place and hands it back undirected. The
//! pattern generators (divide and conquer, concentric braid, four cover) are deterministic;
//! the search generators (Warnsdorff, Takefuji-Lee) draw from their own seeded [`StdRng`] and
//! watch a shared cancellation flag between attempts.

pub mod braid;
pub mod divide;
pub mod four_cover;
pub mod takefuji_lee;
pub mod tiles;
pub mod warnsdorff;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::{Config, JoinLimits};
use crate::error::{Result, TourneyError};

pub use braid::ConcentricBraid;
pub use divide::DivideAndConquer;
pub use four_cover::FourCover;
pub use takefuji_lee::TakefujiLee;
pub use warnsdorff::Warnsdorff;

/// What a generator is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleKind {
    /// A single closed knight's tour.
    Tour,
    /// Any cover of the board by disjoint cycles.
    Tourney,
    /// A tourney, then joined into a tour by rail flipping.
    TourFromTourney,
}

impl CycleKind {
    pub const ALL: [CycleKind; 3] = [CycleKind::Tour, CycleKind::Tourney, CycleKind::TourFromTourney];

    /// Suffix used in output file names.
    pub fn file_tag(self) -> &'static str {
        match self {
            CycleKind::Tour => "Tour",
            CycleKind::Tourney => "Trny",
            CycleKind::TourFromTourney => "Join",
        }
    }

    #[inline]
    pub fn wants_tour(self) -> bool {
        !matches!(self, CycleKind::Tourney)
    }
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CycleKind::Tour => "tour",
            CycleKind::Tourney => "tourney",
            CycleKind::TourFromTourney => "tour-from-tourney",
        })
    }
}

impl FromStr for CycleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tour" => Ok(CycleKind::Tour),
            "tourney" => Ok(CycleKind::Tourney),
            "tour-from-tourney" | "join" => Ok(CycleKind::TourFromTourney),
            other => Err(format!("unknown cycle kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Warnsdorff,
    TakefujiLee,
    DivideAndConquer,
    ConcentricBraid,
    FourCover,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Warnsdorff,
        GeneratorKind::TakefujiLee,
        GeneratorKind::DivideAndConquer,
        GeneratorKind::ConcentricBraid,
        GeneratorKind::FourCover,
    ];

    /// Prefix used in output file names.
    pub fn file_tag(self) -> &'static str {
        match self {
            GeneratorKind::Warnsdorff => "Warnsd",
            GeneratorKind::TakefujiLee => "Neural",
            GeneratorKind::DivideAndConquer => "Divide",
            GeneratorKind::ConcentricBraid => "Braid",
            GeneratorKind::FourCover => "Cover4",
        }
    }

    /// Search generators restart until they succeed, so they are worth running on several
    /// threads at once.
    #[inline]
    pub fn is_search(self) -> bool {
        matches!(self, GeneratorKind::Warnsdorff | GeneratorKind::TakefujiLee)
    }

    /// Instantiate with its own generator seeded from `seed`.
    pub fn build(self, seed: u64, config: &Config, cancel: Arc<AtomicBool>) -> Box<dyn Generator + Send> {
        let rng = StdRng::seed_from_u64(seed);
        match self {
            GeneratorKind::Warnsdorff => Box::new(Warnsdorff::new(rng, config, cancel)),
            GeneratorKind::TakefujiLee => Box::new(TakefujiLee::new(rng, config, cancel)),
            GeneratorKind::DivideAndConquer => Box::new(DivideAndConquer::new(rng, config.join)),
            GeneratorKind::ConcentricBraid => Box::new(ConcentricBraid::new(rng, config.join)),
            GeneratorKind::FourCover => Box::new(FourCover::new(rng, config.join)),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeneratorKind::Warnsdorff => "warnsdorff",
            GeneratorKind::TakefujiLee => "takefuji-lee",
            GeneratorKind::DivideAndConquer => "divide-and-conquer",
            GeneratorKind::ConcentricBraid => "concentric-braid",
            GeneratorKind::FourCover => "four-cover",
        })
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warnsdorff" | "warnsd" => Ok(GeneratorKind::Warnsdorff),
            "takefuji-lee" | "neural" => Ok(GeneratorKind::TakefujiLee),
            "divide-and-conquer" | "divide" => Ok(GeneratorKind::DivideAndConquer),
            "concentric-braid" | "braid" => Ok(GeneratorKind::ConcentricBraid),
            "four-cover" | "cover4" => Ok(GeneratorKind::FourCover),
            other => Err(format!("unknown generator: {other}")),
        }
    }
}

/// What to generate: which generator, which kind of cover, and whether to obfuscate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TourneyDesc {
    pub generator: GeneratorKind,
    pub cycle: CycleKind,
    pub obfuscate: bool,
}

impl TourneyDesc {
    pub fn new(generator: GeneratorKind, cycle: CycleKind) -> Self {
        Self {
            generator,
            cycle,
            obfuscate: false,
        }
    }

    /// File name stem shared by every board size, e.g. `DivideTourObfs`.
    pub fn file_stem(&self) -> String {
        let obfs = if self.obfuscate { "Obfs" } else { "" };
        format!("{}{}{obfs}", self.generator.file_tag(), self.cycle.file_tag())
    }

    /// Output file name without extension, e.g. `DivideTourObfs12`.
    pub fn file_base(&self, width: usize) -> String {
        format!("{}{width}", self.file_stem())
    }
}

pub trait Generator {
    fn kind(&self) -> GeneratorKind;

    /// Fill `board` (any previous contents are discarded) with a cycle cover of the requested
    /// kind. On success the board is undirected.
    fn generate(&mut self, board: &mut Board, kind: CycleKind) -> Result<()>;
}

/// Tourney-only generators: refuse `Tour`, and join the tourney for `TourFromTourney`.
pub(crate) fn finish_tourney(
    generator: &'static str,
    board: &mut Board,
    kind: CycleKind,
    rng: &mut StdRng,
    join: &JoinLimits,
) -> Result<()> {
    match kind {
        CycleKind::Tour => Err(TourneyError::UnsupportedCycleKind { generator }),
        CycleKind::Tourney => Ok(()),
        CycleKind::TourFromTourney => board.join_until_tour(rng, join).map(|_| ()),
    }
}

/// Knight's tours and tourneys need an even number of cells and room for a knight to move.
pub(crate) fn check_coverable(generator: &'static str, board: &Board) -> Result<()> {
    let (w, h) = (board.width(), board.height());
    let reason = if w.min(h) < 3 {
        Some("both sides must be at least 3")
    } else if (w * h) % 2 != 0 {
        Some("a cycle cover needs an even number of cells")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(TourneyError::UnsupportedDimensions {
            generator,
            width: w,
            height: h,
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for g in GeneratorKind::ALL {
            assert_eq!(g.to_string().parse::<GeneratorKind>().unwrap(), g);
            assert_eq!(g.file_tag().parse::<GeneratorKind>().unwrap(), g);
        }
        for c in CycleKind::ALL {
            assert_eq!(c.to_string().parse::<CycleKind>().unwrap(), c);
        }
        assert!("bishop".parse::<GeneratorKind>().is_err());
    }

    #[test]
    fn file_base_names() {
        let mut d = TourneyDesc::new(GeneratorKind::DivideAndConquer, CycleKind::Tour);
        assert_eq!(d.file_base(12), "DivideTour12");
        d.obfuscate = true;
        assert_eq!(d.file_base(12), "DivideTourObfs12");
        assert_eq!(d.file_stem(), "DivideTourObfs");
        let d = TourneyDesc::new(GeneratorKind::FourCover, CycleKind::TourFromTourney);
        assert_eq!(d.file_base(8), "Cover4Join8");
    }

    #[test]
    fn odd_boards_are_not_coverable() {
        assert!(check_coverable("test", &Board::new(5, 7)).is_err());
        assert!(check_coverable("test", &Board::new(2, 8)).is_err());
        assert!(check_coverable("test", &Board::new(5, 6)).is_ok());
    }
}
