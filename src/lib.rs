//! Knight's tours and tourneys on rectangular boards.
//!
//! A tourney is a set of disjoint knight's-move cycles that together visit every cell; a
//! knight's tour is a tourney with a single cycle. Boards are filled by a generator, then
//! optionally scrambled and rejoined into a tour by flipping rails.

pub mod core;
pub mod error;
pub mod config;
pub mod board;
pub mod graph;
pub mod rail;
pub mod generate;
pub mod output;
pub mod stats;
pub mod task;

pub use board::{Board, Cell};
pub use config::Config;
pub use error::{Result, TourneyError};
pub use generate::{CycleKind, Generator, GeneratorKind, TourneyDesc};
pub use rail::Rail;
