//! Saving boards: a plain-text move table, an SVG drawing and a JSON manifest per board.
//!
//! All three files share a base name built by [`TourneyDesc::file_base`], e.g.
//! `DivideTour12.txt`, `DivideTour12.svg` and `DivideTour12.json`.

pub mod svg;
pub mod text;

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{Result, TourneyError};
use crate::generate::{CycleKind, GeneratorKind, TourneyDesc};

const FORMAT_VERSION: u32 = 1;

pub use svg::{render_svg, write_svg};
pub use text::{parse_text, read_text, write_text};

/// Map an error from any I/O or serialisation step to [`TourneyError::Io`].
pub(crate) fn io_error<E: std::fmt::Display>(stage: &'static str, path: &Path) -> impl FnOnce(E) -> TourneyError {
    let path = path.display().to_string();
    move |e| TourneyError::Io {
        stage,
        path,
        error: e.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardManifest {
    pub format_version: u32,
    pub created_unix_secs: u64,
    pub generator: GeneratorKind,
    pub cycle: CycleKind,
    pub obfuscated: bool,
    pub width: usize,
    pub height: usize,
    /// Seed of the generator's random stream, if the board came from one.
    pub seed: Option<u64>,
    pub cycles: usize,
    pub is_tour: bool,
    pub files: ManifestFiles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFiles {
    pub text: String,
    pub svg: String,
}

impl BoardManifest {
    pub fn describe(board: &Board, desc: &TourneyDesc, seed: Option<u64>) -> Self {
        let base = desc.file_base(board.width());
        Self {
            format_version: FORMAT_VERSION,
            created_unix_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            generator: desc.generator,
            cycle: desc.cycle,
            obfuscated: desc.obfuscate,
            width: board.width(),
            height: board.height(),
            seed,
            cycles: board.tourney_ids().count,
            is_tour: board.is_tour(),
            files: ManifestFiles {
                text: format!("{base}.txt"),
                svg: format!("{base}.svg"),
            },
        }
    }
}

pub fn write_manifest(path: &Path, manifest: &BoardManifest) -> Result<()> {
    let f = fs::File::create(path).map_err(io_error("manifest_create", path))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, manifest).map_err(io_error("manifest_serialize", path))?;
    w.flush().map_err(io_error("manifest_flush", path))
}

pub fn read_manifest(path: &Path) -> Result<BoardManifest> {
    let f = fs::File::open(path).map_err(io_error("manifest_open", path))?;
    serde_json::from_reader(BufReader::new(f)).map_err(io_error("manifest_parse", path))
}

/// Write the text, SVG and manifest files for `board` into `dir`. Returns the base path.
pub fn save<R: Rng + ?Sized>(
    board: &Board,
    desc: &TourneyDesc,
    seed: Option<u64>,
    dir: &Path,
    rng: &mut R,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(io_error("output_create_dir", dir))?;
    let manifest = BoardManifest::describe(board, desc, seed);
    let base = dir.join(desc.file_base(board.width()));

    write_text(board, &dir.join(&manifest.files.text))?;
    write_svg(board, &dir.join(&manifest.files.svg), rng)?;
    write_manifest(&base.with_extension("json"), &manifest)?;
    Ok(base)
}
