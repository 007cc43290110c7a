use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

use tourney::config::JoinLimits;
use tourney::generate::braid::ConcentricBraid;
use tourney::output::{read_manifest, read_text, save};
use tourney::{Board, CycleKind, Generator, GeneratorKind, TourneyDesc, TourneyError};

fn unique_temp_dir(name: &str) -> PathBuf {
    let base = std::env::temp_dir().join("tourney_tests").join(name);
    let _ = fs::create_dir_all(&base);

    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    for i in 0..1000u32 {
        let p = base.join(format!("{pid}-{nanos}-{i}"));
        if fs::create_dir(&p).is_ok() {
            return p;
        }
    }

    panic!("failed to create a unique temp dir under {}", base.display());
}

fn braid_tourney(n: usize) -> Board {
    let mut b = Board::square(n);
    ConcentricBraid::new(StdRng::seed_from_u64(0), JoinLimits::default())
        .generate(&mut b, CycleKind::Tourney)
        .unwrap();
    b
}

#[test]
fn saved_board_reads_back() {
    let dir = unique_temp_dir("saved_board_reads_back");
    let board = braid_tourney(12);
    let desc = TourneyDesc::new(GeneratorKind::ConcentricBraid, CycleKind::Tourney);
    let mut rng = StdRng::seed_from_u64(1);

    let base = save(&board, &desc, Some(99), &dir, &mut rng).unwrap();
    assert_eq!(base, dir.join("BraidTrny12"));

    let text = read_text(&base.with_extension("txt")).unwrap();
    assert_eq!(text.edge_set(), board.edge_set());
    assert!(text.is_tourney());

    let manifest = read_manifest(&base.with_extension("json")).unwrap();
    assert_eq!(manifest.generator, GeneratorKind::ConcentricBraid);
    assert_eq!(manifest.cycle, CycleKind::Tourney);
    assert_eq!((manifest.width, manifest.height), (12, 12));
    assert_eq!(manifest.seed, Some(99));
    assert_eq!(manifest.cycles, 12);
    assert!(!manifest.is_tour);
    assert_eq!(manifest.files.text, "BraidTrny12.txt");

    let svg = fs::read_to_string(base.with_extension("svg")).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches("<polyline").count(), 12);
}

#[test]
fn text_dump_is_one_digit_per_cell() {
    let dir = unique_temp_dir("text_dump_is_one_digit_per_cell");
    let board = braid_tourney(8);
    let desc = TourneyDesc::new(GeneratorKind::ConcentricBraid, CycleKind::Tourney);
    let base = save(&board, &desc, None, &dir, &mut StdRng::seed_from_u64(0)).unwrap();

    let raw = fs::read_to_string(base.with_extension("txt")).unwrap();
    let rows: Vec<&str> = raw.lines().collect();
    assert_eq!(rows.len(), 8);
    for row in rows {
        assert_eq!(row.len(), 8);
        assert!(row.chars().all(|c| ('0'..='7').contains(&c)));
    }
}

#[test]
fn reading_a_missing_file_names_the_stage() {
    let dir = unique_temp_dir("reading_a_missing_file_names_the_stage");
    let err = read_text(&dir.join("nope.txt")).unwrap_err();
    assert!(matches!(err, TourneyError::Io { stage: "text_read", .. }));
}

#[test]
fn directed_boards_are_not_written() {
    let dir = unique_temp_dir("directed_boards_are_not_written");
    let mut board = braid_tourney(8);
    board.make_directed();
    let desc = TourneyDesc::new(GeneratorKind::ConcentricBraid, CycleKind::Tourney);
    assert!(matches!(
        save(&board, &desc, None, &dir, &mut StdRng::seed_from_u64(0)),
        Err(TourneyError::InvalidMode { .. })
    ));
}
