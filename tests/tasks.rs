use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tourney::output::read_manifest;
use tourney::task::{self, TaskOptions};
use tourney::{Config, CycleKind, GeneratorKind, TourneyDesc, TourneyError};

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

#[test]
fn generate_writes_an_obfuscated_tour() {
    let dir = unique_temp_dir("generate_writes_an_obfuscated_tour");
    let config = Config::default();
    let opts = TaskOptions {
        threads: 2,
        seed: 5,
        config: &config,
        out_dir: &dir,
    };
    let mut desc = TourneyDesc::new(GeneratorKind::DivideAndConquer, CycleKind::Tour);
    desc.obfuscate = true;

    let base = task::generate(desc, 16, 16, &opts).unwrap();
    assert_eq!(base, dir.join("DivideTourObfs16"));
    let manifest = read_manifest(&base.with_extension("json")).unwrap();
    assert!(manifest.is_tour && manifest.obfuscated);
    assert_eq!(manifest.seed, Some(5));
    assert!(base.with_extension("svg").exists());
}

#[test]
fn generate_races_search_workers() {
    let dir = unique_temp_dir("generate_races_search_workers");
    let config = Config::default();
    let opts = TaskOptions {
        threads: 3,
        seed: 40,
        config: &config,
        out_dir: &dir,
    };
    let desc = TourneyDesc::new(GeneratorKind::Warnsdorff, CycleKind::Tour);
    let base = task::generate(desc, 8, 8, &opts).unwrap();
    let manifest = read_manifest(&base.with_extension("json")).unwrap();
    assert!(manifest.is_tour);
    assert!((40..43).contains(&manifest.seed.unwrap()));
}

#[test]
fn measure_writes_a_stats_table() {
    let dir = unique_temp_dir("measure_writes_a_stats_table");
    let config = Config::default();
    let opts = TaskOptions {
        threads: 4,
        seed: 0,
        config: &config,
        out_dir: &dir,
    };
    let desc = TourneyDesc::new(GeneratorKind::FourCover, CycleKind::TourFromTourney);
    let (summary, path) = task::measure(desc, 8, 8, 6, &opts).unwrap();
    assert_eq!(summary.samples, 6);
    assert_eq!(path, dir.join("StatsCover4Join8-6.txt"));
    let mass: f64 = summary.single_mean.iter().sum();
    assert!((mass - 1.0).abs() < 1e-9);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Single\nMean\t"));
    assert!(text.contains("\nDouble\n"));
}

#[test]
fn time_appends_one_line_per_width() {
    let dir = unique_temp_dir("time_appends_one_line_per_width");
    let config = Config::default();
    let opts = TaskOptions {
        threads: 2,
        seed: 0,
        config: &config,
        out_dir: &dir,
    };
    let desc = TourneyDesc::new(GeneratorKind::DivideAndConquer, CycleKind::Tour);
    let (timings, path) = task::time(desc, 14, 8, 2, &opts).unwrap();
    assert_eq!(timings.iter().map(|t| t.width).collect::<Vec<_>>(), vec![8, 10, 12, 14]);
    assert_eq!(path, dir.join("TimeDivideTour-2.txt"));

    task::time(desc, 8, 8, 2, &opts).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.split('\t').count() == 3));
    assert!(lines[4].starts_with("8\t"));
}

#[test]
fn failed_generation_surfaces_the_error() {
    let dir = unique_temp_dir("failed_generation_surfaces_the_error");
    let config = Config::default();
    let opts = TaskOptions {
        threads: 2,
        seed: 0,
        config: &config,
        out_dir: &dir,
    };
    let desc = TourneyDesc::new(GeneratorKind::ConcentricBraid, CycleKind::Tour);
    assert!(matches!(
        task::generate(desc, 8, 8, &opts),
        Err(TourneyError::UnsupportedCycleKind { .. })
    ));
}
