use rand::rngs::StdRng;
use rand::SeedableRng;

use tourney::config::{JoinLimits, ObfuscateConfig};
use tourney::generate::divide::DivideAndConquer;
use tourney::generate::tiles::base_tile;
use tourney::{Board, CycleKind, Generator, TourneyError};

fn dnc_board(n: usize, kind: CycleKind) -> Board {
    let mut b = Board::square(n);
    DivideAndConquer::new(StdRng::seed_from_u64(0), JoinLimits::default())
        .generate(&mut b, kind)
        .unwrap();
    b
}

/// A directed tourney with many small cycles.
fn shattered(n: usize, seed: u64, passes: usize) -> (Board, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut b = dnc_board(n, CycleKind::Tour);
    b.make_directed();
    for _ in 0..passes {
        b.shatter(&mut rng).unwrap();
    }
    (b, rng)
}

#[test]
fn join_passes_never_add_cycles() {
    let (mut b, mut rng) = shattered(16, 1, 8);
    let mut cycles = b.tourney_ids().count;
    assert!(cycles > 1);
    while cycles > 1 {
        let after = b.join(&mut rng).unwrap();
        assert!(after <= cycles);
        assert_eq!(after, b.tourney_ids().count);
        assert!(b.is_tourney());
        if after == cycles {
            break;
        }
        cycles = after;
    }
}

#[test]
fn join_until_tour_joins_quadrant_tours() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut b = dnc_board(16, CycleKind::Tourney);
    assert_eq!(b.tourney_ids().count, 4);
    let passes = b.join_until_tour(&mut rng, &JoinLimits::default()).unwrap();
    assert!(passes >= 1);
    assert!(b.is_undirected());
    assert!(b.is_tour());
}

#[test]
fn join_until_tour_keeps_the_board_directed() {
    let (mut b, mut rng) = shattered(12, 4, 16);
    let limits = JoinLimits { max_passes: 200 };
    match b.join_until_tour(&mut rng, &limits) {
        Ok(_) => assert!(b.is_tour()),
        Err(TourneyError::NotConverged { cycles, .. }) => assert!(cycles > 1),
        Err(e) => panic!("unexpected error: {e}"),
    }
    assert!(b.is_directed());
    assert!(b.is_tourney());
}

#[test]
fn zero_passes_report_non_convergence() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut b = dnc_board(16, CycleKind::Tourney);
    let before = b.edge_set();
    assert!(matches!(
        b.join_until_tour(&mut rng, &JoinLimits { max_passes: 0 }),
        Err(TourneyError::NotConverged { passes: 0, cycles: 4 })
    ));
    assert!(b.is_undirected());
    assert_eq!(b.edge_set(), before);
}

#[test]
fn obfuscated_boards_are_tours() {
    let config = ObfuscateConfig::default();
    for (n, seed) in [(12, 1), (16, 2), (20, 3), (24, 4)] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut b = dnc_board(n, CycleKind::Tour);
        let before = b.edge_set();
        b.obfuscate(&mut rng, &config).unwrap();
        assert!(b.is_undirected());
        assert!(b.is_tour(), "{n}x{n}");
        assert_ne!(b.edge_set(), before);
    }
}

#[test]
fn obfuscate_accepts_a_tourney() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut b = base_tile(10, 10).unwrap();
    b.make_directed();
    b.shatter(&mut rng).unwrap();
    b.obfuscate(&mut rng, &ObfuscateConfig::default()).unwrap();
    assert!(b.is_tour());
}

#[test]
fn partial_boards_cannot_be_joined() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut b = Board::square(8);
    b.insert_undirected_move(0, 10).unwrap();
    assert!(matches!(
        b.join_until_tour(&mut rng, &JoinLimits::default()),
        Err(TourneyError::NotATourney)
    ));
    assert!(matches!(
        b.obfuscate(&mut rng, &ObfuscateConfig::default()),
        Err(TourneyError::NotATourney)
    ));
}
