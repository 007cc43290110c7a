//! Closed knight's tours on the nine small boards the divide-and-conquer recursion bottoms out on.
//!
//! Every tile carries the four corner-adjacent moves that the quadrant splice deletes, whichever
//! quadrant it lands in. Tables are successor functions, row-major.

use crate::board::Board;

#[rustfmt::skip]
const TILE_6X6: [i32; 36] = [
    13, 12, 6, 11, 8, 9,
    14, 3, 0, 22, 2, 15,
    25, 21, 1, 23, 5, 4,
    7, 32, 28, 10, 35, 34,
    20, 33, 30, 31, 17, 16,
    19, 18, 24, 29, 26, 27,
];

#[rustfmt::skip]
const TILE_8X6: [i32; 48] = [
    10, 11, 8, 9, 14, 20, 12, 13,
    18, 24, 25, 21, 2, 3, 31, 5,
    1, 0, 35, 4, 37, 15, 7, 6,
    41, 40, 32, 17, 43, 44, 36, 46,
    42, 16, 28, 45, 19, 47, 23, 22,
    34, 26, 27, 33, 38, 39, 29, 30,
];

#[rustfmt::skip]
const TILE_6X8: [i32; 48] = [
    13, 14, 6, 11, 17, 16,
    19, 3, 0, 5, 2, 15,
    1, 9, 22, 4, 27, 21,
    7, 32, 24, 8, 35, 10,
    37, 12, 34, 23, 20, 40,
    26, 18, 43, 29, 47, 46,
    25, 45, 42, 28, 44, 33,
    31, 30, 36, 41, 38, 39,
];

#[rustfmt::skip]
const TILE_8X8: [i32; 64] = [
    10, 18, 8, 13, 21, 11, 23, 22,
    25, 3, 4, 26, 6, 7, 31, 5,
    1, 0, 24, 2, 37, 15, 39, 38,
    9, 42, 43, 12, 34, 14, 20, 46,
    17, 16, 40, 45, 19, 27, 55, 29,
    57, 58, 52, 28, 54, 62, 63, 30,
    33, 32, 56, 36, 35, 59, 60, 61,
    41, 51, 48, 49, 50, 44, 47, 53,
];

#[rustfmt::skip]
const TILE_10X8: [i32; 80] = [
    12, 13, 10, 15, 16, 24, 14, 19, 29, 28,
    22, 3, 4, 5, 2, 7, 8, 9, 6, 38,
    1, 0, 41, 42, 36, 37, 47, 46, 49, 17,
    11, 23, 20, 52, 26, 56, 48, 45, 59, 18,
    21, 60, 50, 35, 25, 33, 54, 39, 27, 68,
    71, 30, 31, 32, 75, 34, 44, 69, 66, 78,
    72, 40, 70, 55, 43, 73, 74, 79, 76, 77,
    51, 63, 53, 61, 62, 67, 64, 65, 57, 58,
];

#[rustfmt::skip]
const TILE_8X10: [i32; 80] = [
    17, 18, 8, 9, 10, 15, 23, 13,
    25, 24, 0, 26, 6, 3, 4, 30,
    1, 32, 12, 2, 5, 11, 7, 29,
    41, 40, 20, 21, 43, 19, 45, 14,
    49, 16, 51, 50, 42, 47, 28, 22,
    34, 56, 59, 53, 27, 35, 31, 62,
    33, 64, 60, 68, 37, 36, 39, 38,
    73, 72, 52, 44, 75, 78, 79, 46,
    74, 48, 76, 77, 58, 54, 55, 61,
    66, 67, 57, 65, 70, 71, 63, 69,
];

#[rustfmt::skip]
const TILE_10X10: [i32; 100] = [
    21, 20, 10, 15, 12, 13, 14, 19, 16, 17,
    22, 23, 0, 1, 35, 7, 4, 29, 37, 38,
    32, 40, 3, 2, 5, 44, 45, 6, 9, 8,
    11, 50, 51, 25, 46, 47, 24, 56, 59, 18,
    61, 62, 30, 55, 63, 66, 27, 26, 36, 28,
    42, 70, 31, 41, 33, 34, 75, 65, 39, 67,
    52, 80, 54, 71, 43, 73, 74, 48, 49, 77,
    91, 90, 93, 81, 53, 83, 57, 58, 97, 87,
    92, 60, 94, 95, 96, 64, 98, 99, 69, 68,
    82, 72, 84, 85, 86, 76, 88, 89, 79, 78,
];

#[rustfmt::skip]
const TILE_12X10: [i32; 120] = [
    14, 15, 25, 17, 29, 19, 31, 21, 22, 23, 35, 34,
    2, 3, 24, 5, 6, 7, 41, 9, 45, 11, 47, 46,
    1, 0, 36, 4, 18, 39, 53, 8, 42, 10, 59, 58,
    13, 12, 63, 16, 50, 51, 28, 20, 54, 68, 71, 33,
    62, 26, 27, 76, 38, 43, 40, 30, 70, 32, 83, 82,
    37, 75, 72, 86, 78, 55, 52, 57, 93, 44, 80, 94,
    49, 48, 60, 100, 66, 91, 88, 56, 90, 95, 107, 106,
    74, 110, 61, 64, 65, 112, 67, 116, 69, 79, 119, 118,
    73, 87, 108, 109, 77, 111, 92, 113, 114, 115, 81, 117,
    85, 84, 96, 97, 98, 99, 89, 101, 102, 103, 104, 105,
];

#[rustfmt::skip]
const TILE_10X12: [i32; 120] = [
    21, 20, 10, 11, 25, 13, 14, 26, 16, 17,
    31, 30, 0, 1, 22, 36, 4, 29, 37, 7,
    12, 2, 3, 35, 32, 6, 5, 15, 9, 8,
    51, 50, 40, 41, 46, 27, 48, 45, 19, 18,
    52, 60, 61, 24, 23, 66, 65, 55, 56, 28,
    71, 70, 33, 34, 73, 74, 77, 49, 39, 38,
    72, 53, 54, 42, 43, 44, 47, 75, 87, 57,
    91, 90, 80, 81, 62, 94, 84, 89, 59, 58,
    101, 93, 63, 64, 105, 97, 67, 95, 69, 68,
    111, 110, 100, 85, 82, 83, 117, 76, 79, 78,
    112, 113, 114, 115, 116, 86, 118, 119, 96, 88,
    102, 103, 104, 92, 106, 107, 108, 109, 99, 98,
];

/// Dimensions of the available tiles, as `(width, height)`.
pub const TILE_SIZES: [(usize, usize); 9] = [
    (6, 6),
    (8, 6),
    (6, 8),
    (8, 8),
    (10, 8),
    (8, 10),
    (10, 10),
    (12, 10),
    (10, 12),
];

fn table(width: usize, height: usize) -> Option<&'static [i32]> {
    let t: &'static [i32] = match (width, height) {
        (6, 6) => &TILE_6X6,
        (8, 6) => &TILE_8X6,
        (6, 8) => &TILE_6X8,
        (8, 8) => &TILE_8X8,
        (10, 8) => &TILE_10X8,
        (8, 10) => &TILE_8X10,
        (10, 10) => &TILE_10X10,
        (12, 10) => &TILE_12X10,
        (10, 12) => &TILE_10X12,
        _ => return None,
    };
    Some(t)
}

#[inline]
pub fn has_tile(width: usize, height: usize) -> bool {
    table(width, height).is_some()
}

/// The tile for an exact `(width, height)` match, as an undirected board.
pub fn base_tile(width: usize, height: usize) -> Option<Board> {
    let t = table(width, height)?;
    Board::from_moves(t, width, height).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tile_is_a_closed_knights_tour() {
        for (w, h) in TILE_SIZES {
            let b = base_tile(w, h).unwrap();
            assert!(b.is_tour(), "{w}x{h}");
            for c in 0..b.size() {
                let d = b.get(c).unwrap();
                assert!(b.is_knight_move(c, d), "{w}x{h} cell {c}");
            }
        }
    }

    #[test]
    fn unknown_sizes_have_no_tile() {
        assert!(base_tile(12, 12).is_none());
        assert!(!has_tile(4, 4));
        assert!(has_tile(12, 10));
    }
}
