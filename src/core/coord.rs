use std::ops::{Add, Sub};

/// A column/row position, or the difference between two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if this delta is one of the eight knight steps.
    #[inline]
    pub fn is_knight_step(self) -> bool {
        let (ax, ay) = (self.x.abs(), self.y.abs());
        (ax == 1 && ay == 2) || (ax == 2 && ay == 1)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The 8 knight steps, counter-clockwise from (2,-1) with y growing downwards.
///
/// The position of a step in this table is its *move index*. Indices 4..8 are the
/// "downward" steps (positive y).
pub const KNIGHT_STEPS: [Coord; 8] = [
    Coord { x: 2, y: -1 },
    Coord { x: 1, y: -2 },
    Coord { x: -1, y: -2 },
    Coord { x: -2, y: -1 },
    Coord { x: -2, y: 1 },
    Coord { x: -1, y: 2 },
    Coord { x: 1, y: 2 },
    Coord { x: 2, y: 1 },
];

/// Move indices of the downward half of [`KNIGHT_STEPS`].
pub const DOWNWARD: std::ops::Range<usize> = 4..8;

/// Move index of a knight step, or `None` if `delta` is not a knight step.
#[inline]
pub fn move_index(delta: Coord) -> Option<usize> {
    KNIGHT_STEPS.iter().position(|&s| s == delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_indices_follow_table_order() {
        for (i, &s) in KNIGHT_STEPS.iter().enumerate() {
            assert_eq!(move_index(s), Some(i));
            assert!(s.is_knight_step());
        }
        assert_eq!(move_index(Coord::new(1, 1)), None);
        assert_eq!(move_index(Coord::new(0, 0)), None);
    }

    #[test]
    fn downward_steps_have_positive_y() {
        for i in 0..8 {
            assert_eq!(DOWNWARD.contains(&i), KNIGHT_STEPS[i].y > 0);
        }
    }

    #[test]
    fn opposite_steps_are_four_apart() {
        for i in 0..8 {
            let s = KNIGHT_STEPS[i];
            assert_eq!(Coord::new(-s.x, -s.y), KNIGHT_STEPS[(i + 4) % 8]);
        }
    }
}
