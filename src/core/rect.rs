/// A half-open rectangle of board cells: columns `left..right`, rows `top..bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Rect {
    #[inline]
    pub const fn new(left: usize, right: usize, top: usize, bottom: usize) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The rectangle covering a whole `width x height` board.
    #[inline]
    pub const fn board(width: usize, height: usize) -> Self {
        Self::new(0, width, 0, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Split into four quadrants at column `midx` and row `midy`.
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right.
    pub fn quadrants(&self, midx: usize, midy: usize) -> [Rect; 4] {
        debug_assert!(self.left <= midx && midx <= self.right);
        debug_assert!(self.top <= midy && midy <= self.bottom);
        [
            Rect::new(self.left, midx, self.top, midy),
            Rect::new(midx, self.right, self.top, midy),
            Rect::new(self.left, midx, midy, self.bottom),
            Rect::new(midx, self.right, midy, self.bottom),
        ]
    }
}
