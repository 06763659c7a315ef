//! Extents and diagonal ranges
//!
//! A diagonal offset is `col - row`. A [`DiagonalRange`] names the offsets
//! that may hold a nonzero value; every position outside it is logically
//! zero. Rectangular, triangular, diagonal and banded patterns are all
//! expressed as a range, clipped to the extent.

/// Row and column count of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
}

impl Extent {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn square(order: usize) -> Self {
        Self {
            rows: order,
            cols: order,
        }
    }

    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Inclusive range of diagonal offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagonalRange {
    first: isize,
    last: isize,
}

impl DiagonalRange {
    /// Create a range; `first` must not exceed `last`
    pub const fn new(first: isize, last: isize) -> Self {
        debug_assert!(first <= last);
        Self { first, last }
    }

    /// Range holding no diagonal
    pub const fn empty() -> Self {
        Self { first: 0, last: -1 }
    }

    /// Every position of a `rows x cols` matrix
    pub const fn full(rows: usize, cols: usize) -> Self {
        Self::new(1 - rows as isize, cols as isize - 1)
    }

    /// Main diagonal and everything below it
    pub const fn lower(rows: usize) -> Self {
        Self::new(1 - rows as isize, 0)
    }

    /// Main diagonal and everything above it
    pub const fn upper(cols: usize) -> Self {
        Self::new(0, cols as isize - 1)
    }

    /// `diags` diagonals centred on the main diagonal (`diags` odd)
    pub const fn centered(diags: usize) -> Self {
        let half = (diags / 2) as isize;
        Self::new(-half, half)
    }

    pub const fn first(&self) -> isize {
        self.first
    }

    pub const fn last(&self) -> isize {
        self.last
    }

    pub const fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Number of diagonals in the range
    pub const fn diags(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    /// Whether `(row, col)` lies on a diagonal of the range
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        let offset = col as isize - row as isize;
        self.first <= offset && offset <= self.last
    }

    /// Restrict to the offsets that exist in a `rows x cols` matrix
    ///
    /// A range lying entirely outside the matrix clips to [`empty`](Self::empty).
    pub fn clipped(&self, rows: usize, cols: usize) -> Self {
        let first = self.first.max(1 - rows as isize);
        let last = self.last.min(cols as isize - 1);
        if first > last {
            Self::empty()
        } else {
            Self::new(first, last)
        }
    }

    /// Number of `rows x cols` positions on the diagonals of the range
    pub fn positions(&self, rows: usize, cols: usize) -> usize {
        let clipped = self.clipped(rows, cols);
        diagonal_slots(clipped.first, clipped.last + 1, rows, cols)
    }

    /// Positions on the diagonals from `first` up to, excluding, `diag`
    pub fn offset_of(&self, diag: isize, rows: usize, cols: usize) -> usize {
        let clipped = self.clipped(rows, cols);
        if clipped.is_empty() {
            return 0;
        }
        diagonal_slots(clipped.first, diag.max(clipped.first), rows, cols)
    }

    /// Column span `[start, stop]` of `row` inside the range and `cols`
    pub fn row_span(&self, row: usize, cols: usize) -> Option<(usize, usize)> {
        let start = (row as isize + self.first).max(0);
        let stop = (row as isize + self.last).min(cols as isize - 1);
        if start > stop {
            None
        } else {
            Some((start as usize, stop as usize))
        }
    }
}

/// Length of diagonal `diag` in a `rows x cols` matrix
pub const fn diagonal_len(diag: isize, rows: usize, cols: usize) -> usize {
    let (rows, cols) = (rows as isize, cols as isize);
    let len = if diag >= 0 {
        min(rows, cols - diag)
    } else {
        min(rows + diag, cols)
    };
    if len > 0 {
        len as usize
    } else {
        0
    }
}

const fn min(a: isize, b: isize) -> isize {
    if a < b {
        a
    } else {
        b
    }
}

/// `sum(min(cap, top - t))` for `t` in `[lo, hi)`, with `top - t >= 0`
const fn summin(cap: isize, top: isize, lo: isize, hi: isize) -> isize {
    if hi <= lo {
        return 0;
    }
    let mut split = top - cap + 1;
    if split < lo {
        split = lo;
    }
    if split > hi {
        split = hi;
    }
    let tail = hi - split;
    cap * (split - lo) + tail * top - tail * (split + hi - 1) / 2
}

/// Total length of the diagonals `[lo, hi)` of a `rows x cols` matrix
///
/// Closed form: lower diagonals `-t` have length `min(cols, rows - t)`,
/// upper diagonals `t` have length `min(rows, cols - t)`.
fn diagonal_slots(lo: isize, hi: isize, rows: usize, cols: usize) -> usize {
    let (r, c) = (rows as isize, cols as isize);
    let lower = if lo < 0 {
        summin(c, r, 1 - hi.min(0), 1 - lo)
    } else {
        0
    };
    let upper = if hi > 0 {
        summin(r, c, lo.max(0), hi)
    } else {
        0
    };
    (lower + upper) as usize
}
