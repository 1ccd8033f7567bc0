/* ************************************************************************ **
** This file is part of rsp2, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of rsp2 is provided under this permissive license, **
** and that the project as a whole is licensed under the GPL 3.0.           **
** ************************************************************************ */

//! Traversal orders.
//!
//! An order is a bijection between sequence indices `0..rows * cols` and
//! logical coordinates.  Orders are tiny `Copy` values that remember the
//! shape they were made for; cursors carry one around so that they never
//! need to consult the matrix to step.

use ::std::fmt;
use ::std::ops::Range;

/// A numbering of every element of a `rows x cols` grid.
pub trait Order: Copy + PartialEq + fmt::Debug {
    /// Short name used in messages.
    const NAME: &'static str;

    fn for_shape(rows: usize, cols: usize) -> Self;

    fn dims(&self) -> (usize, usize);

    fn len(&self) -> usize
    { let (rows, cols) = self.dims(); rows * cols }

    /// Logical `(row, col)` of sequence index `k < len()`.
    fn coords(&self, k: usize) -> (usize, usize);

    /// Sequence index of `(row, col)`.  Inverse of `coords`.
    fn index_of(&self, row: usize, col: usize) -> usize;
}

/// An order that visits whole diagonals one after another.
///
/// Diagonals are numbered relative to the one starting at the corner where
/// the order's main diagonal begins: `0` is the main diagonal, positive
/// numbers lie above it and negative numbers below it.
pub trait DiagonalOrder: Order {
    /// The diagonal that `(row, col)` lies on.
    fn diagonal_of(&self, row: usize, col: usize) -> isize;

    /// First element of diagonal `diag`, or `None` if there is no such diagonal.
    fn diagonal_start(&self, diag: isize) -> Option<(usize, usize)>;

    /// Number of elements on diagonal `diag` (zero if there is no such diagonal).
    fn diagonal_len(&self, diag: isize) -> usize;

    /// Sequence indices of the elements on diagonal `diag`.
    fn diagonal_range(&self, diag: isize) -> Option<Range<usize>>
    {
        let (row, col) = self.diagonal_start(diag)?;
        let start = self.index_of(row, col);
        // a diagonal occupies consecutive sequence indices
        Some(start..start + self.diagonal_len(diag))
    }

    /// Coordinates of element `pos` along diagonal `diag`.
    fn diagonal_coords(&self, diag: isize, pos: usize) -> Option<(usize, usize)>
    {
        let range = self.diagonal_range(diag)?;
        match pos < range.len() {
            true => Some(self.coords(range.start + pos)),
            false => None,
        }
    }
}

/// Row-major ("Z") order: across each row, then down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMajor { rows: usize, cols: usize }

/// Column-major ("N") order: down each column, then across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMajor { rows: usize, cols: usize }

/// Diagonal ("D") order.
///
/// Diagonals are visited from the bottom-left corner to the top-right corner,
/// each one from its top-left end to its bottom-right end.  Diagonal `d`
/// holds the elements with `col - row == d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagonal { rows: usize, cols: usize }

/// Anti-diagonal ("M") order.
///
/// The diagonal order of the column-mirrored matrix: anti-diagonals are
/// visited from the bottom-right corner to the top-left corner, each one
/// from its top-right end to its bottom-left end.  Anti-diagonal `d` holds
/// the elements with `(cols - 1 - col) - row == d`, so `0` is the one
/// starting at the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntiDiagonal { inner: Diagonal }

impl Order for RowMajor {
    const NAME: &'static str = "row-major";

    fn for_shape(rows: usize, cols: usize) -> Self { RowMajor { rows, cols } }
    fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }

    #[inline]
    fn coords(&self, k: usize) -> (usize, usize)
    { (k / self.cols, k % self.cols) }

    #[inline]
    fn index_of(&self, row: usize, col: usize) -> usize
    { row * self.cols + col }
}

impl Order for ColumnMajor {
    const NAME: &'static str = "column-major";

    fn for_shape(rows: usize, cols: usize) -> Self { ColumnMajor { rows, cols } }
    fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }

    #[inline]
    fn coords(&self, k: usize) -> (usize, usize)
    { (k % self.rows, k / self.rows) }

    #[inline]
    fn index_of(&self, row: usize, col: usize) -> usize
    { col * self.rows + row }
}

// Diagonal lengths run 1, 2, ..., m-1, then m repeated |rows - cols| + 1
// times, then m-1, ..., 1 (where m is the shorter side).  The sequence is a
// palindrome, which is what lets the tail be handled by reflection.
impl Diagonal {
    fn short_side(&self) -> usize { self.rows.min(self.cols) }

    fn num_diagonals(&self) -> usize { self.rows + self.cols - 1 }

    // elements on the ramp of diagonals shorter than m
    fn ramp_len(&self) -> usize
    { let m = self.short_side(); m * (m - 1) / 2 }

    // number of diagonals of full length m
    fn plateau(&self) -> usize
    { self.rows.max(self.cols) - self.short_side() + 1 }

    // diagonal position t (in visiting order) -> diagonal number
    fn number(&self, t: usize) -> isize
    { t as isize - (self.rows as isize - 1) }

    fn position(&self, diag: isize) -> Option<usize>
    {
        let t = diag + (self.rows as isize - 1);
        match 0 <= t && t < self.num_diagonals() as isize {
            true => Some(t as usize),
            false => None,
        }
    }

    /// Elements preceding the diagonal at position `t`.
    fn elements_before(&self, t: usize) -> usize
    {
        let m = self.short_side();
        if t < m {
            t * (t + 1) / 2
        } else if t < m + self.plateau() {
            self.ramp_len() + (t - (m - 1)) * m
        } else {
            self.len() - self.elements_before(self.num_diagonals() - t)
        }
    }

    // (t, p) for an index inside the leading ramp
    fn ramp_coords(k: usize) -> (usize, usize)
    {
        let t = (::num_integer::sqrt(8 * k + 1) - 1) / 2;
        (t, k - t * (t + 1) / 2)
    }

    fn start(&self, t: usize) -> (usize, usize)
    {
        let d = self.number(t);
        match d < 0 {
            true => ((-d) as usize, 0),
            false => (0, d as usize),
        }
    }
}

impl Order for Diagonal {
    const NAME: &'static str = "diagonal";

    fn for_shape(rows: usize, cols: usize) -> Self { Diagonal { rows, cols } }
    fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }

    fn coords(&self, k: usize) -> (usize, usize)
    {
        debug_assert!(k < self.len());
        let m = self.short_side();
        let ramp = self.ramp_len();
        let (t, p) = if k < ramp {
            Diagonal::ramp_coords(k)
        } else if k < ramp + self.plateau() * m {
            ((m - 1) + (k - ramp) / m, (k - ramp) % m)
        } else {
            let (t, p) = Diagonal::ramp_coords(self.len() - 1 - k);
            (self.num_diagonals() - 1 - t, t - p)
        };
        let (r0, c0) = self.start(t);
        (r0 + p, c0 + p)
    }

    fn index_of(&self, row: usize, col: usize) -> usize
    {
        let t = (col + self.rows - 1) - row;
        self.elements_before(t) + row.min(col)
    }
}

impl DiagonalOrder for Diagonal {
    fn diagonal_of(&self, row: usize, col: usize) -> isize
    { col as isize - row as isize }

    fn diagonal_start(&self, diag: isize) -> Option<(usize, usize)>
    { self.position(diag).map(|t| self.start(t)) }

    fn diagonal_len(&self, diag: isize) -> usize
    {
        match self.diagonal_start(diag) {
            Some((r0, c0)) => (self.rows - r0).min(self.cols - c0),
            None => 0,
        }
    }
}

impl AntiDiagonal {
    #[inline]
    fn mirror(&self, (row, col): (usize, usize)) -> (usize, usize)
    { (row, self.inner.cols - 1 - col) }
}

impl Order for AntiDiagonal {
    const NAME: &'static str = "anti-diagonal";

    fn for_shape(rows: usize, cols: usize) -> Self
    { AntiDiagonal { inner: Diagonal::for_shape(rows, cols) } }

    fn dims(&self) -> (usize, usize) { self.inner.dims() }

    fn coords(&self, k: usize) -> (usize, usize)
    { self.mirror(self.inner.coords(k)) }

    fn index_of(&self, row: usize, col: usize) -> usize
    {
        let (row, col) = self.mirror((row, col));
        self.inner.index_of(row, col)
    }
}

impl DiagonalOrder for AntiDiagonal {
    fn diagonal_of(&self, row: usize, col: usize) -> isize
    {
        let (row, col) = self.mirror((row, col));
        self.inner.diagonal_of(row, col)
    }

    fn diagonal_start(&self, diag: isize) -> Option<(usize, usize)>
    { self.inner.diagonal_start(diag).map(|rc| self.mirror(rc)) }

    fn diagonal_len(&self, diag: isize) -> usize
    { self.inner.diagonal_len(diag) }
}

#[cfg(test)]
#[deny(dead_code)]
mod tests {
    use super::*;
    use rand::Rng;

    fn check_bijection<O: Order>(order: O)
    {
        let (rows, cols) = order.dims();
        let mut seen = vec![false; order.len()];
        for k in 0..order.len() {
            let (r, c) = order.coords(k);
            assert!(r < rows && c < cols, "{:?}: {} -> {:?}", order, k, (r, c));
            assert_eq!(order.index_of(r, c), k, "{:?}: {} -> {:?}", order, k, (r, c));
            assert!(!seen[k]);
            seen[k] = true;
        }
    }

    #[test]
    fn orders_are_bijections()
    {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let (rows, cols) = (rng.gen_range(1, 20), rng.gen_range(1, 20));
            check_bijection(RowMajor::for_shape(rows, cols));
            check_bijection(ColumnMajor::for_shape(rows, cols));
            check_bijection(Diagonal::for_shape(rows, cols));
            check_bijection(AntiDiagonal::for_shape(rows, cols));
        }
    }

    #[test]
    fn diagonal_visits_whole_diagonals_in_order()
    {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let order = Diagonal::for_shape(rng.gen_range(1, 15), rng.gen_range(1, 15));
            let diags: Vec<_> = (0..order.len())
                .map(|k| order.coords(k))
                .map(|(r, c)| order.diagonal_of(r, c))
                .collect();
            // nondecreasing, consecutive, and each diagonal walked downward
            for k in 1..diags.len() {
                assert!(diags[k] == diags[k - 1] || diags[k] == diags[k - 1] + 1);
                if diags[k] == diags[k - 1] {
                    let (prev, cur) = (order.coords(k - 1), order.coords(k));
                    assert_eq!((prev.0 + 1, prev.1 + 1), cur);
                }
            }
        }
    }

    #[test]
    fn diagonal_fixtures()
    {
        let order = Diagonal::for_shape(3, 2);
        let coords: Vec<_> = (0..6).map(|k| order.coords(k)).collect();
        assert_eq!(coords, vec![(2, 0), (1, 0), (2, 1), (0, 0), (1, 1), (0, 1)]);

        assert_eq!(order.diagonal_start(-2), Some((2, 0)));
        assert_eq!(order.diagonal_start(1), Some((0, 1)));
        assert_eq!(order.diagonal_start(2), None);
        assert_eq!(order.diagonal_start(-3), None);
        assert_eq!(order.diagonal_len(0), 2);
        assert_eq!(order.diagonal_len(-2), 1);
        assert_eq!(order.diagonal_range(-1), Some(1..3));
        assert_eq!(order.diagonal_range(1), Some(5..6));
        assert_eq!(order.diagonal_coords(-1, 1), Some((2, 1)));
        assert_eq!(order.diagonal_coords(-1, 2), None);
    }

    #[test]
    fn anti_diagonal_fixtures()
    {
        let order = AntiDiagonal::for_shape(2, 3);
        let coords: Vec<_> = (0..6).map(|k| order.coords(k)).collect();
        assert_eq!(coords, vec![(1, 2), (0, 2), (1, 1), (0, 1), (1, 0), (0, 0)]);

        assert_eq!(order.diagonal_of(0, 2), 0);
        assert_eq!(order.diagonal_of(1, 1), 0);
        assert_eq!(order.diagonal_of(0, 0), 2);
        assert_eq!(order.diagonal_start(0), Some((0, 2)));
        assert_eq!(order.diagonal_start(-1), Some((1, 2)));
        assert_eq!(order.diagonal_len(0), 2);
    }

    #[test]
    fn simple_orders()
    {
        let z = RowMajor::for_shape(2, 3);
        let n = ColumnMajor::for_shape(2, 3);
        assert_eq!(z.coords(4), (1, 1));
        assert_eq!(n.coords(4), (0, 2));
        assert_eq!(z.index_of(1, 0), 3);
        assert_eq!(n.index_of(1, 0), 1);
    }
}
