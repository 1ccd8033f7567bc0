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

//! Everything on `Matrix` that hands out an iterator.
//!
//! Each factory is generic over the direction (and the order, where more
//! than one makes sense), and comes in a read-only and a `_mut` form.
//! All of them fail with `OutOfRange` on an empty matrix.

use super::cursor::{Cursor, Direction, Forward, Window};
use super::order::{AntiDiagonal, ColumnMajor, Diagonal, DiagonalOrder, Order, RowMajor};
use super::view::{Iter, IterMut, Traverse, TraverseMut};
use crate::errors::{Error, Result};
use crate::matrix::Matrix;

// Private cursor builders.  The public methods below only attach these.
impl<T> Matrix<T> {
    fn order_for<O: Order>(&self) -> O
    { O::for_shape(self.num_rows(), self.num_cols()) }

    fn check_nonempty(&self, what: &str) -> Result<()>
    {
        if self.is_empty() {
            throw!(Error::OutOfRange(format!("cannot take {} of an empty matrix", what)));
        }
        Ok(())
    }

    fn check_coords(&self, row: usize, col: usize) -> Result<()>
    {
        if !(row < self.num_rows() && col < self.num_cols()) {
            throw!(Error::OutOfRange(format!(
                "({}, {}) is outside a {}x{} matrix", row, col, self.num_rows(), self.num_cols(),
            )));
        }
        Ok(())
    }

    fn whole_cursor<O: Order, D: Direction>(&self, at_end: bool) -> Result<Cursor<O, D>>
    {
        self.check_nonempty(O::NAME)?;
        let window = Window::new(0, self.size());
        Ok(match at_end {
            false => Cursor::at_begin(self.origin(), self.order_for(), window),
            true => Cursor::at_end(self.origin(), self.order_for(), window),
        })
    }

    fn index_cursor<O: Order, D: Direction>(&self, index: usize) -> Result<Cursor<O, D>>
    {
        self.check_nonempty(O::NAME)?;
        if index >= self.size() {
            throw!(Error::OutOfRange(format!(
                "sequence index {} is outside a matrix of {} elements", index, self.size(),
            )));
        }
        Ok(Cursor::at_index(self.origin(), self.order_for(), Window::new(0, self.size()), index))
    }

    fn coords_cursor<O: Order, D: Direction>(&self, row: usize, col: usize) -> Result<Cursor<O, D>>
    {
        self.check_coords(row, col)?;
        let index = self.order_for::<O>().index_of(row, col);
        self.index_cursor(index)
    }

    fn row_cursor<D: Direction>(&self, row: usize, at_end: bool) -> Result<Cursor<RowMajor, D>>
    {
        if row >= self.num_rows() {
            throw!(Error::OutOfRange(format!("row {} of a matrix with {} rows", row, self.num_rows())));
        }
        let cols = self.num_cols();
        let window = Window::new(row * cols, (row + 1) * cols);
        Ok(match at_end {
            false => Cursor::at_begin(self.origin(), self.order_for(), window),
            true => Cursor::at_end(self.origin(), self.order_for(), window),
        })
    }

    fn column_cursor<D: Direction>(&self, col: usize, at_end: bool) -> Result<Cursor<ColumnMajor, D>>
    {
        if col >= self.num_cols() {
            throw!(Error::OutOfRange(format!("column {} of a matrix with {} columns", col, self.num_cols())));
        }
        let rows = self.num_rows();
        let window = Window::new(col * rows, (col + 1) * rows);
        Ok(match at_end {
            false => Cursor::at_begin(self.origin(), self.order_for(), window),
            true => Cursor::at_end(self.origin(), self.order_for(), window),
        })
    }

    // The window runs from (row, col) to the end of its diagonal in the
    // direction of travel, so that the begin position is always (row, col).
    fn diagonal_cursor_at<O: DiagonalOrder, D: Direction>(&self, row: usize, col: usize, at_end: bool) -> Result<Cursor<O, D>>
    {
        self.check_coords(row, col)?;
        let order = self.order_for::<O>();
        let index = order.index_of(row, col);
        let range = match order.diagonal_range(order.diagonal_of(row, col)) {
            Some(range) => range,
            None => unreachable!("({}, {}) lies on no {}", row, col, O::NAME),
        };
        let window = match D::REVERSED {
            false => Window::new(index, range.end),
            true => Window::new(range.start, index + 1),
        };
        Ok(match at_end {
            false => Cursor::at_begin(self.origin(), order, window),
            true => Cursor::at_end(self.origin(), order, window),
        })
    }

    fn diagonal_cursor<O: DiagonalOrder, D: Direction>(&self, diag: isize, pos: usize) -> Result<Cursor<O, D>>
    {
        self.check_nonempty(O::NAME)?;
        match self.order_for::<O>().diagonal_coords(diag, pos) {
            Some((row, col)) => self.diagonal_cursor_at(row, col, false),
            None => throw!(Error::OutOfRange(format!(
                "there is no element {} on {} {} of a {}x{} matrix",
                pos, O::NAME, diag, self.num_rows(), self.num_cols(),
            ))),
        }
    }

    fn diagonal_end_cursor<O: DiagonalOrder, D: Direction>(&self, diag: isize) -> Result<Cursor<O, D>>
    {
        self.check_nonempty(O::NAME)?;
        let order = self.order_for::<O>();
        match order.diagonal_range(diag) {
            Some(range) => Ok(Cursor::at_end(self.origin(), order, Window::new(range.start, range.end))),
            None => throw!(Error::OutOfRange(format!(
                "there is no {} {} in a {}x{} matrix", O::NAME, diag, self.num_rows(), self.num_cols(),
            ))),
        }
    }
}

/// # Iterators over the whole matrix
impl<T> Matrix<T> {
    pub fn begin<O: Order, D: Direction>(&self) -> Result<Iter<'_, T, O, D>>
    { Ok(Iter::new(self, self.whole_cursor(false)?)) }

    pub fn end<O: Order, D: Direction>(&self) -> Result<Iter<'_, T, O, D>>
    { Ok(Iter::new(self, self.whole_cursor(true)?)) }

    pub fn begin_mut<O: Order, D: Direction>(&mut self) -> Result<IterMut<'_, T, O, D>>
    { let cursor = self.whole_cursor(false)?; Ok(IterMut::new(self, cursor)) }

    pub fn end_mut<O: Order, D: Direction>(&mut self) -> Result<IterMut<'_, T, O, D>>
    { let cursor = self.whole_cursor(true)?; Ok(IterMut::new(self, cursor)) }

    /// Whole-matrix iterator positioned at `(row, col)`.
    pub fn iter_at<O: Order, D: Direction>(&self, row: usize, col: usize) -> Result<Iter<'_, T, O, D>>
    { Ok(Iter::new(self, self.coords_cursor(row, col)?)) }

    pub fn iter_at_mut<O: Order, D: Direction>(&mut self, row: usize, col: usize) -> Result<IterMut<'_, T, O, D>>
    { let cursor = self.coords_cursor(row, col)?; Ok(IterMut::new(self, cursor)) }

    /// Whole-matrix iterator positioned at sequence index `index` of order `O`.
    pub fn iter_at_index<O: Order, D: Direction>(&self, index: usize) -> Result<Iter<'_, T, O, D>>
    { Ok(Iter::new(self, self.index_cursor(index)?)) }

    pub fn iter_at_index_mut<O: Order, D: Direction>(&mut self, index: usize) -> Result<IterMut<'_, T, O, D>>
    { let cursor = self.index_cursor(index)?; Ok(IterMut::new(self, cursor)) }

    /// Every element, in order `O`.
    ///
    /// Unlike the positional factories, this is simply empty for an empty matrix.
    pub fn traverse<O: Order, D: Direction>(&self) -> Traverse<'_, T, O, D>
    {
        match self.whole_cursor::<O, D>(false) {
            Ok(begin) => Traverse::over(self, begin),
            Err(_) => Traverse::empty(self),
        }
    }

    pub fn traverse_mut<O: Order, D: Direction>(&mut self) -> TraverseMut<'_, T>
    {
        let order = self.order_for::<O>();
        let size = self.size();
        let coords = (0..size).map(move |i| match D::REVERSED {
            false => order.coords(i),
            true => order.coords(size - 1 - i),
        });
        TraverseMut::new(self.cells_mut(coords))
    }
}

/// # Scoped iterators
impl<T> Matrix<T> {
    /// Row-major iterator confined to one row.
    pub fn row_begin<D: Direction>(&self, row: usize) -> Result<Iter<'_, T, RowMajor, D>>
    { Ok(Iter::new(self, self.row_cursor(row, false)?)) }

    pub fn row_end<D: Direction>(&self, row: usize) -> Result<Iter<'_, T, RowMajor, D>>
    { Ok(Iter::new(self, self.row_cursor(row, true)?)) }

    pub fn row_begin_mut<D: Direction>(&mut self, row: usize) -> Result<IterMut<'_, T, RowMajor, D>>
    { let cursor = self.row_cursor(row, false)?; Ok(IterMut::new(self, cursor)) }

    pub fn row_end_mut<D: Direction>(&mut self, row: usize) -> Result<IterMut<'_, T, RowMajor, D>>
    { let cursor = self.row_cursor(row, true)?; Ok(IterMut::new(self, cursor)) }

    /// Column-major iterator confined to one column.
    pub fn column_begin<D: Direction>(&self, col: usize) -> Result<Iter<'_, T, ColumnMajor, D>>
    { Ok(Iter::new(self, self.column_cursor(col, false)?)) }

    pub fn column_end<D: Direction>(&self, col: usize) -> Result<Iter<'_, T, ColumnMajor, D>>
    { Ok(Iter::new(self, self.column_cursor(col, true)?)) }

    pub fn column_begin_mut<D: Direction>(&mut self, col: usize) -> Result<IterMut<'_, T, ColumnMajor, D>>
    { let cursor = self.column_cursor(col, false)?; Ok(IterMut::new(self, cursor)) }

    pub fn column_end_mut<D: Direction>(&mut self, col: usize) -> Result<IterMut<'_, T, ColumnMajor, D>>
    { let cursor = self.column_cursor(col, true)?; Ok(IterMut::new(self, cursor)) }

    /// Iterator over the (anti-)diagonal through `(row, col)`, starting there.
    pub fn diagonal_begin_at<O, D>(&self, row: usize, col: usize) -> Result<Iter<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { Ok(Iter::new(self, self.diagonal_cursor_at(row, col, false)?)) }

    /// End of the (anti-)diagonal through `(row, col)`.
    pub fn diagonal_end_at<O, D>(&self, row: usize, col: usize) -> Result<Iter<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { Ok(Iter::new(self, self.diagonal_cursor_at(row, col, true)?)) }

    pub fn diagonal_begin_at_mut<O, D>(&mut self, row: usize, col: usize) -> Result<IterMut<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { let cursor = self.diagonal_cursor_at(row, col, false)?; Ok(IterMut::new(self, cursor)) }

    pub fn diagonal_end_at_mut<O, D>(&mut self, row: usize, col: usize) -> Result<IterMut<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { let cursor = self.diagonal_cursor_at(row, col, true)?; Ok(IterMut::new(self, cursor)) }

    /// Iterator over diagonal `diag`, starting `pos` elements along it.
    ///
    /// Diagonal `0` is the main one, positive diagonals lie above it and
    /// negative ones below.
    pub fn diagonal_begin<O, D>(&self, diag: isize, pos: usize) -> Result<Iter<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { Ok(Iter::new(self, self.diagonal_cursor(diag, pos)?)) }

    /// End of diagonal `diag`.
    pub fn diagonal_end<O, D>(&self, diag: isize) -> Result<Iter<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { Ok(Iter::new(self, self.diagonal_end_cursor(diag)?)) }

    pub fn diagonal_begin_mut<O, D>(&mut self, diag: isize, pos: usize) -> Result<IterMut<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { let cursor = self.diagonal_cursor(diag, pos)?; Ok(IterMut::new(self, cursor)) }

    pub fn diagonal_end_mut<O, D>(&mut self, diag: isize) -> Result<IterMut<'_, T, O, D>>
    where O: DiagonalOrder, D: Direction,
    { let cursor = self.diagonal_end_cursor(diag)?; Ok(IterMut::new(self, cursor)) }
}

/// # Detached positions
impl<T> Matrix<T> {
    /// Turn a cursor back into an iterator.
    ///
    /// Fails with `CrossOrigin` if the cursor came from another matrix, or
    /// from this one before its last structural change.
    pub fn attach<O: Order, D: Direction>(&self, cursor: Cursor<O, D>) -> Result<Iter<'_, T, O, D>>
    {
        cursor.check_origin(self.origin())?;
        Ok(Iter::new(self, cursor))
    }

    pub fn attach_mut<O: Order, D: Direction>(&mut self, cursor: Cursor<O, D>) -> Result<IterMut<'_, T, O, D>>
    {
        cursor.check_origin(self.origin())?;
        Ok(IterMut::new(self, cursor))
    }
}

macro_rules! order_shorthands {
    ($(
        [$Order:ty, $name:expr]
        $begin:ident $end:ident $begin_mut:ident $end_mut:ident $iter:ident
    )*) => {
        /// # Shorthands for each order
        impl<T> Matrix<T> {$(
            #[doc = "Start of the whole matrix in "] #[doc = $name] #[doc = " order."]
            pub fn $begin<D: Direction>(&self) -> Result<Iter<'_, T, $Order, D>>
            { self.begin() }

            #[doc = "End of the whole matrix in "] #[doc = $name] #[doc = " order."]
            pub fn $end<D: Direction>(&self) -> Result<Iter<'_, T, $Order, D>>
            { self.end() }

            pub fn $begin_mut<D: Direction>(&mut self) -> Result<IterMut<'_, T, $Order, D>>
            { self.begin_mut() }

            pub fn $end_mut<D: Direction>(&mut self) -> Result<IterMut<'_, T, $Order, D>>
            { self.end_mut() }

            #[doc = "Every element, in "] #[doc = $name] #[doc = " order."]
            pub fn $iter(&self) -> Traverse<'_, T, $Order, Forward>
            { self.traverse() }
        )*}
    };
}

order_shorthands! {
    [RowMajor, "row-major"] z_begin z_end z_begin_mut z_end_mut z_iter
    [ColumnMajor, "column-major"] n_begin n_end n_begin_mut n_end_mut n_iter
    [Diagonal, "diagonal"] d_begin d_end d_begin_mut d_end_mut d_iter
    [AntiDiagonal, "anti-diagonal"] m_begin m_end m_begin_mut m_end_mut m_iter
}
