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

//! Mutators that change the shape or the layout of a matrix.
//!
//! All of these validate their arguments before touching any storage, so
//! an `Err` always means the matrix is unchanged.  Everything that changes
//! shape or moves the window bumps the structural revision.

use crate::capacity::{self, Axis, Dim, Layout, Shift};
use crate::errors::{Error, Result};
use crate::matrix::{Matrix, Source};

use ::std::ops::Range;

/// # Capacity
impl<T> Matrix<T> {
    /// Request capacity for at least `rows x cols` elements.
    ///
    /// Per axis: a request at or below the count does nothing; a request
    /// within the current capacity only recenters the window; a larger
    /// request reallocates to exactly the request (clamped to the dimension
    /// limit) and centers the window in it.  Empty matrices stay empty.
    pub fn reserve(&mut self, rows: usize, cols: usize)
    {
        if self.is_empty() {
            return;
        }
        let old = self.layout();
        let new = Layout {
            rows: old.rows.reserved(rows, self.dimension_limit()),
            cols: old.cols.reserved(cols, self.dimension_limit()),
        };
        if new == old {
            return;
        }

        if (new.rows.capacity, new.cols.capacity) != (old.rows.capacity, old.cols.capacity) {
            debug!(
                "reserve: reallocating {}x{} -> {}x{}",
                old.rows.capacity, old.cols.capacity, new.rows.capacity, new.cols.capacity,
            );
            self.relocate(new, |r, c| Source::Old(r, c));
        } else {
            trace!("reserve: recentering within {}x{}", new.rows.capacity, new.cols.capacity);
            let shift = (
                new.rows.offset as isize - old.rows.offset as isize,
                new.cols.offset as isize - old.cols.offset as isize,
            );
            self.translate(0..old.rows.count, 0..old.cols.count, shift);
            self.set_layout_unchecked(new);
            self.touch();
        }
    }
}

/// # Inserting and erasing rows and columns
impl<T> Matrix<T> {
    /// Insert a row of default values before row `pos` (`pos == num_rows()` appends).
    pub fn insert_row(&mut self, pos: usize) -> Result<()>
    where T: Default,
    { self.insert_line(Dim::Row, pos, |_| T::default()) }

    pub fn insert_row_filled(&mut self, pos: usize, fill: &T) -> Result<()>
    where T: Clone,
    { self.insert_line(Dim::Row, pos, |_| fill.clone()) }

    /// Insert a row whose element in column `c` is `f(c)`.
    pub fn insert_row_with<F>(&mut self, pos: usize, f: F) -> Result<()>
    where F: FnMut(usize) -> T,
    { self.insert_line(Dim::Row, pos, f) }

    /// Insert a column of default values before column `pos`.
    pub fn insert_column(&mut self, pos: usize) -> Result<()>
    where T: Default,
    { self.insert_line(Dim::Column, pos, |_| T::default()) }

    pub fn insert_column_filled(&mut self, pos: usize, fill: &T) -> Result<()>
    where T: Clone,
    { self.insert_line(Dim::Column, pos, |_| fill.clone()) }

    /// Insert a column whose element in row `r` is `f(r)`.
    pub fn insert_column_with<F>(&mut self, pos: usize, f: F) -> Result<()>
    where F: FnMut(usize) -> T,
    { self.insert_line(Dim::Column, pos, f) }

    /// Remove row `pos`.  Capacity is kept, unless this was the last row.
    pub fn erase_row(&mut self, pos: usize) -> Result<()>
    { self.erase_line(Dim::Row, pos) }

    /// Remove column `pos`.  Capacity is kept, unless this was the last column.
    pub fn erase_column(&mut self, pos: usize) -> Result<()>
    { self.erase_line(Dim::Column, pos) }

    fn insert_line<F>(&mut self, dim: Dim, pos: usize, mut fill: F) -> Result<()>
    where F: FnMut(usize) -> T,
    {
        let noun = dim.noun();
        if self.is_empty() {
            throw!(Error::OutOfRange(format!("cannot insert a {} into an empty matrix", noun)));
        }
        let axis = self.layout().axis(dim);
        let width = self.layout().axis(dim.other()).count;
        if pos > axis.count {
            throw!(Error::OutOfRange(format!(
                "cannot insert a {0} at {1} in a matrix with {2} {0}s", noun, pos, axis.count,
            )));
        }

        let shift = axis.plan_insert(pos);
        let new_axis = match shift {
            Shift::Front => Axis { count: axis.count + 1, offset: axis.offset - 1, ..axis },
            Shift::Back => Axis { count: axis.count + 1, ..axis },
            Shift::Reallocate => {
                let limit = self.dimension_limit();
                let capacity = match capacity::growth_capacity(axis.capacity, axis.count + 1, limit) {
                    Some(capacity) => capacity,
                    None => throw!(Error::CapacityExceeded(format!(
                        "a matrix with {} {}s is already at the dimension limit", axis.count, noun,
                    ))),
                };
                Axis::centered(axis.count + 1, capacity)
            },
        };
        let layout = self.layout().with_axis(dim, new_axis);

        match shift {
            Shift::Reallocate => {
                debug!("insert {}: reallocating {} capacity {} -> {}", noun, noun, axis.capacity, new_axis.capacity);
                self.relocate(layout, |r, c| {
                    let (along, across) = dim.along_across(r, c);
                    if along < pos {
                        Source::Old(r, c)
                    } else if along == pos {
                        Source::Fresh(fill(across))
                    } else {
                        let (r, c) = dim.coords(along - 1, across);
                        Source::Old(r, c)
                    }
                });
            },
            Shift::Front | Shift::Back => {
                trace!("insert {} at {}: shifting {:?}", noun, pos, shift);
                match shift {
                    Shift::Front => self.translate_lines(dim, 0..pos, -1),
                    _ => self.translate_lines(dim, pos..axis.count, 1),
                }
                self.set_layout_unchecked(layout);
                for across in 0..width {
                    let (r, c) = dim.coords(pos, across);
                    self.put_cell(r, c, fill(across));
                }
                self.touch();
            },
        }
        Ok(())
    }

    fn erase_line(&mut self, dim: Dim, pos: usize) -> Result<()>
    {
        let noun = dim.noun();
        let axis = self.layout().axis(dim);
        if pos >= axis.count {
            throw!(Error::OutOfRange(format!(
                "cannot erase {0} {1} from a matrix with {2} {0}s", noun, pos, axis.count,
            )));
        }
        if axis.count == 1 {
            trace!("erase {}: last one; matrix is now empty", noun);
            self.reset_empty();
            return Ok(());
        }

        let width = self.layout().axis(dim.other()).count;
        for across in 0..width {
            let (r, c) = dim.coords(pos, across);
            self.drop_cell(r, c);
        }

        let new_axis = match axis.plan_erase(pos) {
            Shift::Front => {
                self.translate_lines(dim, 0..pos, 1);
                Axis { count: axis.count - 1, offset: axis.offset + 1, ..axis }
            },
            Shift::Back => {
                self.translate_lines(dim, pos + 1..axis.count, -1);
                Axis { count: axis.count - 1, ..axis }
            },
            Shift::Reallocate => unreachable!("erasure never reallocates"),
        };
        let layout = self.layout().with_axis(dim, new_axis);
        self.set_layout_unchecked(layout);
        self.touch();
        Ok(())
    }

    /// Move the lines `run` along `dim` by `delta` slots.
    pub(crate) fn translate_lines(&mut self, dim: Dim, run: Range<usize>, delta: isize)
    {
        let (rows, cols) = self.dims();
        match dim {
            Dim::Row => self.translate(run, 0..cols, (delta, 0)),
            Dim::Column => self.translate(0..rows, run, (0, delta)),
        }
    }
}

/// # Resizing
impl<T> Matrix<T> {
    /// Resize, filling new cells with `T::default()`.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()>
    where T: Default,
    { self.resize_with(rows, cols, |_, _| T::default()) }

    pub fn resize_filled(&mut self, rows: usize, cols: usize, fill: &T) -> Result<()>
    where T: Clone,
    { self.resize_with(rows, cols, |_, _| fill.clone()) }

    /// Resize, filling each new cell `(r, c)` with `f(r, c)`.
    ///
    /// Each axis behaves like a run of insertions or erasures at its end:
    /// shrinking never gives up capacity, and growing stays inside the
    /// current buffer when the slack allows it.  A zero dimension empties
    /// the matrix.
    pub fn resize_with<F>(&mut self, rows: usize, cols: usize, mut f: F) -> Result<()>
    where F: FnMut(usize, usize) -> T,
    {
        if rows == 0 || cols == 0 {
            if !self.is_empty() {
                self.reset_empty();
            }
            return Ok(());
        }
        self.check_counts_fit(rows, cols)?;

        if self.is_empty() {
            let layout = Layout::constructed((rows, cols), self.dimension_limit());
            self.relocate(layout, |r, c| Source::Fresh(f(r, c)));
            return Ok(());
        }

        let old = self.layout();
        if old.dims() == (rows, cols) {
            return Ok(());
        }
        let limit = self.dimension_limit();
        let new = match (old.rows.resized(rows, limit), old.cols.resized(cols, limit)) {
            (Some(rows), Some(cols)) => Layout { rows, cols },
            _ => unreachable!("counts were checked against the limit"),
        };
        let (keep_rows, keep_cols) = (rows.min(old.rows.count), cols.min(old.cols.count));
        let kept = |r: usize, c: usize| r < keep_rows && c < keep_cols;

        if (new.rows.capacity, new.cols.capacity) != (old.rows.capacity, old.cols.capacity) {
            debug!(
                "resize: reallocating {}x{} -> {}x{}",
                old.rows.capacity, old.cols.capacity, new.rows.capacity, new.cols.capacity,
            );
            self.relocate(new, |r, c| match kept(r, c) {
                true => Source::Old(r, c),
                false => Source::Fresh(f(r, c)),
            });
            return Ok(());
        }

        for (r, c) in iproduct!(0..old.rows.count, 0..old.cols.count) {
            if !kept(r, c) {
                self.drop_cell(r, c);
            }
        }
        let shift = (
            new.rows.offset as isize - old.rows.offset as isize,
            new.cols.offset as isize - old.cols.offset as isize,
        );
        self.translate(0..keep_rows, 0..keep_cols, shift);
        self.set_layout_unchecked(new);
        for (r, c) in iproduct!(0..rows, 0..cols) {
            if !kept(r, c) {
                self.put_cell(r, c, f(r, c));
            }
        }
        self.touch();
        Ok(())
    }
}

/// # Rearranging
impl<T> Matrix<T> {
    /// Transpose in place.
    ///
    /// Row and column capacities trade places.  A square matrix whose axes
    /// share one layout swaps elements without moving anything else; any
    /// other square matrix also trades offsets, and a non-square matrix is
    /// recentered in the swapped capacities.
    pub fn transpose(&mut self)
    {
        if self.is_empty() {
            return;
        }
        let old = self.layout();
        if old.rows == old.cols {
            for r in 0..old.rows.count {
                for c in r + 1..old.cols.count {
                    self.swap_cells((r, c), (c, r));
                }
            }
            self.touch();
            return;
        }

        let new = match self.is_square() {
            true => Layout { rows: old.cols, cols: old.rows },
            false => Layout {
                rows: Axis::centered(old.cols.count, old.cols.capacity),
                cols: Axis::centered(old.rows.count, old.rows.capacity),
            },
        };
        debug!("transpose: {}x{} buffer -> {}x{}", old.rows.capacity, old.cols.capacity, new.rows.capacity, new.cols.capacity);
        self.relocate(new, |r, c| Source::Old(c, r));
    }

    /// Exchange two rows.  Elements move, positions stay valid.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()>
    { self.swap_lines(Dim::Row, a, b) }

    /// Exchange two columns.  Elements move, positions stay valid.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> Result<()>
    { self.swap_lines(Dim::Column, a, b) }

    fn swap_lines(&mut self, dim: Dim, a: usize, b: usize) -> Result<()>
    {
        let count = self.layout().axis(dim).count;
        for &pos in &[a, b] {
            if pos >= count {
                throw!(Error::OutOfRange(format!(
                    "{0} {1} does not exist in a matrix with {2} {0}s", dim.noun(), pos, count,
                )));
            }
        }
        if a != b {
            for across in 0..self.layout().axis(dim.other()).count {
                self.swap_cells(dim.coords(a, across), dim.coords(b, across));
            }
        }
        Ok(())
    }

    /// Exchange the entire contents (and capacities) of two matrices.
    ///
    /// Positions into either one are invalidated.
    pub fn swap(&mut self, other: &mut Matrix<T>)
    {
        self.swap_storage(other);
        self.touch();
        other.touch();
    }
}
