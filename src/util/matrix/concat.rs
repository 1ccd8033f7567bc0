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

//! Concatenation and splitting.
//!
//! These are the only operations where elements (and capacity) move between
//! two matrices.  The matrix that gives up its elements is always left as
//! the empty sentinel, or with exactly the part it kept.

use crate::capacity::{Axis, Dim, Layout};
use crate::errors::{Error, Result};
use crate::matrix::{Matrix, Source};

impl<T> Matrix<T> {
    /// Append the rows of `donor` below the rows of `self`.
    ///
    /// `donor` is always left empty.  If the slack on the row axis of `self`
    /// can hold the new rows, no reallocation happens (the window slides
    /// toward the front only as far as it must).  Otherwise both are copied
    /// into a buffer just big enough for the larger of the two capacities
    /// and the combined rows.
    pub fn cat_by_row(&mut self, donor: &mut Matrix<T>) -> Result<()>
    { self.cat(Dim::Row, donor) }

    /// Append the columns of `donor` to the right of the columns of `self`.
    ///
    /// See [`cat_by_row`](#method.cat_by_row).
    pub fn cat_by_column(&mut self, donor: &mut Matrix<T>) -> Result<()>
    { self.cat(Dim::Column, donor) }

    /// Append a copy of this matrix's rows to itself.
    pub fn cat_self_by_row(&mut self) -> Result<()>
    where T: Clone,
    { self.cat_self(Dim::Row) }

    /// Append a copy of this matrix's columns to itself.
    pub fn cat_self_by_column(&mut self) -> Result<()>
    where T: Clone,
    { self.cat_self(Dim::Column) }

    /// Move rows `pos..` into `dest`, replacing whatever it held.
    ///
    /// `self` keeps its capacity.  On each axis, `dest` keeps its own
    /// capacity if that already fits the moved region (recentered);
    /// otherwise it gets exactly the region's size, with no slack.
    pub fn split_by_row(&mut self, dest: &mut Matrix<T>, pos: usize) -> Result<()>
    { self.split(Dim::Row, dest, pos) }

    /// Move columns `pos..` into `dest`, replacing whatever it held.
    ///
    /// See [`split_by_row`](#method.split_by_row).
    pub fn split_by_column(&mut self, dest: &mut Matrix<T>, pos: usize) -> Result<()>
    { self.split(Dim::Column, dest, pos) }

    fn cat_self(&mut self, dim: Dim) -> Result<()>
    where T: Clone,
    {
        // snapshot first; the copy is what gets appended
        let mut copy = self.clone();
        self.cat(dim, &mut copy)
    }

    fn cat(&mut self, dim: Dim, donor: &mut Matrix<T>) -> Result<()>
    {
        let noun = dim.noun();
        if donor.is_empty() {
            return Ok(());
        }
        let across = dim.other();

        if self.is_empty() {
            let (rows, cols) = donor.dims();
            self.check_counts_fit(rows, cols)?;
            if donor.row_capacity().max(donor.column_capacity()) <= self.dimension_limit() {
                trace!("cat by {}: receiver is empty; taking the donor's buffer", noun);
                self.adopt_storage(donor);
            } else {
                let layout = Layout::constructed((rows, cols), self.dimension_limit());
                self.relocate(layout, |r, c| Source::Fresh(donor.take_cell(r, c)));
                donor.reset_empty();
            }
            return Ok(());
        }

        let mine = self.layout().axis(dim);
        let theirs = donor.layout().axis(dim);
        let width = self.layout().axis(across).count;
        if donor.layout().axis(across).count != width {
            throw!(Error::ShapeMismatch(format!(
                "cannot cat a {}x{} matrix onto a {}x{} matrix by {}",
                donor.num_rows(), donor.num_cols(), self.num_rows(), self.num_cols(), noun,
            )));
        }
        let combined = mine.count + theirs.count;
        if combined > self.dimension_limit() {
            throw!(Error::CapacityExceeded(format!(
                "{} {}s exceed the dimension limit of {}", combined, noun, self.dimension_limit(),
            )));
        }

        match mine.offset_for_growth(combined) {
            Some(offset) => {
                trace!("cat by {}: {} more fit in the existing slack", noun, theirs.count);
                self.translate_lines(dim, 0..mine.count, offset as isize - mine.offset as isize);
                let layout = self.layout().with_axis(dim, Axis { count: combined, capacity: mine.capacity, offset });
                self.set_layout_unchecked(layout);
                for along in 0..theirs.count {
                    for j in 0..width {
                        let (r, c) = dim.coords(along, j);
                        let value = donor.take_cell(r, c);
                        let (r, c) = dim.coords(mine.count + along, j);
                        self.put_cell(r, c, value);
                    }
                }
                self.touch();
            },
            None => {
                let limit = self.dimension_limit();
                let capacity = combined.max(mine.capacity).max(theirs.capacity).min(limit);
                let across_capacity = {
                    let (a, b) = (self.layout().axis(across), donor.layout().axis(across));
                    a.capacity.max(b.capacity).min(limit)
                };
                debug!("cat by {}: reallocating {} capacity {} -> {}", noun, noun, mine.capacity, capacity);

                let layout = Layout::EMPTY
                    .with_axis(dim, Axis::centered(combined, capacity))
                    .with_axis(across, Axis::centered(width, across_capacity));
                let split = mine.count;
                self.relocate(layout, |r, c| {
                    let (along, j) = dim.along_across(r, c);
                    match along < split {
                        true => Source::Old(r, c),
                        false => {
                            let (r, c) = dim.coords(along - split, j);
                            Source::Fresh(donor.take_cell(r, c))
                        },
                    }
                });
            },
        }
        donor.reset_empty();
        Ok(())
    }

    fn split(&mut self, dim: Dim, dest: &mut Matrix<T>, pos: usize) -> Result<()>
    {
        let noun = dim.noun();
        let axis = self.layout().axis(dim);
        if pos > axis.count {
            throw!(Error::OutOfRange(format!(
                "cannot split at {0} {1} of a matrix with {2} {0}s", noun, pos, axis.count,
            )));
        }
        let moved = axis.count - pos;
        if moved == 0 {
            dest.reset_empty();
            return Ok(());
        }

        let across = dim.other();
        let width = self.layout().axis(across).count;
        let (rows, cols) = dim.coords(moved, width);
        dest.check_counts_fit(rows, cols)?;

        // never any slack beyond what dest already had
        let fitted = |have: Axis, need: usize| match have.capacity >= need {
            true => Axis::centered(need, have.capacity),
            false => Axis::centered(need, need),
        };
        let layout = Layout::EMPTY
            .with_axis(dim, fitted(dest.layout().axis(dim), moved))
            .with_axis(across, fitted(dest.layout().axis(across), width));
        debug!(
            "split by {}: {} {}s into a {}x{} buffer",
            noun, moved, noun, layout.rows.capacity, layout.cols.capacity,
        );
        {
            let source = &mut *self;
            dest.relocate(layout, |r, c| {
                let (along, j) = dim.along_across(r, c);
                let (r, c) = dim.coords(pos + along, j);
                Source::Fresh(source.take_cell(r, c))
            });
        }

        if pos == 0 {
            self.reset_empty();
        } else {
            let layout = self.layout().with_axis(dim, Axis { count: pos, ..axis });
            self.set_layout_unchecked(layout);
            self.touch();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn counting((rows, cols): (usize, usize), base: i32) -> Matrix<i32>
    { Matrix::from_fn((rows, cols), |r, c| base + (100 * r + c) as i32).unwrap() }

    fn capacities<T>(m: &Matrix<T>) -> (usize, usize)
    { (m.row_capacity(), m.column_capacity()) }

    #[test]
    fn cat_by_row_into_existing_slack()
    {
        let mut dest = counting((5, 7), 0);
        dest.reserve(9, 8);
        assert_eq!(capacities(&dest), (9, 8));
        let mut source = counting((4, 7), 10_000);

        let mut expected = dest.to_nested_vec();
        expected.extend(source.to_nested_vec());

        dest.cat_by_row(&mut source).unwrap();
        assert_eq!(capacities(&source), (0, 0));
        assert!(source.is_empty());
        assert_eq!(capacities(&dest), (9, 8));
        assert_eq!(dest.row_capacity_offset(), Some(0));
        assert_eq!(dest.to_nested_vec(), expected);
        dest.check_invariants();
        source.check_invariants();
    }

    #[test]
    fn cat_by_column_reallocates_when_slack_runs_out()
    {
        let mut dest = counting((3, 4), 0); // capacity (3, 5)
        let mut source = counting((3, 6), 1000); // capacity (3, 7)

        dest.cat_by_column(&mut source).unwrap();
        assert!(source.is_empty());
        assert_eq!(dest.dims(), (3, 10));
        assert_eq!(capacities(&dest), (3, 10));
        assert_eq!(dest[(2, 4)], 1200);
        assert_eq!(dest[(2, 3)], 203);
        dest.check_invariants();
    }

    #[test]
    fn cat_keeps_the_larger_capacity()
    {
        let mut dest = counting((2, 2), 0);
        let mut source = counting((2, 2), 50);
        source.reserve(20, 9);

        dest.cat_by_row(&mut source).unwrap();
        assert_eq!(capacities(&dest), (20, 9));
        assert_eq!(dest.row_capacity_offset(), Some(8));
        assert_eq!(dest.column_capacity_offset(), Some(3));
    }

    #[test]
    fn cat_with_empty_sides()
    {
        let mut dest = Matrix::new();
        let mut source = counting((3, 3), 0);
        source.reserve(7, 7);
        let layout = source.layout();

        dest.cat_by_row(&mut source).unwrap();
        assert_eq!(dest.layout(), layout);
        assert_eq!(dest, counting((3, 3), 0));
        assert!(source.is_empty());

        let revision = dest.revision();
        dest.cat_by_column(&mut Matrix::new()).unwrap();
        assert_eq!(dest.revision(), revision);
    }

    #[test]
    fn cat_shape_mismatch_changes_nothing()
    {
        let mut dest = counting((2, 3), 0);
        let mut source = counting((2, 4), 0);
        assert_matches!(Err(Error::ShapeMismatch(_)), dest.cat_by_row(&mut source));
        assert_eq!(source, counting((2, 4), 0));
        assert_eq!(dest, counting((2, 3), 0));
    }

    #[test]
    fn cat_self()
    {
        let mut m = counting((2, 3), 0);
        m.cat_self_by_row().unwrap();
        assert_eq!(m.to_nested_vec(), vec![
            vec![0, 1, 2],
            vec![100, 101, 102],
            vec![0, 1, 2],
            vec![100, 101, 102],
        ]);
        m.cat_self_by_column().unwrap();
        assert_eq!(m.dims(), (4, 6));
        assert_eq!(m[(3, 5)], 102);
        m.check_invariants();
    }

    #[test]
    fn split_gives_dest_no_slack()
    {
        let mut m = counting((20, 25), 0);
        let mut dest = Matrix::new();
        m.split_by_row(&mut dest, 5).unwrap();

        assert_eq!(dest.dims(), (15, 25));
        assert_eq!(capacities(&dest), (15, 25));
        assert_eq!(dest[(0, 0)], 500);
        assert_eq!(m.dims(), (5, 25));
        assert_eq!(capacities(&m), (25, 31));
        m.check_invariants();
        dest.check_invariants();
    }

    #[test]
    fn split_reuses_sufficient_dest_capacity()
    {
        let mut m = counting((6, 4), 0);
        let mut dest = Matrix::new_filled((10, 2), &-1); // capacity (12, 2)

        m.split_by_column(&mut dest, 1).unwrap();
        assert_eq!(dest.dims(), (6, 3));
        // rows fit in the old capacity and were recentered; columns did not
        assert_eq!(capacities(&dest), (12, 3));
        assert_eq!(dest.row_capacity_offset(), Some(3));
        assert_eq!(dest.column_capacity_offset(), Some(0));
        assert_eq!(dest.to_nested_vec()[5], vec![501, 502, 503]);
        assert_eq!(m.to_nested_vec(), vec![vec![0], vec![100], vec![200], vec![300], vec![400], vec![500]]);
    }

    #[test]
    fn split_edges()
    {
        let mut m = counting((3, 3), 0);
        let mut dest = counting((2, 2), 0);
        m.split_by_row(&mut dest, 3).unwrap();
        assert!(dest.is_empty());
        assert_eq!(m, counting((3, 3), 0));

        m.split_by_row(&mut dest, 0).unwrap();
        assert!(m.is_empty());
        assert_eq!(dest, counting((3, 3), 0));

        assert_matches!(Err(Error::OutOfRange(_)), dest.split_by_column(&mut m, 4));
    }

    #[test]
    fn split_then_cat_round_trips()
    {
        let _ = env_logger::try_init();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let dims = (rng.gen_range(1, 12), rng.gen_range(1, 12));
            let original = counting(dims, 0);
            let mut m = original.clone();
            let mut rest = Matrix::new();

            let by_row = rng.gen_weighted_bool(2);
            let pos = match by_row {
                true => rng.gen_range(0, dims.0 + 1),
                false => rng.gen_range(0, dims.1 + 1),
            };
            match by_row {
                true => {
                    m.split_by_row(&mut rest, pos).unwrap();
                    m.cat_by_row(&mut rest).unwrap();
                },
                false => {
                    m.split_by_column(&mut rest, pos).unwrap();
                    m.cat_by_column(&mut rest).unwrap();
                },
            }
            m.check_invariants();
            rest.check_invariants();
            assert!(rest.is_empty());
            assert_eq!(m, original);
        }
    }
}
