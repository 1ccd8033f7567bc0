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

use crate::capacity::{self, Layout};
use crate::errors::{Error, Result};

use ::std::fmt;
use ::std::mem;
use ::std::ops::{Index, IndexMut, Range};
use ::std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Owned dense matrix with C layout and independently growable rows and columns.
///
/// The elements live in a single `row_capacity x column_capacity` buffer.
/// The live elements (the "logical window") sit somewhere inside it, with
/// `row_capacity_offset` vacant rows above and `column_capacity_offset`
/// vacant columns to the left.  The slack on both sides of each axis is what
/// lets rows and columns be inserted, erased and concatenated without moving
/// the whole buffer.
///
/// Capacity is never part of equality; two matrices with the same logical
/// contents are equal regardless of where their windows sit.
pub struct Matrix<T> {
    // c-contiguous, row-contiguous; every slot outside the window is `None`
    // invariant: slots.len() == layout.buffer_len()
    slots: Vec<Option<T>>,
    layout: Layout,
    // the largest capacity either axis may grow to
    limit: usize,
    origin: Origin,
}

/// Identity of a matrix at one structural revision.
///
/// Positions remember the origin they were taken at, and are only usable
/// against a matrix with an identical origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Origin {
    pub id: u64,
    pub revision: u64,
}

static NEXT_MATRIX_ID: AtomicU64 = AtomicU64::new(0);

impl Origin {
    fn fresh() -> Origin
    { Origin { id: NEXT_MATRIX_ID.fetch_add(1, AtomicOrdering::Relaxed), revision: 0 } }
}

/// Where a relocated element comes from.
pub(crate) enum Source<T> {
    /// The element currently at this logical `(row, col)`.
    Old(usize, usize),
    Fresh(T),
}

/// # Construction
impl<T> Matrix<T> {
    /// The empty matrix.  It owns no buffer.
    pub fn new() -> Self
    { Matrix::empty_with_limit(capacity::max_dimension::<T>()) }

    pub(crate) fn empty_with_limit(limit: usize) -> Self
    { Matrix { slots: vec![], layout: Layout::EMPTY, limit, origin: Origin::fresh() } }

    /// Build from row-major data.
    ///
    /// A shape with a zero dimension produces the empty matrix.
    pub fn from_row_major_data((rows, cols): (usize, usize), data: Vec<T>) -> Result<Self>
    {
        if rows.checked_mul(cols) != Some(data.len()) {
            throw!(Error::ShapeMismatch(format!(
                "{} elements cannot fill a {}x{} matrix", data.len(), rows, cols,
            )));
        }
        let mut data = data.into_iter();
        Matrix::from_fn((rows, cols), |_, _| match data.next() {
            Some(x) => x,
            None => unreachable!("length was checked"),
        })
    }

    /// Build by calling `f(row, col)` for each element in row-major order.
    pub fn from_fn<F>((rows, cols): (usize, usize), mut f: F) -> Result<Self>
    where F: FnMut(usize, usize) -> T,
    {
        let mut matrix = Matrix::new();
        if rows == 0 || cols == 0 {
            return Ok(matrix);
        }
        matrix.check_counts_fit(rows, cols)?;

        let layout = Layout::constructed((rows, cols), matrix.limit);
        matrix.slots = vacant_buffer(layout.buffer_len());
        matrix.layout = layout;
        for r in 0..layout.rows.count {
            for c in 0..layout.cols.count {
                matrix.slots[layout.index(r, c)] = Some(f(r, c));
            }
        }
        Ok(matrix)
    }

    /// Fails if a logical count could never fit under the dimension limit.
    pub(crate) fn check_counts_fit(&self, rows: usize, cols: usize) -> Result<()>
    {
        for &(count, noun) in &[(rows, "row"), (cols, "column")] {
            if count > self.limit {
                throw!(Error::CapacityExceeded(format!(
                    "{} {}s exceed the dimension limit of {}", count, noun, self.limit,
                )));
            }
        }
        Ok(())
    }
}

impl<T: Clone> Matrix<T> {
    /// # Panics
    ///
    /// If either dimension exceeds the maximum dimension for `T`.
    pub fn new_filled(dims: (usize, usize), fill: &T) -> Self
    {
        match Matrix::from_fn(dims, |_, _| fill.clone()) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }

    /// A square matrix with `diagonal` on the main diagonal and `non_diagonal` elsewhere.
    ///
    /// # Panics
    ///
    /// If `size` exceeds the maximum dimension for `T`.
    pub fn new_diagonal(size: usize, non_diagonal: &T, diagonal: &T) -> Self
    {
        let built = Matrix::from_fn((size, size), |r, c| match r == c {
            true => diagonal.clone(),
            false => non_diagonal.clone(),
        });
        match built {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self { Matrix::new() }
}

/// # Shape and capacity
impl<T> Matrix<T> {
    pub fn num_rows(&self) -> usize { self.layout.rows.count }
    pub fn num_cols(&self) -> usize { self.layout.cols.count }
    pub fn dims(&self) -> (usize, usize) { self.layout.dims() }
    pub fn is_empty(&self) -> bool { self.layout.is_empty() }
    pub fn is_square(&self) -> bool { self.num_rows() == self.num_cols() }
    pub fn size(&self) -> usize { self.num_rows() * self.num_cols() }

    pub fn row_capacity(&self) -> usize { self.layout.rows.capacity }
    pub fn column_capacity(&self) -> usize { self.layout.cols.capacity }

    /// Vacant rows preceding the logical window.  `None` while empty.
    pub fn row_capacity_offset(&self) -> Option<usize>
    { match self.is_empty() { true => None, false => Some(self.layout.rows.offset) } }

    /// Vacant columns preceding the logical window.  `None` while empty.
    pub fn column_capacity_offset(&self) -> Option<usize>
    { match self.is_empty() { true => None, false => Some(self.layout.cols.offset) } }

    /// The largest capacity either axis may reach.
    pub fn dimension_limit(&self) -> usize { self.limit }

    /// Lower the dimension limit for this matrix (and its clones).
    ///
    /// Fails if the limit is below a current capacity or above the
    /// maximum dimension for `T`.
    pub fn set_dimension_limit(&mut self, limit: usize) -> Result<()>
    {
        let max = capacity::max_dimension::<T>();
        if limit > max {
            throw!(Error::OutOfRange(format!("limit {} is above the maximum of {}", limit, max)));
        }
        let largest = self.row_capacity().max(self.column_capacity());
        if limit < largest {
            throw!(Error::OutOfRange(format!("limit {} is below the current capacity {}", limit, largest)));
        }
        self.limit = limit;
        Ok(())
    }

    /// Counter bumped by every structural mutation.
    ///
    /// Positions taken at an older revision can no longer be used.
    pub fn revision(&self) -> u64 { self.origin.revision }

    pub(crate) fn origin(&self) -> Origin { self.origin }
    pub(crate) fn layout(&self) -> Layout { self.layout }
}

/// # Element access
impl<T> Matrix<T> {
    pub fn get(&self, row: usize, col: usize) -> Option<&T>
    {
        match row < self.num_rows() && col < self.num_cols() {
            true => Some(self.cell(row, col)),
            false => None,
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T>
    {
        match row < self.num_rows() && col < self.num_cols() {
            true => Some(self.cell_mut(row, col)),
            false => None,
        }
    }

    /// Cloned elements in row-major order.
    pub fn to_row_major_vec(&self) -> Vec<T>
    where T: Clone,
    {
        let mut out = Vec::with_capacity(self.size());
        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                out.push(self.cell(r, c).clone());
            }
        }
        out
    }

    /// Cloned rows.
    pub fn to_nested_vec(&self) -> Vec<Vec<T>>
    where T: Clone,
    {
        (0..self.num_rows())
            .map(|r| (0..self.num_cols()).map(|c| self.cell(r, c).clone()).collect())
            .collect()
    }

    #[inline]
    pub(crate) fn cell(&self, r: usize, c: usize) -> &T
    { live(&self.slots[self.layout.index(r, c)]) }

    #[inline]
    pub(crate) fn cell_mut(&mut self, r: usize, c: usize) -> &mut T
    {
        let index = self.layout.index(r, c);
        live_mut(&mut self.slots[index])
    }

    /// Moves an element out, leaving its slot vacant.
    ///
    /// Only for code that is about to rewrite the layout.
    pub(crate) fn take_cell(&mut self, r: usize, c: usize) -> T
    {
        let index = self.layout.index(r, c);
        take_live(&mut self.slots[index])
    }

    /// Simultaneous mutable borrows of the listed elements, in order.
    ///
    /// # Panics
    ///
    /// If a coordinate repeats.
    pub(crate) fn cells_mut<I>(&mut self, coords: I) -> Vec<&mut T>
    where I: IntoIterator<Item=(usize, usize)>,
    {
        let layout = self.layout;
        let mut refs: Vec<Option<&mut T>> = self.slots.iter_mut().map(Option::as_mut).collect();
        coords.into_iter()
            .map(|(r, c)| match refs[layout.index(r, c)].take() {
                Some(x) => x,
                None => panic!("element ({}, {}) borrowed twice", r, c),
            })
            .collect()
    }
}

/// # Storage primitives for mutators
impl<T> Matrix<T> {
    /// Record a structural change.
    pub(crate) fn touch(&mut self)
    { self.origin.revision += 1; }

    pub(crate) fn reset_empty(&mut self)
    {
        self.slots = vec![];
        self.layout = Layout::EMPTY;
        self.touch();
    }

    pub(crate) fn set_layout_unchecked(&mut self, layout: Layout)
    {
        debug_assert_eq!(layout.buffer_len(), self.slots.len());
        self.layout = layout;
    }

    /// Vacate a logical slot, dropping its element.
    pub(crate) fn drop_cell(&mut self, r: usize, c: usize)
    {
        let index = self.layout.index(r, c);
        self.slots[index] = None;
    }

    /// Fill a logical slot that is currently vacant.
    pub(crate) fn put_cell(&mut self, r: usize, c: usize, value: T)
    {
        let index = self.layout.index(r, c);
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some(value);
    }

    pub(crate) fn swap_cells(&mut self, (r1, c1): (usize, usize), (r2, c2): (usize, usize))
    {
        let (a, b) = (self.layout.index(r1, c1), self.layout.index(r2, c2));
        self.slots.swap(a, b);
    }

    /// Take over the buffer of `donor` wholesale, leaving it empty.
    ///
    /// The receiver keeps its own dimension limit, which must admit the
    /// donor's capacities.
    pub(crate) fn adopt_storage(&mut self, donor: &mut Matrix<T>)
    {
        debug_assert!(donor.row_capacity().max(donor.column_capacity()) <= self.limit);
        self.slots = mem::replace(&mut donor.slots, vec![]);
        self.layout = donor.layout;
        self.touch();
        donor.reset_empty();
    }

    /// Moves the live block `rows x cols` by `(dr, dc)` slots within the
    /// current buffer.
    ///
    /// Every destination slot not belonging to the block must be vacant.
    /// The layout is not updated; that is the caller's job.
    pub(crate) fn translate(&mut self, rows: Range<usize>, cols: Range<usize>, (dr, dc): (isize, isize))
    {
        if rows.start >= rows.end || cols.start >= cols.end || (dr, dc) == (0, 0) {
            return;
        }
        let layout = self.layout;
        let delta = dr * layout.cols.capacity as isize + dc;

        // Visit in the order that never lands on a block element that has yet to move.
        let mut visit = |r: usize, c: usize| {
            let src = layout.index(r, c);
            let dest = (src as isize + delta) as usize;
            debug_assert!(self.slots[dest].is_none());
            self.slots.swap(src, dest);
        };
        if delta > 0 {
            for r in rows.rev() {
                for c in cols.clone().rev() {
                    visit(r, c);
                }
            }
        } else {
            for r in rows {
                for c in cols.clone() {
                    visit(r, c);
                }
            }
        }
    }

    /// Rebuild into a fresh buffer with the given layout.
    ///
    /// `source(r, c)` says where the element at new logical `(r, c)` comes
    /// from.  Old elements that nobody asks for are dropped.
    pub(crate) fn relocate<F>(&mut self, layout: Layout, mut source: F)
    where F: FnMut(usize, usize) -> Source<T>,
    {
        let old_layout = self.layout;
        let mut old = mem::replace(&mut self.slots, vacant_buffer(layout.buffer_len()));
        self.layout = layout;

        for r in 0..layout.rows.count {
            for c in 0..layout.cols.count {
                let value = match source(r, c) {
                    Source::Old(r0, c0) => take_live(&mut old[old_layout.index(r0, c0)]),
                    Source::Fresh(value) => value,
                };
                self.slots[layout.index(r, c)] = Some(value);
            }
        }
        self.touch();
    }

    /// Exchange everything but identity.
    pub(crate) fn swap_storage(&mut self, other: &mut Matrix<T>)
    {
        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.layout, &mut other.layout);
        mem::swap(&mut self.limit, &mut other.limit);
    }

    /// Panics if any internal invariant is broken.
    pub fn check_invariants(&self)
    {
        self.layout.check_invariants(self.limit);
        assert_eq!(self.slots.len(), self.layout.buffer_len());
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.size(), "stray elements outside the logical window");
    }
}

pub(crate) fn vacant_buffer<T>(len: usize) -> Vec<Option<T>>
{
    let mut buf = Vec::with_capacity(len);
    buf.resize_with(len, || None);
    buf
}

#[inline]
fn live<T>(slot: &Option<T>) -> &T
{
    match slot {
        Some(x) => x,
        None => unreachable!("vacant slot inside the logical window"),
    }
}

#[inline]
fn live_mut<T>(slot: &mut Option<T>) -> &mut T
{
    match slot {
        Some(x) => x,
        None => unreachable!("vacant slot inside the logical window"),
    }
}

#[inline]
pub(crate) fn take_live<T>(slot: &mut Option<T>) -> T
{
    match slot.take() {
        Some(x) => x,
        None => unreachable!("vacant slot inside the logical window"),
    }
}

/// Clones keep the capacity and offsets, but are a different origin.
impl<T: Clone> Clone for Matrix<T> {
    fn clone(&self) -> Self
    { Matrix {
        slots: self.slots.clone(),
        layout: self.layout,
        limit: self.limit,
        origin: Origin::fresh(),
    }}

    /// Copy-assignment.  The receiver keeps its identity, but any positions
    /// taken from it are invalidated.
    fn clone_from(&mut self, source: &Self)
    {
        self.slots.clone_from(&source.slots);
        self.layout = source.layout;
        self.limit = source.limit;
        self.touch();
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Matrix<T>) -> bool
    {
        if self.dims() != other.dims() {
            return false;
        }
        iproduct!(0..self.num_rows(), 0..self.num_cols())
            .all(|(r, c)| self.cell(r, c) == other.cell(r, c))
    }
}

impl<T: Eq> Eq for Matrix<T> {}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let rows: Vec<Vec<&T>> = (0..self.num_rows())
            .map(|r| (0..self.num_cols()).map(|c| self.cell(r, c)).collect())
            .collect();
        f.debug_struct("Matrix")
            .field("dims", &self.dims())
            .field("capacity", &(self.row_capacity(), self.column_capacity()))
            .field("offset", &(self.row_capacity_offset(), self.column_capacity_offset()))
            .field("rows", &rows)
            .finish()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &T
    {
        assert!(
            r < self.num_rows() && c < self.num_cols(),
            "index ({}, {}) out of bounds for {}x{} matrix", r, c, self.num_rows(), self.num_cols(),
        );
        self.cell(r, c)
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T
    {
        assert!(
            r < self.num_rows() && c < self.num_cols(),
            "index ({}, {}) out of bounds for {}x{} matrix", r, c, self.num_rows(), self.num_cols(),
        );
        self.cell_mut(r, c)
    }
}
