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

//! Capacity bookkeeping.
//!
//! Everything in here is plain arithmetic on `(count, capacity, offset)`
//! triples; nothing touches element storage.  The matrix consults these
//! to decide whether a mutation fits in its slack, and where the logical
//! window should sit inside a new buffer when it does not.

/// Upper bound on the bytes a single backing buffer may occupy.
///
/// The per-type dimension ceiling is derived from this, so matrices of
/// larger elements get a smaller ceiling.
pub const MAX_BUFFER_BYTES: u64 = 1 << 34;

/// Capacity granted on construction is `count * NUM / DENOM`.
pub(crate) const CONSTRUCTION_GROWTH: (usize, usize) = (5, 4);

/// Capacity is multiplied by this when a mutation outgrows its buffer.
pub(crate) const REALLOCATION_GROWTH: usize = 2;

/// The largest row or column capacity a `Matrix<T>` may ever have.
///
/// Chosen so that a square buffer at this size stays within
/// [`MAX_BUFFER_BYTES`](constant.MAX_BUFFER_BYTES.html).
pub fn max_dimension<T>() -> usize
{
    let slot_size = ::std::mem::size_of::<Option<T>>().max(1) as u64;
    let budget = MAX_BUFFER_BYTES.min(::std::isize::MAX as u64);
    let dim = ::num_integer::sqrt(budget / slot_size);
    dim.min(::std::usize::MAX as u64) as usize
}

/// Capacity for a freshly constructed axis of `count` elements.
///
/// No growth at all for counts small enough that the 5/4 factor floors
/// back down to the count itself.
pub fn construction_capacity(count: usize, limit: usize) -> usize
{
    let (num, denom) = CONSTRUCTION_GROWTH;
    (count.saturating_mul(num) / denom).min(limit)
}

/// Capacity an axis reallocates to when it must hold at least `needed`.
///
/// `None` if `needed` itself is beyond the limit.
pub fn growth_capacity(capacity: usize, needed: usize, limit: usize) -> Option<usize>
{
    if needed > limit {
        return None;
    }
    Some(capacity.saturating_mul(REALLOCATION_GROWTH).max(needed).min(limit))
}

/// Offset that centers `count` elements in `capacity` slots.
///
/// Odd leftover slack goes after the window.
#[inline]
pub fn centered_offset(capacity: usize, count: usize) -> usize
{
    debug_assert!(count <= capacity);
    (capacity - count) / 2
}

/// Layout of one axis of the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Axis {
    pub count: usize,
    pub capacity: usize,
    // number of vacant slots preceding the logical window
    pub offset: usize,
}

/// Where the elements go when an axis changes length inside its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shift {
    /// Elements before the position move toward the start of the buffer
    /// (insertion) or toward the position (erasure); the offset changes.
    Front,
    /// Elements after the position move; the offset stays.
    Back,
    /// There is no slack left on either side.
    Reallocate,
}

impl Axis {
    pub const EMPTY: Axis = Axis { count: 0, capacity: 0, offset: 0 };

    pub fn centered(count: usize, capacity: usize) -> Axis
    { Axis { count, capacity, offset: centered_offset(capacity, count) } }

    pub fn constructed(count: usize, limit: usize) -> Axis
    { Axis::centered(count, construction_capacity(count, limit)) }

    #[inline]
    pub fn slack_before(&self) -> usize
    { self.offset }

    #[inline]
    pub fn slack_after(&self) -> usize
    { self.capacity - self.offset - self.count }

    /// The axis after a `reserve(request)`.
    pub fn reserved(&self, request: usize, limit: usize) -> Axis
    {
        if self.count == 0 || request <= self.count {
            return *self;
        }
        let request = request.min(limit);
        match request <= self.capacity {
            true => Axis::centered(self.count, self.capacity),
            false => Axis::centered(self.count, request),
        }
    }

    /// How to open a gap at `pos` (which is in `0..=count`).
    pub fn plan_insert(&self, pos: usize) -> Shift
    {
        let front = pos;
        let back = self.count - pos;
        match (self.slack_before() > 0, self.slack_after() > 0) {
            (true, true) => if front < back { Shift::Front } else { Shift::Back },
            (true, false) => Shift::Front,
            (false, true) => Shift::Back,
            (false, false) => Shift::Reallocate,
        }
    }

    /// How to close the gap left by removing `pos` (which is in `0..count`).
    ///
    /// Never `Reallocate`.
    pub fn plan_erase(&self, pos: usize) -> Shift
    {
        let front = pos;
        let back = self.count - pos - 1;
        if front < back { Shift::Front } else { Shift::Back }
    }

    /// Offset that lets `new_count` elements fit without moving the buffer,
    /// disturbing the current offset as little as possible.
    ///
    /// `None` if the capacity is too small.
    pub fn offset_for_growth(&self, new_count: usize) -> Option<usize>
    {
        if new_count > self.capacity {
            return None;
        }
        Some(self.offset.min(self.capacity - new_count))
    }

    /// The axis after resizing to `count`.
    ///
    /// Shrinking keeps capacity and offset.  Growing stays in the buffer if
    /// the total slack allows, otherwise reallocates.  `None` if `count`
    /// is beyond the limit.
    pub fn resized(&self, count: usize, limit: usize) -> Option<Axis>
    {
        if count <= self.count {
            return Some(Axis { count, ..*self });
        }
        if let Some(offset) = self.offset_for_growth(count) {
            return Some(Axis { count, capacity: self.capacity, offset });
        }
        growth_capacity(self.capacity, count, limit).map(|capacity| Axis::centered(count, capacity))
    }

    pub fn check_invariants(&self, limit: usize)
    {
        assert!(self.count <= self.capacity, "{:?}", self);
        assert!(self.capacity <= limit, "{:?} (limit {})", self, limit);
        assert!(self.offset + self.count <= self.capacity, "{:?}", self);
    }
}

/// Layout of the whole backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Layout {
    pub rows: Axis,
    pub cols: Axis,
}

/// Names one of the two axes, for code that treats rows and columns alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dim { Row, Column }

impl Dim {
    /// `(row, col)` of the element at `along` on this axis and `across` on the other.
    #[inline]
    pub fn coords(self, along: usize, across: usize) -> (usize, usize)
    {
        match self {
            Dim::Row => (along, across),
            Dim::Column => (across, along),
        }
    }

    /// Inverse of `coords`: `(along, across)` for the element at `(row, col)`.
    #[inline]
    pub fn along_across(self, row: usize, col: usize) -> (usize, usize)
    { self.coords(row, col) } // (it's an involution)

    pub fn other(self) -> Dim
    {
        match self {
            Dim::Row => Dim::Column,
            Dim::Column => Dim::Row,
        }
    }

    pub fn noun(self) -> &'static str
    {
        match self {
            Dim::Row => "row",
            Dim::Column => "column",
        }
    }
}

impl Layout {
    pub const EMPTY: Layout = Layout { rows: Axis::EMPTY, cols: Axis::EMPTY };

    /// Layout for a newly constructed matrix.  Any zero dimension gives `EMPTY`.
    pub fn constructed((rows, cols): (usize, usize), limit: usize) -> Layout
    {
        if rows == 0 || cols == 0 {
            return Layout::EMPTY;
        }
        Layout {
            rows: Axis::constructed(rows, limit),
            cols: Axis::constructed(cols, limit),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    { self.rows.count == 0 }

    #[inline]
    pub fn dims(&self) -> (usize, usize)
    { (self.rows.count, self.cols.count) }

    #[inline]
    pub fn buffer_len(&self) -> usize
    { self.rows.capacity * self.cols.capacity }

    /// Buffer position of logical element `(r, c)`.
    #[inline]
    pub fn index(&self, r: usize, c: usize) -> usize
    {
        debug_assert!(r < self.rows.count && c < self.cols.count);
        (self.rows.offset + r) * self.cols.capacity + (self.cols.offset + c)
    }

    #[inline]
    pub fn axis(&self, dim: Dim) -> Axis
    {
        match dim {
            Dim::Row => self.rows,
            Dim::Column => self.cols,
        }
    }

    #[inline]
    pub fn axis_mut(&mut self, dim: Dim) -> &mut Axis
    {
        match dim {
            Dim::Row => &mut self.rows,
            Dim::Column => &mut self.cols,
        }
    }

    pub fn with_axis(mut self, dim: Dim, axis: Axis) -> Layout
    { *self.axis_mut(dim) = axis; self }

    pub fn check_invariants(&self, limit: usize)
    {
        self.rows.check_invariants(limit);
        self.cols.check_invariants(limit);
        let empty = (self.rows.count == 0, self.cols.count == 0);
        assert!(
            empty == (true, true) || empty == (false, false),
            "half-empty layout: {:?}", self,
        );
        if self.is_empty() {
            assert_eq!(*self, Layout::EMPTY);
        }
    }
}
