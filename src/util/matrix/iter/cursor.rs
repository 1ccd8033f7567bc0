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

use super::order::Order;
use crate::errors::{or_panic, Error, Result};
use crate::matrix::Origin;

use ::std::cmp::Ordering;
use ::std::fmt;
use ::std::ops::{Add, AddAssign, Sub, SubAssign};

/// Which way a cursor walks its window.
pub trait Direction: Copy + Default + fmt::Debug + 'static {
    const REVERSED: bool;

    /// Converts a sequence index to a position along the direction of
    /// travel, and back.  (it's an involution)
    #[inline]
    fn signed(n: isize) -> isize
    { if Self::REVERSED { -n } else { n } }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forward;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl Direction for Forward { const REVERSED: bool = false; }
impl Direction for Reverse { const REVERSED: bool = true; }

/// Sequence indices `begin..end` that a cursor may dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub begin: usize,
    pub end: usize,
}

impl Window {
    pub fn new(begin: usize, end: usize) -> Window
    {
        debug_assert!(begin <= end);
        Window { begin, end }
    }

    #[inline]
    fn contains(&self, pos: isize) -> bool
    { self.begin as isize <= pos && pos < self.end as isize }
}

/// A position in some traversal of a matrix, detached from the matrix.
///
/// Cursors hold no borrow, so they can be kept across a structural mutation;
/// they just stop being usable.  Every operation that involves a second
/// cursor or a matrix checks that both come from the same matrix at the
/// same revision, and fails with `CrossOrigin` otherwise.
///
/// Arithmetic never fails; a cursor may be moved anywhere, but only
/// positions inside its window can be dereferenced.  For reverse cursors
/// `+ 1` steps toward the start of the sequence, and the end position is
/// the one just before the window.
///
/// The operator impls (`-` between cursors, comparisons) panic where the
/// named methods would return `Err`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<O, D> {
    origin: Origin,
    order: O,
    window: Window,
    // sequence index; not necessarily inside the window
    pos: isize,
    direction: D,
}

impl<O: Order, D: Direction> Cursor<O, D> {
    pub(crate) fn at_begin(origin: Origin, order: O, window: Window) -> Self
    {
        let pos = match D::REVERSED {
            false => window.begin as isize,
            true => window.end as isize - 1,
        };
        Cursor { origin, order, window, pos, direction: D::default() }
    }

    pub(crate) fn at_end(origin: Origin, order: O, window: Window) -> Self
    {
        let pos = match D::REVERSED {
            false => window.end as isize,
            true => window.begin as isize - 1,
        };
        Cursor { origin, order, window, pos, direction: D::default() }
    }

    pub(crate) fn at_index(origin: Origin, order: O, window: Window, index: usize) -> Self
    {
        debug_assert!(window.contains(index as isize));
        Cursor { origin, order, window, pos: index as isize, direction: D::default() }
    }

    // position along the direction of travel
    #[inline]
    pub(crate) fn key(&self) -> isize { D::signed(self.pos) }

    /// Keys of the dereferenceable positions, as a half-open range.
    pub(crate) fn window_keys(&self) -> (isize, isize)
    {
        let (begin, end) = (self.window.begin as isize, self.window.end as isize);
        match D::REVERSED {
            false => (begin, end),
            true => (1 - end, 1 - begin),
        }
    }

    pub(crate) fn check_origin(&self, origin: Origin) -> Result<()>
    {
        if self.origin.id != origin.id {
            throw!(Error::CrossOrigin(format!(
                "{} cursor belongs to matrix #{}, not matrix #{}", O::NAME, self.origin.id, origin.id,
            )));
        }
        if self.origin.revision != origin.revision {
            throw!(Error::CrossOrigin(format!(
                "{} cursor was taken at revision {} of matrix #{}, which is now at revision {}",
                O::NAME, self.origin.revision, origin.id, origin.revision,
            )));
        }
        Ok(())
    }

    /// Logical coordinates `n` steps from here.
    pub(crate) fn resolve_at(&self, n: isize) -> Result<(usize, usize)>
    {
        let pos = self.pos + D::signed(n);
        if !self.window.contains(pos) {
            throw!(Error::InvalidDereference(match (n, self.is_end()) {
                (0, true) => format!("cannot dereference the end of a {} traversal", O::NAME),
                _ => format!(
                    "sequence index {} is outside [{}, {}) of this {} traversal",
                    pos, self.window.begin, self.window.end, O::NAME,
                ),
            }));
        }
        Ok(self.order.coords(pos as usize))
    }
}

impl<O: Order, D: Direction> Cursor<O, D> {
    pub fn order(&self) -> O { self.order }

    /// Index in the full sequence of the order.  `-1` for the end of a
    /// reverse traversal that reaches the front of the sequence.
    pub fn sequence_index(&self) -> isize { self.pos }

    pub fn is_end(&self) -> bool
    { self.pos == Cursor::<O, D>::at_end(self.origin, self.order, self.window).pos }

    pub fn is_dereferenceable(&self) -> bool
    { self.window.contains(self.pos) }

    /// The logical `(row, col)` this cursor points at.
    pub fn coords(&self) -> Result<(usize, usize)>
    { self.resolve_at(0) }

    /// The first position of this cursor's window.
    pub fn begin(&self) -> Self
    { Cursor::at_begin(self.origin, self.order, self.window) }

    /// The end position of this cursor's window.
    pub fn end(&self) -> Self
    { Cursor::at_end(self.origin, self.order, self.window) }

    /// Number of dereferenceable positions from here to the end of the window.
    pub fn remaining(&self) -> usize
    {
        let (_, end) = self.window_keys();
        (end - self.key()).max(0) as usize
    }

    /// Signed number of steps from `other` to `self`.
    pub fn distance_from(&self, other: &Self) -> Result<isize>
    {
        self.check_origin(other.origin)?;
        Ok(self.key() - other.key())
    }

    pub fn try_cmp(&self, other: &Self) -> Result<Ordering>
    {
        self.check_origin(other.origin)?;
        Ok(self.key().cmp(&other.key()))
    }

    pub fn offset(mut self, n: isize) -> Self
    { self.pos += D::signed(n); self }

    /// Step forward.  (`++it`)
    pub fn inc(&mut self) -> &mut Self
    { *self += 1; self }

    /// Step back.  (`--it`)
    pub fn dec(&mut self) -> &mut Self
    { *self -= 1; self }

    /// Step forward, returning the old position.  (`it++`)
    pub fn post_inc(&mut self) -> Self
    { let old = *self; self.inc(); old }

    /// Step back, returning the old position.  (`it--`)
    pub fn post_dec(&mut self) -> Self
    { let old = *self; self.dec(); old }
}

impl<O: Order, D: Direction> Add<isize> for Cursor<O, D> {
    type Output = Self;
    fn add(self, n: isize) -> Self { self.offset(n) }
}

impl<O: Order, D: Direction> Sub<isize> for Cursor<O, D> {
    type Output = Self;
    fn sub(self, n: isize) -> Self { self.offset(-n) }
}

impl<O: Order, D: Direction> AddAssign<isize> for Cursor<O, D> {
    fn add_assign(&mut self, n: isize) { *self = self.offset(n); }
}

impl<O: Order, D: Direction> SubAssign<isize> for Cursor<O, D> {
    fn sub_assign(&mut self, n: isize) { *self = self.offset(-n); }
}

impl<O: Order, D: Direction> Sub for Cursor<O, D> {
    type Output = isize;
    fn sub(self, other: Self) -> isize { or_panic(self.distance_from(&other)) }
}

impl<O: Order, D: Direction> PartialEq for Cursor<O, D> {
    fn eq(&self, other: &Self) -> bool
    { or_panic(self.try_cmp(other)) == Ordering::Equal }
}

impl<O: Order, D: Direction> PartialOrd for Cursor<O, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering>
    { Some(or_panic(self.try_cmp(other))) }
}
