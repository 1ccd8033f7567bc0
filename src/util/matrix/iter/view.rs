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

//! Iterators attached to a matrix.
//!
//! `Iter` and `IterMut` are cursors paired with a borrow of the matrix.
//! The borrow is what keeps them valid: no structural mutation can happen
//! while one is alive.  They only ever need to compare origins with each
//! other (or with detached cursors).

use super::cursor::{Cursor, Direction};
use super::order::Order;
use crate::errors::{or_panic, Error, Result};
use crate::matrix::Matrix;

use ::std::cmp::Ordering;
use ::std::fmt;
use ::std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};
use ::std::vec;

/// Read-only random-access iterator.
pub struct Iter<'a, T, O, D> {
    matrix: &'a Matrix<T>,
    cursor: Cursor<O, D>,
}

/// Read-write random-access iterator.
///
/// Not `Clone`; to mark a second position, take a `cursor()`.
pub struct IterMut<'a, T, O, D> {
    matrix: &'a mut Matrix<T>,
    cursor: Cursor<O, D>,
}

/// `std::iter::Iterator` over a range of an `Iter`'s window.
#[derive(Debug)]
pub struct Traverse<'a, T, O, D> {
    matrix: &'a Matrix<T>,
    order: O,
    // keys (positions along the direction of travel); front..back
    front: isize,
    back: isize,
    direction: D,
}

/// `std::iter::Iterator` over a range of an `IterMut`'s window.
pub struct TraverseMut<'a, T> {
    inner: vec::IntoIter<&'a mut T>,
}

// Checks that `begin..end` (by key) only covers dereferenceable positions
// of `begin`'s window.  Returns the range of keys.
fn checked_range<O: Order, D: Direction>(begin: &Cursor<O, D>, end: &Cursor<O, D>) -> Result<(isize, isize)>
{
    let distance = end.distance_from(begin)?;
    if distance < 0 {
        throw!(Error::OutOfRange(format!(
            "{} traversal would end {} steps before it begins", O::NAME, -distance,
        )));
    }
    let (front, back) = (begin.key(), end.key());
    let (lo, hi) = begin.window_keys();
    if distance > 0 && !(lo <= front && back <= hi) {
        throw!(Error::InvalidDereference(format!(
            "{} traversal of {} elements leaves the window it was started in", O::NAME, distance,
        )));
    }
    Ok((front, back))
}

//--------------------------------------------------------------------------------------
// Iter

impl<'a, T, O: Order, D: Direction> Iter<'a, T, O, D> {
    pub(crate) fn new(matrix: &'a Matrix<T>, cursor: Cursor<O, D>) -> Self
    {
        debug_assert!(cursor.check_origin(matrix.origin()).is_ok());
        Iter { matrix, cursor }
    }

    /// The detached position.
    pub fn cursor(&self) -> Cursor<O, D> { self.cursor }

    pub fn coords(&self) -> Result<(usize, usize)> { self.cursor.coords() }
    pub fn is_end(&self) -> bool { self.cursor.is_end() }
    pub fn sequence_index(&self) -> isize { self.cursor.sequence_index() }

    /// The element pointed at.  (`*it`)
    pub fn get(&self) -> Result<&'a T>
    { self.at(0) }

    /// The element `n` steps away.  (`it[n]`)
    pub fn at(&self, n: isize) -> Result<&'a T>
    {
        let (r, c) = self.cursor.resolve_at(n)?;
        Ok(self.matrix.cell(r, c))
    }

    /// Iterator positioned at the start of this one's window.
    pub fn begin(&self) -> Self { Iter { cursor: self.cursor.begin(), ..*self } }

    /// Iterator positioned at the end of this one's window.
    pub fn end(&self) -> Self { Iter { cursor: self.cursor.end(), ..*self } }

    pub fn distance_from(&self, other: &Self) -> Result<isize>
    { self.cursor.distance_from(&other.cursor) }

    pub fn try_cmp(&self, other: &Self) -> Result<Ordering>
    { self.cursor.try_cmp(&other.cursor) }

    pub fn inc(&mut self) -> &mut Self { self.cursor.inc(); self }
    pub fn dec(&mut self) -> &mut Self { self.cursor.dec(); self }
    pub fn post_inc(&mut self) -> Self { let old = *self; self.inc(); old }
    pub fn post_dec(&mut self) -> Self { let old = *self; self.dec(); old }

    /// The elements from here up to (not including) `end`.
    ///
    /// Fails if `end` is from elsewhere, precedes `self`, or if the range
    /// leaves this iterator's window.
    pub fn until(self, end: Self) -> Result<Traverse<'a, T, O, D>>
    {
        let (front, back) = checked_range(&self.cursor, &end.cursor)?;
        Ok(Traverse {
            matrix: self.matrix,
            order: self.cursor.order(),
            front,
            back,
            direction: D::default(),
        })
    }

    /// The elements from here to the end of the window.
    pub fn rest(self) -> Result<Traverse<'a, T, O, D>>
    { self.until(self.end()) }
}

impl<'a, T, O: Order, D: Direction> Clone for Iter<'a, T, O, D> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T, O: Order, D: Direction> Copy for Iter<'a, T, O, D> {}

impl<'a, T, O: Order, D: Direction> fmt::Debug for Iter<'a, T, O, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { f.debug_struct("Iter").field("cursor", &self.cursor).finish() }
}

impl<'a, T, O: Order, D: Direction> Add<isize> for Iter<'a, T, O, D> {
    type Output = Self;
    fn add(self, n: isize) -> Self { Iter { cursor: self.cursor + n, ..self } }
}

impl<'a, T, O: Order, D: Direction> Sub<isize> for Iter<'a, T, O, D> {
    type Output = Self;
    fn sub(self, n: isize) -> Self { Iter { cursor: self.cursor - n, ..self } }
}

impl<'a, T, O: Order, D: Direction> AddAssign<isize> for Iter<'a, T, O, D> {
    fn add_assign(&mut self, n: isize) { self.cursor += n; }
}

impl<'a, T, O: Order, D: Direction> SubAssign<isize> for Iter<'a, T, O, D> {
    fn sub_assign(&mut self, n: isize) { self.cursor -= n; }
}

impl<'a, T, O: Order, D: Direction> Sub for Iter<'a, T, O, D> {
    type Output = isize;
    fn sub(self, other: Self) -> isize { or_panic(self.distance_from(&other)) }
}

impl<'a, T, O: Order, D: Direction> PartialEq for Iter<'a, T, O, D> {
    fn eq(&self, other: &Self) -> bool { self.cursor == other.cursor }
}

impl<'a, T, O: Order, D: Direction> PartialOrd for Iter<'a, T, O, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering>
    { self.cursor.partial_cmp(&other.cursor) }
}

impl<'a, T, O: Order, D: Direction> Index<isize> for Iter<'a, T, O, D> {
    type Output = T;
    fn index(&self, n: isize) -> &T { or_panic(self.at(n)) }
}

//--------------------------------------------------------------------------------------
// IterMut

impl<'a, T, O: Order, D: Direction> IterMut<'a, T, O, D> {
    pub(crate) fn new(matrix: &'a mut Matrix<T>, cursor: Cursor<O, D>) -> Self
    {
        debug_assert!(cursor.check_origin(matrix.origin()).is_ok());
        IterMut { matrix, cursor }
    }

    pub fn cursor(&self) -> Cursor<O, D> { self.cursor }

    pub fn coords(&self) -> Result<(usize, usize)> { self.cursor.coords() }
    pub fn is_end(&self) -> bool { self.cursor.is_end() }
    pub fn sequence_index(&self) -> isize { self.cursor.sequence_index() }

    /// A read-only iterator at the same position, borrowing this one.
    pub fn as_iter(&self) -> Iter<'_, T, O, D>
    { Iter { matrix: &*self.matrix, cursor: self.cursor } }

    pub fn get(&self) -> Result<&T> { self.at(0) }

    pub fn get_mut(&mut self) -> Result<&mut T> { self.at_mut(0) }

    pub fn at(&self, n: isize) -> Result<&T>
    {
        let (r, c) = self.cursor.resolve_at(n)?;
        Ok(self.matrix.cell(r, c))
    }

    pub fn at_mut(&mut self, n: isize) -> Result<&mut T>
    {
        let (r, c) = self.cursor.resolve_at(n)?;
        Ok(self.matrix.cell_mut(r, c))
    }

    /// Give up the iterator for the element it points at.
    pub fn into_mut(self) -> Result<&'a mut T>
    {
        let (r, c) = self.cursor.resolve_at(0)?;
        Ok(self.matrix.cell_mut(r, c))
    }

    pub fn distance_from(&self, other: &Cursor<O, D>) -> Result<isize>
    { self.cursor.distance_from(other) }

    pub fn try_cmp(&self, other: &Cursor<O, D>) -> Result<Ordering>
    { self.cursor.try_cmp(other) }

    pub fn inc(&mut self) -> &mut Self { self.cursor.inc(); self }
    pub fn dec(&mut self) -> &mut Self { self.cursor.dec(); self }

    /// Step forward, returning the old position (detached).
    pub fn post_inc(&mut self) -> Cursor<O, D> { self.cursor.post_inc() }

    /// Step back, returning the old position (detached).
    pub fn post_dec(&mut self) -> Cursor<O, D> { self.cursor.post_dec() }

    /// The elements from here up to (not including) `end`, which usually
    /// comes from `cursor()` on an iterator taken before this one.
    pub fn until(self, end: Cursor<O, D>) -> Result<TraverseMut<'a, T>>
    {
        let (front, back) = checked_range(&self.cursor, &end)?;
        let order = self.cursor.order();
        let coords = (front..back).map(|key| order.coords(D::signed(key) as usize));
        Ok(TraverseMut::new(self.matrix.cells_mut(coords)))
    }

    /// The elements from here to the end of the window.
    pub fn rest(self) -> Result<TraverseMut<'a, T>>
    {
        let end = self.cursor.end();
        self.until(end)
    }
}

impl<'a, T, O: Order, D: Direction> fmt::Debug for IterMut<'a, T, O, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { f.debug_struct("IterMut").field("cursor", &self.cursor).finish() }
}

impl<'a, T, O: Order, D: Direction> Add<isize> for IterMut<'a, T, O, D> {
    type Output = Self;
    fn add(mut self, n: isize) -> Self { self.cursor += n; self }
}

impl<'a, T, O: Order, D: Direction> Sub<isize> for IterMut<'a, T, O, D> {
    type Output = Self;
    fn sub(mut self, n: isize) -> Self { self.cursor -= n; self }
}

impl<'a, T, O: Order, D: Direction> AddAssign<isize> for IterMut<'a, T, O, D> {
    fn add_assign(&mut self, n: isize) { self.cursor += n; }
}

impl<'a, T, O: Order, D: Direction> SubAssign<isize> for IterMut<'a, T, O, D> {
    fn sub_assign(&mut self, n: isize) { self.cursor -= n; }
}

impl<'b, 'a, T, O: Order, D: Direction> Sub<Cursor<O, D>> for &'b IterMut<'a, T, O, D> {
    type Output = isize;
    fn sub(self, other: Cursor<O, D>) -> isize { or_panic(self.distance_from(&other)) }
}

impl<'a, T, O: Order, D: Direction> PartialEq<Cursor<O, D>> for IterMut<'a, T, O, D> {
    fn eq(&self, other: &Cursor<O, D>) -> bool { self.cursor == *other }
}

impl<'a, T, O: Order, D: Direction> PartialOrd<Cursor<O, D>> for IterMut<'a, T, O, D> {
    fn partial_cmp(&self, other: &Cursor<O, D>) -> Option<Ordering>
    { self.cursor.partial_cmp(other) }
}

impl<'a, T, O: Order, D: Direction> Index<isize> for IterMut<'a, T, O, D> {
    type Output = T;
    fn index(&self, n: isize) -> &T { or_panic(self.at(n)) }
}

impl<'a, T, O: Order, D: Direction> IndexMut<isize> for IterMut<'a, T, O, D> {
    fn index_mut(&mut self, n: isize) -> &mut T { or_panic(self.at_mut(n)) }
}

//--------------------------------------------------------------------------------------
// Traverse

impl<'a, T, O: Order, D: Direction> Traverse<'a, T, O, D> {
    pub(crate) fn empty(matrix: &'a Matrix<T>) -> Self
    { Traverse { matrix, order: O::for_shape(0, 0), front: 0, back: 0, direction: D::default() } }

    pub(crate) fn over(matrix: &'a Matrix<T>, begin: Cursor<O, D>) -> Self
    {
        let (front, back) = begin.window_keys();
        Traverse { matrix, order: begin.order(), front, back, direction: D::default() }
    }

    #[inline]
    fn element(&self, key: isize) -> &'a T
    {
        let (r, c) = self.order.coords(D::signed(key) as usize);
        self.matrix.cell(r, c)
    }
}

impl<'a, T, O: Order, D: Direction> Iterator for Traverse<'a, T, O, D> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T>
    {
        if self.front >= self.back {
            return None;
        }
        self.front += 1;
        Some(self.element(self.front - 1))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>)
    { (self.len(), Some(self.len())) }
}

impl<'a, T, O: Order, D: Direction> ExactSizeIterator for Traverse<'a, T, O, D> {
    #[inline]
    fn len(&self) -> usize
    { (self.back - self.front).max(0) as usize }
}

impl<'a, T, O: Order, D: Direction> DoubleEndedIterator for Traverse<'a, T, O, D> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T>
    {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.element(self.back))
    }
}

impl<'a, T, O: Order, D: Direction> ::std::iter::FusedIterator for Traverse<'a, T, O, D> { }

impl<'a, T, O: Order, D: Direction> Clone for Traverse<'a, T, O, D> {
    fn clone(&self) -> Self
    { Traverse { matrix: self.matrix, ..*self } }
}

//--------------------------------------------------------------------------------------
// TraverseMut

impl<'a, T> TraverseMut<'a, T> {
    pub(crate) fn new(elements: Vec<&'a mut T>) -> Self
    { TraverseMut { inner: elements.into_iter() } }
}

impl<'a, T> Iterator for TraverseMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> { self.inner.next() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, T> ExactSizeIterator for TraverseMut<'a, T> {
    #[inline]
    fn len(&self) -> usize { self.inner.len() }
}

impl<'a, T> DoubleEndedIterator for TraverseMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> { self.inner.next_back() }
}

impl<'a, T> ::std::iter::FusedIterator for TraverseMut<'a, T> { }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter::cursor::{Forward, Reverse};
    use crate::iter::order::{AntiDiagonal, ColumnMajor, Diagonal, RowMajor};

    fn counting(rows: usize, cols: usize) -> Matrix<i32>
    { Matrix::from_fn((rows, cols), |r, c| (10 * r + c) as i32).unwrap() }

    #[test]
    fn traverse_is_double_ended_and_exact()
    {
        let m = counting(2, 3);
        let mut it = m.traverse::<ColumnMajor, Forward>();
        assert_eq!(it.len(), 6);
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&12));
        assert_eq!(it.len(), 4);
        assert_eq!(it.clone().collect::<Vec<_>>(), vec![&10, &1, &11, &2]);
        assert_eq!(it.rev().collect::<Vec<_>>(), vec![&2, &11, &1, &10]);

        let rev: Vec<_> = m.traverse::<RowMajor, Reverse>().cloned().collect();
        assert_eq!(rev, vec![12, 11, 10, 2, 1, 0]);
    }

    #[test]
    fn until_stays_inside_the_window()
    {
        let m = counting(3, 3);
        let begin = m.row_begin::<Forward>(1).unwrap();
        let end = m.row_end::<Forward>(1).unwrap();
        assert_eq!(begin.until(end).unwrap().cloned().collect::<Vec<_>>(), vec![10, 11, 12]);

        // a whole-matrix end is a valid position, but not within one row
        let far = m.end::<RowMajor, Forward>().unwrap();
        assert_matches!(Err(Error::InvalidDereference(_)), begin.until(far));
        assert_matches!(Err(Error::OutOfRange(_)), end.until(begin));
        assert_eq!((begin + 1).until(begin + 1).unwrap().len(), 0);
    }

    #[test]
    fn offset_access()
    {
        let m = counting(3, 4);
        let it = m.iter_at::<Diagonal, Forward>(0, 0).unwrap();
        // diagonal order of a 3x4 matrix: (2,0) (1,0) (2,1) (0,0) (1,1) (2,2) ...
        assert_eq!(it[0], 0);
        assert_eq!(it[1], 11);
        assert_eq!(it[-1], 21);
        assert_eq!(*it.at(2).unwrap(), 22);
        assert_matches!(Err(Error::InvalidDereference(_)), it.at(-4));
        assert_eq!(it.end() - it.begin(), 12);
    }

    #[test]
    fn iter_mut_writes_through()
    {
        let mut m = counting(3, 3);
        let end = m.diagonal_end::<AntiDiagonal, Forward>(0).unwrap().cursor();
        let begin = m.diagonal_begin_mut::<AntiDiagonal, Forward>(0, 0).unwrap();
        for x in begin.until(end).unwrap() {
            *x = -*x;
        }
        assert_eq!(m.to_nested_vec(), vec![
            vec![0, 1, -2],
            vec![10, -11, 12],
            vec![-20, 21, 22],
        ]);

        let mut it = m.z_begin_mut::<Reverse>().unwrap();
        *it.get_mut().unwrap() = 99;
        it.inc();
        it[1] = 98;
        assert_eq!(it.coords(), Ok((2, 1)));
        let rest: Vec<_> = it.rest().unwrap().map(|x| *x).collect();
        assert_eq!(rest, vec![21, 98, 12, -11, 10, -2, 1, 0]);
        assert_eq!(m[(2, 2)], 99);
    }

    #[test]
    fn iter_mut_against_cursors()
    {
        let mut m = counting(2, 2);
        let end = m.n_begin::<Forward>().unwrap().end().cursor();
        let mut it = m.n_begin_mut::<Forward>().unwrap();
        assert!(it < end);
        assert_eq!(&it - end, -4);
        it += 4;
        assert!(it == end);
        assert_matches!(Err(Error::InvalidDereference(_)), it.get());
        assert_matches!(Err(Error::InvalidDereference(_)), it.into_mut());
    }
}
