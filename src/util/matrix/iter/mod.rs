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

//! Random-access traversal in four orders.
//!
//! There is one iterator core, parameterized by an [`Order`] (row-major,
//! column-major, diagonal, anti-diagonal) and a [`Direction`], in three
//! flavors: a detached [`Cursor`], a read-only [`Iter`] and a read-write
//! [`IterMut`].  The sixteen named combinations are type aliases.
//!
//! [`Order`]: trait.Order.html
//! [`Direction`]: trait.Direction.html
//! [`Cursor`]: struct.Cursor.html
//! [`Iter`]: struct.Iter.html
//! [`IterMut`]: struct.IterMut.html

mod order;
mod cursor;
mod view;
mod factory;

pub use self::order::{Order, DiagonalOrder, RowMajor, ColumnMajor, Diagonal, AntiDiagonal};
pub use self::cursor::{Cursor, Direction, Forward, Reverse};
pub use self::view::{Iter, IterMut, Traverse, TraverseMut};

pub type ZIter<'a, T> = Iter<'a, T, RowMajor, Forward>;
pub type ZRevIter<'a, T> = Iter<'a, T, RowMajor, Reverse>;
pub type ZIterMut<'a, T> = IterMut<'a, T, RowMajor, Forward>;
pub type ZRevIterMut<'a, T> = IterMut<'a, T, RowMajor, Reverse>;

pub type NIter<'a, T> = Iter<'a, T, ColumnMajor, Forward>;
pub type NRevIter<'a, T> = Iter<'a, T, ColumnMajor, Reverse>;
pub type NIterMut<'a, T> = IterMut<'a, T, ColumnMajor, Forward>;
pub type NRevIterMut<'a, T> = IterMut<'a, T, ColumnMajor, Reverse>;

pub type DIter<'a, T> = Iter<'a, T, Diagonal, Forward>;
pub type DRevIter<'a, T> = Iter<'a, T, Diagonal, Reverse>;
pub type DIterMut<'a, T> = IterMut<'a, T, Diagonal, Forward>;
pub type DRevIterMut<'a, T> = IterMut<'a, T, Diagonal, Reverse>;

pub type MIter<'a, T> = Iter<'a, T, AntiDiagonal, Forward>;
pub type MRevIter<'a, T> = Iter<'a, T, AntiDiagonal, Reverse>;
pub type MIterMut<'a, T> = IterMut<'a, T, AntiDiagonal, Forward>;
pub type MRevIterMut<'a, T> = IterMut<'a, T, AntiDiagonal, Reverse>;
