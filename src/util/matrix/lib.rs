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

//! Dense two-dimensional storage with growable rows and columns.
//!
//! A [`Matrix`] keeps slack capacity on both sides of both axes, so whole
//! rows and columns can be inserted, erased, concatenated and split off
//! without reallocating most of the time.  Elements can be visited in
//! row-major, column-major, diagonal and anti-diagonal order through a
//! family of random-access iterators (see the [`iter`] module).
//!
//! Nothing here does arithmetic; the element type is arbitrary.
//!
//! [`Matrix`]: struct.Matrix.html
//! [`iter`]: iter/index.html

#[macro_use]
extern crate log;
#[macro_use]
extern crate itertools;
#[cfg(test)]
extern crate rand;

macro_rules! throw {
    ($e:expr) => {
        return Err(::std::convert::Into::into($e))
    }
}

#[cfg(test)]
macro_rules! assert_matches {
    ($pat:pat, $expr:expr $(,)*)
    => {
        match $expr {
            $pat => {},
            actual => panic!(
                "assertion failed: {} (actual {:?})",
                stringify!(assert_matches!($pat, $expr)),
                actual,
            ),
        }
    };
}

mod errors;
mod capacity;
mod matrix;
mod structure;
mod concat;
pub mod iter;

pub use crate::errors::{Error, Result};
pub use crate::capacity::{max_dimension, MAX_BUFFER_BYTES};
pub use crate::matrix::Matrix;

pub use crate::iter::{Cursor, Iter, IterMut, Traverse, TraverseMut};
pub use crate::iter::{Order, DiagonalOrder, RowMajor, ColumnMajor, Diagonal, AntiDiagonal};
pub use crate::iter::{Direction, Forward, Reverse};
pub use crate::iter::{ZIter, ZRevIter, ZIterMut, ZRevIterMut};
pub use crate::iter::{NIter, NRevIter, NIterMut, NRevIterMut};
pub use crate::iter::{DIter, DRevIter, DIterMut, DRevIterMut};
pub use crate::iter::{MIter, MRevIter, MIterMut, MRevIterMut};
