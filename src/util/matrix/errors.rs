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

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Every way a caller can misuse a matrix or one of its cursors.
///
/// These are all logic errors; nothing here describes an environmental
/// failure, so there is never anything to retry.  A mutator that returns
/// one of these has not touched the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A row, column, sequence index or diagonal that is not inside the
    /// current logical shape.  (every factory on an empty matrix lands here)
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Two positions that do not come from the same matrix at the same
    /// structural revision.
    #[error("cross-origin: {0}")]
    CrossOrigin(String),

    /// Dereferencing an end position, or an offset outside `[begin, end)`.
    #[error("invalid dereference: {0}")]
    InvalidDereference(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A logical count that would exceed the dimension limit.
    ///
    /// (capacity *requests* clamp to the limit; counts cannot)
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}

impl Error {
    pub fn is_out_of_range(&self) -> bool
    { match self { Error::OutOfRange(_) => true, _ => false } }

    pub fn is_cross_origin(&self) -> bool
    { match self { Error::CrossOrigin(_) => true, _ => false } }

    pub fn is_invalid_dereference(&self) -> bool
    { match self { Error::InvalidDereference(_) => true, _ => false } }
}

/// Unwraps a result inside an operator impl, which has no way to report it.
#[inline]
pub(crate) fn or_panic<T>(result: Result<T>) -> T
{
    match result {
        Ok(x) => x,
        Err(e) => panic!("{}", e),
    }
}
