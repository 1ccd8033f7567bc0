use rsp2_grid::Matrix;

use ::rand::Rng;

/// Matrix whose element at `(r, c)` is `1000 * r + c`, so that every
/// element says where it started.
pub fn labeled((rows, cols): (usize, usize)) -> Matrix<i64>
{ Matrix::from_fn((rows, cols), |r, c| 1000 * r as i64 + c as i64).unwrap() }

/// Same as `labeled`, but with heap-owning elements.
pub fn labeled_text((rows, cols): (usize, usize)) -> Matrix<String>
{ Matrix::from_fn((rows, cols), |r, c| format!("{}:{}", r, c)).unwrap() }

pub fn random_dims<R: Rng>(rng: &mut R, max: usize) -> (usize, usize)
{ (rng.gen_range(1, max + 1), rng.gen_range(1, max + 1)) }

/// `(row_capacity, column_capacity, row_offset, column_offset)`
pub fn capacity_state<T>(m: &Matrix<T>) -> (usize, usize, Option<usize>, Option<usize>)
{ (m.row_capacity(), m.column_capacity(), m.row_capacity_offset(), m.column_capacity_offset()) }

/// Panics unless both axes are centered in their capacity.
pub fn assert_centered<T>(m: &Matrix<T>)
{
    let (rcap, ccap, roff, coff) = capacity_state(m);
    assert_eq!(roff, Some((rcap - m.num_rows()) / 2), "rows not centered");
    assert_eq!(coff, Some((ccap - m.num_cols()) / 2), "columns not centered");
}

pub fn init_logger()
{ let _ = ::env_logger::try_init(); }
