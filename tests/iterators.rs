#[macro_use]
extern crate pretty_assertions;
#[macro_use]
extern crate itertools;

use rsp2_grid::{Direction, Forward, Matrix, Order, Reverse};
use rsp2_grid::{AntiDiagonal, ColumnMajor, Diagonal, RowMajor};
use rsp2_grid::{ZIter, ZRevIter, ZIterMut, ZRevIterMut};
use rsp2_grid::{NIter, NRevIter, NIterMut, NRevIterMut};
use rsp2_grid::{DIter, DRevIter, DIterMut, DRevIterMut};
use rsp2_grid::{MIter, MRevIter, MIterMut, MRevIterMut};

use ::rand::Rng;

mod shared;
use self::shared::util::{labeled, labeled_text, random_dims};

// Visits every element once through `Iter`, by index arithmetic only.
fn visit_by_offset<O: Order, D: Direction>(m: &Matrix<i64>) -> Vec<i64>
{
    let begin = m.begin::<O, D>().unwrap();
    let end = m.end::<O, D>().unwrap();
    (0..end - begin).map(|n| begin[n]).collect()
}

#[test]
fn all_orders_visit_every_element_once()
{
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let dims = random_dims(&mut rng, 12);
        let m = labeled(dims);
        let mut expected = m.to_row_major_vec();
        expected.sort();

        let runs = vec![
            visit_by_offset::<RowMajor, Forward>(&m),
            visit_by_offset::<RowMajor, Reverse>(&m),
            visit_by_offset::<ColumnMajor, Forward>(&m),
            visit_by_offset::<ColumnMajor, Reverse>(&m),
            visit_by_offset::<Diagonal, Forward>(&m),
            visit_by_offset::<Diagonal, Reverse>(&m),
            visit_by_offset::<AntiDiagonal, Forward>(&m),
            visit_by_offset::<AntiDiagonal, Reverse>(&m),
        ];
        for mut run in runs {
            run.sort();
            assert_eq!(run, expected);
        }
    }
}

#[test]
fn reverse_is_forward_backwards()
{
    let m = labeled((4, 6));
    let mut forward: Vec<_> = m.d_iter().cloned().collect();
    forward.reverse();
    assert_eq!(forward, visit_by_offset::<Diagonal, Reverse>(&m));
    assert_eq!(m.m_iter().rev().cloned().collect::<Vec<_>>(), visit_by_offset::<AntiDiagonal, Reverse>(&m));
}

#[test]
fn distance_law()
{
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let dims = random_dims(&mut rng, 10);
        let m = labeled(dims);
        let size = (dims.0 * dims.1) as isize;

        let begin: NRevIter<_> = m.n_begin().unwrap();
        let i = begin + rng.gen_range(0, size + 1);
        let j = begin + rng.gen_range(0, size + 1);
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        assert!(j - i >= 0);
        assert!(i + (j - i) == j);
        assert!(j - (j - i) == i);
    }
}

#[test]
fn random_access_operators()
{
    let m = labeled((3, 3));
    let mut it: ZIter<_> = m.z_begin().unwrap();
    assert_eq!(*it.get().unwrap(), 0);

    assert_eq!(*it.inc().get().unwrap(), 1);
    assert_eq!(*it.post_inc().get().unwrap(), 1);
    assert_eq!(*it.get().unwrap(), 2);
    it += 2;
    assert_eq!(it.coords(), Ok((1, 1)));
    it -= 1;
    assert_eq!(it[0], 1000);
    assert_eq!(it[-1], 2);
    assert_eq!(*it.post_dec().get().unwrap(), 1000);
    assert_eq!(*it.dec().get().unwrap(), 1);

    let other = it + 3;
    assert!(it < other && other > it && it != other);
    assert!(it <= it && it >= it && it == it);
    assert_eq!(other - it, 3);
    assert_eq!(it - other, -3);
}

#[test]
fn end_positions_cannot_be_dereferenced()
{
    let m = labeled((2, 3));

    let end: ZIter<_> = m.z_end().unwrap();
    assert!(end.is_end());
    assert!(end.get().unwrap_err().is_invalid_dereference());
    assert_eq!(*(end - 1).get().unwrap(), 1002);

    let end: MRevIter<_> = m.m_end().unwrap();
    assert!(end.is_end());
    assert!(end.get().unwrap_err().is_invalid_dereference());
    assert_eq!(end.sequence_index(), -1);
    // the anti-diagonal order starts in the bottom-right corner
    assert_eq!(*(end - 1).get().unwrap(), 1002);

    let row: ZIter<_> = m.row_begin(0).unwrap();
    assert!(row.at(3).unwrap_err().is_invalid_dereference());
    assert!(row.at(-1).unwrap_err().is_invalid_dereference());
}

#[test]
#[should_panic(expected = "invalid dereference")]
fn indexing_an_end_panics()
{
    let m = labeled((2, 2));
    let end: DIter<_> = m.d_end().unwrap();
    let _ = end[0];
}

#[test]
fn element_methods_through_iterators()
{
    let m = labeled_text((2, 3));
    let it: DRevIter<_> = m.diagonal_begin_at(1, 1).unwrap();
    assert_eq!(it.get().map(|s| s.len()), Ok(3));
    assert!(it.get().unwrap().starts_with("1:"));
    assert_eq!(it[1].as_str(), "0:0");

    let mut m = m;
    let mut it: NIterMut<_> = m.column_begin_mut(2).unwrap();
    it.get_mut().unwrap().push_str("!");
    assert_eq!(it.get().unwrap().len(), 4);
    assert_eq!(m.get(0, 2).map(String::as_str), Some("0:2!"));
}

#[test]
fn reverse_diagonals_start_where_asked()
{
    let mut m = labeled((3, 3));
    let d: DRevIter<_> = m.diagonal_begin_at(0, 0).unwrap();
    assert_eq!(d.coords(), Ok((0, 0)));
    assert_eq!(d.until(m.diagonal_end_at(0, 0).unwrap()).unwrap().len(), 1);

    let a: MRevIter<_> = m.diagonal_begin(0, 1).unwrap();
    assert_eq!(a.coords(), Ok((1, 1)));
    assert_eq!(a.until(m.diagonal_end(0).unwrap()).unwrap().cloned().collect::<Vec<_>>(), vec![1001, 2]);

    let d: DRevIterMut<_> = m.diagonal_begin_mut(0, 2).unwrap();
    assert_eq!(d.coords(), Ok((2, 2)));
    let a: MRevIterMut<_> = m.diagonal_begin_at_mut(1, 0).unwrap();
    assert_eq!(a.coords(), Ok((1, 0)));
}

#[test]
fn structural_changes_invalidate_cursors()
{
    let mut m = labeled_text((3, 3));
    let kept: Vec<_> = vec![
        m.z_begin::<Forward>().unwrap().cursor(),
        m.z_end::<Forward>().unwrap().cursor(),
    ];

    for step in 0..7 {
        let before = m.z_begin::<Forward>().unwrap().cursor();
        match step {
            0 => m.insert_row(1).unwrap(),
            1 => m.erase_column(0).unwrap(),
            2 => m.resize(4, 4).unwrap(),
            3 => m.reserve(20, 20),
            4 => m.transpose(),
            5 => m.cat_self_by_column().unwrap(),
            _ => m.clone_from(&labeled_text((2, 2))),
        }
        let after = m.z_begin::<Forward>().unwrap().cursor();
        assert!(m.attach(before).unwrap_err().is_cross_origin());
        assert!(after.distance_from(&before).unwrap_err().is_cross_origin());
        for &cursor in &kept {
            assert!(m.attach(cursor).is_err());
        }
    }
}

#[test]
fn swaps_of_elements_keep_cursors_valid()
{
    let mut m = labeled((3, 3));
    let cursor = m.iter_at::<ColumnMajor, Forward>(1, 2).unwrap().cursor();
    m.swap_rows(0, 1).unwrap();
    m.swap_columns(2, 0).unwrap();
    assert_eq!(*m.attach(cursor).unwrap().get().unwrap(), 0);
}

#[test]
fn mutable_iterators_of_every_family()
{
    let mut m = labeled((3, 4));

    // negate row 1
    let end = m.row_end::<Forward>(1).unwrap().cursor();
    let row: ZIterMut<_> = m.row_begin_mut(1).unwrap();
    for x in row.until(end).unwrap() {
        *x = -*x;
    }

    // the last column, bottom to top
    let mut col: NRevIterMut<_> = m.column_begin_mut(3).unwrap();
    assert_eq!(col.get(), Ok(&2003));
    col[2] = 7;

    // the main diagonal
    let mut diag: DIterMut<_> = m.diagonal_begin_mut(0, 0).unwrap();
    for n in 0..3 {
        *diag.at_mut(n).unwrap() += 1;
    }

    // the main anti-diagonal, walking back from its far end
    let anti: MRevIterMut<_> = m.diagonal_begin_at_mut(2, 1).unwrap();
    *anti.into_mut().unwrap() = 42;

    assert_eq!(m.to_nested_vec(), vec![
        vec![1, 1, 2, 7],
        vec![-1000, -1000, -1002, -1003],
        vec![2000, 42, 2003, 2003],
    ]);
}

#[test]
fn the_other_aliases()
{
    let mut m = labeled((2, 2));
    {
        let _: ZRevIter<_> = m.z_begin().unwrap();
        let _: NIter<_> = m.n_begin().unwrap();
        let _: DRevIter<_> = m.d_begin().unwrap();
        let _: MIter<_> = m.m_begin().unwrap();
    }
    {
        let mut it: ZRevIterMut<_> = m.z_begin_mut().unwrap();
        *it.get_mut().unwrap() += 1;
    }
    {
        let mut it: NIterMut<_> = m.n_begin_mut().unwrap();
        it += 1;
        *it.get_mut().unwrap() += 10;
    }
    {
        let mut it: DRevIterMut<_> = m.d_begin_mut().unwrap();
        *it.get_mut().unwrap() += 100;
    }
    {
        let mut it: MIterMut<_> = m.m_begin_mut().unwrap();
        *it.get_mut().unwrap() += 1000;
    }
    // z-rev starts at (1,1), n is at (1,0) after one step, d-rev starts at (0,1), m starts at (1,1)
    assert_eq!(m.to_nested_vec(), vec![vec![0, 101], vec![1010, 2002]]);
}

#[test]
fn traversals_agree_with_coordinates()
{
    let mut rng = rand::thread_rng();
    for _ in 0..30 {
        let dims = random_dims(&mut rng, 9);
        let m = labeled(dims);
        for (r, c) in iproduct!(0..dims.0, 0..dims.1) {
            let z: ZIter<_> = m.iter_at(r, c).unwrap();
            let n: NIter<_> = m.iter_at(r, c).unwrap();
            let d: DIter<_> = m.iter_at(r, c).unwrap();
            let a: MRevIter<_> = m.iter_at(r, c).unwrap();
            for it_coords in vec![z.coords(), n.coords(), d.coords(), a.coords()] {
                assert_eq!(it_coords, Ok((r, c)));
            }
            assert_eq!(z.get().ok(), m.get(r, c));
        }
    }
}
