// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading-order sorting of input targets.
//!
//! Targets are ordered top-to-bottom, then left-to-right, by the origin of
//! their rectangle. Rows are not snapped: a target whose top edge sits even
//! slightly higher comes first. All rectangles must be expressed in one shared coordinate
//! space. The order of overlapping siblings and right-to-left layouts is not
//! specified beyond "stable": equal origins keep their input order.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::Rect;

/// Sort `(target, rect)` pairs into reading order, in place.
pub fn sort_reading_order<K>(entries: &mut [(K, Rect)]) {
    entries.sort_by(|(_, a), (_, b)| compare_rect_reading(a, b));
}

/// Collect targets into reading order.
///
/// ```
/// use kurbo::Rect;
/// use understory_input_nav::reading_order;
///
/// let order = reading_order([
///     ("email", Rect::new(0.0, 120.0, 300.0, 160.0)),
///     ("last", Rect::new(160.0, 40.0, 300.0, 80.0)),
///     ("first", Rect::new(0.0, 40.0, 150.0, 80.0)),
/// ]);
/// assert_eq!(order, ["first", "last", "email"]);
/// ```
pub fn reading_order<K>(entries: impl IntoIterator<Item = (K, Rect)>) -> Vec<K> {
    let mut entries: Vec<(K, Rect)> = entries.into_iter().collect();
    sort_reading_order(&mut entries);
    entries.into_iter().map(|(k, _)| k).collect()
}

/// Total order on rectangle origins: `y0`, then `x0`.
///
/// Coordinates are compared exactly so the order stays transitive, which
/// `sort_by` requires. NaN sorts after every number.
fn compare_rect_reading(a: &Rect, b: &Rect) -> Ordering {
    a.y0.total_cmp(&b.y0).then_with(|| a.x0.total_cmp(&b.x0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_before_columns() {
        let mut entries = [
            (1_u32, Rect::new(100.0, 10.0, 150.0, 20.0)),
            (2, Rect::new(0.0, 50.0, 50.0, 60.0)),
            (3, Rect::new(0.0, 10.0, 50.0, 20.0)),
        ];
        sort_reading_order(&mut entries);
        let ids: Vec<u32> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(ids, [3, 1, 2]);
    }

    #[test]
    fn identical_origins_keep_input_order() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(reading_order([(7_u32, r), (3, r), (5, r)]), [7, 3, 5]);
    }

    #[test]
    fn near_equal_rows_sort_consistently() {
        // Tops are a hair apart; x runs the other way.
        let a = Rect::new(30.0, 100.0, 40.0, 110.0);
        let b = Rect::new(20.0, 100.000_06, 30.0, 110.0);
        let c = Rect::new(10.0, 100.000_12, 20.0, 110.0);
        let expected = ['a', 'b', 'c'];
        assert_eq!(reading_order([('c', c), ('b', b), ('a', a)]), expected);
        assert_eq!(reading_order([('b', b), ('a', a), ('c', c)]), expected);
        assert_eq!(reading_order([('a', a), ('c', c), ('b', b)]), expected);
    }

    #[test]
    fn nan_origins_sort_last() {
        let nan = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        let top = Rect::new(0.0, 5.0, 10.0, 10.0);
        assert_eq!(reading_order([(1_u32, nan), (2, top)]), [2, 1]);
    }
}
