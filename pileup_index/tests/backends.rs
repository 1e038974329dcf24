// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-backend agreement tests.
//!
//! The flat-vector backend is exact by construction, so the R-tree must give
//! the same answers for every query on the same inserted set.

use pileup_index::{Aabb2D, Index};
use proptest::prelude::*;

fn rect() -> impl Strategy<Value = Aabb2D<f64>> {
    (0.0..2000.0_f64, 0.0..200.0_f64, 0.5..150.0_f64, 0.5..12.0_f64)
        .prop_map(|(x, y, w, h)| Aabb2D::from_xywh(x, y, w, h))
}

proptest! {
    #[test]
    fn rtree_agrees_with_flatvec(
        boxes in prop::collection::vec(rect(), 0..400),
        queries in prop::collection::vec(rect(), 1..50),
        points in prop::collection::vec((0.0..2200.0_f64, 0.0..220.0_f64), 1..50),
    ) {
        let mut flat = Index::<f64, usize>::new();
        let mut tree = Index::<f64, usize>::with_rtree();
        for (i, b) in boxes.iter().enumerate() {
            flat.insert(*b, i);
            tree.insert(*b, i);
        }

        for q in &queries {
            prop_assert_eq!(flat.collides(*q), tree.collides(*q));
            let mut a: Vec<usize> = flat.query_rect(*q).map(|(_, p)| p).collect();
            let mut b: Vec<usize> = tree.query_rect(*q).map(|(_, p)| p).collect();
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }

        for &(x, y) in &points {
            let mut a: Vec<usize> = flat.query_point(x, y).map(|(_, p)| p).collect();
            let mut b: Vec<usize> = tree.query_point(x, y).map(|(_, p)| p).collect();
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }
    }
}

#[test]
fn stacked_rows_collide_only_inside_their_span() {
    let mut idx = Index::<f64, ()>::with_rtree();
    for row in 0..50 {
        let y = f64::from(row) * 5.0;
        idx.insert(Aabb2D::new(100.0, y, 200.0, y + 5.0), ());
    }
    assert_eq!(idx.len(), 50);
    assert!(idx.collides(Aabb2D::new(150.0, 120.01, 250.0, 124.99)));
    assert!(!idx.collides(Aabb2D::new(200.0, 0.0, 300.0, 250.0)));
    assert!(!idx.collides(Aabb2D::new(0.0, 0.0, 100.0, 250.0)));
    assert!(!idx.collides(Aabb2D::new(150.0, 250.0, 160.0, 260.0)));
    assert_eq!(idx.query_rect(Aabb2D::new(150.0, 0.0, 151.0, 250.0)).count(), 50);
}
