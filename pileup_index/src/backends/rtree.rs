// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree backend generic over scalar `T: Scalar` with SAH-like split.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, ScalarAcc, area, union_aabb};

/// Traversal stack; deep enough for trees holding millions of entries.
type Stack = SmallVec<[NodeIdx; 32]>;

/// Insertion-only R-tree using SAH-like splits and widened accumulator metrics.
pub struct RTree<T: Scalar> {
    max_children: usize,
    min_children: usize,
    root: Option<NodeIdx>,
    arena: Vec<RNode<T>>,
    len: usize,
}

#[derive(Clone)]
struct RNode<T: Scalar> {
    bbox: Aabb2D<T>,
    leaf: bool,
    children: Vec<RChild<T>>,
}

#[derive(Copy, Clone)]
enum RChild<T: Scalar> {
    Node(NodeIdx),
    Item { slot: usize, bbox: Aabb2D<T> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self::with_fanout(8)
    }
}

impl<T: Scalar> RTree<T> {
    /// Create an empty tree whose nodes hold at most `max_children` entries.
    ///
    /// `max_children` is raised to 4 if smaller; nodes split into halves of at
    /// least `max_children / 2` entries.
    pub fn with_fanout(max_children: usize) -> Self {
        let max_children = max_children.max(4);
        Self {
            max_children,
            min_children: max_children / 2,
            root: None,
            arena: Vec::new(),
            len: 0,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn child_bbox(arena: &[RNode<T>], c: &RChild<T>) -> Aabb2D<T> {
        match c {
            RChild::Node(i) => arena[i.get()].bbox,
            RChild::Item { bbox, .. } => *bbox,
        }
    }

    fn node_bbox(arena: &[RNode<T>], children: &[RChild<T>]) -> Aabb2D<T> {
        let mut it = children.iter();
        let first = match it.next() {
            Some(c) => Self::child_bbox(arena, c),
            None => Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()),
        };
        it.fold(first, |acc, c| union_aabb(acc, Self::child_bbox(arena, c)))
    }

    fn enlarge_cost(a: &Aabb2D<T>, b: &Aabb2D<T>) -> ScalarAcc<T> {
        let u = union_aabb(*a, *b);
        area(&u) - area(a)
    }

    fn choose_child(arena: &[RNode<T>], children: &[RChild<T>], bbox: &Aabb2D<T>) -> usize {
        let mut best_idx = 0_usize;
        let mut best_cost: Option<ScalarAcc<T>> = None;
        for (i, c) in children.iter().enumerate() {
            let cost = Self::enlarge_cost(&Self::child_bbox(arena, c), bbox);
            if best_cost.is_none_or(|bc| cost < bc) {
                best_cost = Some(cost);
                best_idx = i;
            }
        }
        best_idx
    }

    /// SAH-like split: sort along an axis, precompute prefix/suffix AABBs, and
    /// choose `k` that minimizes `area(LB_k) * k + area(RB_k) * (n - k)`.
    fn split_children(
        arena: &[RNode<T>],
        children: Vec<RChild<T>>,
        min_children: usize,
    ) -> (Vec<RChild<T>>, Vec<RChild<T>>) {
        let n = children.len();
        let mut best: Option<(ScalarAcc<T>, usize, usize)> = None;
        let mut by_axis: [Vec<RChild<T>>; 2] = [children.clone(), children];
        for (axis, v) in by_axis.iter_mut().enumerate() {
            v.sort_by(|a, b| {
                let (a, b) = (Self::child_bbox(arena, a), Self::child_bbox(arena, b));
                let (ca, cb) = if axis == 0 {
                    (T::mid(a.min_x, a.max_x), T::mid(b.min_x, b.max_x))
                } else {
                    (T::mid(a.min_y, a.max_y), T::mid(b.min_y, b.max_y))
                };
                ca.partial_cmp(&cb).unwrap_or(Ordering::Equal)
            });

            let boxes: Vec<Aabb2D<T>> = v.iter().map(|c| Self::child_bbox(arena, c)).collect();
            let prefix: Vec<Aabb2D<T>> = boxes
                .iter()
                .scan(None, |acc: &mut Option<Aabb2D<T>>, bb| {
                    let next = acc.map_or(*bb, |prev| union_aabb(prev, *bb));
                    *acc = Some(next);
                    Some(next)
                })
                .collect();
            let mut suffix: Vec<Aabb2D<T>> = boxes
                .iter()
                .rev()
                .scan(None, |acc: &mut Option<Aabb2D<T>>, bb| {
                    let next = acc.map_or(*bb, |prev| union_aabb(*bb, prev));
                    *acc = Some(next);
                    Some(next)
                })
                .collect();
            suffix.reverse();

            for k in min_children..=(n - min_children) {
                let c = area(&prefix[k - 1]) * T::acc_from_usize(k)
                    + area(&suffix[k]) * T::acc_from_usize(n - k);
                if best.is_none_or(|(bc, _, _)| c < bc) {
                    best = Some((c, axis, k));
                }
            }
        }
        // `n > max_children >= 2 * min_children`, so some split was evaluated.
        let (_, axis, k) = best.unwrap_or((T::zero().widen(), 0, n / 2));
        let mut left = core::mem::take(&mut by_axis[axis]);
        let right = left.split_off(k);
        (left, right)
    }

    /// Split an overflowing node in place and return the new right sibling.
    fn split_node(&mut self, node_idx: usize) -> usize {
        let children = core::mem::take(&mut self.arena[node_idx].children);
        let (left, right) = Self::split_children(&self.arena, children, self.min_children);
        let l_bbox = Self::node_bbox(&self.arena, &left);
        let r_bbox = Self::node_bbox(&self.arena, &right);
        let leaf = self.arena[node_idx].leaf;
        {
            let node = &mut self.arena[node_idx];
            node.children = left;
            node.bbox = l_bbox;
        }
        let r_idx = self.arena.len();
        self.arena.push(RNode {
            bbox: r_bbox,
            leaf,
            children: right,
        });
        r_idx
    }

    fn insert_node(&mut self, node_idx: usize, slot: usize, bbox: Aabb2D<T>) -> Option<usize> {
        if self.arena[node_idx].leaf {
            let node = &mut self.arena[node_idx];
            node.children.push(RChild::Item { slot, bbox });
            node.bbox = union_aabb(node.bbox, bbox);
        } else {
            let idx = Self::choose_child(&self.arena, &self.arena[node_idx].children, &bbox);
            let child = self.arena[node_idx].children[idx];
            let split = match child {
                RChild::Node(child_idx) => self.insert_node(child_idx.get(), slot, bbox),
                RChild::Item { .. } => None,
            };
            let node = &mut self.arena[node_idx];
            node.bbox = union_aabb(node.bbox, bbox);
            if let Some(new_right_idx) = split {
                node.children
                    .insert(idx + 1, RChild::Node(NodeIdx::new(new_right_idx)));
            }
        }
        (self.arena[node_idx].children.len() > self.max_children).then(|| self.split_node(node_idx))
    }

    /// Depth-first walk over items whose bbox passes `keep_item`, pruning nodes
    /// rejected by `keep_node`. Stops early when `f` returns `false`.
    fn walk<N, I, F>(&self, keep_node: N, keep_item: I, mut f: F)
    where
        N: Fn(&Aabb2D<T>) -> bool,
        I: Fn(&Aabb2D<T>) -> bool,
        F: FnMut(usize) -> bool,
    {
        let Some(root_idx) = self.root else {
            return;
        };
        let mut stack = Stack::new();
        stack.push(root_idx);
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !keep_node(&n.bbox) {
                continue;
            }
            for c in &n.children {
                match c {
                    RChild::Item { slot, bbox } => {
                        if keep_item(bbox) && !f(*slot) {
                            return;
                        }
                    }
                    RChild::Node(ci) => stack.push(*ci),
                }
            }
        }
    }
}

impl<T: Scalar> Backend<T> for RTree<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        self.len += 1;
        let Some(root_idx) = self.root else {
            let idx = self.arena.len();
            self.arena.push(RNode {
                bbox: aabb,
                leaf: true,
                children: alloc::vec![RChild::Item { slot, bbox: aabb }],
            });
            self.root = Some(NodeIdx::new(idx));
            return;
        };
        if let Some(right_idx) = self.insert_node(root_idx.get(), slot, aabb) {
            // Grow a new root over the old root and its split sibling.
            let new_bb = union_aabb(self.arena[root_idx.get()].bbox, self.arena[right_idx].bbox);
            let idx = self.arena.len();
            self.arena.push(RNode {
                bbox: new_bb,
                leaf: false,
                children: alloc::vec![
                    RChild::Node(root_idx),
                    RChild::Node(NodeIdx::new(right_idx)),
                ],
            });
            self.root = Some(NodeIdx::new(idx));
        }
    }

    fn collides(&self, rect: Aabb2D<T>) -> bool {
        let mut hit = false;
        self.walk(
            |bb| bb.overlaps(&rect),
            |bb| bb.overlaps(&rect),
            |_| {
                hit = true;
                false
            },
        );
        hit
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        self.walk(
            |bb| bb.contains_point(x, y),
            |bb| bb.contains_point(x, y),
            |slot| {
                f(slot);
                true
            },
        );
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        self.walk(
            |bb| !bb.intersect(&rect).is_empty(),
            |bb| !bb.intersect(&rect).is_empty(),
            |slot| {
                f(slot);
                true
            },
        );
    }
}

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("arena_nodes", &self.arena.len())
            .field("len", &self.len)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases.
/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64 = RTree<i64>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32 = RTree<f32>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64 = RTree<f64>;
