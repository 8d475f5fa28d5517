//! Ordering policies over the included columns.
//!
//! - `identity_order`: caller's order, length of the polyline through it.
//! - `nearest_neighbor_order`: greedy walk with an explicit visited array.
//! - `exact_optimal_order`: open-path TSP from the start node, solved as a
//!   closed tour with every edge back to the start costing nothing; memoized
//!   Held–Karp over `u128` masks, hence the 128-node ceiling.
//!
//! All ties resolve to the lowest node index, so every policy is
//! deterministic for a given distance matrix.

use std::collections::HashMap;

use nalgebra::{DMatrix, Vector2};

use super::types::{Sequence, SortingMode};
use crate::error::CapacityError;
use crate::geom2::polyline_length;

/// Largest input `exact_optimal_order` accepts.
pub const EXACT_CAPACITY: usize = 128;

/// Dispatch on `mode`. `points` are the coordinates the matrix was built from.
pub fn sequence(
    mode: SortingMode,
    distances: &DMatrix<f64>,
    points: &[Vector2<f64>],
    start: usize,
) -> Result<Sequence, CapacityError> {
    match mode {
        SortingMode::Identity => Ok(identity_order(points)),
        SortingMode::NearestNeighbor => Ok(nearest_neighbor_order(distances, start)),
        SortingMode::ExactOptimal => exact_optimal_order(distances, start),
    }
}

/// `[0, 1, …, n-1]` and the length of the polyline through `points` in that order.
pub fn identity_order(points: &[Vector2<f64>]) -> Sequence {
    Sequence {
        order: (0..points.len()).collect(),
        total_length: polyline_length(points.iter().copied()),
    }
}

/// Greedy walk from `start`: always hop to the nearest unvisited node.
///
/// The walk ends wherever the last unvisited node is; it does not aim for a
/// particular end node. Length is the sum of the hop distances.
pub fn nearest_neighbor_order(distances: &DMatrix<f64>, start: usize) -> Sequence {
    let n = distances.nrows();
    if n == 0 {
        return Sequence::default();
    }
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut total = 0.0;
    let mut cur = start;
    visited[cur] = true;
    order.push(cur);
    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (j, seen) in visited.iter().enumerate() {
            if *seen {
                continue;
            }
            let d = distances[(cur, j)];
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }
        let Some((next, d)) = best else {
            break;
        };
        visited[next] = true;
        order.push(next);
        total += d;
        cur = next;
    }
    Sequence {
        order,
        total_length: total,
    }
}

/// Minimum-length Hamiltonian path starting at `start`.
///
/// Fails with `CapacityError` (without attempting) when `n > EXACT_CAPACITY`.
/// Exponential in `n`; intended for small sections.
pub fn exact_optimal_order(
    distances: &DMatrix<f64>,
    start: usize,
) -> Result<Sequence, CapacityError> {
    let n = distances.nrows();
    if n > EXACT_CAPACITY {
        return Err(CapacityError {
            count: n,
            limit: EXACT_CAPACITY,
        });
    }
    if n == 0 {
        return Ok(Sequence::default());
    }
    // Returning to the start is free: the closed tour becomes an open path.
    let mut open = distances.clone();
    open.column_mut(start).fill(0.0);

    let mut solver = HeldKarp {
        d: &open,
        start,
        memo: HashMap::new(),
    };
    let all = full_mask(n) & !bit(start);
    let total = solver.cost(start, all);

    let mut order = Vec::with_capacity(n);
    order.push(start);
    let (mut cur, mut remaining) = (start, all);
    while remaining != 0 {
        let Some(&(_, next)) = solver.memo.get(&(cur, remaining)) else {
            break;
        };
        order.push(next);
        remaining &= !bit(next);
        cur = next;
    }
    tracing::debug!(n, states = solver.memo.len(), total, "exact ordering solved");
    Ok(Sequence {
        order,
        total_length: total,
    })
}

#[inline]
fn bit(i: usize) -> u128 {
    1u128 << i
}

#[inline]
fn full_mask(n: usize) -> u128 {
    if n >= 128 {
        u128::MAX
    } else {
        bit(n) - 1
    }
}

/// Memoized Held–Karp recursion: `cost(from, remaining)` is the cheapest way
/// to visit every node in `remaining` from `from` and return to `start`.
struct HeldKarp<'a> {
    d: &'a DMatrix<f64>,
    start: usize,
    memo: HashMap<(usize, u128), (f64, usize)>,
}

impl HeldKarp<'_> {
    fn cost(&mut self, from: usize, remaining: u128) -> f64 {
        if remaining == 0 {
            return self.d[(from, self.start)];
        }
        if let Some(&(c, _)) = self.memo.get(&(from, remaining)) {
            return c;
        }
        let mut best: Option<(f64, usize)> = None;
        let mut bits = remaining;
        while bits != 0 {
            let j = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            let c = self.d[(from, j)] + self.cost(j, remaining & !bit(j));
            if best.is_none_or(|(bc, _)| c < bc) {
                best = Some((c, j));
            }
        }
        // `remaining != 0`, so at least one candidate was scored.
        let best = best.unwrap_or((f64::INFINITY, from));
        self.memo.insert((from, remaining), best);
        best.0
    }
}
