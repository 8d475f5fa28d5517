//! Property-based invariant tests for corridor selection and ordering.
//!
//! 1. Selection is monotone in the buffer width.
//! 2. Invalid buffer widths are always configuration errors.
//! 3. Nearest neighbor is deterministic across independent sections.
//! 4. Exact ordering never travels farther than nearest neighbor.
//! 5. Every policy returns a permutation starting where it should.
//! 6. Layout slots are contiguous and sum to the layout width.

use geoprofile::column::{Classification, Column, Nen8990};
use geoprofile::geom2::{distance_matrix, Corridor, Polyline};
use geoprofile::section::{
    exact_optimal_order, nearest_neighbor_order, select_in_corridor, Section, SectionConfig,
    SortingMode,
};
use geoprofile::ConfigurationError;
use nalgebra::Vector2;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn point() -> impl Strategy<Value = (f64, f64)> {
    (-100.0f64..100.0, -100.0f64..100.0)
}

fn points(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec(point(), 1..=max_len)
}

/// Paths whose consecutive vertices are at least 1 apart.
fn path() -> impl Strategy<Value = Polyline> {
    proptest::collection::vec(point(), 2..=5).prop_filter_map("degenerate path", |v| {
        let far_apart = v.windows(2).all(|w| {
            let (a, b) = (w[0], w[1]);
            (a.0 - b.0).hypot(a.1 - b.1) >= 1.0
        });
        far_apart.then(|| Polyline::from_coords(&v).ok()).flatten()
    })
}

fn columns(pts: &[(f64, f64)]) -> Vec<Column> {
    pts.iter()
        .map(|&(x, y)| {
            let c = Classification::new(vec![], vec![], vec![], &Nen8990).unwrap();
            Column::new(x, y, c)
        })
        .collect()
}

fn vecs(pts: &[(f64, f64)]) -> Vec<Vector2<f64>> {
    pts.iter().map(|&(x, y)| Vector2::new(x, y)).collect()
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    sorted == (0..n).collect::<Vec<_>>()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Buffer monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wider_buffer_never_drops_columns(
        pts in points(40),
        path in path(),
        w in 0.1f64..30.0,
        extra in 0.0f64..30.0,
    ) {
        let pts = vecs(&pts);
        let narrow = Corridor::around(&path, w).unwrap();
        let wide = Corridor::around(&path, w + extra).unwrap();
        let small = select_in_corridor(&pts, &narrow).unwrap_or_default();
        let large = select_in_corridor(&pts, &wide).unwrap_or_default();
        for i in &small {
            prop_assert!(large.contains(i), "index {} lost when widening {} -> {}", i, w, w + extra);
        }
        prop_assert!(large.windows(2).all(|p| p[0] < p[1]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Invalid buffers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_positive_buffer_is_configuration_error(
        pts in points(10),
        path in path(),
        w in -100.0f64..=0.0,
    ) {
        let cfg = SectionConfig { buffer_width: w, ..SectionConfig::default() };
        let res = Section::new(columns(&pts), path, cfg);
        prop_assert!(matches!(res, Err(ConfigurationError::BufferWidth(_))));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nearest_neighbor_is_deterministic(
        pts in points(30),
        path in path(),
        reproject in any::<bool>(),
    ) {
        let cfg = SectionConfig { buffer_width: 40.0, sorting_mode: SortingMode::NearestNeighbor, reproject };
        let a = Section::new(columns(&pts), path.clone(), cfg).unwrap();
        let b = Section::new(columns(&pts), path, cfg).unwrap();
        match (a.sequence(), b.sequence()) {
            (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            _ => prop_assert!(false, "sections disagree on success"),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Exact vs greedy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exact_is_no_longer_than_greedy(pts in points(9), start_pick in any::<prop::sample::Index>()) {
        let n = pts.len();
        let start = start_pick.index(n);
        let d = distance_matrix(&vecs(&pts));
        let exact = exact_optimal_order(&d, start).unwrap();
        let greedy = nearest_neighbor_order(&d, start);

        prop_assert!(is_permutation(&exact.order, n));
        prop_assert!(is_permutation(&greedy.order, n));
        prop_assert_eq!(exact.order[0], start);
        prop_assert_eq!(greedy.order[0], start);
        prop_assert!(
            exact.total_length <= greedy.total_length + 1e-9,
            "exact {} > greedy {}", exact.total_length, greedy.total_length
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_slots_are_contiguous(
        pts in points(20),
        path in path(),
        reproject in any::<bool>(),
        x0 in -50.0f64..50.0,
    ) {
        let cfg = SectionConfig { buffer_width: 60.0, sorting_mode: SortingMode::Identity, reproject };
        let s = Section::new(columns(&pts), path, cfg).unwrap();
        let Ok(layout) = s.layout(x0) else {
            return Ok(());
        };
        let mut edge = x0;
        for p in &layout.placements {
            prop_assert!(p.d_left >= 0.0 && p.d_right >= 0.0);
            prop_assert!((p.left() - edge).abs() < 1e-9);
            edge = p.right();
        }
        prop_assert!((edge - x0 - layout.width).abs() < 1e-9);
        prop_assert_eq!(layout.len(), s.included_indices().unwrap().len());
    }
}
