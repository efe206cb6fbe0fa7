//! End-to-end scenarios: pattern text and contour text in, world-space
//! dashes out.

use hatching::{
    hatch, hatch_parallel, segments_from_str, Error, HatchPattern, Point, Segment, WindingRule,
};

fn pattern(text: &str) -> HatchPattern {
    HatchPattern::parse(text, 1.0).unwrap()
}

fn dashes(pattern_text: &str, contour_text: &str, rule: WindingRule) -> Vec<Segment> {
    let pat = pattern(pattern_text);
    let segments = segments_from_str(contour_text, 0.0).unwrap();
    let mut out = Vec::new();
    hatch(&pat, &segments, rule, |s| out.push(s));
    out
}

// A 10x10 square whose corners sit between scanlines of a unit-spaced
// horizontal family, so every row is unambiguously interior.
const SQUARE: &str = "0 0.5  10 0.5  10 10.5  0 10.5";

#[test]
fn solid_fill_covers_every_row() {
    let out = dashes("0 0 0 0 1", SQUARE, WindingRule::Odd);
    assert_eq!(out.len(), 10);
    for (s, v) in out.iter().zip(1..) {
        assert_eq!(s.p, Point::new(0.0, f64::from(v)));
        assert_eq!(s.q, Point::new(10.0, f64::from(v)));
    }
}

#[test]
fn dashed_fill_lights_the_same_bands_on_every_row() {
    // Period 5: pen down on [0, 3), up on [3, 5).
    let out = dashes("0 0 0 0 1 3 -2", SQUARE, WindingRule::Odd);
    assert_eq!(out.len(), 20);
    for pair in out.chunks_exact(2) {
        assert_eq!((pair[0].p.x, pair[0].q.x), (0.0, 3.0));
        assert_eq!((pair[1].p.x, pair[1].q.x), (5.0, 8.0));
        assert_eq!(pair[0].p.y, pair[1].p.y);
    }
}

#[test]
fn staggered_dashes_repeat_after_a_cycle_of_rows() {
    // dx = 1 shifts the dash phase by one unit per row; with period 5 the
    // phase comes back around every fifth row.
    let out = dashes("0 0 0 1 1 3 -2", SQUARE, WindingRule::Odd);

    let bands = |row: i32| -> Vec<(f64, f64)> {
        out.iter()
            .filter(|s| s.p.y == f64::from(row))
            .map(|s| (s.p.x, s.q.x))
            .collect()
    };

    for row in 1..=5 {
        let lower = bands(row);
        assert!(!lower.is_empty());
        assert_eq!(lower, bands(row + 5));
    }
}

#[test]
fn diagonal_family_lands_on_integer_scanlines() {
    let pat = pattern("45 0 0 0 1.41421356");
    let segments = segments_from_str("0 0  10 0  10 10  0 10", 0.0).unwrap();
    let mut out = Vec::new();
    hatch(&pat, &segments, WindingRule::Odd, |s| out.push(s));

    // The square spans v in roughly [-5, 5]; one dash per scanline.
    assert_eq!(out.len(), 11);

    let tf = pat.dashes()[0].to_uv();
    for s in &out {
        let p = s.p * *tf;
        let q = s.q * *tf;
        // Both endpoints sit on the same integer scanline...
        assert!((p.y - q.y).abs() < 1e-9);
        assert!((p.y - p.y.round()).abs() < 1e-9);
        // ...at 45 degrees in world space...
        let (dx, dy) = (s.q.x - s.p.x, s.q.y - s.p.y);
        assert!((dx - dy).abs() < 1e-6);
        // ...inside the square.
        for t in [s.p, s.q] {
            assert!((-1e-6..=10.0 + 1e-6).contains(&t.x));
            assert!((-1e-6..=10.0 + 1e-6).contains(&t.y));
        }
    }
}

#[test]
fn non_alternating_dash_signs_fail_the_file() {
    assert_eq!(
        HatchPattern::parse("0 0 0 1 1 3 2", 1.0).unwrap_err(),
        Error::DashSign { index: 1 }
    );
}

#[test]
fn odd_contour_count_fails_the_file() {
    assert_eq!(
        segments_from_str("0 0 10 0 10", 0.0).unwrap_err(),
        Error::OddContour
    );
}

#[test]
fn hole_punched_by_opposite_orientation() {
    // Outer counter-clockwise, inner clockwise: under `odd` (and under
    // `nonzero`) the inner square reads as a hole.
    let both = "0.5 0.5  10.5 0.5  10.5 10.5  0.5 10.5\n\
                3.5 3.5  3.5 7.5  7.5 7.5  7.5 3.5";
    let out = dashes("0 0 0 0 1", both, WindingRule::Odd);

    assert_eq!(out.len(), 14);
    for s in &out {
        let row = s.p.y;
        if (4.0..=7.0).contains(&row) {
            // Rows crossing the hole split in two, skipping (3.5, 7.5).
            assert!(
                (s.p.x, s.q.x) == (0.5, 3.5) || (s.p.x, s.q.x) == (7.5, 10.5),
                "unexpected band ({}, {}) on row {row}",
                s.p.x,
                s.q.x
            );
        } else {
            assert_eq!((s.p.x, s.q.x), (0.5, 10.5));
        }
    }
}

#[test]
fn nested_same_orientation_doubles_the_winding() {
    // Both squares counter-clockwise: `nonzero` fills through the overlap,
    // `abs_geq_two` keeps only the doubly-wound core.
    let both = "0.5 0.5  10.5 0.5  10.5 10.5  0.5 10.5\n\
                3.5 3.5  7.5 3.5  7.5 7.5  3.5 7.5";
    let nonzero = dashes("0 0 0 0 1", both, WindingRule::NonZero);
    assert_eq!(nonzero.len(), 18);

    let core = dashes("0 0 0 0 1", both, WindingRule::AbsGeqTwo);
    assert_eq!(core.len(), 4);
    for s in &core {
        assert_eq!((s.p.x, s.q.x), (3.5, 7.5));
        assert!((4.0..=7.0).contains(&s.p.y));
    }
}

#[test]
fn odd_and_nonzero_agree_on_a_convex_contour() {
    let odd = dashes("0 0 0 0 1 3 -2", SQUARE, WindingRule::Odd);
    let nonzero = dashes("0 0 0 0 1 3 -2", SQUARE, WindingRule::NonZero);
    assert_eq!(odd, nonzero);
}

#[test]
fn reflecting_transform_keeps_winding_signs() {
    // dy < 0 reflects the parametric plane; the orientation fixup must keep
    // a counter-clockwise contour positively wound.
    let ccw = dashes("0 0 0 0 -1", SQUARE, WindingRule::Positive);
    assert_eq!(ccw.len(), 10);

    let reversed = "0 0.5  0 10.5  10 10.5  10 0.5";
    assert_eq!(dashes("0 0 0 0 -1", reversed, WindingRule::Positive), vec![]);
    assert_eq!(dashes("0 0 0 0 -1", reversed, WindingRule::Negative).len(), 10);

    // `nonzero` can't tell the two orientations apart.
    let a = dashes("0 0 0 0 -1", SQUARE, WindingRule::NonZero);
    let b = dashes("0 0 0 0 -1", reversed, WindingRule::NonZero);
    assert_eq!(a, b);
}

#[test]
fn lit_set_is_periodic_along_u() {
    // Sliding the region by one dash period slides the output with it.
    let here = dashes("0 0 0 0 1 3 -2", SQUARE, WindingRule::Odd);
    let there = dashes(
        "0 0 0 0 1 3 -2",
        "5 0.5  15 0.5  15 10.5  5 10.5",
        WindingRule::Odd,
    );

    let slid: Vec<Segment> = here
        .iter()
        .map(|s| {
            Segment::new(
                Point::new(s.p.x + 5.0, s.p.y),
                Point::new(s.q.x + 5.0, s.q.y),
            )
        })
        .collect();
    assert_eq!(slid, there);
}

#[test]
fn parallel_hatching_matches_serial() {
    let pat = pattern("0 0 0 0 1 3 -2\n90 0 0 0 2\n45 0 0 0 1.5 2 -1");
    let segments = segments_from_str(SQUARE, 0.0).unwrap();

    let mut serial = Vec::new();
    hatch(&pat, &segments, WindingRule::Odd, |s| serial.push(s));
    assert!(!serial.is_empty());

    let parallel = hatch_parallel(&pat, &segments, WindingRule::Odd);
    assert_eq!(serial, parallel);
}

#[test]
fn empty_inputs_emit_nothing() {
    let pat = pattern("");
    let segments = segments_from_str(SQUARE, 0.0).unwrap();
    let mut out = Vec::new();
    hatch(&pat, &segments, WindingRule::Odd, |s| out.push(s));
    assert_eq!(out, vec![]);

    let pat = pattern("0 0 0 0 1");
    let mut out = Vec::new();
    hatch(&pat, &[], WindingRule::Odd, |s| out.push(s));
    assert_eq!(out, vec![]);
}
