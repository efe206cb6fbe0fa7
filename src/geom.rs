//! Geometric primitives: points, affine transforms, and oriented segments.

/// A two-dimensional point.
///
/// Depending on context this is either a world-space position or a position
/// in some dash family's parametric (u, v) space.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// A 2×3 affine transform,
///
/// ```text
/// [x']   [a c e] [x]
/// [y'] = [b d f] [y]
/// [1 ]   [0 0 1] [1]
/// ```
///
/// applied to a point with `p * m`. Products compose so that
/// `p * (m1 * m2) == (p * m2) * m1`: in a product written out left to right,
/// the rightmost factor is applied first. The dash-family transform
/// `Matrix::translation(..) * Matrix::rotation(..) * Matrix::x_skew(..) *
/// Matrix::y_scale(..)` therefore scales first and translates last, which is
/// what places a family's parallel lines `dy` apart with a `dx` stagger.
/// Swapping the order of application inverts the observable effect of the
/// skew, so it must be preserved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix {
    /// Row 1, column 1.
    pub a: f64,
    /// Row 2, column 1.
    pub b: f64,
    /// Row 1, column 2.
    pub c: f64,
    /// Row 2, column 2.
    pub d: f64,
    /// Row 1 translation.
    pub e: f64,
    /// Row 2 translation.
    pub f: f64,
}

impl Matrix {
    /// A translation by `(x, y)`.
    pub fn translation(x: f64, y: f64) -> Matrix {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: x,
            f: y,
        }
    }

    /// A counter-clockwise rotation by `theta` radians.
    pub fn rotation(theta: f64) -> Matrix {
        let (sin, cos) = theta.sin_cos();
        Matrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A horizontal skew mapping `(x, y)` to `(x + k * y, y)`.
    pub fn x_skew(k: f64) -> Matrix {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: k,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A vertical scale by `s`.
    pub fn y_scale(s: f64) -> Matrix {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: s,
            e: 0.0,
            f: 0.0,
        }
    }

    /// The determinant of the linear part, `ad - bc`.
    ///
    /// A negative determinant means the transform flips handedness, which
    /// matters to anyone counting signed crossings in the transformed space.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is singular. Callers keep their transforms
    /// invertible by construction (a dash family rejects `dy == 0`), so a
    /// singular matrix here is a bug, not an input error.
    pub fn inverse(&self) -> Matrix {
        let det = self.determinant();
        assert!(det != 0.0, "inverting a singular matrix");
        let i = 1.0 / det;
        Matrix {
            a: self.d * i,
            b: -self.b * i,
            c: -self.c * i,
            d: self.a * i,
            e: i * (self.c * self.f - self.e * self.d),
            f: i * (self.b * self.e - self.a * self.f),
        }
    }
}

impl std::ops::Mul<Matrix> for Point {
    type Output = Point;

    fn mul(self, m: Matrix) -> Point {
        Point::new(
            self.x * m.a + self.y * m.c + m.e,
            self.x * m.b + self.y * m.d + m.f,
        )
    }
}

impl std::ops::Mul for Matrix {
    type Output = Matrix;

    fn mul(self, n: Matrix) -> Matrix {
        Matrix {
            a: n.a * self.a + n.b * self.c,
            b: n.a * self.b + n.b * self.d,
            c: n.c * self.a + n.d * self.c,
            d: n.c * self.b + n.d * self.d,
            e: n.e * self.a + n.f * self.c + self.e,
            f: n.e * self.b + n.f * self.d + self.f,
        }
    }
}

/// An oriented contour segment.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// One endpoint. After [`ysort`](Segment::ysort) this is the lower one.
    pub p: Point,
    /// The other endpoint.
    pub q: Point,
    /// Whether the endpoints have been exchanged relative to the segment's
    /// original direction.
    ///
    /// The winding computation needs to know if a crossing segment
    /// originally ran top-to-bottom or bottom-to-top; this bit carries that
    /// orientation through endpoint swaps (and through reflecting
    /// transforms, which toggle it for every segment at once).
    pub swapped: bool,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.p, self.q)
    }
}

impl Segment {
    /// Create a segment in its original orientation (`swapped = false`).
    pub fn new(p: Point, q: Point) -> Self {
        Segment {
            p,
            q,
            swapped: false,
        }
    }

    /// Order the endpoints so `p.y <= q.y`, toggling `swapped` if they move.
    pub(crate) fn ysort(&mut self) {
        if self.p.y < self.q.y {
            return;
        }
        std::mem::swap(&mut self.p, &mut self.q);
        self.swapped = !self.swapped;
    }

    /// Our `x` coordinate at the scanline `v`.
    ///
    /// Only meaningful for segments admitted to the active set, which
    /// guarantees `p.y < v <= q.y` and in particular that the segment isn't
    /// horizontal.
    pub(crate) fn at_y(&self, v: f64) -> f64 {
        debug_assert!(self.p.y < v && v <= self.q.y, "segment {self:?}, v={v:?}");
        self.p.x + (self.q.x - self.p.x) * (v - self.p.y) / (self.q.y - self.p.y)
    }
}

/// A crossing between a segment and a scanline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// The `u` coordinate of the crossing.
    pub u: f64,
    /// True if the crossing counts +1 toward the winding number, false if it
    /// counts -1.
    pub positive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn products_apply_right_to_left() {
        let m = Matrix::rotation(std::f64::consts::FRAC_PI_2) * Matrix::translation(1.0, 0.0);
        // Translate first, then rotate a quarter turn.
        assert_close(Point::new(0.0, 0.0) * m, Point::new(0.0, 1.0));

        let m = Matrix::translation(1.0, 0.0) * Matrix::rotation(std::f64::consts::FRAC_PI_2);
        // Rotate first, then translate.
        assert_close(Point::new(0.0, 0.0) * m, Point::new(1.0, 0.0));
    }

    #[test]
    fn skew_shifts_by_height() {
        let m = Matrix::x_skew(2.0);
        assert_close(Point::new(1.0, 3.0) * m, Point::new(7.0, 3.0));
    }

    #[test]
    fn reflection_has_negative_determinant() {
        assert!(Matrix::y_scale(-2.0).determinant() < 0.0);
        assert!(Matrix::rotation(1.0).determinant() > 0.0);
    }

    #[test]
    fn ysort_toggles_orientation() {
        let mut s = Segment::new(Point::new(0.0, 5.0), Point::new(1.0, 2.0));
        s.ysort();
        assert!(s.swapped);
        assert_eq!(s.p.y, 2.0);
        s.ysort();
        assert!(s.swapped); // already ordered, nothing to toggle
    }

    proptest! {
        #[test]
        fn inverse_roundtrip(
            a in -10.0..10.0f64,
            b in -10.0..10.0f64,
            c in -10.0..10.0f64,
            d in -10.0..10.0f64,
            e in -100.0..100.0f64,
            f in -100.0..100.0f64,
        ) {
            let m = Matrix { a, b, c, d, e, f };
            prop_assume!(m.determinant().abs() > 1e-3);
            let round = m.inverse().inverse();
            prop_assert!((round.a - m.a).abs() < 1e-6);
            prop_assert!((round.b - m.b).abs() < 1e-6);
            prop_assert!((round.c - m.c).abs() < 1e-6);
            prop_assert!((round.d - m.d).abs() < 1e-6);
            prop_assert!((round.e - m.e).abs() < 1e-4);
            prop_assert!((round.f - m.f).abs() < 1e-4);
        }

        #[test]
        fn inverse_undoes_application(
            theta in -3.0..3.0f64,
            x in -50.0..50.0f64,
            y in -50.0..50.0f64,
        ) {
            let m = Matrix::translation(3.0, -2.0)
                * Matrix::rotation(theta)
                * Matrix::x_skew(0.5)
                * Matrix::y_scale(2.0);
            let p = Point::new(x, y);
            let back = p * m * m.inverse();
            prop_assert!((back.x - p.x).abs() < 1e-8);
            prop_assert!((back.y - p.y).abs() < 1e-8);
        }
    }
}
