//! Hatch patterns: the pattern-file grammar and the per-family transforms.
//!
//! A pattern file holds one dash family per line,
//!
//! ```text
//! <angle_deg>  <x0>  <y0>  <dx>  <dy>  [<d0> <d1> ...]
//! ```
//!
//! in the convention of 2D CAD pattern files: lines at `angle_deg` through
//! `(x0, y0)`, spaced `dy` apart, each successive line staggered `dx` along
//! its own direction. Dash lengths alternate pen-down (positive) and pen-up
//! (negative), starting pen-down; an absent list means a solid line.
//! Values may be separated by any mix of whitespace and commas, `;` starts a
//! comment, and lines beginning with `*` are section headers.

use crate::geom::Matrix;
use crate::Error;

/// Split a line on whitespace and commas and parse every token as an `f64`.
///
/// Any token that fails to parse fails the whole line.
pub(crate) fn parse_numbers(line: &str) -> Result<Vec<f64>, Error> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| Error::BadNumber(tok.to_owned()))
        })
        .collect()
}

/// One dash family: an infinite set of parallel dashed lines.
///
/// The family owns a pair of affine transforms chosen so that its lines are
/// exactly the integer horizontals `v = k` of a parametric (u, v) plane:
/// [`to_world`](Dash::to_world) maps that plane into world space and
/// [`to_uv`](Dash::to_uv) maps world space back. Both directions of the hot
/// path (warping contour segments in, mapping lit dashes out) run per
/// segment, so the inverse is computed once here rather than on every use.
#[derive(Clone, Debug)]
pub struct Dash {
    tr: Matrix,
    tf: Matrix,
    dash: Vec<f64>,
    sum: Vec<f64>,
}

impl Dash {
    /// Build a family from its raw parameters.
    ///
    /// `theta` is in radians. `dy` is the line spacing and must be nonzero;
    /// `dx` is the per-line stagger. `dashes` are the signed dash lengths:
    /// even positions are pen-down and must be non-negative, odd positions
    /// are pen-up and must be negative. An empty slice means a solid line.
    pub fn new(
        theta: f64,
        x0: f64,
        y0: f64,
        dx: f64,
        dy: f64,
        dashes: &[f64],
    ) -> Result<Self, Error> {
        if dy == 0.0 {
            return Err(Error::ZeroPitch);
        }

        let mut dash = Vec::with_capacity(dashes.len() + 1);
        for (i, &d) in dashes.iter().enumerate() {
            if d.is_sign_negative() != (i % 2 == 1) {
                return Err(Error::DashSign { index: i });
            }
            dash.push(d.abs());
        }
        // Pad to a whole number of (pen-down, pen-up) pairs.
        if dash.len() % 2 == 1 {
            dash.push(0.0);
        }

        let mut sum = Vec::with_capacity(dash.len() + 1);
        let mut s = 0.0;
        for &d in &dash {
            sum.push(s);
            s += d;
        }
        sum.push(s);
        if !dash.is_empty() && s == 0.0 {
            return Err(Error::ZeroPeriod);
        }

        let tr = Matrix::translation(x0, y0)
            * Matrix::rotation(theta)
            * Matrix::x_skew(dx / dy)
            * Matrix::y_scale(dy);
        Ok(Dash {
            tf: tr.inverse(),
            tr,
            dash,
            sum,
        })
    }

    /// Parse one pattern-file line: `angle_deg x0 y0 dx dy [lengths...]`.
    ///
    /// `scale` multiplies every distance (origin, offsets, dash lengths);
    /// the angle is left alone.
    pub fn from_line(line: &str, scale: f64) -> Result<Self, Error> {
        let mut words = parse_numbers(line)?;
        if words.len() < 5 {
            return Err(Error::ShortDashLine);
        }
        for w in &mut words[1..] {
            *w *= scale;
        }
        Self::new(
            words[0].to_radians(),
            words[1],
            words[2],
            words[3],
            words[4],
            &words[5..],
        )
    }

    /// The parametric-to-world transform.
    pub fn to_world(&self) -> &Matrix {
        &self.tr
    }

    /// The world-to-parametric transform (the inverse of
    /// [`to_world`](Dash::to_world)).
    pub fn to_uv(&self) -> &Matrix {
        &self.tf
    }

    /// The normalized dash lengths: all non-negative, alternating pen-down
    /// and pen-up starting pen-down, padded to even length. Empty for a
    /// solid line.
    pub fn lengths(&self) -> &[f64] {
        &self.dash
    }

    /// The length of one full dash cycle along `u`.
    ///
    /// Zero exactly when the family is a solid line.
    pub fn period(&self) -> f64 {
        *self.sum.last().unwrap()
    }

    /// Locate `u` within the dash cycle: returns the index of the span
    /// containing it and the offset from that span's start.
    ///
    /// Must not be called on a solid-line family.
    pub(crate) fn position(&self, u: f64) -> (usize, f64) {
        let u = floor_mod(u, self.period());
        for i in 1..self.sum.len() {
            if u < self.sum[i] {
                return (i - 1, u - self.sum[i - 1]);
            }
        }
        unreachable!("offset {u} fell outside the dash cycle");
    }
}

/// Mathematical floor modulus: the result has the sign of `b` and lies in
/// `[0, b)` for positive `b`.
///
/// `rem_euclid` can round up to exactly `b` when `a` is a tiny negative
/// number; that case is folded back to 0 so callers can rely on the
/// half-open range.
pub(crate) fn floor_mod(a: f64, b: f64) -> f64 {
    let r = a.rem_euclid(b);
    if r == b {
        0.0
    } else {
        r
    }
}

/// An ordered collection of dash families parsed from a pattern file.
///
/// Immutable once parsed. Families are evaluated in file order, and share
/// nothing with each other, so callers are free to hatch them from separate
/// threads (see [`hatch_parallel`](crate::hatch_parallel)).
#[derive(Clone, Debug, Default)]
pub struct HatchPattern {
    dashes: Vec<Dash>,
}

impl HatchPattern {
    /// Parse the text of a pattern file.
    ///
    /// Everything from the first `;` on a line is a comment. Lines that are
    /// empty after stripping trailing whitespace, and lines beginning with
    /// `*`, are skipped. Every surviving line must be a valid dash
    /// specification; one bad line fails the whole file.
    pub fn parse(text: &str, scale: f64) -> Result<Self, Error> {
        let mut dashes = Vec::new();
        for line in text.lines() {
            let line = line.split(';').next().unwrap_or("").trim_end();
            if line.is_empty() || line.starts_with('*') {
                continue;
            }
            dashes.push(Dash::from_line(line, scale)?);
        }
        Ok(HatchPattern { dashes })
    }

    /// The dash families, in file order.
    pub fn dashes(&self) -> &[Dash] {
        &self.dashes
    }

    /// The number of dash families.
    pub fn len(&self) -> usize {
        self.dashes.len()
    }

    /// Whether the pattern has no families at all.
    pub fn is_empty(&self) -> bool {
        self.dashes.is_empty()
    }
}
