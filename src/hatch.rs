//! The hatch driver: world-space segments in, lit world-space dashes out.

use crate::geom::{Point, Segment};
use crate::pattern::{Dash, HatchPattern};
use crate::sweep::{self, SweepScratch};

/// Drives the whole pipeline for one or more dash families.
///
/// The hatcher owns the scratch buffers (the parametric copy of the
/// segments, and the sweep's active set and crossing list), so reusing one
/// across families and across calls avoids reallocating them. Inputs are
/// borrowed read-only; lit dashes are handed to the sink by value with
/// `swapped = false`.
#[derive(Default)]
pub struct Hatcher {
    uv: Vec<Segment>,
    scratch: SweepScratch,
}

impl Hatcher {
    /// A hatcher with empty scratch buffers.
    pub fn new() -> Self {
        Hatcher {
            uv: Vec::new(),
            scratch: SweepScratch::new(),
        }
    }

    /// Hatch `segments` with every family of `pattern`, in file order.
    pub fn hatch<W, S>(&mut self, pattern: &HatchPattern, segments: &[Segment], wr: W, mut sink: S)
    where
        W: Fn(i32) -> bool,
        S: FnMut(Segment),
    {
        for dash in pattern.dashes() {
            self.hatch_family(dash, segments, &wr, &mut sink);
        }
    }

    /// Hatch `segments` with a single dash family.
    ///
    /// Warps the segments into the family's parametric space, sweeps its
    /// integer scanlines, and maps every lit interval back to a world-space
    /// segment. A reflecting transform (negative determinant) toggles the
    /// orientation bit of every warped segment, so that the winding count in
    /// parametric space keeps the sign it had in world space.
    ///
    /// Within one family, dashes reach the sink ordered by scanline and then
    /// by position along the scanline.
    pub fn hatch_family<W, S>(&mut self, dash: &Dash, segments: &[Segment], wr: W, mut sink: S)
    where
        W: Fn(i32) -> bool,
        S: FnMut(Segment),
    {
        let tf = *dash.to_uv();
        let tr = *dash.to_world();
        let mirrored = tf.determinant() < 0.0;

        self.uv.clear();
        self.uv.reserve(segments.len());
        self.uv.extend(segments.iter().map(|s| Segment {
            p: s.p * tf,
            q: s.q * tf,
            swapped: s.swapped != mirrored,
        }));

        sweep::spans(dash, &mut self.uv, &mut self.scratch, wr, |v, u1, u2| {
            let vf = f64::from(v);
            sink(Segment::new(
                Point::new(u1, vf) * tr,
                Point::new(u2, vf) * tr,
            ));
        });
    }
}
