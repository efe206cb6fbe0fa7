//! Contour files and their conversion to oriented segments.
//!
//! A contour file holds one closed contour per line as a flat coordinate
//! list `x0 y0 x1 y1 ...`; the last vertex implicitly joins the first.

use rand::Rng;

use crate::geom::{Point, Segment};
use crate::pattern::parse_numbers;
use crate::Error;

/// A closed polyline. The closing edge back to the first point is implicit.
pub type Contour = Vec<Point>;

/// Parse the text of a contour file, one contour per line.
///
/// A line must hold an even number of values (they are coordinate pairs) and
/// at least six (a contour of fewer than three points encloses nothing).
/// One bad line fails the whole file.
pub fn parse_contours(text: &str) -> Result<Vec<Contour>, Error> {
    let mut contours = Vec::new();
    for line in text.lines() {
        let coords = parse_numbers(line)?;
        if coords.len() % 2 != 0 {
            return Err(Error::OddContour);
        }
        if coords.len() < 6 {
            return Err(Error::ShortContour);
        }
        contours.push(
            coords
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect(),
        );
    }
    Ok(contours)
}

fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(xs.last().zip(xs.first()))
}

/// Append the edges of one contour to `dest`, including the closing edge.
///
/// A nonzero `jitter` perturbs each coordinate of a working copy by a
/// uniform draw from `[-jitter/2, jitter/2]`; the contour itself is never
/// mutated. The generator is the thread-local one from `rand`, seeded from
/// OS entropy, so concurrent preprocessing of different contours is fine.
pub fn contour_to_segments(dest: &mut Vec<Segment>, contour: &[Point], jitter: f64) {
    if jitter == 0.0 {
        dest.extend(cyclic_pairs(contour).map(|(p, q)| Segment::new(*p, *q)));
        return;
    }

    let mut rng = rand::thread_rng();
    let jittered: Vec<Point> = contour
        .iter()
        .map(|p| {
            Point::new(
                p.x + rng.gen_range(-jitter / 2.0..=jitter / 2.0),
                p.y + rng.gen_range(-jitter / 2.0..=jitter / 2.0),
            )
        })
        .collect();
    dest.extend(cyclic_pairs(&jittered).map(|(p, q)| Segment::new(*p, *q)));
}

/// Convert a set of contours to segments, clearing `dest` first.
pub fn contours_to_segments(dest: &mut Vec<Segment>, contours: &[Contour], jitter: f64) {
    dest.clear();
    for contour in contours {
        contour_to_segments(dest, contour, jitter);
    }
}

/// Parse the text of a contour file straight to segments.
pub fn segments_from_str(text: &str, jitter: f64) -> Result<Vec<Segment>, Error> {
    let contours = parse_contours(text)?;
    let mut segments = Vec::new();
    contours_to_segments(&mut segments, &contours, jitter);
    Ok(segments)
}
