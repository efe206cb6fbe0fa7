#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod contour;
mod geom;
mod hatch;
mod num;
mod pattern;
pub mod sweep;

pub use contour::{
    contour_to_segments, contours_to_segments, parse_contours, segments_from_str, Contour,
};
pub use geom::{Intersection, Matrix, Point, Segment};
pub use hatch::Hatcher;
pub use pattern::{Dash, HatchPattern};

/// A winding rule tells us which winding numbers count as "inside".
///
/// The winding number of a point on a scanline is the running sum of signed
/// crossings to its left; see the module docs of [`sweep`]. The engine
/// accepts any predicate on that number, so this enum is just the named
/// rules the reference tooling exposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WindingRule {
    /// Inside where the winding number is odd (the usual even-odd rule).
    Odd,
    /// Inside where the winding number is nonzero.
    NonZero,
    /// Inside where the winding number is positive.
    Positive,
    /// Inside where the winding number is negative.
    Negative,
    /// Inside where the winding number's magnitude is at least two, e.g.
    /// only where regions of equal orientation overlap.
    AbsGeqTwo,
}

impl WindingRule {
    /// Does `winding` count as inside under this rule?
    pub fn contains(self, winding: i32) -> bool {
        match self {
            WindingRule::Odd => winding % 2 != 0,
            WindingRule::NonZero => winding != 0,
            WindingRule::Positive => winding > 0,
            WindingRule::Negative => winding < 0,
            WindingRule::AbsGeqTwo => winding.unsigned_abs() >= 2,
        }
    }
}

impl std::str::FromStr for WindingRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "odd" => Ok(WindingRule::Odd),
            "nonzero" => Ok(WindingRule::NonZero),
            "positive" => Ok(WindingRule::Positive),
            "negative" => Ok(WindingRule::Negative),
            "abs_geq_two" => Ok(WindingRule::AbsGeqTwo),
            _ => Err(Error::UnknownRule(s.to_owned())),
        }
    }
}

/// The input text was faulty.
///
/// Parsing is all-or-nothing: the first bad line fails the whole file, and
/// nothing parsed so far is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A token that should have been a number wasn't.
    BadNumber(String),
    /// A dash specification had fewer than its five required numbers.
    ShortDashLine,
    /// A dash specification's line spacing (`dy`) was zero, which would
    /// collapse the whole family onto one line.
    ZeroPitch,
    /// A dash length had the wrong sign for its position: lengths alternate
    /// pen-down (non-negative) and pen-up (negative), starting pen-down.
    DashSign {
        /// Index of the offending length within the dash list.
        index: usize,
    },
    /// Every dash length was zero, leaving the dash cycle without a period.
    ZeroPeriod,
    /// A contour line held an odd number of values.
    OddContour,
    /// A contour line described fewer than three points.
    ShortContour,
    /// An unrecognized winding-rule name.
    UnknownRule(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadNumber(tok) => write!(f, "not a number: {tok:?}"),
            Error::ShortDashLine => write!(f, "dash specification needs at least 5 numbers"),
            Error::ZeroPitch => write!(f, "dash specification has zero line spacing"),
            Error::DashSign { index } => {
                write!(f, "dash length {index} breaks the sign alternation")
            }
            Error::ZeroPeriod => write!(f, "dash lengths sum to zero"),
            Error::OddContour => write!(f, "odd number of values in contour line"),
            Error::ShortContour => write!(f, "too few values in contour line"),
            Error::UnknownRule(name) => write!(f, "unknown winding rule {name:?}"),
        }
    }
}

impl std::error::Error for Error {}

/// Hatch `segments` with every family of `pattern`, in file order.
///
/// The segments should form closed contours (see [`segments_from_str`]).
/// Lit dashes are handed to `sink` in world coordinates, ordered by family,
/// then scanline, then position along the scanline. This is a convenience
/// over [`Hatcher`], which additionally reuses its scratch allocations
/// across calls.
pub fn hatch<S: FnMut(Segment)>(
    pattern: &HatchPattern,
    segments: &[Segment],
    rule: WindingRule,
    sink: S,
) {
    Hatcher::new().hatch(pattern, segments, |w| rule.contains(w), sink);
}

/// Hatch with one worker thread per dash family.
///
/// Families share nothing but the immutable inputs, so each worker gets its
/// own scratch and its own output buffer; the buffers are concatenated in
/// family order once every worker is done, which makes the result identical
/// to what [`hatch`] produces.
pub fn hatch_parallel(
    pattern: &HatchPattern,
    segments: &[Segment],
    rule: WindingRule,
) -> Vec<Segment> {
    let per_family: Vec<Vec<Segment>> = std::thread::scope(|scope| {
        let workers: Vec<_> = pattern
            .dashes()
            .iter()
            .map(|dash| {
                scope.spawn(move || {
                    let mut out = Vec::new();
                    Hatcher::new().hatch_family(
                        dash,
                        segments,
                        |w| rule.contains(w),
                        |s| out.push(s),
                    );
                    out
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().expect("hatch worker panicked"))
            .collect()
    });
    per_family.concat()
}
