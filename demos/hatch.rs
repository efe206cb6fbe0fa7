use std::path::PathBuf;

use clap::Parser;
use svg::node::element::path::Data;
use svg::node::element::Path;

use hatching::{segments_from_str, HatchPattern, Segment, WindingRule};

/// Hatch the contours of a segment file with a pattern file and write the
/// result to stdout as SVG.
#[derive(Parser)]
struct Args {
    /// Multiplier applied to pattern distances at load time.
    #[arg(short, long, default_value_t = 1.0)]
    scale: f64,

    /// Half-range of the uniform perturbation applied to every contour
    /// coordinate. Useful for shaking vertices off exact scanlines.
    #[arg(short, long, default_value_t = 0.0)]
    jitter: f64,

    /// Winding rule: odd, nonzero, positive, negative or abs_geq_two.
    #[arg(short, long, default_value = "odd")]
    rule: WindingRule,

    /// Count the emitted dashes and print the count instead of rendering.
    #[arg(short, long)]
    bench: bool,

    /// Pattern file.
    patfile: PathBuf,

    /// Contour file.
    segfile: PathBuf,
}

fn path_data(segments: &[Segment]) -> Data {
    // SVG's y axis points down; flip so the input reads the usual way up.
    segments.iter().fold(Data::new(), |data, s| {
        data.move_to((s.p.x, -s.p.y)).line_to((s.q.x, -s.q.y))
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        }
    };

    let pattern = HatchPattern::parse(&std::fs::read_to_string(&args.patfile)?, args.scale)?;
    let segments = segments_from_str(&std::fs::read_to_string(&args.segfile)?, args.jitter)?;
    tracing::info!(
        families = pattern.len(),
        segments = segments.len(),
        "loaded input"
    );

    if args.bench {
        let mut count = 0usize;
        hatching::hatch(&pattern, &segments, args.rule, |_| count += 1);
        println!("{count}");
        return Ok(());
    }

    let mut dashes = Vec::new();
    hatching::hatch(&pattern, &segments, args.rule, |s| dashes.push(s));
    tracing::info!(dashes = dashes.len(), "hatched");

    let min_x = segments.iter().map(|s| s.p.x).fold(f64::INFINITY, f64::min);
    let max_x = segments
        .iter()
        .map(|s| s.p.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = -segments
        .iter()
        .map(|s| s.p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_y = -segments.iter().map(|s| s.p.y).fold(f64::INFINITY, f64::min);
    let d_x = max_x - min_x;
    let d_y = max_y - min_y;

    let axes = [
        Segment::new((-2.0 * d_x, 0.0).into(), (2.0 * d_x, 0.0).into()),
        Segment::new((0.0, -2.0 * d_y).into(), (0.0, 2.0 * d_y).into()),
    ];

    let document = svg::Document::new()
        .set(
            "viewBox",
            (
                min_x - 0.05 * d_x,
                min_y - 0.05 * d_y,
                d_x * 1.1,
                d_y * 1.1,
            ),
        )
        .set("preserveAspectRatio", "xMidYMid")
        .add(
            Path::new()
                .set("stroke", "green")
                .set("stroke-dasharray", "20 20")
                .set("d", path_data(&axes)),
        )
        .add(
            Path::new()
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-linecap", "round")
                .set("d", path_data(&segments)),
        )
        .add(
            Path::new()
                .set("fill", "none")
                .set("stroke", "blue")
                .set("stroke-opacity", 0.8)
                .set("stroke-linecap", "round")
                .set("d", path_data(&dashes)),
        );

    svg::write(std::io::stdout(), &document)?;
    Ok(())
}
