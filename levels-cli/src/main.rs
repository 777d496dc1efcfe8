use anyhow::Result;
use chart_levels::{
    DEFAULT_SPLIT_COLOR, Levels, Sample, ScaleOptions, SplitMode, ZeroPolicy, build_scale,
    default_palette, even_levels, format_labels, min_max, spread_colors,
};
use clap::Parser;
use tracing::debug;

/// Generate nice chart levels, labels, and colors for a numeric range
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "chart-levels")]
struct Cli {
    /// Range minimum (omit when using --data)
    #[arg(value_name = "MIN", allow_negative_numbers = true)]
    min: Option<f64>,

    /// Range maximum (omit when using --data)
    #[arg(value_name = "MAX", allow_negative_numbers = true)]
    max: Option<f64>,

    /// Nested numeric data to reduce instead of explicit MIN/MAX,
    /// e.g. "[[1, 2], [3, [4, 5]]]"
    #[arg(long, conflicts_with_all = ["min", "max"])]
    data: Option<String>,

    /// Target number of intervals
    #[arg(short = 'n', long, default_value = "12")]
    intervals: usize,

    /// Zero-inclusion policy
    #[arg(long, value_enum, default_value = "allowed")]
    zero: ZeroPolicyArg,

    /// Force the two range endpoints into the output exactly
    #[arg(long)]
    ends: bool,

    /// Divide the range evenly into this many intervals instead of using
    /// the nice-step heuristic
    #[arg(long, value_name = "NLEV", conflicts_with_all = ["intervals", "zero", "ends"])]
    even: Option<usize>,

    /// Palette split mode around zero
    #[arg(long, value_enum, default_value = "auto")]
    split: SplitModeArg,

    /// Number of leading entries of the default palette to spread over
    #[arg(long, default_value = "224")]
    palette_size: usize,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum ZeroPolicyArg {
    /// Zero must not be a boundary
    Forbidden,
    /// Let the algorithm decide
    Auto,
    /// Zero may be a boundary
    Allowed,
    /// Zero must be a boundary
    Required,
}

impl From<ZeroPolicyArg> for ZeroPolicy {
    fn from(arg: ZeroPolicyArg) -> Self {
        match arg {
            ZeroPolicyArg::Forbidden => ZeroPolicy::Forbidden,
            ZeroPolicyArg::Auto => ZeroPolicy::Auto,
            ZeroPolicyArg::Allowed => ZeroPolicy::Allowed,
            ZeroPolicyArg::Required => ZeroPolicy::Required,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum SplitModeArg {
    /// Never split the palette
    Off,
    /// Split when the levels cross zero
    Auto,
    /// Always split
    Always,
}

impl From<SplitModeArg> for SplitMode {
    fn from(arg: SplitModeArg) -> Self {
        match arg {
            SplitModeArg::Off => SplitMode::Off,
            SplitModeArg::Auto => SplitMode::Auto,
            SplitModeArg::Always => SplitMode::Always,
        }
    }
}

/// Resolve the range either from explicit endpoints or by reducing --data.
fn resolve_range(args: &Cli) -> Result<(f64, f64)> {
    if let Some(ref text) = args.data {
        let sample = Sample::parse(text)?;
        let (lo, hi) = min_max(&[sample])?;
        debug!(lo, hi, "reduced data range");
        return Ok((lo, hi));
    }
    match (args.min, args.max) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => Err(anyhow::anyhow!(
            "provide MIN and MAX positional values, or --data"
        )),
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber with environment filter
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Cli::parse();
    let (lo, hi) = resolve_range(&args)?;

    let boundaries = match args.even {
        Some(nlev) => even_levels(lo, hi, nlev),
        None => {
            let options = ScaleOptions::new()
                .interval_count(args.intervals)
                .zero(ZeroPolicy::from(args.zero.clone()))
                .force_ends(args.ends)
                .build()?;
            build_scale(lo, hi, &options)?
        }
    };

    let levels = Levels::Boundaries(boundaries.clone());
    let labels = format_labels(&levels)?;

    let palette: Vec<u16> = default_palette()
        .into_iter()
        .take(args.palette_size.max(1))
        .collect();
    let colors = spread_colors(
        &levels,
        &palette,
        SplitMode::from(args.split.clone()),
        DEFAULT_SPLIT_COLOR,
    )?;

    if args.json {
        let report = serde_json::json!({
            "range": { "min": lo, "max": hi },
            "levels": boundaries,
            "labels": labels.texts().collect::<Vec<_>>(),
            "colors": colors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("range: {lo} .. {hi}");
    println!();
    let width = labels.texts().map(str::len).max().unwrap_or(0);
    for (i, label) in labels.iter().enumerate() {
        println!("{:>width$}  {}", label.text, label.value);
        if let Some(color) = colors.get(i) {
            println!("{:>width$}  [color {color}]", "");
        }
    }
    Ok(())
}
