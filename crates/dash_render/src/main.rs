//! Dash Render - render chart request files to SVG
//!
//! Reads a JSON chart request (`{"kind": "bar", "data": [...], "options": {...}}`),
//! renders it with the dash_charts engine and writes the SVG document to a
//! file or stdout. Pie charts can also emit their legend as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use dash_charts::{ChartEngine, ChartRequest, Container, EngineConfig, LegendContainer, SvgWriter};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Render dashboard chart requests to SVG
#[derive(Parser, Debug)]
#[command(name = "dash_render")]
#[command(about = "Render dashboard chart requests to SVG")]
#[command(version)]
struct Args {
    /// Chart request JSON file
    request: PathBuf,

    /// Output SVG file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the pie legend entries to this JSON file
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host width in pixels; 0 uses the chart default
    #[arg(long, default_value_t = 0.0)]
    width: f64,

    /// Host height in pixels; 0 uses the chart default
    #[arg(long, default_value_t = 0.0)]
    height: f64,

    /// Indent nested SVG elements
    #[arg(long)]
    pretty: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::default(),
    };
    let engine = ChartEngine::from_config(config);

    let json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request {}", args.request.display()))?;
    let request = ChartRequest::from_json(&json)
        .with_context(|| format!("Invalid chart request {}", args.request.display()))?;
    tracing::info!("Rendering {} chart from {}", request.kind(), args.request.display());

    let mut container = Container::new(args.width, args.height);
    let mut legend = LegendContainer::new();
    let legend_target = if args.legend.is_some() { Some(&mut legend) } else { None };
    request.render(&engine, &mut container, legend_target);

    let svg = container
        .write_svg(&SvgWriter::new().indent(args.pretty))
        .context("Failed to serialize chart")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &svg).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if let Some(path) = &args.legend {
        let json = legend.to_json().context("Failed to serialize legend")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write legend {}", path.display()))?;
        tracing::info!("Wrote {} legend entries to {}", legend.entries().len(), path.display());
    }

    Ok(())
}
