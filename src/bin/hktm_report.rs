//! Engineering report CLI for SAC-D HKTM captures.
//!
//! Decodes a raw capture file and writes a text report, a voltage time
//! series PNG, and per-interval box plot PNGs. Exits non-zero on any decode
//! failure.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hktm::analysis::{self, MissionWindow};
use hktm::{CaptureReader, plot};

#[derive(Parser, Debug)]
#[command(name = "hktm-report", version, about = "SAC-D housekeeping telemetry report generator")]
struct Cli {
    /// Path to the raw capture file
    input: PathBuf,

    /// Output path for the text report
    #[arg(long, default_value = "voltage_report.txt")]
    report: PathBuf,

    /// Output path for the voltage time series PNG
    #[arg(long, default_value = "voltage_plot.png")]
    plot: PathBuf,

    /// Box-plot interval widths in hours (one PNG per width)
    #[arg(long = "boxplot-hours", value_delimiter = ',', default_values_t = [2u32, 6u32])]
    boxplot_hours: Vec<u32>,

    /// Voltage threshold for eclipse flagging, in volts
    #[arg(long, default_value_t = analysis::DEFAULT_ECLIPSE_THRESHOLD)]
    eclipse_threshold: f64,

    /// First plausible mission year for timestamp soft validation
    #[arg(long, default_value_t = MissionWindow::default().first_year)]
    first_year: i32,

    /// Last plausible mission year for timestamp soft validation
    #[arg(long, default_value_t = MissionWindow::default().last_year)]
    last_year: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let window = MissionWindow { first_year: cli.first_year, last_year: cli.last_year };

    let reader = CaptureReader::open(&cli.input)
        .with_context(|| format!("Opening capture {}", cli.input.display()))?
        .with_mission_window(window);
    let stream = reader
        .decode()
        .with_context(|| format!("Decoding capture {}", cli.input.display()))?;
    info!("Decoded {} packets from {}", stream.len(), cli.input.display());

    let report = analysis::render_report(
        &cli.input.display().to_string(),
        &stream,
        window,
        cli.eclipse_threshold,
    );
    std::fs::write(&cli.report, &report)
        .with_context(|| format!("Writing report {}", cli.report.display()))?;
    print!("{report}");

    if stream.is_empty() {
        return Ok(());
    }

    plot::render_time_series(&stream, cli.eclipse_threshold, &cli.plot)
        .with_context(|| format!("Rendering {}", cli.plot.display()))?;

    for hours in &cli.boxplot_hours {
        let groups = analysis::group_by_interval(&stream, *hours)
            .with_context(|| format!("Grouping records into {hours}-hour intervals"))?;
        let path = boxplot_path(&cli.plot, *hours);
        plot::render_box_plots(&groups, &path)
            .with_context(|| format!("Rendering {}", path.display()))?;
    }

    Ok(())
}

/// Derive a box-plot output path next to the time series plot,
/// e.g. `voltage_plot.png` -> `voltage_plot_boxplot_2h.png`.
fn boxplot_path(plot: &PathBuf, hours: u32) -> PathBuf {
    let stem = plot.file_stem().and_then(|s| s.to_str()).unwrap_or("voltage_plot");
    plot.with_file_name(format!("{stem}_boxplot_{hours}h.png"))
}
