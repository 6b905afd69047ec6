//! Chart rendering for decoded captures.
//!
//! Produces the two views the engineering workflow uses: a voltage time
//! series with eclipse periods highlighted, and per-interval box plots for
//! spotting diurnal patterns. Both render to PNG via `plotters`.

use chrono::{DateTime, Duration, Local};
use plotters::prelude::*;
use std::path::Path;

use crate::analysis::{IntervalGroup, eclipse_flags};
use crate::decode::RecordStream;
use crate::{HktmError, Result};

const CHART_SIZE: (u32, u32) = (1280, 720);

fn plot_err<E: std::fmt::Display>(err: E) -> HktmError {
    HktmError::Plot { details: err.to_string() }
}

/// Pad a voltage range so flat series still get a visible axis.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let margin = ((max - min) * 0.05).max(0.1);
    (min - margin, max + margin)
}

/// Render the voltage time series to a PNG file.
///
/// Samples below `eclipse_threshold` are overdrawn in red, matching the
/// eclipse flagging of the analysis layer.
pub fn render_time_series<P: AsRef<Path>>(
    stream: &RecordStream,
    eclipse_threshold: f64,
    path: P,
) -> Result<()> {
    if stream.is_empty() {
        return Err(HktmError::Plot { details: "no records to plot".to_string() });
    }

    let voltages: Vec<f64> = stream.iter().map(|r| r.voltage).collect();
    let (v_min, v_max) = padded_range(&voltages);

    let mut t_first: DateTime<Local> = stream.records()[0].timestamp;
    let mut t_last: DateTime<Local> = stream.records()[stream.len() - 1].timestamp;
    if t_first >= t_last {
        // Degenerate span (single packet or constant timestamps)
        t_first = t_first - Duration::minutes(1);
        t_last = t_last + Duration::minutes(1);
    }

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("SAC-D Voltages", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(t_first..t_last, v_min..v_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Timestamp")
        .y_desc("Voltage (V)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            stream.iter().map(|r| (r.timestamp, r.voltage)),
            &BLUE,
        ))
        .map_err(plot_err)?;

    let flags = eclipse_flags(stream, eclipse_threshold);
    chart
        .draw_series(
            stream
                .iter()
                .zip(flags)
                .filter(|(_, eclipsed)| *eclipsed)
                .map(|(r, _)| Circle::new((r.timestamp, r.voltage), 2, RED.filled())),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Render per-interval voltage box plots to a PNG file.
pub fn render_box_plots<P: AsRef<Path>>(groups: &[IntervalGroup], path: P) -> Result<()> {
    if groups.is_empty() {
        return Err(HktmError::Plot { details: "no interval groups to plot".to_string() });
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.voltages.iter().copied()).collect();
    let (v_min, v_max) = padded_range(&all);
    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("SAC-D Voltages by Interval", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(labels[..].into_segmented(), v_min as f32..v_max as f32)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Interval")
        .y_desc("Voltage (V)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(groups.iter().zip(labels.iter()).map(|(group, label)| {
            let quartiles = Quartiles::new(&group.voltages);
            Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
