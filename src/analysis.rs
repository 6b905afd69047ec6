//! Downstream analysis over a decoded record stream.
//!
//! Everything here consumes [`RecordStream`](crate::RecordStream) values and
//! never touches raw capture bytes. Plausibility filtering lives at this
//! layer on purpose: the decoder always returns a value when the bytes are
//! present, and this module decides what to flag or drop.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::decode::{DecodedRecord, RecordStream};
use crate::{HktmError, Result};

/// Voltage threshold below which a sample is treated as an eclipse period.
pub const DEFAULT_ECLIPSE_THRESHOLD: f64 = 32.0;

/// Timestamp plausibility window, in calendar years.
///
/// The default range was derived experimentally from one capture file and is
/// a tunable filtering threshold, not a decode-time constraint. Re-verify it
/// before trusting it on other SAC-D captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionWindow {
    pub first_year: i32,
    pub last_year: i32,
}

impl Default for MissionWindow {
    fn default() -> Self {
        Self { first_year: 2000, last_year: 2025 }
    }
}

impl MissionWindow {
    /// Whether a record's timestamp falls inside the window.
    pub fn is_plausible(&self, record: &DecodedRecord) -> bool {
        let year = record.timestamp.year();
        (self.first_year..=self.last_year).contains(&year)
    }

    /// Count of records whose timestamps fall outside the window.
    pub fn count_implausible(&self, stream: &RecordStream) -> usize {
        stream.iter().filter(|r| !self.is_plausible(r)).count()
    }

    /// Records inside the window, in packet order.
    pub fn filter<'a>(&self, stream: &'a RecordStream) -> Vec<&'a DecodedRecord> {
        stream.iter().filter(|r| self.is_plausible(r)).collect()
    }
}

/// Descriptive statistics over the voltage channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Compute statistics over a set of samples. Returns `None` when empty.
    pub fn describe(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std_dev = if count > 1 {
            let variance =
                samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        Some(Self { count, min, max, mean, std_dev, median })
    }

    /// Statistics over the voltage channel of a record stream.
    pub fn of_voltages(stream: &RecordStream) -> Option<Self> {
        let voltages: Vec<f64> = stream.iter().map(|r| r.voltage).collect();
        Self::describe(&voltages)
    }
}

/// Records bucketed into one hour-of-day interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalGroup {
    /// Interval label, e.g. "06:00" for the bucket starting at hour 6
    pub label: String,
    /// First hour of the bucket
    pub start_hour: u32,
    /// Voltage samples whose timestamps fall in the bucket, in packet order
    pub voltages: Vec<f64>,
}

/// Bucket a stream's records by hour of day into `interval_hours`-wide groups.
///
/// Every record lands in exactly one group; groups are returned in ascending
/// hour order and empty buckets are omitted.
pub fn group_by_interval(stream: &RecordStream, interval_hours: u32) -> Result<Vec<IntervalGroup>> {
    if interval_hours == 0 || interval_hours > 24 {
        return Err(HktmError::parse(
            "interval grouping",
            format!("interval of {interval_hours} hours is outside 1..=24"),
        ));
    }

    let mut groups: Vec<IntervalGroup> = Vec::new();
    for record in stream {
        let start_hour = (record.timestamp.hour() / interval_hours) * interval_hours;
        match groups.iter_mut().find(|g| g.start_hour == start_hour) {
            Some(group) => group.voltages.push(record.voltage),
            None => groups.push(IntervalGroup {
                label: format!("{start_hour:02}:00"),
                start_hour,
                voltages: vec![record.voltage],
            }),
        }
    }

    groups.sort_by_key(|g| g.start_hour);
    Ok(groups)
}

/// Per-record eclipse flags: true where voltage drops below `threshold`.
pub fn eclipse_flags(stream: &RecordStream, threshold: f64) -> Vec<bool> {
    stream.iter().map(|r| r.voltage < threshold).collect()
}

/// Render a plain-text engineering report for a decoded capture.
pub fn render_report(
    source: &str,
    stream: &RecordStream,
    window: MissionWindow,
    eclipse_threshold: f64,
) -> String {
    let mut report = String::new();
    report.push_str(&format!("SAC-D HKTM capture report: {source}\n"));
    report.push_str(&format!("Packets decoded: {}\n", stream.len()));

    if stream.is_empty() {
        report.push_str("Capture contains no frames.\n");
        return report;
    }

    let first = &stream.records()[0];
    let last = &stream.records()[stream.len() - 1];
    report.push_str(&format!(
        "Time span: {} .. {}\n",
        first.timestamp.format("%Y-%m-%d %H:%M:%S"),
        last.timestamp.format("%Y-%m-%d %H:%M:%S"),
    ));

    if let Some(stats) = SummaryStats::of_voltages(stream) {
        report.push_str("Voltage (V):\n");
        report.push_str(&format!("  min    {:8.3}\n", stats.min));
        report.push_str(&format!("  max    {:8.3}\n", stats.max));
        report.push_str(&format!("  mean   {:8.3}\n", stats.mean));
        report.push_str(&format!("  median {:8.3}\n", stats.median));
        report.push_str(&format!("  stddev {:8.3}\n", stats.std_dev));
    }

    let eclipsed = eclipse_flags(stream, eclipse_threshold).iter().filter(|f| **f).count();
    report.push_str(&format!(
        "Eclipse periods (< {:.1} V): {} of {} packets\n",
        eclipse_threshold,
        eclipsed,
        stream.len()
    ));

    let implausible = window.count_implausible(stream);
    if implausible > 0 {
        report.push_str(&format!(
            "Warning: {} packets have timestamps outside {}..={}\n",
            implausible, window.first_year, window.last_year
        ));
    }

    report
}
