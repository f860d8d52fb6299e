//! Chart rendering for the cleaned sleep dataset.
//!
//! Two descriptive PNG charts: a score-vs-duration scatter split by the nap
//! flag, and a duration histogram over full sleeps with a Gaussian density
//! overlay. Both are outputs for human inspection only; nothing downstream
//! reads them back.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::core::domain::SleepRecord;
use crate::transformations::{filter_by_nap, NapFilter};

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Histogram bin width in hours.
const BIN_WIDTH_HOURS: f64 = 1.0;

/// Render the "Sleep Score vs Sleep Duration" scatter chart.
///
/// One point per record with a recorded duration, x in hours, y the sleep
/// score. Full sleeps draw as blue circles, naps as red triangles, with a
/// legend naming both classes. Records without a duration are skipped.
pub fn render_score_vs_duration(records: &[SleepRecord], output: &Path) -> Result<()> {
    let full_sleeps: Vec<(f64, f64)> = scatter_points(records, false);
    let naps: Vec<(f64, f64)> = scatter_points(records, true);

    let x_max = full_sleeps
        .iter()
        .chain(naps.iter())
        .map(|(x, _)| *x)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", output.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sleep Score vs Sleep Duration", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max * 1.05, 0.0..100.0f64)?;

    chart
        .configure_mesh()
        .x_desc("Sleep Duration (hours)")
        .y_desc("Sleep Score")
        .draw()?;

    chart
        .draw_series(
            full_sleeps
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.7).filled())),
        )?
        .label("Full sleep")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    chart
        .draw_series(
            naps.iter()
                .map(|&(x, y)| TriangleMarker::new((x, y), 5, RED.mix(0.7).filled())),
        )?
        .label("Nap")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", output.display()))?;

    info!(
        "Rendered scatter with {} full sleep(s) and {} nap(s) to {}",
        full_sleeps.len(),
        naps.len(),
        output.display()
    );
    Ok(())
}

/// Render the "Distribution of Sleep Duration (Excluding Naps)" histogram.
///
/// Counts full-sleep durations into 1-hour bins and overlays a Gaussian
/// kernel density estimate scaled to the count axis (density * n * binwidth).
pub fn render_duration_histogram(records: &[SleepRecord], output: &Path) -> Result<()> {
    let durations: Vec<f64> = filter_by_nap(records, NapFilter::FullSleepOnly)
        .iter()
        .filter_map(|r| r.duration_hours())
        .collect();

    let x_max = durations.iter().copied().fold(0.0f64, f64::max).max(1.0);
    let n_bins = (x_max / BIN_WIDTH_HOURS).ceil() as usize + 1;

    let mut counts = vec![0usize; n_bins];
    for &hours in &durations {
        let bin = ((hours / BIN_WIDTH_HOURS) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }

    let kde = gaussian_kde(&durations, 0.0, n_bins as f64 * BIN_WIDTH_HOURS, 200);
    let scale = durations.len() as f64 * BIN_WIDTH_HOURS;

    let y_max = counts
        .iter()
        .map(|&c| c as f64)
        .chain(kde.iter().map(|&(_, d)| d * scale))
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", output.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Distribution of Sleep Duration (Excluding Naps)",
            ("sans-serif", 28),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..n_bins as f64 * BIN_WIDTH_HOURS, 0.0..y_max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Sleep Duration (hours)")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = i as f64 * BIN_WIDTH_HOURS;
        Rectangle::new(
            [(x0, 0.0), (x0 + BIN_WIDTH_HOURS, count as f64)],
            BLUE.mix(0.4).filled(),
        )
    }))?;

    chart.draw_series(std::iter::once(PathElement::new(
        kde.iter().map(|&(x, d)| (x, d * scale)).collect::<Vec<_>>(),
        BLUE.stroke_width(2),
    )))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", output.display()))?;

    info!(
        "Rendered histogram over {} full sleep(s) to {}",
        durations.len(),
        output.display()
    );
    Ok(())
}

fn scatter_points(records: &[SleepRecord], naps: bool) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.is_nap == naps)
        .filter_map(|r| r.duration_hours().map(|h| (h, r.sleep_score)))
        .collect()
}

/// Gaussian kernel density estimate over `[lo, hi]` at `steps` points.
///
/// Bandwidth by Scott's rule; degenerate inputs (fewer than two samples or
/// zero spread) yield an empty curve rather than a division by zero.
fn gaussian_kde(samples: &[f64], lo: f64, hi: f64, steps: usize) -> Vec<(f64, f64)> {
    let n = samples.len();
    if n < 2 {
        return Vec::new();
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }

    let bandwidth = 1.06 * std_dev * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..=steps)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / steps as f64;
            let density = samples
                .iter()
                .map(|&s| (-0.5 * ((x - s) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}
