//! Equal-width histogram binning and PNG rendering.

use anyhow::{Result, anyhow};
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use std::path::Path;
use tracing::info;

/// Number of bins used for the overall-index histogram.
pub const BINS: usize = 20;

/// Figure size in inches and output resolution.
pub const FIGURE_INCHES: (u32, u32) = (8, 5);
pub const DPI: u32 = 300;

/// One histogram bar: `[start, end)` and its count. The last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lo: f64,
    hi: f64,
    counts: Vec<u32>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width buckets spanning their range.
    ///
    /// A single distinct value widens the range by 0.5 on each side; empty
    /// input spans [0, 1]. Non-finite values are ignored.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (mut lo, mut hi) = if finite.is_empty() {
            (0.0, 1.0)
        } else {
            finite
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let mut hist = Self {
            lo,
            hi,
            counts: vec![0u32; bins],
        };
        let norm = bins as f64 / (hi - lo);
        for v in finite {
            let mut idx = (((v - lo) * norm) as usize).min(bins - 1);
            // the float index can disagree with the edges it is checked against
            if v < hist.edge(idx) {
                idx -= 1;
            } else if idx + 1 < bins && v >= hist.edge(idx + 1) {
                idx += 1;
            }
            hist.counts[idx] += 1;
        }

        hist
    }

    /// Left edge of bin `i`; `edge(bins)` is exactly the upper bound.
    fn edge(&self, i: usize) -> f64 {
        let bins = self.counts.len();
        if i >= bins {
            self.hi
        } else {
            i as f64 * ((self.hi - self.lo) / bins as f64) + self.lo
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        self.counts.iter().enumerate().map(move |(i, &count)| Bin {
            start: self.edge(i),
            end: self.edge(i + 1),
            count,
        })
    }
}

/// Text drawn on the figure.
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

/// Font embedded in the binary so text renders without system font libraries.
static SANS_SERIF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

fn register_fonts() -> Result<()> {
    register_font("sans-serif", FontStyle::Normal, SANS_SERIF)
        .map_err(|_| anyhow!("embedded font is not a valid TrueType file"))
}

/// Draws `hist` as a bar chart with title and axis labels into a PNG at `path`.
#[tracing::instrument(skip(hist, labels), fields(path = %path.display()))]
pub fn render_histogram(path: &Path, hist: &Histogram, labels: &Labels) -> Result<()> {
    register_fonts()?;

    let size = (FIGURE_INCHES.0 * DPI, FIGURE_INCHES.1 * DPI);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = hist.range();
    let y_top = hist.counts().iter().copied().max().unwrap_or(0).max(1);
    let y_top = y_top + y_top / 20 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 50))
        .margin(60)
        .x_label_area_size(140)
        .y_label_area_size(180)
        .build_cartesian_2d(lo..hi, 0u32..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .label_style(("sans-serif", 36))
        .axis_desc_style(("sans-serif", 42))
        .draw()?;

    chart.draw_series(hist.bins().filter(|b| b.count > 0).map(|b| {
        Rectangle::new(
            [(b.start, 0u32), (b.end, b.count)],
            RGBColor(31, 119, 180).filled(),
        )
    }))?;

    root.present()?;
    info!(title = labels.title, bins = hist.counts().len(), "Histogram saved");
    Ok(())
}
