// SPDX-License-Identifier: MPL-2.0

//! Power sparkline rendering
//!
//! Turns the history buffer into a minimal trend chart: a single polyline
//! in the accent color with a filled dot marking the current value. No
//! smoothing, no axes. With fewer than two points a faint baseline is drawn
//! instead, signalling "insufficient data" rather than a misleading chart.

use cairo::{Context, Format, ImageSurface};

use crate::theme::Rgb;

/// The geometry a value series maps to, separated from cairo so the
/// normalization logic stays testable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SparkPlot {
    /// Flat low-opacity line near the bottom edge.
    Baseline { y: f64 },
    /// Points in draw order, index mapped across the width, value mapped
    /// inverted into the vertical inset band.
    Polyline { points: Vec<(f64, f64)> },
}

pub(crate) fn plot(values: &[f64], width: i32, height: i32) -> SparkPlot {
    let (width, height) = (width as f64, height as f64);
    if values.len() < 2 {
        return SparkPlot::Baseline { y: height - 3.0 };
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Span floor of 1 keeps a flat series from dividing by zero; every
    // point then lands on the bottom of the band.
    let span = (max - min).max(1.0);
    let step_x = width / (values.len() - 1) as f64;

    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let norm = (v - min) / span;
            (i as f64 * step_x, (height - 2.0) - norm * (height - 4.0))
        })
        .collect();
    SparkPlot::Polyline { points }
}

/// Render the sparkline into a fresh transparent surface.
pub fn render(values: &[f64], width: i32, height: i32, accent: Rgb) -> ImageSurface {
    let surface =
        ImageSurface::create(Format::ARgb32, width, height).expect("failed to create surface");
    {
        let cr = Context::new(&surface).expect("failed to create cairo context");
        cr.set_line_width(2.0);

        match plot(values, width, height) {
            SparkPlot::Baseline { y } => {
                cr.set_source_rgba(accent.r, accent.g, accent.b, 0.25);
                cr.move_to(0.0, y);
                cr.line_to(width as f64, y);
                cr.stroke().expect("failed to stroke");
            }
            SparkPlot::Polyline { points } => {
                cr.set_source_rgba(accent.r, accent.g, accent.b, 0.9);
                let mut iter = points.iter();
                if let Some(&(x, y)) = iter.next() {
                    cr.move_to(x, y);
                }
                for &(x, y) in iter {
                    cr.line_to(x, y);
                }
                cr.stroke().expect("failed to stroke");

                // Dot on the newest sample.
                if let Some(&(x, y)) = points.last() {
                    cr.arc(x, y, 3.0, 0.0, 2.0 * std::f64::consts::PI);
                    cr.fill().expect("failed to fill");
                }
            }
        }
    }
    surface
}
