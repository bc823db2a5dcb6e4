// src/charts/draw.rs
//
// Bar-chart building blocks on top of plotters. Categories sit on a segmented
// axis, one segment per bar (or per group), values on a plain f64 axis.
//
// Rendering goes into an RGB buffer; `render_png` hands the finished buffer to
// `image` for PNG encoding.

use std::ops::Range;
use std::path::Path;

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::ChartError;

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub const BLUE: RGBColor = RGBColor(0x1A, 0x56, 0xDB);
pub const LIGHT_BLUE: RGBColor = RGBColor(0x93, 0xC5, 0xFD);
pub const RED: RGBColor = RGBColor(0xE0, 0x24, 0x24);
pub const GREEN: RGBColor = RGBColor(0x05, 0x7A, 0x55);
pub const ORANGE: RGBColor = RGBColor(0xFF, 0x5A, 0x1F);
pub const GRAY: RGBColor = RGBColor(0x6B, 0x72, 0x80);
pub const YELLOW: RGBColor = RGBColor(0xFA, 0xCA, 0x15);
const INK: RGBColor = RGBColor(0x37, 0x41, 0x51);

/// Longest category label printed under a column before it is cut.
const COLUMN_LABEL_CHARS: usize = 16;

pub fn font(size: f64) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(&INK)
}

/// Draw into a fresh white canvas of `size` and write it to `path` as PNG.
pub fn render_png<F>(path: &Path, size: (u32, u32), draw: F) -> Result<(), ChartError>
where
    F: FnOnce(&Area<'_>) -> Result<(), ChartError>,
{
    let (w, h) = size;
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    let img = RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| ChartError::Draw(s!("pixel buffer does not match image size")))?;
    img.save(path)?;
    Ok(())
}

// At least two segments so the category axis never collapses to a point.
fn segments(n: usize) -> usize {
    n.max(2)
}

fn segment_end(i: usize, segs: usize) -> SegmentValue<usize> {
    if i + 1 < segs { SegmentValue::Exact(i + 1) } else { SegmentValue::Last }
}

fn cut(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return s!(label);
    }
    let mut out: String = label.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Horizontal bars, first entry on top.
pub struct Bars<'a> {
    pub title: &'a str,
    pub axis: &'a str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<RGBColor>,
    /// Text printed at the end of each bar.
    pub notes: Vec<String>,
    pub range: Range<f64>,
    /// Vertical reference lines.
    pub marks: Vec<f64>,
    pub legend: Vec<(&'a str, RGBColor)>,
}

pub fn hbars(area: &Area<'_>, bars: &Bars<'_>) -> Result<(), ChartError> {
    let segs = segments(bars.labels.len());
    let slot = |rank: usize| segs - 1 - rank;
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(s) => (segs - 1)
            .checked_sub(*s)
            .and_then(|rank| bars.labels.get(rank))
            .cloned()
            .unwrap_or_default(),
        _ => s!(),
    };

    let label_px = (f64::from(area.dim_in_pixel().0) * 0.28) as u32;
    let mut chart = ChartBuilder::on(area)
        .caption(bars.title, font(28.0))
        .margin(24)
        .x_label_area_size(60)
        .y_label_area_size(label_px)
        .build_cartesian_2d(bars.range.clone(), (0..segs - 1).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(segs)
        .y_label_formatter(&label_of)
        .x_desc(bars.axis)
        .label_style(font(16.0))
        .axis_desc_style(font(18.0))
        .draw()?;

    chart.draw_series(bars.values.iter().zip(&bars.colors).enumerate().map(
        |(rank, (&v, &color))| {
            let row = slot(rank);
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(row)), (v, segment_end(row, segs))],
                color.filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        },
    ))?;

    let pad = (bars.range.end - bars.range.start) * 0.008;
    chart.draw_series(bars.notes.iter().zip(&bars.values).enumerate().map(
        |(rank, (note, &v))| {
            let (x, h) = if v < 0.0 { (v - pad, HPos::Right) } else { (v + pad, HPos::Left) };
            Text::new(
                note.clone(),
                (x, SegmentValue::CenterOf(slot(rank))),
                font(15.0).pos(Pos::new(h, VPos::Center)),
            )
        },
    ))?;

    chart.draw_series(bars.marks.iter().map(|&x| {
        PathElement::new(
            vec![(x, SegmentValue::Exact(0)), (x, SegmentValue::Last)],
            GRAY.stroke_width(2),
        )
    }))?;

    draw_legend(&mut chart, &bars.legend, SeriesLabelPosition::LowerRight)
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grouped,
    Stacked,
}

pub struct Series<'a> {
    pub name: &'a str,
    /// One color per bar, or a single color for the whole series.
    pub colors: Vec<RGBColor>,
    pub values: Vec<f64>,
}

impl<'a> Series<'a> {
    pub fn uniform(name: &'a str, color: RGBColor, values: Vec<f64>) -> Self {
        Self { name, colors: vec![color], values }
    }

    fn color(&self, i: usize) -> RGBColor {
        self.colors.get(i).or(self.colors.last()).copied().unwrap_or(BLUE)
    }
}

/// Vertical columns, one segment per label.
pub struct Columns<'a> {
    pub title: &'a str,
    pub axis: &'a str,
    pub labels: Vec<String>,
    pub series: Vec<Series<'a>>,
    pub layout: Layout,
    pub y_max: f64,
    /// Text above each column; single-series charts only.
    pub notes: Vec<String>,
}

pub fn columns(area: &Area<'_>, cols: &Columns<'_>) -> Result<(), ChartError> {
    let segs = segments(cols.labels.len());
    let short: Vec<String> = cols.labels.iter().map(|l| cut(l, COLUMN_LABEL_CHARS)).collect();
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => short.get(*i).cloned().unwrap_or_default(),
        _ => s!(),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(cols.title, font(28.0))
        .margin(24)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((0..segs - 1).into_segmented(), 0.0..cols.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(segs)
        .x_label_formatter(&label_of)
        .y_desc(cols.axis)
        .label_style(font(14.0))
        .axis_desc_style(font(18.0))
        .draw()?;

    let (plot_w, _) = chart.plotting_area().dim_in_pixel();
    let seg_px = f64::from(plot_w) / segs as f64;
    let k = cols.series.len().max(1);

    for (j, series) in cols.series.iter().enumerate() {
        let mut bottoms = vec![0.0; cols.labels.len()];
        if cols.layout == Layout::Stacked {
            for prev in &cols.series[..j] {
                for (b, v) in bottoms.iter_mut().zip(&prev.values) {
                    *b += v;
                }
            }
        }

        let (left, right) = match cols.layout {
            Layout::Stacked => (seg_px * 0.15, seg_px * 0.15),
            Layout::Grouped => {
                let width = seg_px * 0.8 / k as f64;
                let left = seg_px * 0.1 + j as f64 * width;
                (left, seg_px - left - width)
            }
        };

        chart.draw_series(series.values.iter().zip(&bottoms).enumerate().map(
            |(i, (&v, &bottom))| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), bottom), (segment_end(i, segs), bottom + v)],
                    series.color(i).filled(),
                );
                bar.set_margin(0, 0, left.round() as u32, right.max(0.0).round() as u32);
                bar
            },
        ))?;
    }

    if cols.series.len() == 1 {
        let values = &cols.series[0].values;
        let pad = cols.y_max * 0.01;
        chart.draw_series(cols.notes.iter().zip(values).enumerate().map(|(i, (note, &v))| {
            Text::new(
                note.clone(),
                (SegmentValue::CenterOf(i), v + pad),
                font(14.0).pos(Pos::new(HPos::Center, VPos::Bottom)),
            )
        }))?;
    } else {
        let legend: Vec<(&str, RGBColor)> =
            cols.series.iter().map(|s| (s.name, s.color(0))).collect();
        draw_legend(&mut chart, &legend, SeriesLabelPosition::UpperRight)?;
    }
    Ok(())
}

/// Legend-only entries: an empty series per label, then the label box.
fn draw_legend<'c, 'b: 'c, X, Y>(
    chart: &mut ChartContext<'c, BitMapBackend<'b>, Cartesian2d<X, Y>>,
    entries: &[(&str, RGBColor)],
    position: SeriesLabelPosition,
) -> Result<(), ChartError>
where
    X: Ranged,
    Y: Ranged,
{
    if entries.is_empty() {
        return Ok(());
    }
    for &(name, color) in entries {
        chart
            .draw_series(std::iter::empty::<Rectangle<(X::ValueType, Y::ValueType)>>())?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 7), (x + 16, y + 7)], color.filled()));
    }
    chart
        .configure_series_labels()
        .position(position)
        .label_font(font(15.0))
        .background_style(&WHITE.mix(0.9))
        .border_style(&GRAY)
        .draw()?;
    Ok(())
}
