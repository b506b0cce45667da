//! Chart description and its PNG renderer.
//!
//! A `Chart` is plain data computed by the pipeline. Drawing it is the job of
//! a `Render` implementation; `PngRenderer` draws with plotters.

use axis::AxisScale;
use errors::*;
use itertools::Itertools;
use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use plotters::prelude::IntoLogRange;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use series::Series;
use setting::ChartStyle;
use std::fmt::Display;
use std::path::Path;

/// Scale of the x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XScale {
    /// Evenly spaced values.
    Linear,
    /// Logarithmic, with the base picked by `AxisScale::select`.
    Log(AxisScale),
}

/// Point marker drawn on top of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    /// Line only.
    None,
    /// Filled circle.
    Circle,
    /// Diagonal cross.
    Cross,
}

/// Corner of the plotting area holding a legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendPosition {
    /// Top left.
    UpperLeft,
    /// Bottom left.
    LowerLeft,
    /// Top right.
    UpperRight,
}

/// Legend box of a plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Where the box goes.
    pub position: LegendPosition,

    /// Overrides the style's medium font size.
    pub font_size: Option<u32>,
}

impl Legend {
    /// A legend in the style's font size.
    pub fn at(position: LegendPosition) -> Self {
        Legend {
            position: position,
            font_size: None,
        }
    }
}

/// Series sharing one y-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    /// Label of the y-axis.
    pub y_desc: String,
    /// Lines drawn against this axis.
    pub series: Vec<Series>,
    /// Marker put on every point.
    pub marker: Marker,
    /// Legend listing `series`. A secondary plot without one shares the
    /// primary legend.
    pub legend: Option<Legend>,
}

impl Plot {
    /// Plain lines without legend.
    pub fn new(y_desc: &str, series: Vec<Series>) -> Self {
        Plot {
            y_desc: y_desc.to_string(),
            series: series,
            marker: Marker::None,
            legend: None,
        }
    }

    /// Sets the point marker.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Adds a legend.
    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Top of the y-axis, leaving some headroom above the largest value.
    fn y_top(&self) -> f64 {
        let max = self.series
            .iter()
            .filter_map(|s| s.y_max())
            .fold(0.0, f64::max);
        if max > 0.0 { max * 1.1 } else { 1.0 }
    }
}

/// Everything a renderer needs to draw one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Caption above the plot.
    pub title: Option<String>,
    /// Label of the x-axis.
    pub x_desc: Option<String>,
    /// Linear or logarithmic x-axis.
    pub x_scale: XScale,

    /// Figure size in inches; the style's dpi turns it into pixels.
    pub figsize: (f64, f64),

    /// Left y-axis.
    pub primary: Plot,

    /// Right y-axis, sharing the x-axis with `primary`.
    pub secondary: Option<Plot>,
}

impl Chart {
    /// Smallest and largest x over every series.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let plots = Some(&self.primary).into_iter().chain(self.secondary.as_ref());
        plots
            .flat_map(|p| p.series.iter())
            .flat_map(|s| s.points.iter())
            .map(|p| p.0)
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
    }

    /// Number of x tick labels: one per distinct x-value, but no more than
    /// fit side by side in `width` pixels with labels of `font_size`.
    pub fn x_label_count(&self, width: u32, font_size: u32) -> usize {
        let plots = Some(&self.primary).into_iter().chain(self.secondary.as_ref());
        let distinct = plots
            .flat_map(|p| p.series.iter())
            .flat_map(|s| s.points.iter())
            .map(|p| p.0 as u64)
            .sorted()
            .dedup()
            .count();
        // power-of-two sizes run to seven digits
        let fit = (width / (font_size.max(1) * 5)) as usize;
        distinct.min(fit).max(2)
    }

    /// Range of the x-axis. Log axes need a positive lower bound and every
    /// axis needs a non-empty range.
    pub fn x_range(&self) -> (f64, f64) {
        let (lo, hi) = self.x_extent().unwrap_or((1.0, 1.0));
        match self.x_scale {
            XScale::Linear if lo < hi => (lo, hi),
            XScale::Linear => (lo - 1.0, hi + 1.0),
            XScale::Log(scale) => {
                let lo = if lo > 0.0 { lo } else { 1.0 };
                let hi = if hi > lo { hi } else { lo * scale.base() };
                (lo, hi)
            }
        }
    }
}

/// Draws a chart into an image file.
pub trait Render {
    /// Writes `chart` to `out`.
    fn render(&self, chart: &Chart, out: &Path) -> Result<()>;
}

/// Renders charts as PNG images.
pub struct PngRenderer {
    style: ChartStyle,
}

impl PngRenderer {
    /// A renderer drawing with `style`.
    pub fn new(style: ChartStyle) -> Self {
        PngRenderer { style: style }
    }
}

fn render_err<E: Display>(e: E) -> Error {
    ErrorKind::Render(e.to_string()).into()
}

fn font(size: u32) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size as f64, FontStyle::Normal)
}

/// Tick label: integers without a fractional part.
fn format_tick(x: &f64) -> String {
    if x.fract() == 0.0 {
        format!("{:.0}", x)
    } else {
        format!("{:.2}", x)
    }
}

fn label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
    }
}

impl Render for PngRenderer {
    fn render(&self, chart: &Chart, out: &Path) -> Result<()> {
        let size = self.style.pixels(chart.figsize);
        let root = BitMapBackend::new(out, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let plots = Some(&chart.primary).into_iter().chain(chart.secondary.as_ref());
        for plot in plots {
            for s in &plot.series {
                info!("Plotting {} ({} points) against {}", s.label, s.len(), plot.y_desc);
            }
        }

        let (lo, hi) = chart.x_range();
        match chart.x_scale {
            XScale::Linear => draw(&root, chart, &self.style, || lo..hi)?,
            XScale::Log(scale) => draw(&root, chart, &self.style, || {
                (lo..hi).log_scale().base(scale.base())
            })?,
        }

        root.present().map_err(render_err)?;
        info!("Wrote {}", out.display());
        Ok(())
    }
}

fn draw<X, F>(
    root: &DrawingArea<BitMapBackend, Shift>,
    chart: &Chart,
    style: &ChartStyle,
    x_spec: F,
) -> Result<()>
where
    X: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    F: Fn() -> X,
{
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(style.margin)
        .x_label_area_size(style.label_area)
        .y_label_area_size(style.label_area);
    if chart.secondary.is_some() {
        builder.right_y_label_area_size(style.label_area);
    }
    if let Some(ref title) = chart.title {
        builder.caption(title, font(style.bigger_font));
    }

    let mut ctx = builder
        .build_cartesian_2d(x_spec(), 0f64..chart.primary.y_top())
        .map_err(render_err)?;

    {
        let width = root.dim_in_pixel().0;
        let mut mesh = ctx.configure_mesh();
        mesh.y_desc(chart.primary.y_desc.as_str())
            .x_labels(chart.x_label_count(width, style.medium_font))
            .x_label_formatter(&format_tick)
            .label_style(font(style.medium_font))
            .axis_desc_style(font(style.medium_font));
        if let Some(ref x_desc) = chart.x_desc {
            mesh.x_desc(x_desc.as_str());
        }
        mesh.draw().map_err(render_err)?;
    }

    for (i, s) in chart.primary.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let line = color.stroke_width(style.line_width);
        ctx.draw_series(LineSeries::new(s.points.iter().cloned(), line))
            .map_err(render_err)?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
        match chart.primary.marker {
            Marker::None => {}
            Marker::Circle => {
                ctx.draw_series(s.points.iter().map(|&p| Circle::new(p, style.marker_size, color.filled())))
                    .map_err(render_err)?;
            }
            Marker::Cross => {
                ctx.draw_series(s.points.iter().map(|&p| Cross::new(p, style.marker_size, line)))
                    .map_err(render_err)?;
            }
        }
    }

    let secondary = match chart.secondary {
        Some(ref secondary) => secondary,
        None => {
            if let Some(ref legend) = chart.primary.legend {
                ctx.configure_series_labels()
                    .position(label_position(legend.position))
                    .label_font(font(legend.font_size.unwrap_or(style.medium_font)))
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(render_err)?;
            }
            return Ok(());
        }
    };

    let mut ctx = ctx.set_secondary_coord(x_spec(), 0f64..secondary.y_top());
    ctx.configure_secondary_axes()
        .y_desc(secondary.y_desc.as_str())
        .label_style(font(style.medium_font))
        .axis_desc_style(font(style.medium_font))
        .draw()
        .map_err(render_err)?;

    // colors continue after the primary series
    let offset = chart.primary.series.len();
    let mut entries = Vec::new();
    for (i, s) in secondary.series.iter().enumerate() {
        let color = Palette99::pick(offset + i).to_rgba();
        let line = color.stroke_width(style.line_width);
        let anno = ctx.draw_secondary_series(LineSeries::new(s.points.iter().cloned(), line))
            .map_err(render_err)?;
        // secondary labels land in the primary legend unless the secondary
        // axis has a legend of its own
        if secondary.legend.is_some() {
            entries.push((s.label.clone(), line));
        } else {
            anno.label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
        }
        match secondary.marker {
            Marker::None => {}
            Marker::Circle => {
                ctx.draw_secondary_series(s.points.iter().map(|&p| Circle::new(p, style.marker_size, color.filled())))
                    .map_err(render_err)?;
            }
            Marker::Cross => {
                ctx.draw_secondary_series(s.points.iter().map(|&p| Cross::new(p, style.marker_size, line)))
                    .map_err(render_err)?;
            }
        }
    }

    if let Some(ref legend) = chart.primary.legend {
        ctx.configure_series_labels()
            .position(label_position(legend.position))
            .label_font(font(legend.font_size.unwrap_or(style.medium_font)))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }
    if let Some(ref legend) = secondary.legend {
        let area = ctx.plotting_area().strip_coord_spec();
        draw_legend_box(&area, legend, &entries, style)?;
    }
    Ok(())
}

/// Gap between a hand-drawn legend box and the edge of the plotting area.
const LEGEND_MARGIN: i32 = 10;

/// Draws a legend box in pixel coordinates of `area`, one line sample and
/// label per entry.
fn draw_legend_box(
    area: &DrawingArea<BitMapBackend, Shift>,
    legend: &Legend,
    entries: &[(String, ShapeStyle)],
    style: &ChartStyle,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let text: TextStyle = font(legend.font_size.unwrap_or(style.medium_font)).into();
    let (mut label_w, mut label_h) = (0, 0);
    for &(ref label, _) in entries {
        let (w, h) = area.estimate_text_size(label, &text).map_err(render_err)?;
        label_w = label_w.max(w as i32);
        label_h = label_h.max(h as i32);
    }

    let pad = 5;
    let sample = 20;
    let line_h = label_h + pad;
    let box_w = 3 * pad + sample + label_w;
    let box_h = pad + line_h * entries.len() as i32;
    let (w, h) = area.dim_in_pixel();
    let x0 = match legend.position {
        LegendPosition::UpperRight => w as i32 - box_w - LEGEND_MARGIN,
        LegendPosition::UpperLeft | LegendPosition::LowerLeft => LEGEND_MARGIN,
    };
    let y0 = match legend.position {
        LegendPosition::LowerLeft => h as i32 - box_h - LEGEND_MARGIN,
        LegendPosition::UpperLeft | LegendPosition::UpperRight => LEGEND_MARGIN,
    };

    let corners = [(x0, y0), (x0 + box_w, y0 + box_h)];
    area.draw(&Rectangle::new(corners, WHITE.mix(0.8).filled()))
        .map_err(render_err)?;
    area.draw(&Rectangle::new(corners, BLACK)).map_err(render_err)?;
    for (i, &(ref label, line)) in entries.iter().enumerate() {
        let top = y0 + pad + line_h * i as i32;
        let mid = top + label_h / 2;
        area.draw(&PathElement::new(vec![(x0 + pad, mid), (x0 + pad + sample, mid)], line))
            .map_err(render_err)?;
        area.draw(&Text::new(label.as_str(), (x0 + 2 * pad + sample, top), text.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn chart(scale: XScale, xs: &[f64]) -> Chart {
        let series = Series {
            label: "s".to_string(),
            points: xs.iter().map(|&x| (x, 1.0)).collect(),
        };
        Chart {
            title: None,
            x_desc: None,
            x_scale: scale,
            figsize: (12.0, 7.5),
            primary: Plot::new("y", vec![series]),
            secondary: None,
        }
    }

    #[test]
    fn test_x_range() {
        let c = chart(XScale::Log(AxisScale::Log2), &[4.0, 1.0, 16.0]);
        assert_eq!(c.x_extent(), Some((1.0, 16.0)));
        assert_eq!(c.x_range(), (1.0, 16.0));
    }

    #[test]
    fn test_degenerate_x_range() {
        assert_eq!(chart(XScale::Log(AxisScale::Log2), &[4.0]).x_range(), (4.0, 8.0));
        assert_eq!(chart(XScale::Log(AxisScale::Log10), &[0.0, 10.0]).x_range(), (1.0, 10.0));
        assert_eq!(chart(XScale::Linear, &[3.0]).x_range(), (2.0, 4.0));
        assert_eq!(chart(XScale::Linear, &[]).x_range(), (0.0, 2.0));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(&1024.0), "1024");
        assert_eq!(format_tick(&1.5), "1.50");
    }

    #[test]
    fn test_x_label_count() {
        let many = (0..20).map(|i| (1u64 << i) as f64).collect::<Vec<_>>();
        let c = chart(XScale::Log(AxisScale::Log2), &many);
        assert_eq!(c.x_label_count(1200, 20), 12);
        assert_eq!(c.x_label_count(4000, 20), 20);

        let c = chart(XScale::Linear, &[1.0, 2.0, 3.0]);
        assert_eq!(c.x_label_count(1200, 20), 3);
        assert_eq!(chart(XScale::Linear, &[5.0]).x_label_count(1200, 20), 2);
    }

    fn series(label: &str, points: &[(f64, f64)]) -> Series {
        Series {
            label: label.to_string(),
            points: points.to_vec(),
        }
    }

    fn twin(secondary_legend: Option<Legend>) -> Chart {
        let xs = [16.0, 1024.0, 65536.0, 1048576.0];
        let p1 = series("p1", &xs.iter().map(|&x: &f64| (x, x.log2())).collect::<Vec<_>>());
        let s1 = series("s1", &xs.iter().map(|&x| (x, 0.5)).collect::<Vec<_>>());
        let s2 = series("s2", &xs.iter().map(|&x| (x, 1.5)).collect::<Vec<_>>());
        let mut secondary = Plot::new("time", vec![s1, s2]).marker(Marker::Cross);
        secondary.legend = secondary_legend;
        Chart {
            title: Some("twin".to_string()),
            x_desc: Some("Number of key-value pairs".to_string()),
            x_scale: XScale::Log(AxisScale::Log2),
            figsize: (8.0, 5.0),
            primary: Plot::new("size", vec![p1])
                .marker(Marker::Circle)
                .legend(Legend::at(LegendPosition::UpperLeft)),
            secondary: Some(secondary),
        }
    }

    #[test]
    fn test_png_single_axis() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("single.png");
        let mut c = chart(XScale::Linear, &[1.0, 2.0, 3.0]);
        c.title = Some("single".to_string());
        c.primary.legend = Some(Legend::at(LegendPosition::UpperRight));

        PngRenderer::new(ChartStyle::default()).render(&c, &out).unwrap();
        assert!(out.exists());
        assert!(out.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_png_twin_axes_two_legends() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("twin.png");
        let c = twin(Some(Legend::at(LegendPosition::LowerLeft)));

        PngRenderer::new(ChartStyle::default()).render(&c, &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_png_twin_axes_shared_legend() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("shared.png");

        PngRenderer::new(ChartStyle::default()).render(&twin(None), &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_y_top() {
        let c = chart(XScale::Linear, &[1.0, 2.0]);
        assert!((c.primary.y_top() - 1.1).abs() < 1e-12);
        assert_eq!(Plot::new("y", Vec::new()).y_top(), 1.0);
    }
}
