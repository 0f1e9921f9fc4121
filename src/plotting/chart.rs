use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::BackendCoord;
use std::error::Error;
use std::f64::consts::{FRAC_PI_2, TAU};

use super::styles::{palette_color, ChartStyle, ChartTheme};
use super::{ChartRow, Series};
use crate::analysis::DashboardView;
use crate::utils::format_currency_millions;

pub type PlotError = Box<dyn Error + Send + Sync>;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Smallest bitmap edge, in pixels.
const MIN_SIDE: u32 = 64;

/// Every chart the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    RevenueByDivision,
    MarketShare,
    RdInvestment,
    ResponseTimes,
    SafetyScores,
    IncidentTrends,
    ProductionTrends,
    SatisfactionTrends,
}

impl ChartId {
    pub const ALL: [ChartId; 8] = [
        ChartId::RevenueByDivision,
        ChartId::MarketShare,
        ChartId::RdInvestment,
        ChartId::ResponseTimes,
        ChartId::SafetyScores,
        ChartId::IncidentTrends,
        ChartId::ProductionTrends,
        ChartId::SatisfactionTrends,
    ];

    /// Pick this chart's rows out of a view.
    pub fn spec(self, view: &DashboardView) -> ChartSpec<'_> {
        let (title, data, format, y_range) = match self {
            Self::RevenueByDivision => (
                "Revenue by Division",
                ChartData::Bars(&view.finance.revenue_by_division),
                ValueFormat::Currency,
                None,
            ),
            Self::MarketShare => (
                "Market Share",
                ChartData::Pie(&view.finance.market_share),
                ValueFormat::Plain,
                None,
            ),
            Self::RdInvestment => (
                "R&D Investment Trends",
                ChartData::Bars(&view.finance.rd_investment),
                ValueFormat::Currency,
                None,
            ),
            Self::ResponseTimes => (
                "Response Times by District",
                ChartData::Bars(&view.security.response_times),
                ValueFormat::Minutes,
                None,
            ),
            Self::SafetyScores => (
                "Safety Scores by District",
                ChartData::Bars(&view.security.safety_scores),
                ValueFormat::Plain,
                Some((0.0, 10.0)),
            ),
            Self::IncidentTrends => (
                "Incidents by District",
                ChartData::Lines(&view.security.incident_trends),
                ValueFormat::Plain,
                None,
            ),
            Self::ProductionTrends => (
                "Production Volume by Facility",
                ChartData::Lines(&view.supply_chain.production_trends),
                ValueFormat::Plain,
                None,
            ),
            Self::SatisfactionTrends => (
                "Satisfaction by Department",
                ChartData::Lines(&view.workforce.satisfaction_trends),
                ValueFormat::Plain,
                Some((0.0, 10.0)),
            ),
        };

        ChartSpec {
            title,
            data,
            format,
            y_range,
        }
    }
}

#[derive(Clone, Copy)]
pub enum ChartData<'a> {
    Bars(&'a [ChartRow]),
    Lines(&'a [Series]),
    Pie(&'a [ChartRow]),
}

/// How y-axis ticks are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Plain,
    /// Values are millions of dollars
    Currency,
    Minutes,
}

impl ValueFormat {
    pub fn label(self, value: f64) -> String {
        match self {
            Self::Currency => format_currency_millions(value),
            Self::Minutes => format!("{value:.0} min"),
            // K/M suffixes keep large volumes readable
            Self::Plain => {
                if value.abs() >= 1_000_000.0 {
                    format!("{:.1}M", value / 1_000_000.0)
                } else if value.abs() >= 1_000.0 {
                    format!("{:.1}K", value / 1_000.0)
                } else if value.fract() == 0.0 {
                    format!("{value:.0}")
                } else {
                    format!("{value:.1}")
                }
            }
        }
    }
}

pub struct ChartSpec<'a> {
    pub title: &'static str,
    pub data: ChartData<'a>,
    pub format: ValueFormat,
    /// Fixed y range; computed from the data when `None`
    pub y_range: Option<(f64, f64)>,
}

/// A chart drawn into a packed RGB buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub size: (u32, u32),
    pub rgb: Vec<u8>,
}

/// Draw a chart into a fresh bitmap of the given size.
pub fn render_chart(spec: &ChartSpec<'_>, size: (u32, u32)) -> Result<RenderedChart, PlotError> {
    let theme = ChartTheme::default();
    let style = ChartStyle::default();
    let size = (size.0.max(MIN_SIDE), size.1.max(MIN_SIDE));
    let mut rgb = vec![0u8; size.0 as usize * size.1 as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, size).into_drawing_area();
        root.fill(&theme.background_color)?;

        match spec.data {
            ChartData::Bars(rows) => draw_bars(&root, spec, rows, &theme, &style)?,
            ChartData::Lines(series) => draw_lines(&root, spec, series, &theme, &style)?,
            ChartData::Pie(rows) => draw_pie(&root, spec, rows, &theme, &style)?,
        }

        root.present()?;
    }

    Ok(RenderedChart { size, rgb })
}

fn draw_bars(
    root: &Area<'_>,
    spec: &ChartSpec<'_>,
    rows: &[ChartRow],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let (y_min, y_max) = spec.y_range.unwrap_or_else(|| value_range(&values));
    let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();

    // Bars sit on integer x positions so category labels land on ticks.
    let x_max = rows.len().max(1) as f64 - 0.5;
    let mut chart = ChartBuilder::on(root)
        .caption(
            spec.title,
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

    configure_axes(&mut chart, &keys, spec.format, theme, style)?;

    let base = 0f64.clamp(y_min, y_max);
    chart.draw_series(rows.iter().enumerate().map(|(i, row)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.35, base), (x + 0.35, row.value)],
            palette_color(i).filled(),
        )
    }))?;

    Ok(())
}

fn draw_lines(
    root: &Area<'_>,
    spec: &ChartSpec<'_>,
    series: &[Series],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let keys: Vec<String> = series
        .iter()
        .max_by_key(|s| s.points.len())
        .map(|s| s.points.iter().map(|p| p.key.clone()).collect())
        .unwrap_or_default();
    let values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .collect();
    let (y_min, y_max) = spec.y_range.unwrap_or_else(|| value_range(&values));
    let x_max = keys.len().max(2) as f64 - 1.0;

    let mut chart = ChartBuilder::on(root)
        .caption(
            spec.title,
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    configure_axes(&mut chart, &keys, spec.format, theme, style)?;

    for (i, line) in series.iter().enumerate() {
        let color = palette_color(i);
        chart
            .draw_series(LineSeries::new(
                line.points
                    .iter()
                    .enumerate()
                    .map(|(x, p)| (x as f64, p.value)),
                color.stroke_width(style.line_width),
            ))?
            .label(line.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(theme.background_color.mix(0.8))
            .border_style(theme.axis_color)
            .label_font(
                ("sans-serif", style.font_size)
                    .into_font()
                    .color(&theme.text_color),
            )
            .draw()?;
    }

    Ok(())
}

fn configure_axes(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    keys: &[String],
    format: ValueFormat,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let stride = label_stride(keys.len(), 8);
    let x_label_formatter = |x: &f64| category_label(keys, *x, stride);
    let y_label_formatter = |y: &f64| format.label(*y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_labels(keys.len().max(2))
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&y_label_formatter)
        .draw()?;

    Ok(())
}

fn draw_pie(
    root: &Area<'_>,
    spec: &ChartSpec<'_>,
    rows: &[ChartRow],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let area = root.titled(
        spec.title,
        ("sans-serif", style.caption_size)
            .into_font()
            .color(&theme.text_color),
    )?;

    let (width, height) = area.dim_in_pixel();
    let center: BackendCoord = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.32;
    let label_style = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (i, (row, (start, end))) in rows.iter().zip(pie_angles(rows)).enumerate() {
        if end <= start {
            continue;
        }
        area.draw(&Polygon::new(
            sector_points(center, radius, start, end),
            palette_color(i).filled(),
        ))?;

        let anchor = polar(center, radius * 1.25, (start + end) / 2.0);
        area.draw(&Text::new(
            format!("{}: {}%", row.key, row.value),
            anchor,
            label_style.clone(),
        ))?;
    }

    Ok(())
}

/// Y range covering every value, with headroom above the tallest one.
pub(crate) fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((0f64, 0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if hi - lo <= f64::EPSILON {
        return (lo, lo + 1.0);
    }
    let pad = (hi - lo) / 10.0;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    (lo, hi + pad)
}

/// Label every n-th category so at most `max_labels` are shown.
pub(crate) fn label_stride(len: usize, max_labels: usize) -> usize {
    len.div_ceil(max_labels.max(1)).max(1)
}

pub(crate) fn category_label(keys: &[String], x: f64, stride: usize) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let idx = rounded as usize;
    match keys.get(idx) {
        Some(key) if idx % stride == 0 => key.clone(),
        _ => String::new(),
    }
}

/// Start and end angle of each slice, clockwise from twelve o'clock.
///
/// Non-positive values get an empty slice.
pub(crate) fn pie_angles(rows: &[ChartRow]) -> Vec<(f64, f64)> {
    let total: f64 = rows.iter().map(|r| r.value.max(0.0)).sum();
    let mut angle = -FRAC_PI_2;

    rows.iter()
        .map(|row| {
            let sweep = if total > 0.0 {
                row.value.max(0.0) / total * TAU
            } else {
                0.0
            };
            let slice = (angle, angle + sweep);
            angle += sweep;
            slice
        })
        .collect()
}

pub(crate) fn sector_points(
    center: BackendCoord,
    radius: f64,
    start: f64,
    end: f64,
) -> Vec<BackendCoord> {
    let steps = (((end - start) / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

fn polar(center: BackendCoord, radius: f64, angle: f64) -> BackendCoord {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}
