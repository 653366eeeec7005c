//! Chart dispatch and SVG geometry.
//!
//! [`plan_chart`] turns the current [`ChartState`] into a [`ChartPlan`]; the
//! view layer only draws what the plan says. Geometry helpers compute
//! coordinates inside a fixed [`Frame`] so the SVG components stay dumb.

use crate::store::ChartState;
use crate::types::ChartKind;
use serde_json::{Map, Value};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Sector colors, cycled by record index.
pub const PALETTE: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisKeys {
    pub category: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartPlan {
    Image { src: String },
    Empty,
    Line { keys: AxisKeys, points: Vec<DataPoint> },
    Bar { keys: AxisKeys, points: Vec<DataPoint> },
    Pie { keys: AxisKeys, slices: Vec<PieSlice> },
}

pub fn plan_chart(chart: &ChartState) -> ChartPlan {
    if let Some(b64) = chart.image_base64.as_deref() {
        return ChartPlan::Image {
            src: image_src(b64),
        };
    }

    let Some(keys) = chart.records.first().and_then(axis_keys) else {
        return ChartPlan::Empty;
    };
    let points: Vec<DataPoint> = chart
        .records
        .iter()
        .map(|record| DataPoint {
            label: record.get(&keys.category).map(label_of).unwrap_or_default(),
            value: record.get(&keys.value).map(number_of).unwrap_or(0.0),
        })
        .collect();

    match chart.kind {
        ChartKind::Line => ChartPlan::Line { keys, points },
        ChartKind::Bar => ChartPlan::Bar { keys, points },
        ChartKind::Pie => ChartPlan::Pie {
            keys,
            slices: points
                .into_iter()
                .enumerate()
                .map(|(i, point)| PieSlice {
                    label: point.label,
                    value: point.value,
                    color: palette_color(i),
                })
                .collect(),
        },
    }
}

/// First field is the category axis, second the value axis.
pub fn axis_keys(record: &Map<String, Value>) -> Option<AxisKeys> {
    let mut keys = record.keys();
    let category = keys.next()?.clone();
    let value = keys.next()?.clone();
    Some(AxisKeys { category, value })
}

pub fn image_src(b64: &str) -> String {
    if b64.starts_with("data:") {
        b64.to_string()
    } else {
        format!("data:image/png;base64,{b64}")
    }
}

fn label_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', "").parse().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

// ---------------
// Geometry
// ---------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 300.0,
            left: 56.0,
            right: 16.0,
            top: 16.0,
            bottom: 36.0,
        }
    }
}

impl Frame {
    pub fn plot_width(&self) -> f64 {
        self.width - self.left - self.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.top - self.bottom
    }

    pub fn baseline_y(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Linear mapping from data values to the frame's vertical extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    /// Bars grow from zero, so the domain always includes it.
    pub fn from_zero(series: &[&[DataPoint]]) -> Self {
        let (min, max) = extent(series);
        Self::padded(min.min(0.0), max.max(0.0))
    }

    /// Lines only need to cover the data.
    pub fn fitted(series: &[&[DataPoint]]) -> Self {
        let (min, max) = extent(series);
        Self::padded(min, max)
    }

    fn padded(min: f64, max: f64) -> Self {
        if (max - min).abs() < f64::EPSILON {
            let pad = if max == 0.0 { 1.0 } else { max.abs() * 0.1 };
            Self {
                min: min - pad,
                max: max + pad,
            }
        } else {
            Self { min, max }
        }
    }

    pub fn y(&self, frame: &Frame, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        frame.baseline_y() - ratio * frame.plot_height()
    }

    /// Evenly spaced tick values from `min` to `max`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (count - 1) as f64;
        (0..count).map(|i| self.min + step * i as f64).collect()
    }
}

fn extent(series: &[&[DataPoint]]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|points| points.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    if lo.is_finite() { (lo, hi) } else { (0.0, 0.0) }
}

/// Center of each category band along the x axis.
pub fn category_x(frame: &Frame, index: usize, count: usize) -> f64 {
    let band = frame.plot_width() / count.max(1) as f64;
    frame.left + band * (index as f64 + 0.5)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub label_x: f64,
}

pub fn bar_layout(frame: &Frame, points: &[DataPoint]) -> Vec<BarRect> {
    grouped_bar_layout(frame, &[points]).pop().unwrap_or_default()
}

/// Side-by-side bars per category, one group member per series. All series
/// share one zero-based scale and are indexed by the first series' categories.
pub fn grouped_bar_layout(frame: &Frame, series: &[&[DataPoint]]) -> Vec<Vec<BarRect>> {
    let count = series.first().map_or(0, |points| points.len());
    if count == 0 {
        return series.iter().map(|_| Vec::new()).collect();
    }
    let scale = ValueScale::from_zero(series);
    let band = frame.plot_width() / count as f64;
    let group_width = band * 0.6;
    let width = group_width / series.len() as f64;
    let zero_y = scale.y(frame, 0.0);

    series
        .iter()
        .enumerate()
        .map(|(s, points)| {
            points
                .iter()
                .take(count)
                .enumerate()
                .map(|(i, point)| {
                    let center = category_x(frame, i, count);
                    let value_y = scale.y(frame, point.value);
                    BarRect {
                        x: center - group_width / 2.0 + width * s as f64,
                        y: value_y.min(zero_y),
                        width,
                        height: (zero_y - value_y).abs(),
                        label: point.label.clone(),
                        label_x: center,
                    }
                })
                .collect()
        })
        .collect()
}

pub fn line_points(frame: &Frame, points: &[DataPoint]) -> Vec<(f64, f64)> {
    line_series(frame, &[points]).pop().unwrap_or_default()
}

/// Polyline coordinates for several series on one fitted scale.
pub fn line_series(frame: &Frame, series: &[&[DataPoint]]) -> Vec<Vec<(f64, f64)>> {
    let scale = ValueScale::fitted(series);
    series
        .iter()
        .map(|points| {
            points
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    (
                        category_x(frame, i, points.len()),
                        scale.y(frame, point.value),
                    )
                })
                .collect()
        })
        .collect()
}

/// `points` attribute for an SVG polyline.
pub fn polyline_attr(coords: &[(f64, f64)]) -> String {
    coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieArc {
    pub path: String,
    pub color: &'static str,
    pub label: String,
    pub label_at: (f64, f64),
}

/// Sector paths starting at twelve o'clock, clockwise. Negative values count
/// as zero; an all-zero pie draws nothing.
pub fn pie_arcs(center: (f64, f64), radius: f64, slices: &[PieSlice]) -> Vec<PieArc> {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let (cx, cy) = center;
    let point = |angle: f64, r: f64| (cx + r * angle.cos(), cy + r * angle.sin());
    let mut start = -FRAC_PI_2;
    let mut arcs = Vec::new();

    for slice in slices {
        let sweep = slice.value.max(0.0) / total * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let end = start + sweep;
        let path = if sweep >= TAU - 1e-9 {
            // A single arc command cannot draw a full circle.
            let (tx, ty) = point(start, radius);
            let (bx, by) = point(start + TAU / 2.0, radius);
            format!(
                "M {tx:.2} {ty:.2} A {radius} {radius} 0 1 1 {bx:.2} {by:.2} A {radius} {radius} 0 1 1 {tx:.2} {ty:.2} Z"
            )
        } else {
            let (sx, sy) = point(start, radius);
            let (ex, ey) = point(end, radius);
            let large = if sweep > TAU / 2.0 { 1 } else { 0 };
            format!(
                "M {cx:.2} {cy:.2} L {sx:.2} {sy:.2} A {radius} {radius} 0 {large} 1 {ex:.2} {ey:.2} Z"
            )
        };
        arcs.push(PieArc {
            path,
            color: slice.color,
            label: slice.label.clone(),
            label_at: point(start + sweep / 2.0, radius * 1.18),
        });
        start = end;
    }
    arcs
}

/// Short axis label: 45000 -> "45K", 1250000 -> "1.3M".
pub fn compact_number(value: f64) -> String {
    let abs = value.abs();
    // Thresholds sit where rounding would carry into the next unit.
    if abs >= 999_500.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 999.95 {
        format!("{:.0}K", value / 1_000.0)
    } else if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

// ---------------
// Source table
// ---------------

pub fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.2}")).unwrap_or_default()
}

/// Reduce backend-supplied snippet markup to plain text.
///
/// Tags (`<` followed by a letter, `/` or `!`) are dropped, common entities
/// decoded and whitespace collapsed. The result is rendered as a text node,
/// so anything left is escaped.
pub fn citation_plain_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            // Only `<` that opens a tag; comparisons like "< 0.5" stay.
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!')) =>
            {
                in_tag = true
            }
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn image_wins_over_records() {
        let chart = ChartState {
            records: records(json!([{"a": "x", "b": 1}])),
            kind: ChartKind::Line,
            image_base64: Some("AAAA".into()),
            insight: None,
        };
        assert_eq!(
            plan_chart(&chart),
            ChartPlan::Image {
                src: "data:image/png;base64,AAAA".into()
            }
        );
    }

    #[test]
    fn empty_or_single_field_records_plan_nothing() {
        assert_eq!(plan_chart(&ChartState::default()), ChartPlan::Empty);
        let chart = ChartState {
            records: records(json!([{"only": 1}])),
            ..ChartState::default()
        };
        assert_eq!(plan_chart(&chart), ChartPlan::Empty);
    }

    #[test]
    fn extra_fields_ignored_for_axes() {
        let chart = ChartState {
            records: records(json!([
                {"month": "Jan", "revenue": 45000, "profit": 12000},
                {"month": "Feb", "revenue": "52,000", "profit": 15000}
            ])),
            ..ChartState::default()
        };
        let ChartPlan::Bar { keys, points } = plan_chart(&chart) else {
            panic!("expected bar plan");
        };
        assert_eq!(keys.category, "month");
        assert_eq!(keys.value, "revenue");
        assert_eq!(points[1].value, 52000.0);
    }

    #[test]
    fn bars_grow_from_zero() {
        let frame = Frame::default();
        let points = vec![
            DataPoint { label: "A".into(), value: 10.0 },
            DataPoint { label: "B".into(), value: 20.0 },
        ];
        let bars = bar_layout(&frame, &points);
        assert_eq!(bars.len(), 2);
        assert!((bars[0].y + bars[0].height - frame.baseline_y()).abs() < 1e-6);
        assert!(bars[1].height > bars[0].height);
    }

    #[test]
    fn grouped_bars_share_scale() {
        let frame = Frame::default();
        let revenue = vec![DataPoint { label: "Jan".into(), value: 40.0 }];
        let expenses = vec![DataPoint { label: "Jan".into(), value: 20.0 }];
        let groups = grouped_bar_layout(&frame, &[revenue.as_slice(), expenses.as_slice()]);
        assert_eq!(groups.len(), 2);
        assert!((groups[0][0].height - 2.0 * groups[1][0].height).abs() < 1e-6);
        assert!(groups[1][0].x > groups[0][0].x);
    }

    #[test]
    fn flat_line_is_centered() {
        let frame = Frame::default();
        let points = vec![
            DataPoint { label: "Q1".into(), value: 5.0 },
            DataPoint { label: "Q2".into(), value: 5.0 },
        ];
        let coords = line_points(&frame, &points);
        let mid = frame.top + frame.plot_height() / 2.0;
        assert!(coords.iter().all(|(_, y)| (y - mid).abs() < 1e-6));
    }

    #[test]
    fn pie_full_circle_and_zero_total() {
        let single = vec![PieSlice { label: "All".into(), value: 3.0, color: PALETTE[0] }];
        let arcs = pie_arcs((100.0, 100.0), 50.0, &single);
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].path.matches(" A ").count(), 2);

        let zero = vec![PieSlice { label: "None".into(), value: 0.0, color: PALETTE[1] }];
        assert!(pie_arcs((100.0, 100.0), 50.0, &zero).is_empty());
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(compact_number(45000.0), "45K");
        assert_eq!(compact_number(1_260_000.0), "1.3M");
        assert_eq!(compact_number(12.0), "12");
        assert_eq!(compact_number(0.58), "0.6");
    }

    #[test]
    fn compact_numbers_carry_into_next_unit() {
        assert_eq!(compact_number(999_499.0), "999K");
        assert_eq!(compact_number(999_500.0), "1.0M");
        assert_eq!(compact_number(999_999.0), "1.0M");
        assert_eq!(compact_number(-999_700.0), "-1.0M");
        assert_eq!(compact_number(999.0), "999");
        assert_eq!(compact_number(999.97), "1K");
    }

    #[test]
    fn citation_markup_is_stripped() {
        assert_eq!(
            citation_plain_text("<b>Revenue</b> grew <script>alert(1)</script>&amp; held"),
            "Revenue grew alert(1) & held"
        );
        assert_eq!(citation_plain_text("1 &lt; 2"), "1 < 2");
        assert_eq!(
            citation_plain_text("Debt ratio < 0.5 while margin > 20% in FY24"),
            "Debt ratio < 0.5 while margin > 20% in FY24"
        );
        assert_eq!(
            citation_plain_text("EPS <3.1 vs <i>guidance</i><!-- note -->"),
            "EPS <3.1 vs guidance"
        );
        assert_eq!(format_score(Some(0.876)), "0.88");
        assert_eq!(format_score(None), "");
    }
}
