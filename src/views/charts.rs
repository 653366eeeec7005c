use crate::charts::{
    BarRect, ChartPlan, DataPoint, Frame, PieSlice, ValueScale, category_x, compact_number,
    grouped_bar_layout, line_series, pie_arcs, plan_chart, polyline_attr,
};
use crate::store::ChartState;
use dioxus::prelude::*;

const SERIES_BLUE: &str = "#2563eb";
const TICK_COUNT: usize = 5;

/// One named series for the multi-series dashboard charts.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: &str, color: &'static str, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.to_string(),
            color,
            points,
        }
    }
}

/// Visualization panel body for the chat page.
#[component]
pub fn ChartPanel(chart: ChartState) -> Element {
    let body = match plan_chart(&chart) {
        ChartPlan::Image { src } => rsx! {
            div { class: "chart-image",
                img { src: "{src}", alt: "Financial Chart" }
            }
        },
        ChartPlan::Empty => rsx! {
            div { class: "chart-empty",
                h3 { "Ask a financial question" }
                p { class: "text-muted", "e.g., \"Revenue trend of Reliance Industries 2025\"" }
            }
        },
        ChartPlan::Line { points, .. } => rsx! {
            LineChart { series: vec![Series::new("value", SERIES_BLUE, points)] }
        },
        ChartPlan::Bar { points, .. } => rsx! {
            BarChart { series: vec![Series::new("value", "#3b82f6", points)] }
        },
        ChartPlan::Pie { slices, .. } => rsx! {
            PieChart { slices }
        },
    };

    rsx! {
        div { class: "chart-panel",
            {body}
            if let Some(insight) = chart.insight.as_deref() {
                p { class: "chart-insight", "{insight}" }
            }
        }
    }
}

#[component]
pub fn LineChart(series: Vec<Series>) -> Element {
    let frame = Frame::default();
    let view_box = frame.view_box();
    let slices: Vec<&[DataPoint]> = series.iter().map(|s| s.points.as_slice()).collect();
    let scale = ValueScale::fitted(&slices);
    let coords = line_series(&frame, &slices);
    let labels = category_labels(&frame, series.first());
    let label_y = fmt1(frame.height - 12.0);

    rsx! {
        svg { class: "chart-svg", view_box: "{view_box}",
            ValueAxis { frame, scale }
            for (label, x) in labels {
                text { class: "axis-label", x: "{x}", y: "{label_y}", text_anchor: "middle", "{label}" }
            }
            for (entry, points) in series.iter().zip(coords.iter()) {
                polyline {
                    fill: "none",
                    stroke: entry.color,
                    stroke_width: "3",
                    points: polyline_attr(points),
                }
                for (x, y) in points.iter().map(|(x, y)| (fmt1(*x), fmt1(*y))) {
                    circle { cx: "{x}", cy: "{y}", r: "4", fill: entry.color }
                }
            }
        }
        SeriesLegend { series }
    }
}

#[component]
pub fn BarChart(series: Vec<Series>) -> Element {
    let frame = Frame::default();
    let view_box = frame.view_box();
    let slices: Vec<&[DataPoint]> = series.iter().map(|s| s.points.as_slice()).collect();
    let scale = ValueScale::from_zero(&slices);
    let groups: Vec<Vec<BarRect>> = grouped_bar_layout(&frame, &slices);
    let labels = category_labels(&frame, series.first());
    let label_y = fmt1(frame.height - 12.0);

    rsx! {
        svg { class: "chart-svg", view_box: "{view_box}",
            ValueAxis { frame, scale }
            for (label, x) in labels {
                text { class: "axis-label", x: "{x}", y: "{label_y}", text_anchor: "middle", "{label}" }
            }
            for (bars, s) in groups.iter().zip(series.iter()) {
                for bar in bars.iter() {
                    rect {
                        x: fmt1(bar.x),
                        y: fmt1(bar.y),
                        width: fmt1(bar.width),
                        height: fmt1(bar.height),
                        rx: "4",
                        fill: s.color,
                    }
                }
            }
        }
        SeriesLegend { series }
    }
}

#[component]
pub fn PieChart(slices: Vec<PieSlice>) -> Element {
    let frame = Frame::default();
    let view_box = frame.view_box();
    let center = (frame.width / 2.0, frame.height / 2.0);
    let radius = (frame.height / 2.0 - 40.0).max(20.0);
    let arcs = pie_arcs(center, radius, &slices);

    rsx! {
        svg { class: "chart-svg", view_box: "{view_box}",
            for arc in arcs {
                path { d: "{arc.path}", fill: arc.color, stroke: "var(--color-card-bg)", stroke_width: "2" }
                text {
                    class: "pie-label",
                    x: fmt1(arc.label_at.0),
                    y: fmt1(arc.label_at.1),
                    text_anchor: "middle",
                    "{arc.label}"
                }
            }
        }
    }
}

#[component]
fn ValueAxis(frame: Frame, scale: ValueScale) -> Element {
    let x1 = fmt1(frame.left);
    let x2 = fmt1(frame.width - frame.right);
    let label_x = fmt1(frame.left - 8.0);
    let ticks: Vec<(String, String, String)> = scale
        .ticks(TICK_COUNT)
        .into_iter()
        .map(|tick| {
            let y = scale.y(&frame, tick);
            (fmt1(y), fmt1(y + 4.0), compact_number(tick))
        })
        .collect();

    rsx! {
        for (y, text_y, label) in ticks {
            line { class: "grid-line", x1: "{x1}", x2: "{x2}", y1: "{y}", y2: "{y}" }
            text { class: "axis-label", x: "{label_x}", y: "{text_y}", text_anchor: "end", "{label}" }
        }
    }
}

#[component]
fn SeriesLegend(series: Vec<Series>) -> Element {
    if series.len() < 2 {
        return rsx! {};
    }
    rsx! {
        div { class: "chart-legend",
            for s in series {
                span { class: "legend-item",
                    span { class: "legend-swatch", style: "background: {s.color}" }
                    "{s.name}"
                }
            }
        }
    }
}

fn fmt1(value: f64) -> String {
    format!("{value:.1}")
}

fn category_labels(frame: &Frame, series: Option<&Series>) -> Vec<(String, String)> {
    let Some(series) = series else {
        return Vec::new();
    };
    let count = series.points.len();
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (p.label.clone(), fmt1(category_x(frame, i, count))))
        .collect()
}
