use crate::charts::palette_color;
use crate::dashboard::{Insight, InsightSource, Kpi, Trend, series};
use crate::views::charts::{BarChart, LineChart, PieChart, Series};
use dioxus::prelude::*;

#[component]
pub fn DashboardView<S: InsightSource + Clone + PartialEq + 'static>(source: S) -> Element {
    let kpis = source.kpis();
    let monthly = source.monthly();
    let trend = vec![
        Series::new("Revenue", palette_color(0), series(&monthly, |m| m.revenue)),
        Series::new("Profit", palette_color(1), series(&monthly, |m| m.profit)),
    ];
    let comparison = vec![
        Series::new("Revenue", palette_color(0), series(&monthly, |m| m.revenue)),
        Series::new("Expenses", palette_color(2), series(&monthly, |m| m.expenses)),
    ];
    let breakdown = source.expense_breakdown();
    let highlights = source.highlights();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { class: "page-title", "Financial Dashboard" }
                p { class: "text-muted", "Overview of key metrics and performance" }
            }
            div { class: "kpi-grid",
                for kpi in kpis {
                    KpiCard { key: "{kpi.title}", kpi }
                }
            }
            div { class: "chart-grid",
                section { class: "card",
                    h3 { class: "card-title", "Revenue & Profit Trend" }
                    LineChart { series: trend }
                }
                section { class: "card",
                    h3 { class: "card-title", "Expense Breakdown" }
                    PieChart { slices: breakdown }
                }
            }
            section { class: "card",
                h3 { class: "card-title", "Revenue vs Expenses" }
                BarChart { series: comparison }
            }
            section { class: "card",
                h3 { class: "card-title", "Key Insights" }
                div { class: "highlight-list",
                    for item in highlights {
                        HighlightRow { key: "{item.id}", insight: item }
                    }
                }
            }
        }
    }
}

#[component]
fn KpiCard(kpi: Kpi) -> Element {
    let (arrow, trend_class) = match kpi.trend {
        Trend::Up => ("&#9650;", "kpi-change up"),
        Trend::Down => ("&#9660;", "kpi-change down"),
    };
    rsx! {
        div { class: "card kpi-card {kpi.accent}",
            p { class: "kpi-title", "{kpi.title}" }
            p { class: "kpi-value", "{kpi.value}" }
            p { class: trend_class,
                span { dangerous_inner_html: arrow }
                " {kpi.change} from last period"
            }
        }
    }
}

#[component]
fn HighlightRow(insight: Insight) -> Element {
    let tone = insight.kind.label().to_ascii_lowercase();
    rsx! {
        div { class: "highlight-row {tone}",
            div { class: "highlight-head",
                h4 { "{insight.title}" }
                span { class: insight.impact.css_class(), "{insight.impact.label()}" }
            }
            p { class: "text-muted", "{insight.description}" }
        }
    }
}
