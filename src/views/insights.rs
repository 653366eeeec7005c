use crate::dashboard::{Insight, InsightSource};
use crate::views::shared::format_date;
use dioxus::prelude::*;

#[component]
pub fn InsightsView<S: InsightSource + Clone + PartialEq + 'static>(source: S) -> Element {
    let insights = source.insights();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { class: "page-title", "AI-Generated Insights" }
                p { class: "text-muted", "Findings extracted from your uploaded statements" }
            }
            div { class: "insight-grid",
                for item in insights {
                    InsightCard { key: "{item.id}", insight: item }
                }
            }
        }
    }
}

#[component]
fn InsightCard(insight: Insight) -> Element {
    let date = insight.date.map(format_date);

    rsx! {
        article { class: "card insight-card",
            div { class: "insight-head",
                h3 { class: "card-title", "{insight.title}" }
                div { class: "badge-row",
                    span { class: insight.kind.css_class(), "{insight.kind.label()}" }
                    span { class: insight.impact.css_class(), "{insight.impact.label()} Impact" }
                }
            }
            p { class: "insight-description", "{insight.description}" }
            if !insight.metrics.is_empty() {
                div { class: "metric-row",
                    for metric in insight.metrics.iter() {
                        span { class: "metric-chip", "{metric}" }
                    }
                }
            }
            div { class: "insight-footer text-muted",
                if !insight.source.is_empty() {
                    span { "Source: {insight.source}" }
                }
                if let Some(date) = date {
                    span { "{date}" }
                }
            }
        }
    }
}
