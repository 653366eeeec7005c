//! Data behind the Dashboard and Insights pages.
//!
//! Views ask an [`InsightSource`] for their figures. [`SampleData`] is the
//! built-in fixture; a backend-driven source can replace it without touching
//! the rendering code.

use crate::charts::{DataPoint, PieSlice, palette_color};
use time::{Date, Month};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
    pub accent: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyFigures {
    pub month: String,
    pub revenue: f64,
    pub profit: f64,
    pub expenses: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightType {
    Positive,
    Warning,
    Info,
}

impl InsightType {
    pub fn label(self) -> &'static str {
        match self {
            InsightType::Positive => "Positive",
            InsightType::Warning => "Warning",
            InsightType::Info => "Info",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            InsightType::Positive => "badge positive",
            InsightType::Warning => "badge warning",
            InsightType::Info => "badge info",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Impact::High => "badge impact-high",
            Impact::Medium => "badge impact-medium",
            Impact::Low => "badge impact-low",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: InsightType,
    pub impact: Impact,
    pub source: String,
    pub metrics: Vec<String>,
    pub date: Option<Date>,
}

pub trait InsightSource {
    fn kpis(&self) -> Vec<Kpi>;
    fn monthly(&self) -> Vec<MonthlyFigures>;
    fn expense_breakdown(&self) -> Vec<PieSlice>;
    /// Short list shown on the dashboard.
    fn highlights(&self) -> Vec<Insight>;
    /// Full list for the Insights page.
    fn insights(&self) -> Vec<Insight>;
}

/// Series helpers so the dashboard can reuse the chart geometry.
pub fn series(monthly: &[MonthlyFigures], pick: fn(&MonthlyFigures) -> f64) -> Vec<DataPoint> {
    monthly
        .iter()
        .map(|m| DataPoint {
            label: m.month.clone(),
            value: pick(m),
        })
        .collect()
}

/// Built-in demo figures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleData;

impl InsightSource for SampleData {
    fn kpis(&self) -> Vec<Kpi> {
        [
            ("Total Revenue", "$328K", "+12.5%", Trend::Up, "accent-blue"),
            ("Net Profit", "$95K", "+8.2%", Trend::Up, "accent-green"),
            ("Total Expenses", "$233K", "-3.1%", Trend::Down, "accent-orange"),
            ("Profit Margin", "29.0%", "+2.4%", Trend::Up, "accent-purple"),
        ]
        .into_iter()
        .map(|(title, value, change, trend, accent)| Kpi {
            title: title.into(),
            value: value.into(),
            change: change.into(),
            trend,
            accent,
        })
        .collect()
    }

    fn monthly(&self) -> Vec<MonthlyFigures> {
        [
            ("Jan", 45000.0, 12000.0, 33000.0),
            ("Feb", 52000.0, 15000.0, 37000.0),
            ("Mar", 48000.0, 13000.0, 35000.0),
            ("Apr", 61000.0, 18000.0, 43000.0),
            ("May", 55000.0, 16000.0, 39000.0),
            ("Jun", 67000.0, 21000.0, 46000.0),
        ]
        .into_iter()
        .map(|(month, revenue, profit, expenses)| MonthlyFigures {
            month: month.into(),
            revenue,
            profit,
            expenses,
        })
        .collect()
    }

    fn expense_breakdown(&self) -> Vec<PieSlice> {
        [
            ("Operations", 45.0),
            ("Marketing", 25.0),
            ("Salaries", 20.0),
            ("Other", 10.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| PieSlice {
            label: label.into(),
            value,
            color: palette_color(i),
        })
        .collect()
    }

    fn highlights(&self) -> Vec<Insight> {
        vec![
            insight(
                "h1",
                "Revenue Growth Acceleration",
                "Q2 revenue increased 22% compared to Q1, driven by strong product sales in May and June.",
                InsightType::Positive,
                Impact::High,
            ),
            insight(
                "h2",
                "Operating Efficiency Improvement",
                "Operational expenses decreased 3.1% while maintaining output levels, improving overall margins.",
                InsightType::Positive,
                Impact::Medium,
            ),
            insight(
                "h3",
                "Cash Flow Warning",
                "Accounts receivable aging increased by 15 days. Consider implementing stricter payment terms.",
                InsightType::Warning,
                Impact::Medium,
            ),
        ]
    }

    fn insights(&self) -> Vec<Insight> {
        let entries = [
            (
                "Strong Q4 Performance",
                "Revenue increased by 15.5% in Q4 2023 compared to Q3, marking the strongest quarter of the year. This growth was driven primarily by increased product sales and successful market expansion.",
                InsightType::Positive,
                Impact::High,
                "Q4_2024_Balance_Sheet.pdf",
                ["Revenue: +15.5%", "Market Share: +3.2%"],
                15,
            ),
            (
                "Operating Efficiency Gains",
                "Operational expenses decreased by 3.1% while maintaining production levels, indicating improved process efficiency and cost management. This contributed to a 2.4% improvement in profit margins.",
                InsightType::Positive,
                Impact::Medium,
                "Tesla_Income_Statement_2023.xlsx",
                ["Expenses: -3.1%", "Margins: +2.4%"],
                14,
            ),
            (
                "Cash Flow Attention Needed",
                "Days Sales Outstanding (DSO) increased from 45 to 60 days, indicating slower collection from customers. This could impact working capital availability in the coming quarters.",
                InsightType::Warning,
                Impact::Medium,
                "Cash_Flow_Analysis.csv",
                ["DSO: 60 days", "Change: +15 days"],
                14,
            ),
            (
                "Marketing ROI Improvement",
                "Marketing expenses as a percentage of revenue decreased from 28% to 25%, while customer acquisition increased by 12%. This indicates improved marketing efficiency and better targeting.",
                InsightType::Positive,
                Impact::Medium,
                "Q4_2024_Balance_Sheet.pdf",
                ["CAC: -15%", "Acquisitions: +12%"],
                13,
            ),
            (
                "Inventory Management Optimization",
                "Inventory turnover ratio improved from 6.2 to 7.8, suggesting better inventory management and reduced holding costs. This frees up capital for other investments.",
                InsightType::Positive,
                Impact::Low,
                "Tesla_Income_Statement_2023.xlsx",
                ["Turnover: 7.8", "Holding Costs: -12%"],
                12,
            ),
            (
                "Debt-to-Equity Ratio Alert",
                "The debt-to-equity ratio increased from 0.45 to 0.58 over the last quarter. While still within acceptable ranges, continued monitoring is recommended to maintain financial health.",
                InsightType::Info,
                Impact::Low,
                "Q4_2024_Balance_Sheet.pdf",
                ["D/E Ratio: 0.58", "Change: +0.13"],
                11,
            ),
        ];

        entries
            .into_iter()
            .enumerate()
            .map(
                |(i, (title, description, kind, impact, source, metrics, day))| Insight {
                    id: (i + 1).to_string(),
                    title: title.into(),
                    description: description.into(),
                    kind,
                    impact,
                    source: source.into(),
                    metrics: metrics.iter().map(|m| m.to_string()).collect(),
                    date: Date::from_calendar_date(2024, Month::January, day).ok(),
                },
            )
            .collect()
    }
}

fn insight(id: &str, title: &str, description: &str, kind: InsightType, impact: Impact) -> Insight {
    Insight {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        kind,
        impact,
        source: String::new(),
        metrics: Vec::new(),
        date: None,
    }
}
