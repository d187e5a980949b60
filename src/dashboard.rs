// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Projection of an `AnalysisReport` onto dashboard widgets.

use crate::markup::{Node, Text};
use crate::models::{AnalysisReport, RebalancingIdea, Suitability};
use crate::utils::{format_currency, format_percent, format_signed_percent};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub const PALETTE: [&str; 5] = ["#8b5cf6", "#ec4899", "#6366f1", "#10b981", "#f59e0b"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
    Favorable,
    Caution,
    Warning,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "stat-neutral",
            Tone::Positive => "gain-positive",
            Tone::Negative => "gain-negative",
            Tone::Favorable => "suitability-favorable",
            Tone::Caution => "suitability-caution",
            Tone::Warning => "suitability-warning",
        }
    }

    pub fn for_gain(gain: Decimal) -> Self {
        if gain >= Decimal::ZERO {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }

    pub fn for_suitability(score: Decimal) -> Self {
        if score >= Decimal::from(75) {
            Tone::Favorable
        } else if score >= Decimal::from(50) {
            Tone::Caution
        } else {
            Tone::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightRow {
    pub ticker: String,
    pub performance: String,
    pub risk_signals: String,
    pub tax_consideration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxRow {
    pub holding: String,
    pub gain_loss: String,
    pub gain_tone: Tone,
    pub tax_type: &'static str,
    pub estimated_tax: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutChart {
    pub labels: Vec<String>,
    pub data: Vec<Decimal>,
    pub colors: Vec<&'static str>,
}

impl DonutChart {
    /// Sector weights as percentages; zero-weight sectors are left out.
    pub fn from_allocation<'a, I>(allocation: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Decimal)>,
    {
        let mut chart = DonutChart {
            labels: Vec::new(),
            data: Vec::new(),
            colors: Vec::new(),
        };
        for (sector, weight) in allocation {
            if *weight <= Decimal::ZERO {
                continue;
            }
            chart.colors.push(PALETTE[chart.labels.len() % PALETTE.len()]);
            chart.labels.push(sector.clone());
            chart.data.push((*weight * Decimal::ONE_HUNDRED).normalize());
        }
        chart
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: Vec<StatTile>,
    pub suitability: Option<StatTile>,
    pub suitability_breakdown: Vec<String>,
    pub greeting: Option<Text>,
    pub summary: Option<Text>,
    pub confidence: Option<String>,
    pub explanation: Option<Text>,
    pub key_takeaways: Vec<String>,
    pub action_plan: Vec<String>,
    pub positives: Vec<String>,
    pub risk_highlights: Vec<String>,
    pub insights: Vec<InsightRow>,
    pub risk_tax_summary: Option<Text>,
    pub tax_rows: Vec<TaxRow>,
    pub rebalancing: Vec<RebalancingIdea>,
    pub chart: DonutChart,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Confidence arrives either as a fraction or as a percentage.
fn confidence_label(c: Decimal) -> String {
    let pct = if c <= Decimal::ONE {
        c * Decimal::ONE_HUNDRED
    } else {
        c
    };
    format!("Confidence: {}", format_percent(pct.round_dp(0)))
}

fn suitability_tile(s: &Suitability) -> StatTile {
    let score = s.suitability_score.round_dp(0).normalize();
    let value = if s.suitability_level.trim().is_empty() {
        format!("{}/100", score)
    } else {
        format!("{}/100 ({})", score, s.suitability_level.trim())
    };
    StatTile {
        label: "Suitability",
        value,
        tone: Tone::for_suitability(s.suitability_score),
    }
}

impl DashboardView {
    pub fn project(report: &AnalysisReport) -> Self {
        let m = &report.portfolio_metrics;
        let stats = vec![
            StatTile {
                label: "Total Value",
                value: format_currency(m.total_value),
                tone: Tone::Neutral,
            },
            StatTile {
                label: "Unrealized Gain",
                value: format!(
                    "{} ({})",
                    format_currency(m.unrealized_gain),
                    format_signed_percent(m.unrealized_gain_percent)
                ),
                tone: Tone::for_gain(m.unrealized_gain),
            },
            StatTile {
                label: "Largest Position",
                value: format!(
                    "{} ({})",
                    m.largest_position,
                    format_percent(m.largest_position_percent)
                ),
                tone: Tone::Neutral,
            },
        ];

        let insights = report
            .stock_analyses
            .iter()
            .map(|s| InsightRow {
                ticker: s.ticker.clone(),
                performance: s.performance_summary.clone(),
                risk_signals: s.risk_signals.join("; "),
                tax_consideration: s.tax_consideration.clone(),
            })
            .collect();

        let tax_rows = report
            .tax_impacts
            .iter()
            .flatten()
            .map(|t| TaxRow {
                holding: t.holding.clone(),
                gain_loss: format_currency(t.gain_loss),
                gain_tone: Tone::for_gain(t.gain_loss),
                tax_type: t.tax_type.label(),
                estimated_tax: format!(
                    "{} ({})",
                    format_currency(t.estimated_tax),
                    format_percent((t.estimated_tax_rate * Decimal::ONE_HUNDRED).round_dp(0))
                ),
            })
            .collect();

        DashboardView {
            stats,
            suitability: report.suitability.as_ref().map(suitability_tile),
            suitability_breakdown: report
                .suitability
                .as_ref()
                .map(|s| s.suitability_breakdown.clone())
                .unwrap_or_default(),
            greeting: non_empty(&report.greeting).map(Text::plain),
            summary: non_empty(&report.summary).map(Text::plain),
            confidence: report.confidence_score.map(confidence_label),
            explanation: non_empty(&report.explanation).map(Text::rich),
            key_takeaways: report.key_takeaways.clone(),
            action_plan: report.action_plan.clone(),
            positives: report.positives.clone(),
            risk_highlights: report.risk_highlights.clone(),
            insights,
            risk_tax_summary: non_empty(&report.risk_tax_summary).map(Text::plain),
            tax_rows,
            rebalancing: report.rebalancing_ideas.clone().unwrap_or_default(),
            chart: DonutChart::from_allocation(&m.sector_allocation),
        }
    }

    pub fn total_value(&self) -> &str {
        &self.stats[0].value
    }

    pub fn to_node(&self) -> Node {
        let mut sections = Vec::new();

        let tiles = self
            .stats
            .iter()
            .chain(self.suitability.iter())
            .map(|t| {
                Node::with_class(
                    "div",
                    "stat-card",
                    vec![
                        Node::with_class("span", "stat-label", vec![Node::text(t.label)]),
                        Node::with_class("span", t.tone.class(), vec![Node::text(&t.value)]),
                    ],
                )
            })
            .collect();
        sections.push(Node::with_class("section", "stats", tiles));

        let mut narrative = Vec::new();
        for (class, text) in [
            ("greeting", &self.greeting),
            ("summary", &self.summary),
            ("ai-explanation", &self.explanation),
        ] {
            if let Some(t) = text {
                narrative.push(Node::with_class("p", class, vec![Node::Text(t.clone())]));
            }
        }
        if let Some(c) = &self.confidence {
            narrative.push(Node::with_class("p", "confidence", vec![Node::text(c)]));
        }
        sections.push(Node::with_class("section", "narrative", narrative));

        for (title, items) in [
            ("Key Takeaways", &self.key_takeaways),
            ("Action Plan", &self.action_plan),
            ("Strengths", &self.positives),
            ("Risks", &self.risk_highlights),
            ("Suitability Notes", &self.suitability_breakdown),
        ] {
            if items.is_empty() {
                continue;
            }
            let lis = items
                .iter()
                .map(|i| Node::el("li", vec![Node::text(i)]))
                .collect();
            sections.push(Node::with_class(
                "section",
                "list-panel",
                vec![Node::el("h3", vec![Node::text(title)]), Node::el("ul", lis)],
            ));
        }

        if !self.insights.is_empty() {
            let rows = self
                .insights
                .iter()
                .map(|r| {
                    Node::el(
                        "tr",
                        vec![
                            Node::el("td", vec![Node::el("strong", vec![Node::text(&r.ticker)])]),
                            Node::el("td", vec![Node::text(&r.performance)]),
                            Node::el("td", vec![Node::text(&r.risk_signals)]),
                            Node::el("td", vec![Node::text(&r.tax_consideration)]),
                        ],
                    )
                })
                .collect();
            sections.push(Node::with_class(
                "section",
                "stock-insights",
                vec![Node::el("table", vec![Node::el("tbody", rows)])],
            ));
        }

        if let Some(t) = &self.risk_tax_summary {
            sections.push(Node::with_class(
                "section",
                "risk-tax",
                vec![Node::el("p", vec![Node::Text(t.clone())])],
            ));
        }

        if !self.tax_rows.is_empty() {
            let rows = self
                .tax_rows
                .iter()
                .map(|r| {
                    Node::el(
                        "tr",
                        vec![
                            Node::el("td", vec![Node::text(&r.holding)]),
                            Node::with_class(
                                "td",
                                r.gain_tone.class(),
                                vec![Node::text(&r.gain_loss)],
                            ),
                            Node::el("td", vec![Node::text(r.tax_type)]),
                            Node::el("td", vec![Node::text(&r.estimated_tax)]),
                        ],
                    )
                })
                .collect();
            sections.push(Node::with_class(
                "section",
                "tax-panel",
                vec![Node::el("table", vec![Node::el("tbody", rows)])],
            ));
        }

        if !self.rebalancing.is_empty() {
            let items = self
                .rebalancing
                .iter()
                .map(|r| {
                    Node::with_class(
                        "div",
                        "rebalance-item",
                        vec![
                            Node::with_class("div", "reb-action", vec![Node::text(&r.action)]),
                            Node::with_class("div", "reb-reason", vec![Node::text(&r.reason)]),
                            Node::with_class("div", "reb-impact", vec![Node::text(&r.impact)]),
                        ],
                    )
                })
                .collect();
            sections.push(Node::with_class("section", "rebalance-panel", items));
        }

        let legend = self
            .chart
            .labels
            .iter()
            .zip(&self.chart.data)
            .map(|(label, pct)| Node::el("li", vec![Node::text(format!("{}: {}%", label, pct))]))
            .collect();
        sections.push(Node::with_class(
            "section",
            "sector-chart",
            vec![Node::el("ul", legend)],
        ));

        Node::with_class("div", "dashboard", sections)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

/// Where donut charts are drawn. Handles must be disposed before the
/// surface's resources are released.
pub trait ChartSurface {
    fn draw(&mut self, chart: &DonutChart) -> ChartHandle;
    fn dispose(&mut self, handle: ChartHandle);
    fn live_charts(&self) -> usize;
}

/// Draws the donut as horizontal bars of block characters.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    next: u64,
    live: HashMap<ChartHandle, Vec<String>>,
    current: Option<ChartHandle>,
}

impl TerminalSurface {
    const WIDTH: u32 = 40;

    pub fn lines(&self) -> &[String] {
        self.current
            .and_then(|h| self.live.get(&h))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl ChartSurface for TerminalSurface {
    fn draw(&mut self, chart: &DonutChart) -> ChartHandle {
        let handle = ChartHandle(self.next);
        self.next += 1;
        let label_width = chart.labels.iter().map(String::len).max().unwrap_or(0);
        let lines = chart
            .labels
            .iter()
            .zip(&chart.data)
            .map(|(label, pct)| {
                let cells = (*pct * Decimal::from(Self::WIDTH) / Decimal::ONE_HUNDRED)
                    .round()
                    .to_usize()
                    .unwrap_or(0);
                format!(
                    "{:<width$}  {:<bar$}  {}%",
                    label,
                    "█".repeat(cells),
                    pct,
                    width = label_width,
                    bar = Self::WIDTH as usize
                )
            })
            .collect();
        self.live.insert(handle, lines);
        self.current = Some(handle);
        handle
    }

    fn dispose(&mut self, handle: ChartHandle) {
        self.live.remove(&handle);
        if self.current == Some(handle) {
            self.current = None;
        }
    }

    fn live_charts(&self) -> usize {
        self.live.len()
    }
}

/// Owns the chart handle so each render replaces, rather than stacks, the chart.
pub struct DashboardRenderer<S: ChartSurface> {
    surface: S,
    chart: Option<ChartHandle>,
    view: Option<DashboardView>,
}

impl<S: ChartSurface> DashboardRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            chart: None,
            view: None,
        }
    }

    pub fn render(&mut self, report: &AnalysisReport) -> &DashboardView {
        let view = DashboardView::project(report);
        if let Some(old) = self.chart.take() {
            self.surface.dispose(old);
        }
        self.chart = Some(self.surface.draw(&view.chart));
        debug!(sectors = view.chart.labels.len(), "dashboard rendered");
        self.view.insert(view)
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.chart.take() {
            self.surface.dispose(old);
        }
        self.view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn suitability_bands() {
        assert_eq!(Tone::for_suitability(Decimal::from(75)), Tone::Favorable);
        assert_eq!(Tone::for_suitability(Decimal::from(74)), Tone::Caution);
        assert_eq!(Tone::for_suitability(Decimal::from(50)), Tone::Caution);
        assert_eq!(Tone::for_suitability(Decimal::from_str("49.9").unwrap()), Tone::Warning);
    }

    #[test]
    fn confidence_accepts_fraction_or_percent() {
        assert_eq!(confidence_label(Decimal::from_str("0.82").unwrap()), "Confidence: 82%");
        assert_eq!(confidence_label(Decimal::from(90)), "Confidence: 90%");
    }

    #[test]
    fn terminal_surface_bar_widths_follow_weights() {
        let mut s = TerminalSurface::default();
        let chart = DonutChart {
            labels: vec!["Technology".into(), "Other".into()],
            data: vec![Decimal::from(75), Decimal::from(25)],
            colors: vec![PALETTE[0], PALETTE[1]],
        };
        s.draw(&chart);
        let lines = s.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), 30);
        assert_eq!(lines[1].matches('█').count(), 10);
    }
}
