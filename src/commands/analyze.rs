// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, add_rows_from_args};
use crate::api::PortfolioApi;
use crate::dashboard::{DashboardRenderer, DashboardView, TerminalSurface};
use crate::editor::RowEditor;
use crate::markup::strip_controls;
use crate::models::UserLevel;
use crate::orchestrator::{AnalysisSettings, Orchestrator, View};
use crate::state::AppState;
use crate::sync::load_saved_holdings;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

/// Rows given on the command line stand alone and replace the saved
/// portfolio; otherwise the saved holdings are analyzed unless `--fresh`.
pub fn editor_from_args<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    sub: &clap::ArgMatches,
) -> Result<RowEditor> {
    let mut editor = RowEditor::new();
    if add_rows_from_args(&mut editor, sub)? == 0 && !sub.get_flag("fresh") {
        let saved = load_saved_holdings(api, state, &mut editor)?;
        if saved > 0 {
            eprintln!("Loaded {} saved holdings", saved);
        }
    }
    editor.drop_blank_rows();
    Ok(editor)
}

pub fn handle(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let editor = editor_from_args(&ctx.api, &mut ctx.state, sub)?;

    let user_level = match sub.get_one::<String>("level") {
        Some(l) => l.parse::<UserLevel>()?,
        None => ctx.cfg.user_level,
    };
    let settings = AnalysisSettings {
        user_level,
        ..AnalysisSettings::default()
    };
    let mut orchestrator =
        Orchestrator::new(settings, ctx.cfg.reveal_delay()).with_observer(|view, progress| {
            if let (View::Loading, Some(p)) = (view, progress) {
                eprintln!("[{:>3}%] {}", p.percent, p.text);
            }
        });
    let mut renderer = DashboardRenderer::new(TerminalSurface::default());

    let view = orchestrator
        .analyze(&ctx.api, &mut ctx.state, &editor, &mut renderer)?
        .clone();
    let view = &view;

    if let Some(path) = sub.get_one::<String>("html") {
        let path = path.trim();
        std::fs::write(path, view.to_node().render_html())
            .with_context(|| format!("Write dashboard to {}", path))?;
        eprintln!("Dashboard written to {}", path);
    }
    if maybe_print_json(sub.get_flag("json"), view)? {
        return Ok(());
    }
    print_dashboard(view, renderer.surface().lines());
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title);
    for item in items {
        println!("  • {}", strip_controls(item));
    }
}

pub fn print_dashboard(view: &DashboardView, chart_lines: &[String]) {
    let tiles = view
        .stats
        .iter()
        .chain(view.suitability.iter())
        .map(|t| vec![t.label.to_string(), strip_controls(&t.value)])
        .collect();
    println!("{}", pretty_table(&["Metric", "Value"], tiles));

    for text in [&view.greeting, &view.summary, &view.explanation]
        .into_iter()
        .flatten()
    {
        println!("\n{}", text.to_terminal());
    }
    if let Some(c) = &view.confidence {
        println!("\n{}", strip_controls(c));
    }

    print_list("Key Takeaways", &view.key_takeaways);
    print_list("Action Plan", &view.action_plan);
    print_list("Strengths", &view.positives);
    print_list("Risks", &view.risk_highlights);
    print_list("Suitability Notes", &view.suitability_breakdown);

    if !view.insights.is_empty() {
        let rows = view
            .insights
            .iter()
            .map(|r| {
                vec![
                    strip_controls(&r.ticker),
                    strip_controls(&r.performance),
                    strip_controls(&r.risk_signals),
                    strip_controls(&r.tax_consideration),
                ]
            })
            .collect();
        println!(
            "\n{}",
            pretty_table(&["Ticker", "Performance", "Risk Signals", "Tax"], rows)
        );
    }
    if let Some(t) = &view.risk_tax_summary {
        println!("\nRisk & Tax\n{}", t.to_terminal());
    }
    if !view.tax_rows.is_empty() {
        let rows = view
            .tax_rows
            .iter()
            .map(|r| {
                vec![
                    strip_controls(&r.holding),
                    r.gain_loss.clone(),
                    r.tax_type.to_string(),
                    r.estimated_tax.clone(),
                ]
            })
            .collect();
        println!(
            "\n{}",
            pretty_table(&["Holding", "Gain/Loss", "Type", "Est. Tax"], rows)
        );
    }
    if !view.rebalancing.is_empty() {
        let rows = view
            .rebalancing
            .iter()
            .map(|r| {
                vec![
                    strip_controls(&r.action),
                    strip_controls(&r.reason),
                    strip_controls(&r.impact),
                ]
            })
            .collect();
        println!("\n{}", pretty_table(&["Action", "Why", "Impact"], rows));
    }
    if !chart_lines.is_empty() {
        println!("\nSector Allocation");
        for line in chart_lines {
            println!("  {}", strip_controls(line));
        }
    }
}
