// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, add_rows_from_args};
use crate::editor::RowEditor;
use crate::models::Holding;
use crate::sync::{load_saved_holdings, save_holdings};
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use std::path::Path;

pub fn handle(ctx: &mut Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("save", sub)) => save(ctx, sub)?,
        Some(("import", sub)) => import(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn holdings_table(holdings: &[Holding]) -> comfy_table::Table {
    let rows = holdings
        .iter()
        .map(|h| {
            vec![
                h.ticker.clone(),
                h.shares.normalize().to_string(),
                format_currency(h.purchase_price),
                h.purchase_date.to_string(),
                format_currency(h.shares * h.purchase_price),
            ]
        })
        .collect();
    pretty_table(
        &["Ticker", "Shares", "Purchase Price", "Purchase Date", "Cost Basis"],
        rows,
    )
}

fn show(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let mut editor = RowEditor::new();
    let count = load_saved_holdings(&ctx.api, &mut ctx.state, &mut editor)?;
    if count == 0 {
        if !maybe_print_json(sub.get_flag("json"), &Vec::<Holding>::new())? {
            println!("No saved holdings");
        }
        return Ok(());
    }
    let holdings = editor.gather_holdings()?;
    if maybe_print_json(sub.get_flag("json"), &holdings)? {
        return Ok(());
    }
    println!("{}", holdings_table(&holdings));
    Ok(())
}

fn save(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let mut editor = RowEditor::new();
    if add_rows_from_args(&mut editor, sub)? == 0 {
        return Err(anyhow!("Nothing to save: pass --holding or --csv"));
    }
    editor.drop_blank_rows();
    let holdings = editor.gather_holdings()?;
    save_holdings(&ctx.api, &mut ctx.state, &holdings)?;
    println!("Saved {} holdings", holdings.len());
    Ok(())
}

fn import(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("PATH").unwrap().trim();
    let mut editor = RowEditor::new();
    let existing = load_saved_holdings(&ctx.api, &mut ctx.state, &mut editor)?;
    let added = editor.import_csv(Path::new(path))?;
    editor.drop_blank_rows();
    let holdings = editor.gather_holdings()?;
    save_holdings(&ctx.api, &mut ctx.state, &holdings)?;
    println!(
        "Imported {} rows ({} already saved, {} total)",
        added,
        existing,
        holdings.len()
    );
    Ok(())
}
