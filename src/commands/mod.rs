// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analyze;
pub mod auth;
pub mod chat;
pub mod config;
pub mod portfolio;
pub mod profile;

use crate::api::HttpApi;
use crate::config::ClientConfig;
use crate::editor::{HoldingRow, RowEditor};
use crate::state::AppState;
use anyhow::{Result, anyhow};
use std::path::Path;

/// Everything a command needs: resolved settings, the API client, and state.
pub struct Ctx {
    pub cfg: ClientConfig,
    pub api: HttpApi,
    pub state: AppState,
}

pub fn parse_holding_arg(raw: &str) -> Result<HoldingRow> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(anyhow!(
            "Invalid holding '{}', expected TICKER,SHARES,PRICE,DATE",
            raw
        ));
    }
    Ok(HoldingRow {
        ticker: parts[0].to_string(),
        shares: parts[1].to_string(),
        purchase_price: parts[2].to_string(),
        purchase_date: parts[3].to_string(),
    })
}

/// Appends the rows given via `--holding` and `--csv`; returns how many were added.
pub fn add_rows_from_args(editor: &mut RowEditor, sub: &clap::ArgMatches) -> Result<usize> {
    let mut added = 0;
    if let Some(values) = sub.get_many::<String>("holding") {
        for raw in values {
            editor.add_raw_row(parse_holding_arg(raw)?);
            added += 1;
        }
    }
    if let Some(path) = sub.get_one::<String>("csv") {
        added += editor.import_csv(Path::new(path.trim()))?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_arg_is_split_and_trimmed() {
        let row = parse_holding_arg(" AAPL , 10, 150.00 ,2024-01-01").unwrap();
        assert_eq!(row.ticker, "AAPL");
        assert_eq!(row.purchase_price, "150.00");
        assert!(parse_holding_arg("AAPL,10").is_err());
    }
}
