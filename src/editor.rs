// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{HoldingField, ValidationError};
use crate::models::Holding;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::path::Path;

pub const LAST_ROW_WARNING: &str = "You must have at least one holding in your portfolio.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// Raw text of one editable row, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingRow {
    pub ticker: String,
    pub shares: String,
    pub purchase_price: String,
    pub purchase_date: String,
}

impl HoldingRow {
    fn from_holding(h: &Holding) -> Self {
        Self {
            ticker: h.ticker.clone(),
            shares: h.shares.to_string(),
            purchase_price: h.purchase_price.to_string(),
            purchase_date: h.purchase_date.to_string(),
        }
    }

    fn parse(&self, row: usize) -> Result<Holding, ValidationError> {
        let invalid = |field| ValidationError { row, field };
        let ticker = self.ticker.trim();
        if ticker.is_empty() {
            return Err(invalid(HoldingField::Ticker));
        }
        let shares = positive_decimal(&self.shares).ok_or(invalid(HoldingField::Shares))?;
        let purchase_price =
            positive_decimal(&self.purchase_price).ok_or(invalid(HoldingField::PurchasePrice))?;
        let purchase_date = parse_date(self.purchase_date.trim())
            .map_err(|_| invalid(HoldingField::PurchaseDate))?;
        Ok(Holding {
            ticker: ticker.to_string(),
            shares,
            purchase_price,
            purchase_date,
            current_price: None,
        })
    }
}

fn positive_decimal(raw: &str) -> Option<Decimal> {
    parse_decimal(raw.trim())
        .ok()
        .filter(|d| *d > Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The sole remaining row was kept; carries the warning to show the user.
    KeptLastRow(&'static str),
    NotFound,
}

/// The editable holdings table. Never holds fewer than one row.
#[derive(Debug, Clone)]
pub struct RowEditor {
    rows: Vec<(RowId, HoldingRow)>,
    next_id: u64,
}

impl Default for RowEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RowEditor {
    pub fn new() -> Self {
        let mut editor = Self {
            rows: Vec::new(),
            next_id: 0,
        };
        editor.add_row(None);
        editor
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowId, &HoldingRow)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }

    pub fn add_row(&mut self, prefill: Option<&Holding>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        let row = prefill.map(HoldingRow::from_holding).unwrap_or_default();
        self.rows.push((id, row));
        id
    }

    /// Appends a row from raw text, e.g. a `--holding` flag or a CSV record.
    pub fn add_raw_row(&mut self, row: HoldingRow) -> RowId {
        let id = self.add_row(None);
        if let Some(slot) = self.row_mut(id) {
            *slot = row;
        }
        id
    }

    pub fn remove_row(&mut self, id: RowId) -> RemoveOutcome {
        let Some(pos) = self.rows.iter().position(|(rid, _)| *rid == id) else {
            return RemoveOutcome::NotFound;
        };
        if self.rows.len() <= 1 {
            return RemoveOutcome::KeptLastRow(LAST_ROW_WARNING);
        }
        self.rows.remove(pos);
        RemoveOutcome::Removed
    }

    pub fn set_field(&mut self, id: RowId, field: HoldingField, value: &str) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        let slot = match field {
            HoldingField::Ticker => &mut row.ticker,
            HoldingField::Shares => &mut row.shares,
            HoldingField::PurchasePrice => &mut row.purchase_price,
            HoldingField::PurchaseDate => &mut row.purchase_date,
        };
        *slot = value.to_string();
        true
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut HoldingRow> {
        self.rows
            .iter_mut()
            .find(|(rid, _)| *rid == id)
            .map(|(_, row)| row)
    }

    /// Rebuilds the table from saved holdings; an empty list leaves one blank row.
    pub fn replace_with(&mut self, holdings: &[Holding]) {
        self.rows.clear();
        if holdings.is_empty() {
            self.add_row(None);
            return;
        }
        for h in holdings {
            self.add_row(Some(h));
        }
    }

    /// Drops rows whose inputs are all blank, keeping at least one row.
    pub fn drop_blank_rows(&mut self) {
        let blank = HoldingRow::default();
        let keep: Vec<_> = self
            .rows
            .iter()
            .filter(|(_, row)| {
                let trimmed = HoldingRow {
                    ticker: row.ticker.trim().to_string(),
                    shares: row.shares.trim().to_string(),
                    purchase_price: row.purchase_price.trim().to_string(),
                    purchase_date: row.purchase_date.trim().to_string(),
                };
                trimmed != blank
            })
            .cloned()
            .collect();
        if keep.is_empty() {
            self.rows.truncate(1);
        } else {
            self.rows = keep;
        }
    }

    /// All-or-nothing: either every row yields a Holding or nothing is returned.
    pub fn gather_holdings(&self) -> Result<Vec<Holding>, ValidationError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, (_, row))| row.parse(i + 1))
            .collect()
    }

    /// Appends rows from a CSV with a `ticker,shares,purchase_price,purchase_date` header.
    pub fn import_csv(&mut self, path: &Path) -> Result<usize> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Open CSV {}", path.display()))?;
        let mut added = 0;
        for result in rdr.records() {
            let rec = result?;
            let field = |i: usize| rec.get(i).unwrap_or("").trim().to_string();
            self.add_raw_row(HoldingRow {
                ticker: field(0),
                shares: field(1),
                purchase_price: field(2),
                purchase_date: field(3),
            });
            added += 1;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(t: &str) -> HoldingRow {
        HoldingRow {
            ticker: t.into(),
            shares: "1".into(),
            purchase_price: "2".into(),
            purchase_date: "2024-01-01".into(),
        }
    }

    #[test]
    fn drop_blank_rows_keeps_one_when_all_blank() {
        let mut ed = RowEditor::new();
        ed.add_row(None);
        ed.drop_blank_rows();
        assert_eq!(ed.len(), 1);

        ed.add_raw_row(filled("MSFT"));
        ed.drop_blank_rows();
        assert_eq!(ed.len(), 1);
        assert_eq!(ed.gather_holdings().unwrap()[0].ticker, "MSFT");
    }

    #[test]
    fn row_inputs_use_shared_parsers() {
        let mut row = filled("AAPL");
        row.shares = " 2.5 ".into();
        row.purchase_date = " 2024-02-29 ".into();
        let h = row.parse(1).unwrap();
        assert_eq!(h.shares, parse_decimal("2.5").unwrap());
        assert_eq!(h.purchase_date, parse_date("2024-02-29").unwrap());

        row.purchase_date = "2023-02-29".into();
        assert_eq!(row.parse(1).unwrap_err().field, HoldingField::PurchaseDate);
        row.purchase_date = "2024-01-01".into();
        row.purchase_price = "ten".into();
        assert_eq!(row.parse(1).unwrap_err().field, HoldingField::PurchasePrice);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let mut row = filled("AAPL");
        row.shares = "0".into();
        assert_eq!(row.parse(1).unwrap_err().field, HoldingField::Shares);
        row.shares = "3".into();
        row.purchase_price = "-5".into();
        assert_eq!(row.parse(1).unwrap_err().field, HoldingField::PurchasePrice);
    }
}
