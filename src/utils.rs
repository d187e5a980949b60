// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};
use std::time::Duration;

const UA: &str = concat!(
    "folioscope/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/folioscope)"
);

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `$1,234.50`, with a leading minus for negatives and half-up rounding to cents.
pub fn format_currency(d: Decimal) -> String {
    let rounded = d
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded);
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let body = format!("${}.{}", group_thousands(int_part), frac_part);
    if d.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", body)
    } else {
        body
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percentage with an explicit `+` for positive values, e.g. `+12.5%`.
pub fn format_signed_percent(pct: Decimal) -> String {
    let p = pct.round_dp(2).normalize();
    if p > Decimal::ZERO {
        format!("+{}%", p)
    } else {
        format!("{}%", p)
    }
}

pub fn format_percent(pct: Decimal) -> String {
    format!("{}%", pct.round_dp(2).normalize())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn currency_formatting_matches_dashboard_tiles() {
        assert_eq!(format_currency(d("-1234.5")), "-$1,234.50");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(d("1000000")), "$1,000,000.00");
        assert_eq!(format_currency(d("999.999")), "$1,000.00");
        assert_eq!(format_currency(d("12.345")), "$12.35");
        assert_eq!(format_currency(d("-0.001")), "$0.00");
    }

    #[test]
    fn signed_percent_only_marks_positive() {
        assert_eq!(format_signed_percent(d("12.50")), "+12.5%");
        assert_eq!(format_signed_percent(d("-3.25")), "-3.25%");
        assert_eq!(format_signed_percent(Decimal::ZERO), "0%");
    }

    #[test]
    fn parse_date_rejects_other_layouts() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("01/01/2024").is_err());
    }
}
