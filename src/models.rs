// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub shares: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    // Always sent as null; the server fills in live prices.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub current_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub annual_income: Option<String>,
    #[serde(default)]
    pub investment_experience: Option<String>,
    #[serde(default)]
    pub risk_appetite: Option<String>,
    #[serde(default)]
    pub investment_horizon: Option<String>,
    #[serde(default)]
    pub dependents: Option<String>,
    #[serde(default)]
    pub primary_goal: Option<String>,
}

impl UserProfile {
    pub fn is_empty(&self) -> bool {
        self == &UserProfile::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl UserLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Beginner => "beginner",
            UserLevel::Intermediate => "intermediate",
            UserLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(UserLevel::Beginner),
            "intermediate" => Ok(UserLevel::Intermediate),
            "expert" => Ok(UserLevel::Expert),
            other => Err(anyhow::anyhow!(
                "Unknown user level '{}' (use beginner|intermediate|expert)",
                other
            )),
        }
    }
}

// --- wire types -------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest {
    pub portfolio: Vec<Holding>,
    pub user_level: UserLevel,
    pub include_tax_analysis: bool,
    pub include_rebalancing: bool,
    pub transcript_context: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub top_k_sources: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub detected_stocks: Option<Vec<String>>,
}

/// `/api/portfolio/get` answers either with a bare list or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SavedPortfolio {
    List(Vec<Holding>),
    Wrapped { holdings: Vec<Holding> },
}

impl SavedPortfolio {
    pub fn into_holdings(self) -> Vec<Holding> {
        match self {
            SavedPortfolio::List(h) => h,
            SavedPortfolio::Wrapped { holdings } => holdings,
        }
    }
}

// --- analysis report ----------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    pub portfolio_metrics: PortfolioMetrics,
    pub suitability: Option<Suitability>,
    pub greeting: Option<String>,
    pub summary: Option<String>,
    pub confidence_score: Option<Decimal>,
    pub explanation: Option<String>,
    pub key_takeaways: Vec<String>,
    pub action_plan: Vec<String>,
    pub stock_analyses: Vec<StockAnalysis>,
    pub risk_tax_summary: Option<String>,
    pub positives: Vec<String>,
    pub risk_highlights: Vec<String>,
    pub tax_impacts: Option<Vec<TaxImpact>>,
    pub rebalancing_ideas: Option<Vec<RebalancingIdea>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioMetrics {
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub unrealized_gain: Decimal,
    pub unrealized_gain_percent: Decimal,
    pub holdings_count: u32,
    pub largest_position: String,
    pub largest_position_percent: Decimal,
    /// Kept in the order the server sent it; chart colours follow that order.
    pub sector_allocation: IndexMap<String, Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suitability {
    pub suitability_score: Decimal,
    pub suitability_level: String,
    pub suitability_breakdown: Vec<String>,
    pub life_stage_classification: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockAnalysis {
    pub ticker: String,
    pub performance_summary: String,
    pub risk_signals: Vec<String>,
    pub tax_consideration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    ShortTerm,
    LongTerm,
}

impl TaxType {
    pub fn label(&self) -> &'static str {
        match self {
            TaxType::ShortTerm => "Short Term",
            TaxType::LongTerm => "Long Term",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxImpact {
    pub holding: String,
    pub gain_loss: Decimal,
    #[serde(default)]
    pub holding_period_days: i64,
    pub tax_type: TaxType,
    pub estimated_tax_rate: Decimal,
    pub estimated_tax: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalancingIdea {
    pub action: String,
    pub reason: String,
    pub impact: String,
}

// --- chat ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub detected_stock_tickers: Option<Vec<String>>,
}
