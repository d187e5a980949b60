// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use folioscope::api::PortfolioApi;
use folioscope::db;
use folioscope::error::ClientError;
use folioscope::models::{
    AnalysisReport, ChatReply, ChatRequest, ExplainRequest, Holding, LoginResponse,
    PortfolioMetrics, RegisterRequest, Session, UserProfile,
};
use folioscope::state::AppState;
use rust_decimal::Decimal;
use std::cell::RefCell;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::str::FromStr;

/// How a faked endpoint should fail.
#[derive(Debug, Clone)]
pub enum Failure {
    Unauthorized,
    Server(u16, String),
    Auth(String),
}

impl Failure {
    fn to_error(&self) -> ClientError {
        match self {
            Failure::Unauthorized => ClientError::SessionExpired,
            Failure::Server(status, message) => ClientError::Server {
                status: *status,
                message: message.clone(),
            },
            Failure::Auth(message) => ClientError::Auth(message.clone()),
        }
    }
}

/// In-process stand-in for the analysis service. Records every call in order.
pub struct FakeApi {
    pub calls: RefCell<Vec<&'static str>>,
    pub failures: RefCell<HashMap<&'static str, Failure>>,
    pub login_response: LoginResponse,
    pub portfolio: RefCell<Vec<Holding>>,
    pub report: AnalysisReport,
    pub profile: RefCell<UserProfile>,
    pub chat_reply: ChatReply,
    pub explain_requests: RefCell<Vec<ExplainRequest>>,
    pub register_requests: RefCell<Vec<RegisterRequest>>,
    pub chat_requests: RefCell<Vec<ChatRequest>>,
    pub tokens_seen: RefCell<Vec<Option<String>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            login_response: LoginResponse {
                access_token: "tok-123".into(),
                user_name: "Ada Lovelace".into(),
            },
            portfolio: RefCell::new(Vec::new()),
            report: aapl_report(),
            profile: RefCell::new(UserProfile::default()),
            chat_reply: ChatReply {
                reply: "AAPL looks fine.".into(),
                detected_stocks: Some(vec!["AAPL".into()]),
            },
            explain_requests: RefCell::new(Vec::new()),
            register_requests: RefCell::new(Vec::new()),
            chat_requests: RefCell::new(Vec::new()),
            tokens_seen: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn failing(self, call: &'static str, failure: Failure) -> Self {
        self.failures.borrow_mut().insert(call, failure);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str, token: Option<&str>) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(call);
        self.tokens_seen.borrow_mut().push(token.map(str::to_string));
        match self.failures.borrow().get(call) {
            Some(f) => Err(f.to_error()),
            None => Ok(()),
        }
    }
}

impl PortfolioApi for FakeApi {
    fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, ClientError> {
        self.record("login", None)?;
        Ok(self.login_response.clone())
    }

    fn register(&self, req: &RegisterRequest) -> Result<(), ClientError> {
        self.register_requests.borrow_mut().push(req.clone());
        self.record("register", None)
    }

    fn fetch_portfolio(&self, token: &str) -> Result<Vec<Holding>, ClientError> {
        self.record("fetch_portfolio", Some(token))?;
        Ok(self.portfolio.borrow().clone())
    }

    fn save_portfolio(&self, token: &str, holdings: &[Holding]) -> Result<(), ClientError> {
        self.record("save_portfolio", Some(token))?;
        *self.portfolio.borrow_mut() = holdings.to_vec();
        Ok(())
    }

    fn explain(&self, token: &str, req: &ExplainRequest) -> Result<AnalysisReport, ClientError> {
        self.explain_requests.borrow_mut().push(req.clone());
        self.record("explain", Some(token))?;
        Ok(self.report.clone())
    }

    fn fetch_profile(&self, token: &str) -> Result<UserProfile, ClientError> {
        self.record("fetch_profile", Some(token))?;
        Ok(self.profile.borrow().clone())
    }

    fn save_profile(&self, token: &str, profile: &UserProfile) -> Result<UserProfile, ClientError> {
        self.record("save_profile", Some(token))?;
        *self.profile.borrow_mut() = profile.clone();
        Ok(profile.clone())
    }

    fn chat(&self, token: Option<&str>, req: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.chat_requests.borrow_mut().push(req.clone());
        self.record("chat", token)?;
        Ok(self.chat_reply.clone())
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn holding(ticker: &str, shares: &str, price: &str, date: &str) -> Holding {
    Holding {
        ticker: ticker.into(),
        shares: dec(shares),
        purchase_price: dec(price),
        purchase_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        current_price: None,
    }
}

/// Ten AAPL shares bought at 150, now worth 1,800.
pub fn aapl_report() -> AnalysisReport {
    let mut sectors = IndexMap::new();
    sectors.insert("Technology".to_string(), dec("1.0"));
    AnalysisReport {
        portfolio_metrics: PortfolioMetrics {
            total_value: dec("1800"),
            total_cost_basis: dec("1500"),
            unrealized_gain: dec("300"),
            unrealized_gain_percent: dec("20"),
            holdings_count: 1,
            largest_position: "AAPL".into(),
            largest_position_percent: dec("100"),
            sector_allocation: sectors,
        },
        explanation: Some("Your portfolio is **concentrated** in one stock.".into()),
        key_takeaways: vec!["Diversify".into()],
        ..AnalysisReport::default()
    }
}

pub fn new_state() -> AppState {
    AppState::restore(db::open_in_memory().unwrap()).unwrap()
}

pub fn logged_in_state() -> AppState {
    let mut state = new_state();
    state
        .set_session(Session {
            token: "tok-123".into(),
            user_display_name: "Ada Lovelace".into(),
        })
        .unwrap();
    state
}
