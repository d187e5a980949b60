// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the portfolio-analysis service.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    AnalysisReport, ChatReply, ChatRequest, ExplainRequest, Holding, LoginResponse,
    RegisterRequest, SavedPortfolio, UserProfile,
};
use crate::utils::http_client;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub const LOGIN_FALLBACK: &str = "Login failed";
pub const REGISTER_FALLBACK: &str = "Registration failed";
pub const EXPLAIN_FALLBACK: &str = "Failed to generate explanation";
const PORTFOLIO_FALLBACK: &str = "Failed to load portfolio";
const SAVE_FALLBACK: &str = "Failed to save portfolio";
const PROFILE_FALLBACK: &str = "Failed to load profile";
const CHAT_FALLBACK: &str = "Chat request failed";

/// Remote operations the client depends on. Authenticated calls take the
/// bearer token explicitly; a 401 on any of them is `ClientError::SessionExpired`.
pub trait PortfolioApi {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError>;
    fn register(&self, req: &RegisterRequest) -> Result<(), ClientError>;
    fn fetch_portfolio(&self, token: &str) -> Result<Vec<Holding>, ClientError>;
    fn save_portfolio(&self, token: &str, holdings: &[Holding]) -> Result<(), ClientError>;
    fn explain(&self, token: &str, req: &ExplainRequest) -> Result<AnalysisReport, ClientError>;
    fn fetch_profile(&self, token: &str) -> Result<UserProfile, ClientError>;
    fn save_profile(&self, token: &str, profile: &UserProfile) -> Result<UserProfile, ClientError>;
    fn chat(&self, token: Option<&str>, req: &ChatRequest) -> Result<ChatReply, ClientError>;
}

pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(cfg: &ClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            client: http_client(cfg.timeout())?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, req: RequestBuilder, fallback: &str) -> Result<Response, ClientError> {
        req.send().map_err(|e| {
            error!(error = %e, "request failed");
            ClientError::Transport {
                message: fallback.to_string(),
                source: e,
            }
        })
    }

    fn authed(
        &self,
        req: RequestBuilder,
        token: &str,
        fallback: &str,
    ) -> Result<Response, ClientError> {
        let resp = self.send(req.bearer_auth(token), fallback)?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::SessionExpired);
        }
        ensure_success(resp, fallback)
    }
}

/// Turns a non-2xx response into `ClientError::Server`, preferring the
/// server's `detail` string over `fallback`.
fn ensure_success(resp: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message: error_detail(&body).unwrap_or_else(|| fallback.to_string()),
    })
}

pub fn error_detail(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    v.get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json().map_err(|e| ClientError::Decode(e.to_string()))
}

/// Login and registration rejections are credential problems, not server faults.
fn as_auth_error(e: ClientError) -> ClientError {
    match e {
        ClientError::Server { message, .. } => ClientError::Auth(message),
        ClientError::SessionExpired => ClientError::Auth(LOGIN_FALLBACK.to_string()),
        other => other,
    }
}

impl PortfolioApi for HttpApi {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        debug!(username, "POST /api/login");
        let req = self
            .client
            .post(self.url("/api/login"))
            .form(&[("username", username), ("password", password)]);
        let resp = self.send(req, LOGIN_FALLBACK)?;
        let resp = ensure_success(resp, LOGIN_FALLBACK).map_err(as_auth_error)?;
        decode(resp)
    }

    fn register(&self, req: &RegisterRequest) -> Result<(), ClientError> {
        debug!(username = %req.username, "POST /api/register");
        let builder = self.client.post(self.url("/api/register")).json(req);
        let resp = self.send(builder, REGISTER_FALLBACK)?;
        ensure_success(resp, REGISTER_FALLBACK).map_err(as_auth_error)?;
        Ok(())
    }

    fn fetch_portfolio(&self, token: &str) -> Result<Vec<Holding>, ClientError> {
        debug!("GET /api/portfolio/get");
        let req = self.client.get(self.url("/api/portfolio/get"));
        let resp = self.authed(req, token, PORTFOLIO_FALLBACK)?;
        let saved: SavedPortfolio = decode(resp)?;
        Ok(saved.into_holdings())
    }

    fn save_portfolio(&self, token: &str, holdings: &[Holding]) -> Result<(), ClientError> {
        debug!(count = holdings.len(), "POST /api/portfolio/save");
        let req = self.client.post(self.url("/api/portfolio/save")).json(holdings);
        self.authed(req, token, SAVE_FALLBACK)?;
        Ok(())
    }

    fn explain(&self, token: &str, req: &ExplainRequest) -> Result<AnalysisReport, ClientError> {
        debug!(
            holdings = req.portfolio.len(),
            level = %req.user_level,
            "POST /api/explain"
        );
        let builder = self.client.post(self.url("/api/explain")).json(req);
        let resp = self.authed(builder, token, EXPLAIN_FALLBACK)?;
        decode(resp)
    }

    fn fetch_profile(&self, token: &str) -> Result<UserProfile, ClientError> {
        debug!("GET /api/profile");
        let req = self.client.get(self.url("/api/profile"));
        let resp = self.authed(req, token, PROFILE_FALLBACK)?;
        decode(resp)
    }

    fn save_profile(
        &self,
        token: &str,
        profile: &UserProfile,
    ) -> Result<UserProfile, ClientError> {
        debug!("POST /api/profile");
        let req = self.client.post(self.url("/api/profile")).json(profile);
        let resp = self.authed(req, token, PROFILE_FALLBACK)?;
        decode(resp)
    }

    fn chat(&self, token: Option<&str>, req: &ChatRequest) -> Result<ChatReply, ClientError> {
        debug!(authed = token.is_some(), "POST /chat/message");
        let mut builder = self.client.post(self.url("/chat/message")).json(req);
        if let Some(t) = token {
            builder = builder.bearer_auth(t);
        }
        let resp = self.send(builder, CHAT_FALLBACK)?;
        let resp = ensure_success(resp, CHAT_FALLBACK)?;
        decode(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_string_detail() {
        assert_eq!(
            error_detail(r#"{"detail":"Incorrect username or password"}"#).as_deref(),
            Some("Incorrect username or password")
        );
        // FastAPI validation errors carry a list; the caller falls back.
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"detail":""}"#), None);
        assert_eq!(
            error_detail(r#"{"detail":"  Ticker XYZ not found \n"}"#).as_deref(),
            Some("  Ticker XYZ not found \n")
        );
    }
}
