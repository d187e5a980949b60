// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::PortfolioApi;
use crate::editor::RowEditor;
use crate::error::ClientError;
use crate::models::Holding;
use crate::state::AppState;
use tracing::{info, warn};

/// Any 401 ends the session exactly like a manual logout.
pub(crate) fn expire_on_401<T>(
    state: &mut AppState,
    res: Result<T, ClientError>,
) -> Result<T, ClientError> {
    if let Err(ClientError::SessionExpired) = &res {
        warn!("server rejected the session token; logging out");
        state.clear_session();
    }
    res
}

pub(crate) fn require_token(state: &mut AppState) -> Result<String, ClientError> {
    match state.token() {
        Some(t) => Ok(t.to_string()),
        None => {
            state.clear_session();
            Err(ClientError::SessionExpired)
        }
    }
}

/// Loads the saved portfolio into the editor. Returns how many holdings the
/// server had; the editor always ends up with at least one row.
pub fn load_saved_holdings<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    editor: &mut RowEditor,
) -> Result<usize, ClientError> {
    let token = require_token(state)?;
    let holdings = expire_on_401(state, api.fetch_portfolio(&token))?;
    editor.replace_with(&holdings);
    info!(count = holdings.len(), "saved holdings loaded");
    Ok(holdings.len())
}

/// Fire-and-forget save ahead of an analysis; failures are only logged.
pub fn save_best_effort<A: PortfolioApi + ?Sized>(api: &A, token: &str, holdings: &[Holding]) {
    if let Err(e) = api.save_portfolio(token, holdings) {
        warn!(error = %e, "best-effort portfolio save failed");
    }
}

pub fn save_holdings<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    holdings: &[Holding],
) -> Result<(), ClientError> {
    let token = require_token(state)?;
    expire_on_401(state, api.save_portfolio(&token, holdings))?;
    info!(count = holdings.len(), "portfolio saved");
    Ok(())
}
