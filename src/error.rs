// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Which input of a holding row failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingField {
    Ticker,
    Shares,
    PurchasePrice,
    PurchaseDate,
}

impl HoldingField {
    pub fn label(&self) -> &'static str {
        match self {
            HoldingField::Ticker => "ticker",
            HoldingField::Shares => "shares",
            HoldingField::PurchasePrice => "purchase price",
            HoldingField::PurchaseDate => "purchase date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row}: missing or invalid {}. Please fill out all fields for every row.", field.label())]
pub struct ValidationError {
    pub row: usize,
    pub field: HoldingField,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a rejected registration; carries the server text verbatim.
    #[error("{0}")]
    Auth(String),

    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Transport { message: String, source: reqwest::Error },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Client storage failed: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        ClientError::Validation(e.to_string())
    }
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}
