// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::PortfolioApi;
use crate::error::ClientError;
use crate::models::UserProfile;
use crate::state::AppState;
use crate::sync::{expire_on_401, require_token};

pub fn fetch_profile<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
) -> Result<UserProfile, ClientError> {
    let token = require_token(state)?;
    let profile = expire_on_401(state, api.fetch_profile(&token))?;
    state.cache_profile(profile.clone());
    Ok(profile)
}

pub fn save_profile<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    profile: &UserProfile,
) -> Result<UserProfile, ClientError> {
    let token = require_token(state)?;
    let saved = expire_on_401(state, api.save_profile(&token, profile))?;
    state.cache_profile(saved.clone());
    Ok(saved)
}

/// Edit form for the questionnaire, pre-filled from the cached read model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub profile: UserProfile,
}

impl ProfileForm {
    pub fn prefill(state: &AppState) -> Self {
        Self {
            profile: state.cached_profile().cloned().unwrap_or_default(),
        }
    }

    /// Overlays only the answers the user actually provided.
    pub fn merge(&mut self, edits: UserProfile) {
        let p = &mut self.profile;
        macro_rules! take {
            ($($field:ident),*) => {
                $(if edits.$field.is_some() { p.$field = edits.$field; })*
            };
        }
        take!(
            age,
            profession,
            annual_income,
            investment_experience,
            risk_appetite,
            investment_horizon,
            dependents,
            primary_goal
        );
    }
}
