// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::PortfolioApi;
use crate::error::ClientError;
use crate::models::{RegisterRequest, Session, UserProfile};
use crate::state::AppState;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
    FullName,
    Email,
}

impl AuthField {
    pub fn label(&self) -> &'static str {
        match self {
            AuthField::Username => "username",
            AuthField::Password => "password",
            AuthField::FullName => "full name",
            AuthField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    /// Optional questionnaire, only sent when registering.
    pub profile: Option<UserProfile>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switches between Login and Register and clears every field.
    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        *self = Self::new(next);
    }

    pub fn required_fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Register => &[
                AuthField::Username,
                AuthField::Password,
                AuthField::FullName,
                AuthField::Email,
            ],
        }
    }

    pub fn shows_profile_form(&self) -> bool {
        self.mode == AuthMode::Register
    }

    fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Username => &self.username,
            AuthField::Password => &self.password,
            AuthField::FullName => &self.full_name,
            AuthField::Email => &self.email,
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        for field in self.required_fields() {
            if self.value(*field).trim().is_empty() {
                return Err(ClientError::Validation(format!(
                    "Please enter your {}.",
                    field.label()
                )));
            }
        }
        Ok(())
    }

    fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            user_profile: self.profile.clone().filter(|p| !p.is_empty()),
        }
    }
}

fn login<A: PortfolioApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    username: &str,
    password: &str,
) -> Result<Session, ClientError> {
    let resp = api.login(username, password)?;
    let session = Session {
        token: resp.access_token,
        user_display_name: resp.user_name,
    };
    state.set_session(session.clone())?;
    info!(user = %session.user_display_name, "logged in");
    Ok(session)
}

/// Submits the form in its current mode. Registration is followed by an
/// automatic login, after which the password is wiped from the form. On
/// failure the form keeps its mode and contents so the user can retry.
pub fn submit<A: PortfolioApi + ?Sized>(
    form: &mut AuthForm,
    api: &A,
    state: &mut AppState,
) -> Result<Session, ClientError> {
    form.validate()?;
    let username = form.username.trim().to_string();
    match form.mode {
        AuthMode::Login => login(api, state, &username, &form.password),
        AuthMode::Register => {
            api.register(&form.register_request())?;
            info!(username = %username, "registered");
            let session = login(api, state, &username, &form.password)?;
            form.password.clear();
            Ok(session)
        }
    }
}

pub fn logout(state: &mut AppState) {
    state.clear_session();
}
