// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, Failure, logged_in_state, new_state};
use folioscope::auth::{AuthForm, AuthMode, logout, submit};
use folioscope::db::{self, KEY_ACCESS_TOKEN, KEY_USER_NAME};
use folioscope::error::ClientError;
use folioscope::models::UserProfile;
use folioscope::state::AppState;

fn login_form() -> AuthForm {
    let mut form = AuthForm::new(AuthMode::Login);
    form.username = "ada".into();
    form.password = "secret".into();
    form
}

#[test]
fn login_stores_token_and_name_verbatim() {
    let api = FakeApi::default();
    let mut state = new_state();
    let session = submit(&mut login_form(), &api, &mut state).unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(state.token(), Some("tok-123"));
    assert_eq!(state.session().unwrap().user_display_name, "Ada Lovelace");
    assert_eq!(
        db::get_setting(state.conn(), KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some("tok-123")
    );
    assert_eq!(
        db::get_setting(state.conn(), KEY_USER_NAME).unwrap().as_deref(),
        Some("Ada Lovelace")
    );
}

#[test]
fn register_then_auto_login_clears_password() {
    let api = FakeApi::default();
    let mut state = new_state();
    let mut form = AuthForm::new(AuthMode::Login);
    form.toggle_mode();
    form.username = " ada ".into();
    form.password = "secret".into();
    form.full_name = "Ada Lovelace".into();
    form.email = "ada@example.com".into();
    form.profile = Some(UserProfile {
        risk_appetite: Some("Moderate".into()),
        ..UserProfile::default()
    });

    submit(&mut form, &api, &mut state).unwrap();

    assert_eq!(api.calls(), ["register", "login"]);
    let sent = &api.register_requests.borrow()[0];
    assert_eq!(sent.username, "ada");
    assert_eq!(
        sent.user_profile.as_ref().unwrap().risk_appetite.as_deref(),
        Some("Moderate")
    );
    assert!(form.password.is_empty());
    assert_eq!(form.username, " ada ");
    assert!(state.is_authenticated());
}

#[test]
fn empty_questionnaire_is_not_sent() {
    let api = FakeApi::default();
    let mut state = new_state();
    let mut form = AuthForm::new(AuthMode::Register);
    form.username = "ada".into();
    form.password = "pw".into();
    form.full_name = "Ada".into();
    form.email = "a@b.c".into();
    form.profile = Some(UserProfile::default());
    submit(&mut form, &api, &mut state).unwrap();
    assert!(api.register_requests.borrow()[0].user_profile.is_none());
}

#[test]
fn rejected_login_surfaces_server_text_and_keeps_form() {
    let api = FakeApi::default().failing(
        "login",
        Failure::Auth("Incorrect username or password".into()),
    );
    let mut state = new_state();
    let mut form = login_form();

    let err = submit(&mut form, &api, &mut state).unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(err.to_string(), "Incorrect username or password");
    assert_eq!(form.mode(), AuthMode::Login);
    assert_eq!(form.password, "secret");
    assert!(!state.is_authenticated());
}

#[test]
fn failed_registration_keeps_register_mode() {
    let api = FakeApi::default().failing(
        "register",
        Failure::Auth("Username already registered".into()),
    );
    let mut state = new_state();
    let mut form = AuthForm::new(AuthMode::Register);
    form.username = "ada".into();
    form.password = "pw".into();
    form.full_name = "Ada".into();
    form.email = "a@b.c".into();

    let err = submit(&mut form, &api, &mut state).unwrap_err();
    assert_eq!(err.to_string(), "Username already registered");
    assert_eq!(form.mode(), AuthMode::Register);
    assert_eq!(api.calls(), ["register"]);
}

#[test]
fn missing_field_makes_no_request() {
    let api = FakeApi::default();
    let mut state = new_state();
    let mut form = AuthForm::new(AuthMode::Login);
    form.username = "ada".into();
    let err = submit(&mut form, &api, &mut state).unwrap_err();
    assert_eq!(err.to_string(), "Please enter your password.");
    assert!(api.calls().is_empty());
}

#[test]
fn logout_clears_memory_and_storage() {
    let mut state = logged_in_state();
    logout(&mut state);
    assert!(!state.is_authenticated());
    assert_eq!(db::get_setting(state.conn(), KEY_ACCESS_TOKEN).unwrap(), None);
    // Logging out twice is harmless.
    logout(&mut state);
    assert!(state.token().is_none());
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.sqlite");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);")
            .unwrap();
        let mut state = AppState::restore(conn).unwrap();
        submit(&mut login_form(), &FakeApi::default(), &mut state).unwrap();
    }
    let state = AppState::restore(rusqlite::Connection::open(&path).unwrap()).unwrap();
    assert_eq!(state.token(), Some("tok-123"));
    assert_eq!(state.session().unwrap().user_display_name, "Ada Lovelace");
}
