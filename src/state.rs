// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state shared by the view components.
//!
//! The session is mirrored into the settings table under fixed keys so a
//! restarted client picks it up without logging in again.

use crate::db::{self, KEY_ACCESS_TOKEN, KEY_USER_NAME};
use crate::error::ClientError;
use crate::models::{Session, UserProfile};
use rusqlite::Connection;
use tracing::{info, warn};

pub struct AppState {
    conn: Connection,
    session: Option<Session>,
    profile: Option<UserProfile>,
}

impl AppState {
    /// Restores any session persisted by an earlier run.
    pub fn restore(conn: Connection) -> Result<Self, ClientError> {
        let token = db::get_setting(&conn, KEY_ACCESS_TOKEN)?;
        let name = db::get_setting(&conn, KEY_USER_NAME)?;
        let session = match (token, name) {
            (Some(token), name) if !token.is_empty() => Some(Session {
                token,
                user_display_name: name.unwrap_or_default(),
            }),
            _ => None,
        };
        Ok(Self {
            conn,
            session,
            profile: None,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_session(&mut self, session: Session) -> Result<(), ClientError> {
        db::set_setting(&self.conn, KEY_ACCESS_TOKEN, &session.token)?;
        db::set_setting(&self.conn, KEY_USER_NAME, &session.user_display_name)?;
        info!(user = %session.user_display_name, "session stored");
        self.session = Some(session);
        Ok(())
    }

    /// Drops the session and the cached profile. Never fails: a storage error
    /// is logged and the in-memory state is cleared regardless.
    pub fn clear_session(&mut self) {
        for key in [KEY_ACCESS_TOKEN, KEY_USER_NAME] {
            if let Err(e) = db::delete_setting(&self.conn, key) {
                warn!(error = %e, key, "failed to clear stored session key");
            }
        }
        if self.session.take().is_some() {
            info!("session cleared");
        }
        self.profile = None;
    }

    pub fn cached_profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn cache_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_survives_restore_and_clear_wipes_storage() {
        let conn = db::open_in_memory().unwrap();
        let mut state = AppState::restore(conn).unwrap();
        assert!(!state.is_authenticated());
        state
            .set_session(Session {
                token: "tok-1".into(),
                user_display_name: "Ada".into(),
            })
            .unwrap();
        state.cache_profile(UserProfile::default());

        let state = AppState::restore(state.conn).unwrap();
        assert_eq!(state.token(), Some("tok-1"));
        assert_eq!(state.session().unwrap().user_display_name, "Ada");

        let mut state = state;
        state.clear_session();
        assert!(state.token().is_none());
        assert!(state.cached_profile().is_none());
        assert_eq!(db::get_setting(state.conn(), KEY_ACCESS_TOKEN).unwrap(), None);
    }
}
