// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, ClientConfig};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &ClientConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            if maybe_print_json(sub.get_flag("json"), cfg)? {
                return Ok(());
            }
            let rows = vec![
                vec![config::KEY_API_BASE_URL.to_string(), cfg.api_base_url.clone()],
                vec![config::KEY_TIMEOUT_SECS.to_string(), cfg.timeout_secs.to_string()],
                vec![
                    config::KEY_REVEAL_DELAY_MS.to_string(),
                    cfg.reveal_delay_ms.to_string(),
                ],
                vec![
                    config::KEY_TOP_K_SOURCES.to_string(),
                    cfg.top_k_sources.to_string(),
                ],
                vec![config::KEY_USER_LEVEL.to_string(), cfg.user_level.to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap().trim();
            let value = sub.get_one::<String>("VALUE").unwrap();
            config::store(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
