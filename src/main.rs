// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use folioscope::api::HttpApi;
use folioscope::commands::{self, Ctx};
use folioscope::config::ClientConfig;
use folioscope::state::AppState;
use folioscope::{cli, db};

const LOG_ENV: &str = "FOLIOSCOPE_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let cfg = ClientConfig::resolve(
        &conn,
        matches.get_one::<String>("api-url").map(String::as_str),
    )?;
    let api = HttpApi::new(&cfg)?;
    let state = AppState::restore(conn)?;
    let mut ctx = Ctx { cfg, api, state };

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&mut ctx, sub)?,
        Some(("register", sub)) => commands::auth::register(&mut ctx, sub)?,
        Some(("logout", _)) => commands::auth::handle_logout(&mut ctx)?,
        Some(("whoami", _)) => commands::auth::whoami(&ctx)?,
        Some(("portfolio", sub)) => commands::portfolio::handle(&mut ctx, sub)?,
        Some(("analyze", sub)) => commands::analyze::handle(&mut ctx, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut ctx, sub)?,
        Some(("chat", sub)) => commands::chat::handle(&mut ctx, sub)?,
        Some(("config", sub)) => commands::config::handle(ctx.state.conn(), &ctx.cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
