// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::auth::{AuthForm, AuthMode, logout, submit};
use crate::commands::profile::profile_from_args;
use anyhow::Result;

fn arg(sub: &clap::ArgMatches, id: &str) -> String {
    sub.get_one::<String>(id)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub fn login(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = AuthForm::new(AuthMode::Login);
    form.username = arg(sub, "username");
    form.password = sub.get_one::<String>("password").cloned().unwrap_or_default();
    let session = submit(&mut form, &ctx.api, &mut ctx.state)?;
    println!("Logged in as {}", session.user_display_name);
    Ok(())
}

pub fn register(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = AuthForm::new(AuthMode::Login);
    form.toggle_mode();
    form.username = arg(sub, "username");
    form.password = sub.get_one::<String>("password").cloned().unwrap_or_default();
    form.email = arg(sub, "email");
    form.full_name = arg(sub, "full-name");
    if form.shows_profile_form() {
        form.profile = Some(profile_from_args(sub));
    }
    let session = submit(&mut form, &ctx.api, &mut ctx.state)?;
    println!("Registered and logged in as {}", session.user_display_name);
    Ok(())
}

pub fn handle_logout(ctx: &mut Ctx) -> Result<()> {
    logout(&mut ctx.state);
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Ctx) -> Result<()> {
    match ctx.state.session() {
        Some(s) => println!("{} ({})", s.user_display_name, ctx.cfg.api_base_url),
        None => println!("Not logged in"),
    }
    Ok(())
}
