// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::models::UserProfile;
use crate::profile::{ProfileForm, fetch_profile, save_profile};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ctx: &mut Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("set", sub)) => set(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn profile_from_args(sub: &clap::ArgMatches) -> UserProfile {
    let text = |id: &str| {
        sub.get_one::<String>(id)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    UserProfile {
        age: sub.get_one::<u32>("age").copied(),
        profession: text("profession"),
        annual_income: text("annual-income"),
        investment_experience: text("experience"),
        risk_appetite: text("risk-appetite"),
        investment_horizon: text("horizon"),
        dependents: text("dependents"),
        primary_goal: text("goal"),
    }
}

fn print_profile(p: &UserProfile) {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let rows = vec![
        vec![
            "Age".to_string(),
            p.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
        ],
        vec!["Profession".to_string(), show(&p.profession)],
        vec!["Annual income".to_string(), show(&p.annual_income)],
        vec!["Experience".to_string(), show(&p.investment_experience)],
        vec!["Risk appetite".to_string(), show(&p.risk_appetite)],
        vec!["Horizon".to_string(), show(&p.investment_horizon)],
        vec!["Dependents".to_string(), show(&p.dependents)],
        vec!["Primary goal".to_string(), show(&p.primary_goal)],
    ];
    println!("{}", pretty_table(&["Question", "Answer"], rows));
}

fn show(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let profile = fetch_profile(&ctx.api, &mut ctx.state)?;
    if maybe_print_json(sub.get_flag("json"), &profile)? {
        return Ok(());
    }
    print_profile(&profile);
    Ok(())
}

fn set(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    // Pre-fill from the server so unspecified answers are preserved.
    fetch_profile(&ctx.api, &mut ctx.state)?;
    let mut form = ProfileForm::prefill(&ctx.state);
    form.merge(profile_from_args(sub));
    let saved = save_profile(&ctx.api, &mut ctx.state, &form.profile)?;
    println!("Profile updated");
    print_profile(&saved);
    Ok(())
}
