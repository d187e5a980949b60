// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn holding_arg() -> Arg {
    Arg::new("holding")
        .long("holding")
        .value_name("TICKER,SHARES,PRICE,DATE")
        .help("Holding row, e.g. AAPL,10,150.00,2024-01-01 (repeatable)")
        .action(ArgAction::Append)
}

fn csv_arg() -> Arg {
    arg!(--csv <PATH> "CSV with ticker,shares,purchase_price,purchase_date columns")
}

fn json_arg() -> Arg {
    arg!(--json "Print JSON instead of tables").action(ArgAction::SetTrue)
}

fn profile_args(cmd: Command) -> Command {
    cmd.arg(arg!(--age <AGE> "Age in years").value_parser(value_parser!(u32)))
        .arg(arg!(--profession <PROFESSION> "e.g. Salaried, Self-employed"))
        .arg(arg!(--"annual-income" <BAND> "Income band, e.g. 10-20L"))
        .arg(arg!(--experience <LEVEL> "Investment experience"))
        .arg(arg!(--"risk-appetite" <RISK> "Low | Moderate | High"))
        .arg(arg!(--horizon <HORIZON> "Investment horizon"))
        .arg(arg!(--dependents <N> "0, 1, 2 or 3+"))
        .arg(arg!(--goal <GOAL> "Primary goal"))
}

pub fn build_cli() -> Command {
    Command::new("folioscope")
        .about("AI portfolio analysis, dashboards, and portfolio chat from the terminal")
        .version(clap::crate_version!())
        .arg(
            arg!(--"api-url" <URL> "Base URL of the analysis service")
                .global(true)
                .env(crate::config::ENV_API_URL),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and remember the session")
                .arg(arg!(--username <USERNAME>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true)),
        )
        .subcommand(profile_args(
            Command::new("register")
                .about("Create an account, then log in")
                .arg(arg!(--username <USERNAME>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true))
                .arg(arg!(--email <EMAIL>).required(true))
                .arg(arg!(--"full-name" <NAME>).required(true)),
        ))
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the stored session"))
        .subcommand(
            Command::new("portfolio")
                .about("Saved holdings")
                .subcommand(Command::new("show").arg(json_arg()))
                .subcommand(
                    Command::new("save")
                        .about("Replace the saved holdings")
                        .arg(holding_arg())
                        .arg(csv_arg()),
                )
                .subcommand(
                    Command::new("import")
                        .about("Append CSV rows to the saved holdings")
                        .arg(arg!(
                            <PATH> "CSV with ticker,shares,purchase_price,purchase_date columns"
                        )),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze saved holdings, or --holding/--csv rows which then replace them")
                .arg(holding_arg())
                .arg(csv_arg())
                .arg(
                    arg!(--fresh "Start from an empty table instead of the saved holdings")
                        .action(ArgAction::SetTrue),
                )
                .arg(arg!(--level <LEVEL> "beginner | intermediate | expert"))
                .arg(json_arg())
                .arg(arg!(--html <PATH> "Also write the dashboard as an HTML fragment")),
        )
        .subcommand(
            Command::new("profile")
                .about("Investor questionnaire")
                .subcommand(Command::new("show").arg(json_arg()))
                .subcommand(profile_args(
                    Command::new("set").about("Update questionnaire answers"),
                )),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask the portfolio assistant")
                .arg(arg!(-m --message <MESSAGE> "Send one message and exit")),
        )
        .subcommand(
            Command::new("config")
                .about("Client settings")
                .subcommand(Command::new("show").arg(json_arg()))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(<KEY> "Setting name"))
                        .arg(arg!(<VALUE> "Setting value")),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
