// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn date_arg(required: bool) -> Arg {
    let arg = Arg::new("date").long("date").help("Day as YYYY-MM-DD");
    if required {
        arg.required(true)
    } else {
        arg.help("Day as YYYY-MM-DD (default: today)")
    }
}

fn step_args(unit: &'static str) -> [Arg; 2] {
    [
        Arg::new("prev")
            .long("prev")
            .action(ArgAction::SetTrue)
            .help(format!("Show the previous {}", unit)),
        Arg::new("next")
            .long("next")
            .action(ArgAction::SetTrue)
            .conflicts_with("prev")
            .help(format!("Show the next {} (never past today)", unit)),
    ]
}

fn limit_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).value_name("AMOUNT").help(help)
}

pub fn build_cli() -> Command {
    command!()
        .name("cashflow")
        .about("Daily expense tracker with category and daily budgets")
        .arg(
            Arg::new("db")
                .long("db")
                .env("CASHFLOW_DB")
                .global(true)
                .value_name("PATH")
                .help("SQLite file holding the ledger (default: platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create or migrate the ledger"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record spending for a day")
                        .arg(date_arg(false))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").default_value("Other"))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change amount, category and description in place")
                        .arg(date_arg(true))
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(date_arg(true))
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List a day's transactions")
                        .arg(date_arg(false))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("day")
                .about("Daily view: transactions, totals, category split and warnings")
                .arg(date_arg(false))
                .args(step_args("day"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("month")
                .about("Monthly report")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Month as YYYY-MM (default: current month)"),
                )
                .args(step_args("month"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("categories")
                .about("All-time spending per category")
                .args(json_args()),
        )
        .subcommand(
            Command::new("stats")
                .about("Overall statistics")
                .args(json_args()),
        )
        .subcommand(
            Command::new("balance")
                .about("Running balance")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add to the balance (0 to 999,999)")
                        .arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Daily and per-category spending limits (0 = not set)")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show current limits"))
                .subcommand(
                    Command::new("set")
                        .about("Update limits; omitted limits keep their value")
                        .arg(limit_arg("daily", "Daily limit across all categories"))
                        .arg(limit_arg("food", "Food limit"))
                        .arg(limit_arg("transport", "Transport limit"))
                        .arg(limit_arg("entertainment", "Entertainment limit"))
                        .arg(limit_arg("shopping", "Shopping limit"))
                        .arg(limit_arg("utilities", "Utilities limit"))
                        .arg(limit_arg("health", "Health limit"))
                        .arg(limit_arg("other", "Other limit")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the full ledger as pretty JSON")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Output file (default: cash-flow-backup-YYYY-MM-DD.json)"),
                ),
        )
        .subcommand(
            Command::new("reset").about("Delete all stored data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm that all data should be deleted"),
            ),
        )
}
