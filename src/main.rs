// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use cashflow::store::{InitOutcome, LedgerStore};
use cashflow::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_path.as_deref())?;
    let store = LedgerStore::new(conn);

    // Reset must work even when the stored document can no longer be read.
    if let Some(("reset", sub)) = matches.subcommand() {
        return commands::reset::handle(&store, sub);
    }
    let outcome = store.initialize()?;

    match matches.subcommand() {
        Some(("init", _)) => match outcome {
            InitOutcome::Created => println!("Ledger created"),
            InitOutcome::Migrated => println!("Ledger migrated to the current schema"),
            InitOutcome::Unchanged => println!("Ledger already up to date"),
        },
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("day", sub)) => commands::reports::day(&store, sub)?,
        Some(("month", sub)) => commands::reports::month(&store, sub)?,
        Some(("categories", sub)) => commands::reports::categories(&store, sub)?,
        Some(("stats", sub)) => commands::reports::stats(&store, sub)?,
        Some(("balance", sub)) => commands::balance::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("export", sub)) => {
            commands::exporter::handle(&store, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
