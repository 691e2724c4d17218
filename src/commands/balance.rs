// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::{fmt_money, parse_decimal, validate_balance_delta};
use anyhow::{Context, Result};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("add", sub)) = m.subcommand() {
        let raw = sub.get_one::<String>("amount").context("Missing amount")?;
        let delta = validate_balance_delta(
            parse_decimal(raw).context("Please enter a valid number")?,
        )?;
        let balance = store.adjust_balance(delta)?;
        println!(
            "Added {} to balance; total balance is now {}",
            fmt_money(&delta),
            fmt_money(&balance)
        );
    }
    Ok(())
}
