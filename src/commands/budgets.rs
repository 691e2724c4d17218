// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Category};
use crate::store::LedgerStore;
use crate::utils::{fmt_money, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rust_decimal::Decimal;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(store)?,
        Some(("set", sub)) => set(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn fmt_limit(limit: Decimal) -> String {
    if limit > Decimal::ZERO {
        fmt_money(&limit)
    } else {
        "Not set".to_string()
    }
}

fn show(store: &LedgerStore) -> Result<()> {
    let budget = store.load()?.budgets;
    let mut rows = vec![vec!["Daily limit".to_string(), fmt_limit(budget.daily_limit)]];
    for c in Category::ALL {
        rows.push(vec![c.to_string(), fmt_limit(budget.limit_for(c))]);
    }
    println!("{}", pretty_table(&["Budget", "Limit"], rows));
    Ok(())
}

fn parse_limit(sub: &clap::ArgMatches, id: &str) -> Result<Option<Decimal>> {
    let Some(raw) = sub.get_one::<String>(id) else {
        return Ok(None);
    };
    let limit = if raw.trim().is_empty() {
        Decimal::ZERO
    } else {
        parse_decimal(raw)?
    };
    if limit < Decimal::ZERO {
        bail!("Budget limit for {} cannot be negative", id);
    }
    Ok(Some(limit))
}

/// Applies the given flags on top of `current`; omitted flags keep their value.
pub fn merged_budget(current: &Budget, sub: &clap::ArgMatches) -> Result<Budget> {
    let mut budget = current.clone();
    if let Some(limit) = parse_limit(sub, "daily")? {
        budget.daily_limit = limit;
    }
    for c in Category::ALL {
        if let Some(limit) = parse_limit(sub, &c.name().to_lowercase())? {
            budget.set_limit(c, limit);
        }
    }
    Ok(budget)
}

fn set(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let budget = merged_budget(&store.load()?.budgets, sub)?;
    store.set_budgets(budget)?;
    println!("Budget settings saved");
    show(store)
}
