// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction};
use crate::navigation::ensure_not_future;
use crate::store::LedgerStore;
use crate::utils::{category_cell, fmt_money, maybe_print_json, parse_date, parse_decimal, today};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use serde::Serialize;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// `--date` if given, else today. Future days are rejected.
pub fn view_date(sub: &clap::ArgMatches, today: NaiveDate) -> Result<NaiveDate> {
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    Ok(ensure_not_future(date, today)?)
}

/// Matches known category names case-insensitively; anything else is kept
/// verbatim.
pub fn canonical_category(raw: &str) -> String {
    let raw = raw.trim();
    Category::ALL
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(raw))
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn required<'a>(sub: &'a clap::ArgMatches, id: &str) -> Result<&'a String> {
    sub.get_one::<String>(id)
        .with_context(|| format!("Missing --{}", id))
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = view_date(sub, today())?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category =
        canonical_category(sub.get_one::<String>("category").map_or("", |s| s.as_str()));
    let description = sub.get_one::<String>("description").map_or("", |s| s.as_str());

    let txn = store.add_transaction(date, amount, description, &category)?;
    println!(
        "Recorded {} ({}) on {} [{}]",
        fmt_money(&txn.amount),
        txn.category,
        date,
        txn.id
    );
    Ok(())
}

fn edit(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let id = required(sub, "id")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = canonical_category(required(sub, "category")?);
    let description = sub.get_one::<String>("description").map_or("", |s| s.as_str());

    if store.update_transaction(date, id, amount, &category, description)? {
        println!("Updated transaction {} on {}", id, date);
    } else {
        println!("No transaction {} on {}; nothing changed", id, date);
    }
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let id = required(sub, "id")?;
    if store.delete_transaction(date, id)? {
        println!("Deleted transaction {} on {}", id, date);
    } else {
        println!("No transaction {} on {}; nothing changed", id, date);
    }
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = view_date(sub, today())?;
    let data = query_rows(store, date)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", transactions_table(&data));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub index: usize,
    pub id: String,
    pub amount: String,
    pub category: String,
    pub time: String,
    pub description: String,
}

pub fn query_rows(store: &LedgerStore, date: NaiveDate) -> Result<Vec<TransactionRow>> {
    Ok(rows_for(store.load()?.bucket(date)))
}

/// Display rows for one bucket, numbered from 1 in insertion order.
pub fn rows_for(bucket: &[Transaction]) -> Vec<TransactionRow> {
    bucket
        .iter()
        .enumerate()
        .map(|(i, t)| TransactionRow {
            index: i + 1,
            id: t.id.clone(),
            amount: format!("{:.2}", t.amount),
            category: t.category.clone(),
            time: t.time.clone(),
            description: t.description.clone(),
        })
        .collect()
}

pub fn transactions_table(rows: &[TransactionRow]) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["#", "Amount", "Category", "Time", "Description", "ID"]);
    if rows.is_empty() {
        t.add_row(vec![Cell::new("No transactions for this day")]);
    }
    for r in rows {
        t.add_row(vec![
            Cell::new(format!("{}.", r.index)),
            Cell::new(format!("${}", r.amount)),
            category_cell(&r.category),
            Cell::new(&r.time),
            Cell::new(&r.description),
            Cell::new(&r.id),
        ]);
    }
    t
}
