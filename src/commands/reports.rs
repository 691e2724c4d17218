// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    BudgetWarning, CategoryShare, budget_warnings, category_overview, day_category_summary,
    day_spending, monthly_totals, overall_statistics,
};
use crate::commands::transactions::{TransactionRow, rows_for, transactions_table, view_date};
use crate::navigation::{YearMonth, next_day, previous_day};
use crate::store::LedgerStore;
use crate::utils::{
    category_cell, fmt_money, maybe_print_json, parse_month, pretty_table, today,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use comfy_table::Cell;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub total_balance: Decimal,
    pub day_spending: Decimal,
    pub daily_limit: Option<Decimal>,
    pub transactions: Vec<TransactionRow>,
    pub categories: Vec<CategoryShare>,
    pub warnings: Vec<String>,
}

pub fn day_view(store: &LedgerStore, date: NaiveDate) -> Result<DayView> {
    let doc = store.load()?;
    let bucket = doc.bucket(date);
    Ok(DayView {
        date,
        total_balance: doc.total_balance,
        day_spending: day_spending(bucket),
        daily_limit: Some(doc.budgets.daily_limit).filter(|l| *l > Decimal::ZERO),
        transactions: rows_for(bucket),
        categories: day_category_summary(bucket),
        warnings: budget_warnings(bucket, &doc.budgets)
            .iter()
            .map(BudgetWarning::to_string)
            .collect(),
    })
}

/// `--date` (or today), moved one day by `--prev` / `--next`.
pub fn stepped_date(sub: &clap::ArgMatches, today: NaiveDate) -> Result<NaiveDate> {
    let date = view_date(sub, today)?;
    if sub.get_flag("prev") {
        Ok(previous_day(date))
    } else if sub.get_flag("next") {
        Ok(next_day(date, today)?)
    } else {
        Ok(date)
    }
}

/// `--month` (or the current month), moved one month by `--prev` / `--next`.
pub fn stepped_month(sub: &clap::ArgMatches, today: NaiveDate) -> Result<YearMonth> {
    let month = match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw)?,
        None => YearMonth::of(today),
    };
    Ok(if sub.get_flag("prev") {
        month.shift(-1)
    } else if sub.get_flag("next") {
        month.shift(1)
    } else {
        month
    })
}

pub fn day(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = day_view(store, stepped_date(sub, today())?)?;
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("{}", view.date.format("%a %b %d %Y"));
    println!("Total balance: {}", fmt_money(&view.total_balance));
    match view.daily_limit {
        Some(limit) => println!(
            "Today's total: {} / {}",
            fmt_money(&view.day_spending),
            fmt_money(&limit)
        ),
        None => println!("Today's total: {}", fmt_money(&view.day_spending)),
    }
    for w in &view.warnings {
        println!("⚠ {}", w);
    }
    println!("{}", transactions_table(&view.transactions));

    if view.categories.is_empty() {
        println!("No spending data for this day");
    } else {
        let rows = view
            .categories
            .iter()
            .map(|s| {
                vec![
                    s.category.to_string(),
                    fmt_money(&s.amount),
                    format!("{}% of total", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

pub fn month(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = stepped_month(sub, today())?;
    let totals = monthly_totals(&store.load()?, month, &Local);
    if maybe_print_json(json_flag, jsonl_flag, &totals)? {
        return Ok(());
    }

    println!("{}", month.first_day().format("%B %Y"));
    println!(
        "{}",
        pretty_table(
            &["Total spent", "Average per day", "Transactions"],
            vec![vec![
                fmt_money(&totals.total_spent),
                fmt_money(&totals.average_per_day),
                totals.transaction_count.to_string(),
            ]],
        )
    );
    let rows = totals
        .per_day
        .iter()
        .enumerate()
        .map(|(i, amount)| vec![(i + 1).to_string(), fmt_money(amount)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], rows));
    Ok(())
}

pub fn categories(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let overview = category_overview(&store.load()?);
    if maybe_print_json(json_flag, jsonl_flag, &overview)? {
        return Ok(());
    }

    let mut table = pretty_table(
        &["Category", "Total spent", "Percentage", "Transactions"],
        Vec::new(),
    );
    for s in overview.active() {
        table.add_row(vec![
            category_cell(s.category.name()),
            Cell::new(fmt_money(&s.total)),
            Cell::new(format!("{}%", s.percentage)),
            Cell::new(s.count),
        ]);
    }
    println!("{}", table);
    Ok(())
}

pub fn stats(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = overall_statistics(&store.load()?, today());
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }

    let rows = vec![
        vec!["Total spent".into(), fmt_money(&s.total_spent)],
        vec!["All transactions".into(), s.transaction_count.to_string()],
        vec!["Avg per day".into(), fmt_money(&s.average_per_day)],
        vec!["Days tracked".into(), s.days_tracked.to_string()],
        vec!["Current balance".into(), fmt_money(&s.total_balance)],
        vec![
            "Daily budget".into(),
            s.daily_limit
                .map(|l| fmt_money(&l))
                .unwrap_or_else(|| "Not set".into()),
        ],
    ];
    println!("{}", pretty_table(&["Statistic", "Value"], rows));
    Ok(())
}
