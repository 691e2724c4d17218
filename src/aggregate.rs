// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side projections over a [`Document`] snapshot. Nothing here mutates or
//! persists; empty inputs yield zeroed results rather than errors.

use chrono::{Datelike, NaiveDate, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Budget, Category, Document, Transaction};
use crate::navigation::YearMonth;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Spend per category. Always holds every [`Category`]; transactions with an
/// unknown category name are ignored.
pub fn spending_by_category<'a, I>(transactions: I) -> BTreeMap<Category, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<Category, Decimal> =
        Category::ALL.into_iter().map(|c| (c, Decimal::ZERO)).collect();
    for t in transactions {
        if let Some(c) = t.known_category() {
            let slot = totals.entry(c).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(t.amount);
        }
    }
    totals
}

pub fn day_spending<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningScope {
    Daily,
    Category(Category),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetWarning {
    pub scope: WarningScope,
    pub limit: Decimal,
    pub spent: Decimal,
    pub overage: Decimal,
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            WarningScope::Daily => write!(f, "Over daily budget by ${:.2}", self.overage),
            WarningScope::Category(c) => write!(f, "{} over budget by ${:.2}", c, self.overage),
        }
    }
}

/// Daily-limit warning first, then one per exceeded category budget in
/// [`Category::ALL`] order. Zero limits are unset and never warn.
pub fn budget_warnings(transactions: &[Transaction], budget: &Budget) -> Vec<BudgetWarning> {
    let mut warnings = Vec::new();

    let spent = day_spending(transactions);
    if budget.daily_limit > Decimal::ZERO && spent > budget.daily_limit {
        warnings.push(BudgetWarning {
            scope: WarningScope::Daily,
            limit: budget.daily_limit,
            spent,
            overage: spent - budget.daily_limit,
        });
    }

    for (category, spent) in spending_by_category(transactions) {
        let limit = budget.limit_for(category);
        if limit > Decimal::ZERO && spent > limit {
            warnings.push(BudgetWarning {
                scope: WarningScope::Category(category),
                limit,
                spent,
                overage: spent - limit,
            });
        }
    }
    warnings
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Categories with spending in one bucket and their share of that day's
/// total spend.
pub fn day_category_summary(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let total = day_spending(transactions);
    spending_by_category(transactions)
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub total_spent: Decimal,
    pub average_per_day: Decimal,
    pub transaction_count: usize,
    /// Index 0 is the first of the month.
    pub per_day: Vec<Decimal>,
}

/// Month roll-up. Transactions are gathered from the month's date-key
/// buckets, but the per-day breakdown is keyed by each transaction's creation
/// day as seen in `tz`, which need not match its bucket.
pub fn monthly_totals<Tz: TimeZone>(doc: &Document, month: YearMonth, tz: &Tz) -> MonthlyTotals {
    let days = month.days_in_month();
    let transactions: Vec<&Transaction> = month.days().flat_map(|d| doc.bucket(d)).collect();

    let total_spent = day_spending(transactions.iter().copied());
    let mut per_day = vec![Decimal::ZERO; days as usize];
    for t in &transactions {
        let day = t.created_at.with_timezone(tz).day();
        if let Some(slot) = per_day.get_mut(day as usize - 1) {
            *slot = slot.saturating_add(t.amount);
        }
    }

    MonthlyTotals {
        month,
        total_spent,
        average_per_day: if days > 0 {
            total_spent / Decimal::from(days)
        } else {
            Decimal::ZERO
        },
        transaction_count: transactions.len(),
        per_day,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOverview {
    pub grand_total: Decimal,
    /// One entry per category in [`Category::ALL`] order, including idle ones.
    pub stats: Vec<CategoryStat>,
}

impl CategoryOverview {
    /// Categories with any activity, as shown to the user.
    pub fn active(&self) -> impl Iterator<Item = &CategoryStat> {
        self.stats.iter().filter(|s| s.total > Decimal::ZERO || s.count > 0)
    }
}

/// All-time spend and transaction counts per category.
pub fn category_overview(doc: &Document) -> CategoryOverview {
    let totals = spending_by_category(doc.all_transactions());
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for c in doc.all_transactions().filter_map(Transaction::known_category) {
        *counts.entry(c).or_default() += 1;
    }
    let grand_total = totals
        .values()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));

    let stats = totals
        .into_iter()
        .map(|(category, total)| CategoryStat {
            category,
            total,
            count: counts.get(&category).copied().unwrap_or(0),
            percentage: percentage_of(total, grand_total),
        })
        .collect();
    CategoryOverview { grand_total, stats }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStatistics {
    pub total_spent: Decimal,
    pub transaction_count: usize,
    pub earliest_date: Option<NaiveDate>,
    pub days_tracked: u32,
    pub average_per_day: Decimal,
    pub total_balance: Decimal,
    pub daily_limit: Option<Decimal>,
}

pub fn overall_statistics(doc: &Document, today: NaiveDate) -> OverallStatistics {
    let total_spent = day_spending(doc.all_transactions());
    let transaction_count = doc.all_transactions().count();
    let earliest_date = doc
        .transactions
        .iter()
        .find(|(_, bucket)| !bucket.is_empty())
        .map(|(date, _)| *date);

    let days_tracked = earliest_date
        .map(|first| (today - first).num_days() + 1)
        .map(|days| u32::try_from(days.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0);
    let average_per_day = if days_tracked > 0 {
        total_spent / Decimal::from(days_tracked)
    } else {
        Decimal::ZERO
    };

    OverallStatistics {
        total_spent,
        transaction_count,
        earliest_date,
        days_tracked,
        average_per_day,
        total_balance: doc.total_balance,
        daily_limit: Some(doc.budgets.daily_limit).filter(|l| *l > Decimal::ZERO),
    }
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * HUNDRED).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
