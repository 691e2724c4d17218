// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::migrate::CURRENT_SCHEMA_VERSION;

/// Fixed spending categories. Iteration order of [`Category::ALL`] is the order
/// used for summaries and budget warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Utilities,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the stored category names.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Food => "#FF6B6B",
            Category::Transport => "#4ECDC4",
            Category::Entertainment => "#95E1D3",
            Category::Shopping => "#FFE66D",
            Category::Utilities => "#A8E6CF",
            Category::Health => "#FFD3B6",
            Category::Other => "#CCCCCC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display color for a stored category name; unknown names get `Other`'s color.
pub fn color_for(name: &str) -> &'static str {
    Category::from_name(name).unwrap_or(Category::Other).color()
}

fn default_category() -> String {
    Category::Other.name().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Stored verbatim; names outside [`Category::ALL`] survive storage but are
    /// left out of per-category totals.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn known_category(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }
}

/// Spending thresholds. Zero means "no limit set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "dailyLimit", with = "rust_decimal::serde::float")]
    pub daily_limit: Decimal,
    #[serde(rename = "Food", with = "rust_decimal::serde::float")]
    pub food: Decimal,
    #[serde(rename = "Transport", with = "rust_decimal::serde::float")]
    pub transport: Decimal,
    #[serde(rename = "Entertainment", with = "rust_decimal::serde::float")]
    pub entertainment: Decimal,
    #[serde(rename = "Shopping", with = "rust_decimal::serde::float")]
    pub shopping: Decimal,
    #[serde(rename = "Utilities", with = "rust_decimal::serde::float")]
    pub utilities: Decimal,
    #[serde(rename = "Health", with = "rust_decimal::serde::float")]
    pub health: Decimal,
    #[serde(rename = "Other", with = "rust_decimal::serde::float")]
    pub other: Decimal,
}

impl Budget {
    pub fn limit_for(&self, category: Category) -> Decimal {
        match category {
            Category::Food => self.food,
            Category::Transport => self.transport,
            Category::Entertainment => self.entertainment,
            Category::Shopping => self.shopping,
            Category::Utilities => self.utilities,
            Category::Health => self.health,
            Category::Other => self.other,
        }
    }

    pub fn set_limit(&mut self, category: Category, limit: Decimal) {
        let slot = match category {
            Category::Food => &mut self.food,
            Category::Transport => &mut self.transport,
            Category::Entertainment => &mut self.entertainment,
            Category::Shopping => &mut self.shopping,
            Category::Utilities => &mut self.utilities,
            Category::Health => &mut self.health,
            Category::Other => &mut self.other,
        };
        *slot = limit;
    }
}

/// The single persisted root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    pub transactions: BTreeMap<NaiveDate, Vec<Transaction>>,
    pub budgets: Budget,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub schema_version: u32,
}

impl Document {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            total_balance: Decimal::ZERO,
            transactions: BTreeMap::new(),
            budgets: Budget::default(),
            created_at,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Transactions filed under `date`, in insertion order.
    pub fn bucket(&self, date: NaiveDate) -> &[Transaction] {
        self.transactions
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values().flatten()
    }
}
