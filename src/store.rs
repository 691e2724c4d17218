// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store: sole owner of the persisted [`Document`].
//!
//! Every mutation is a read-modify-write of the whole document, executed under
//! an in-process lock and inside one immediate SQLite transaction, so a
//! subsequent read never observes a partial write.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::db;
use crate::error::{LedgerError, Result};
use crate::migrate;
use crate::models::{Budget, Category, Document, Transaction};

pub const STORAGE_KEY: &str = "cashFlowData";

const TIME_FORMAT: &str = "%I:%M %p";

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// What [`LedgerStore::initialize`] found on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Migrated,
    Unchanged,
}

pub struct LedgerStore {
    conn: Mutex<Connection>,
    clock: Clock,
}

impl LedgerStore {
    pub fn new(conn: Connection) -> Self {
        Self::with_clock(conn, Utc::now)
    }

    pub fn with_clock<F>(conn: Connection, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            conn: Mutex::new(conn),
            clock: Box::new(clock),
        }
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        db::init_schema(&conn)?;
        Ok(Self::new(conn))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Creates a zeroed document on first run, otherwise applies pending
    /// migrations in place. Safe to call on every startup.
    pub fn initialize(&self) -> Result<InitOutcome> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = match db::get_item(&tx, STORAGE_KEY)? {
            None => {
                write_document(&tx, &Document::new((self.clock)()))?;
                tracing::info!("created new ledger document");
                InitOutcome::Created
            }
            Some(raw) => {
                let mut value: serde_json::Value = serde_json::from_str(&raw).map_err(corrupt)?;
                if migrate::migrate(&mut value)? {
                    let doc: Document = serde_json::from_value(value).map_err(corrupt)?;
                    write_document(&tx, &doc)?;
                    tracing::info!(
                        schema_version = doc.schema_version,
                        "migrated ledger document"
                    );
                    InitOutcome::Migrated
                } else {
                    InitOutcome::Unchanged
                }
            }
        };
        tx.commit()?;
        Ok(outcome)
    }

    pub fn load(&self) -> Result<Document> {
        let conn = self.conn()?;
        read_document(&conn)
    }

    pub fn save(&self, doc: &Document) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        write_document(&tx, doc)?;
        tx.commit()?;
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut doc = read_document(&tx)?;
        let before = doc.clone();
        let out = f(&mut doc);
        if doc != before {
            write_document(&tx, &doc)?;
        }
        tx.commit()?;
        Ok(out)
    }

    /// Appends a new transaction to the `date` bucket. An empty category is
    /// filed as `Other`; any other name is stored as given.
    pub fn add_transaction(
        &self,
        date: NaiveDate,
        amount: Decimal,
        description: &str,
        category: &str,
    ) -> Result<Transaction> {
        let amount = validate_amount(amount)?;
        let now = (self.clock)();
        let txn = Transaction {
            id: Uuid::new_v4().to_string(),
            amount,
            category: normalize_category(category),
            time: now.with_timezone(&Local).format(TIME_FORMAT).to_string(),
            description: description.to_string(),
            created_at: now,
        };
        let stored = txn.clone();
        self.update(move |doc| doc.transactions.entry(date).or_default().push(stored))?;
        tracing::debug!(%date, id = %txn.id, amount = %txn.amount, "added transaction");
        Ok(txn)
    }

    /// Removes a transaction. Missing buckets or ids are a silent no-op;
    /// returns whether anything was removed.
    pub fn delete_transaction(&self, date: NaiveDate, id: &str) -> Result<bool> {
        let removed = self.update(|doc| match doc.transactions.get_mut(&date) {
            Some(bucket) => {
                let len = bucket.len();
                bucket.retain(|t| t.id != id);
                bucket.len() != len
            }
            None => false,
        })?;
        if removed {
            tracing::debug!(%date, id, "deleted transaction");
        } else {
            tracing::debug!(%date, id, "delete ignored, transaction not found");
        }
        Ok(removed)
    }

    /// Replaces the editable fields of a transaction in place. The transaction
    /// never moves between buckets. Missing ids are a silent no-op.
    pub fn update_transaction(
        &self,
        date: NaiveDate,
        id: &str,
        amount: Decimal,
        category: &str,
        description: &str,
    ) -> Result<bool> {
        let amount = validate_amount(amount)?;
        let category = normalize_category(category);
        let found = self.update(|doc| {
            let Some(txn) = doc
                .transactions
                .get_mut(&date)
                .and_then(|bucket| bucket.iter_mut().find(|t| t.id == id))
            else {
                return false;
            };
            txn.amount = amount;
            txn.category = category;
            txn.description = description.to_string();
            true
        })?;
        if found {
            tracing::debug!(%date, id, "updated transaction");
        } else {
            tracing::debug!(%date, id, "update ignored, transaction not found");
        }
        Ok(found)
    }

    /// Adds `delta` to the running balance and returns the new balance. Range
    /// checks belong to the caller.
    pub fn adjust_balance(&self, delta: Decimal) -> Result<Decimal> {
        let balance = self.update(|doc| {
            doc.total_balance += delta;
            doc.total_balance
        })?;
        tracing::debug!(%delta, %balance, "adjusted balance");
        Ok(balance)
    }

    pub fn set_budgets(&self, budget: Budget) -> Result<()> {
        self.update(|doc| doc.budgets = budget)?;
        tracing::debug!("replaced budgets");
        Ok(())
    }

    /// Full document as pretty-printed JSON, for download/backup collaborators.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }

    /// Deletes all persisted state. Callers must obtain user confirmation
    /// first. Returns whether a document existed.
    pub fn wipe(&self) -> Result<bool> {
        let conn = self.conn()?;
        let existed = db::remove_item(&conn, STORAGE_KEY)?;
        tracing::info!(existed, "wiped ledger document");
        Ok(existed)
    }
}

/// Largest amount a single transaction may carry. Amounts are persisted as
/// JSON floats, so this keeps them exact in cents and keeps every sum over the
/// ledger far from `Decimal::MAX`. Value: 999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

/// Rounds to cents and rejects anything outside `(0, MAX_AMOUNT]`.
pub fn validate_amount(amount: Decimal) -> Result<Decimal> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be greater than 0, got {}",
            amount
        )));
    }
    if rounded > MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must not exceed {}, got {}",
            MAX_AMOUNT, amount
        )));
    }
    Ok(rounded)
}

fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Category::Other.name().to_string();
    }
    if Category::from_name(trimmed).is_none() {
        tracing::warn!(
            category = trimmed,
            "storing unknown category; it will be excluded from category totals"
        );
    }
    trimmed.to_string()
}

fn corrupt(err: serde_json::Error) -> LedgerError {
    LedgerError::CorruptStorage(err.to_string())
}

fn read_document(conn: &Connection) -> Result<Document> {
    let raw = db::get_item(conn, STORAGE_KEY)?.ok_or_else(|| {
        LedgerError::CorruptStorage(format!("no document stored under '{}'", STORAGE_KEY))
    })?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(corrupt)?;
    let version = migrate::schema_version(&value)?;
    if version > migrate::CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::CorruptStorage(format!(
            "schema version {} is newer than supported version {}",
            version,
            migrate::CURRENT_SCHEMA_VERSION
        )));
    }
    serde_json::from_value(value).map_err(corrupt)
}

fn write_document(conn: &Connection, doc: &Document) -> Result<()> {
    let raw = serde_json::to_string(doc)?;
    db::set_item(conn, STORAGE_KEY, &raw)?;
    Ok(())
}
