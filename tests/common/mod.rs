// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use cashflow::db;
use cashflow::models::Transaction;
use cashflow::store::LedgerStore;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

/// Store over an empty in-memory database with a fixed clock; not initialized.
pub fn bare_store(conn: Connection) -> LedgerStore {
    LedgerStore::with_clock(conn, fixed_now)
}

pub fn setup() -> LedgerStore {
    let store = bare_store(conn());
    store.initialize().unwrap();
    store
}

/// Transaction created at noon UTC on `created`.
pub fn txn(id: &str, amount: &str, category: &str, created: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: dec(amount),
        category: category.to_string(),
        time: "12:00 PM".to_string(),
        description: String::new(),
        created_at: Utc
            .from_utc_datetime(&date(created).and_hms_opt(12, 0, 0).unwrap()),
    }
}
