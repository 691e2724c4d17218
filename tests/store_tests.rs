// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use cashflow::aggregate::{day_spending, spending_by_category};
use cashflow::db;
use cashflow::models::{Budget, Category};
use cashflow::store::{InitOutcome, LedgerStore, MAX_AMOUNT, STORAGE_KEY};
use cashflow::LedgerError;
use common::{bare_store, conn, date, dec, fixed_now, setup};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn first_initialize_creates_zeroed_document() {
    let store = bare_store(conn());
    assert_eq!(store.initialize().unwrap(), InitOutcome::Created);
    let doc = store.load().unwrap();
    assert_eq!(doc.total_balance, Decimal::ZERO);
    assert!(doc.transactions.is_empty());
    assert_eq!(doc.budgets, Budget::default());
    assert_eq!(doc.created_at, fixed_now());
    assert_eq!(store.initialize().unwrap(), InitOutcome::Unchanged);
}

#[test]
fn end_to_end_day_totals() {
    let store = setup();
    let day = date("2024-03-05");
    let lunch = store
        .add_transaction(day, dec("12.50"), "lunch", "Food")
        .unwrap();
    store.add_transaction(day, dec("5.00"), "", "Other").unwrap();

    let doc = store.load().unwrap();
    let bucket = doc.bucket(day);
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[0].id, lunch.id);
    assert_eq!(bucket[0].description, "lunch");
    assert_eq!(bucket[0].created_at, fixed_now());
    assert_eq!(day_spending(bucket), dec("17.50"));

    let totals = spending_by_category(bucket);
    assert_eq!(totals[&Category::Food], dec("12.50"));
    assert_eq!(totals[&Category::Other], dec("5.00"));
    for c in [
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
    ] {
        assert_eq!(totals[&c], Decimal::ZERO);
    }
}

#[test]
fn add_reflects_exact_amount_in_category_total() {
    let store = setup();
    let day = date("2024-03-05");
    store.add_transaction(day, dec("3.10"), "", "Health").unwrap();
    let before = spending_by_category(store.load().unwrap().bucket(day))[&Category::Health];

    store.add_transaction(day, dec("7.25"), "", "Health").unwrap();
    let after = spending_by_category(store.load().unwrap().bucket(day))[&Category::Health];
    assert_eq!(after - before, dec("7.25"));
}

#[test]
fn ids_are_unique() {
    let store = setup();
    let day = date("2024-03-05");
    let a = store.add_transaction(day, dec("1"), "", "Food").unwrap();
    let b = store.add_transaction(day, dec("1"), "", "Food").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn non_positive_amounts_are_rejected_without_writing() {
    let store = setup();
    let day = date("2024-03-05");
    let before = store.load().unwrap();
    for bad in ["0", "-4.20", "0.001"] {
        match store.add_transaction(day, dec(bad), "x", "Food") {
            Err(LedgerError::InvalidAmount(_)) => {}
            other => panic!("expected InvalidAmount for {}, got {:?}", bad, other),
        }
    }
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn amounts_above_the_ceiling_are_rejected() {
    let store = setup();
    let day = date("2024-03-05");
    let before = store.load().unwrap();
    for bad in [Decimal::MAX, dec("1000000000"), dec("999999999.995")] {
        match store.add_transaction(day, bad, "", "Food") {
            Err(LedgerError::InvalidAmount(_)) => {}
            other => panic!("expected InvalidAmount for {}, got {:?}", bad, other),
        }
    }
    let t = store.add_transaction(day, dec("1"), "", "Food").unwrap();
    assert!(matches!(
        store.update_transaction(day, &t.id, Decimal::MAX, "Food", ""),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert_eq!(store.load().unwrap().bucket(day).len(), before.bucket(day).len() + 1);
}

#[test]
fn largest_amount_reads_back_exactly() {
    assert_eq!(MAX_AMOUNT, dec("999999999.99"));
    let store = setup();
    let day = date("2024-03-05");
    store.add_transaction(day, MAX_AMOUNT, "", "Food").unwrap();
    store.add_transaction(day, MAX_AMOUNT, "", "Food").unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.bucket(day)[0].amount, MAX_AMOUNT);
    assert_eq!(day_spending(doc.bucket(day)), dec("1999999999.98"));
}

#[test]
fn amounts_are_stored_in_cents() {
    let store = setup();
    let t = store
        .add_transaction(date("2024-03-05"), dec("2.499"), "", "Food")
        .unwrap();
    assert_eq!(t.amount, dec("2.50"));
}

#[test]
fn empty_category_defaults_to_other_and_unknown_is_kept() {
    let store = setup();
    let day = date("2024-03-05");
    store.add_transaction(day, dec("4"), "", "").unwrap();
    store.add_transaction(day, dec("9"), "", "Groceries").unwrap();

    let doc = store.load().unwrap();
    let bucket = doc.bucket(day);
    assert_eq!(bucket[0].category, "Other");
    assert_eq!(bucket[1].category, "Groceries");

    let totals = spending_by_category(bucket);
    assert_eq!(totals.values().copied().sum::<Decimal>(), dec("4"));
    assert_eq!(day_spending(bucket), dec("13"));
}

#[test]
fn delete_twice_is_a_no_op() {
    let store = setup();
    let day = date("2024-03-05");
    let t = store.add_transaction(day, dec("8"), "", "Food").unwrap();
    store.add_transaction(day, dec("2"), "", "Food").unwrap();

    assert!(store.delete_transaction(day, &t.id).unwrap());
    let after_first = store.load().unwrap();
    assert!(!store.delete_transaction(day, &t.id).unwrap());
    assert_eq!(store.load().unwrap(), after_first);
    assert_eq!(after_first.bucket(day).len(), 1);

    assert!(!store.delete_transaction(date("2020-01-01"), &t.id).unwrap());
}

#[test]
fn update_replaces_fields_in_place() {
    let store = setup();
    let day = date("2024-03-05");
    let first = store.add_transaction(day, dec("8"), "bus", "Transport").unwrap();
    let second = store.add_transaction(day, dec("3"), "tea", "Food").unwrap();

    assert!(store
        .update_transaction(day, &first.id, dec("9.75"), "Shopping", "shoes")
        .unwrap());

    let doc = store.load().unwrap();
    let bucket = doc.bucket(day);
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[0].id, first.id);
    assert_eq!(bucket[0].amount, dec("9.75"));
    assert_eq!(bucket[0].category, "Shopping");
    assert_eq!(bucket[0].description, "shoes");
    assert_eq!(bucket[0].created_at, first.created_at);
    assert_eq!(bucket[1], second);
}

#[test]
fn update_of_missing_id_changes_nothing() {
    let store = setup();
    let day = date("2024-03-05");
    let t = store.add_transaction(day, dec("8"), "", "Food").unwrap();
    let before = store.load().unwrap();

    assert!(!store
        .update_transaction(day, "missing", dec("1"), "Food", "")
        .unwrap());
    // wrong bucket: transactions never move between dates
    assert!(!store
        .update_transaction(date("2024-03-04"), &t.id, dec("1"), "Food", "")
        .unwrap());
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn update_rejects_non_positive_amount() {
    let store = setup();
    let day = date("2024-03-05");
    let t = store.add_transaction(day, dec("8"), "", "Food").unwrap();
    assert!(matches!(
        store.update_transaction(day, &t.id, Decimal::ZERO, "Food", ""),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert_eq!(store.load().unwrap().bucket(day)[0].amount, dec("8"));
}

#[test]
fn balance_is_independent_of_transactions() {
    let store = setup();
    let day = date("2024-03-05");
    assert_eq!(store.adjust_balance(dec("100")).unwrap(), dec("100"));
    let t = store.add_transaction(day, dec("30"), "", "Food").unwrap();
    store.delete_transaction(day, &t.id).unwrap();
    assert_eq!(store.adjust_balance(dec("0.50")).unwrap(), dec("100.50"));
    assert_eq!(store.load().unwrap().total_balance, dec("100.50"));
}

#[test]
fn set_budgets_replaces_record() {
    let store = setup();
    let mut budget = Budget {
        daily_limit: dec("50"),
        ..Budget::default()
    };
    budget.set_limit(Category::Food, dec("10"));
    store.set_budgets(budget.clone()).unwrap();
    assert_eq!(store.load().unwrap().budgets, budget);

    store.set_budgets(Budget::default()).unwrap();
    assert_eq!(store.load().unwrap().budgets.limit_for(Category::Food), Decimal::ZERO);
}

#[test]
fn load_fails_on_corrupt_document() {
    let conn = conn();
    db::set_item(&conn, STORAGE_KEY, "{not json").unwrap();
    let store = bare_store(conn);
    assert!(matches!(store.load(), Err(LedgerError::CorruptStorage(_))));
}

#[test]
fn load_fails_on_missing_root_field() {
    let conn = conn();
    db::set_item(
        &conn,
        STORAGE_KEY,
        r#"{"totalBalance": 1, "budgets": {}, "createdAt": "2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    let store = bare_store(conn);
    assert!(matches!(store.load(), Err(LedgerError::CorruptStorage(_))));
}

#[test]
fn save_of_loaded_document_is_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let store = LedgerStore::with_clock(db::open_or_init(Some(&path)).unwrap(), fixed_now);
    store.initialize().unwrap();
    let day = date("2024-03-05");
    store.add_transaction(day, dec("12.50"), "lunch", "Food").unwrap();
    store.add_transaction(day, dec("0.10"), "", "Groceries").unwrap();
    store.adjust_balance(dec("20.05")).unwrap();

    let raw = || -> String {
        let reader = Connection::open(&path).unwrap();
        db::get_item(&reader, STORAGE_KEY).unwrap().unwrap()
    };
    let before = raw();
    store.save(&store.load().unwrap()).unwrap();
    assert_eq!(raw(), before);
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.sqlite");
    let day = date("2024-03-05");
    {
        let store = LedgerStore::new(db::open_or_init(Some(&path)).unwrap());
        store.initialize().unwrap();
        store.add_transaction(day, dec("6"), "", "Food").unwrap();
    }
    let store = LedgerStore::new(db::open_or_init(Some(&path)).unwrap());
    assert_eq!(store.initialize().unwrap(), InitOutcome::Unchanged);
    assert_eq!(day_spending(store.load().unwrap().bucket(day)), dec("6"));
}

#[test]
fn wipe_removes_everything() {
    let store = setup();
    store
        .add_transaction(date("2024-03-05"), dec("6"), "", "Food")
        .unwrap();
    assert!(store.wipe().unwrap());
    assert!(matches!(store.load(), Err(LedgerError::CorruptStorage(_))));
    assert!(!store.wipe().unwrap());
    assert_eq!(store.initialize().unwrap(), InitOutcome::Created);
    assert!(store.load().unwrap().transactions.is_empty());
}

#[test]
fn export_is_pretty_json_of_the_document() {
    let store = setup();
    store
        .add_transaction(date("2024-03-05"), dec("12.50"), "lunch", "Food")
        .unwrap();
    let json = store.export_json().unwrap();
    assert!(json.contains("\n  \"totalBalance\""));

    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let t = &v["transactions"]["2024-03-05"][0];
    assert_eq!(t["amount"].as_f64(), Some(12.5));
    assert_eq!(t["category"], "Food");
    assert_eq!(t["createdAt"], "2024-03-05T12:00:00Z");
    assert_eq!(v["budgets"]["dailyLimit"].as_f64(), Some(0.0));
}
