// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::today;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("cash-flow-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Writes the whole ledger as pretty JSON and returns the file written.
pub fn handle(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let out = sub
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(backup_file_name(today())));
    let json = store.export_json()?;
    std::fs::write(&out, json).with_context(|| format!("Write export to {}", out.display()))?;
    println!("Exported ledger to {}", out.display());
    Ok(out)
}
