// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by the ledger store and its helpers.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The persisted document does not match the expected shape. Fatal for the
    /// session: callers must surface it instead of resetting data.
    #[error("Stored ledger is corrupt: {0}")]
    CorruptStorage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Cannot view future date {0}")]
    FutureDate(NaiveDate),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Ledger store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
