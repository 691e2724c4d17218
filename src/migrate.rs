// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Additive schema upgrades applied to the raw stored document before it is
//! decoded. Every step is idempotent and only ever adds missing data.

use serde_json::{Map, Value, json};

use crate::error::{LedgerError, Result};
use crate::models::Category;

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const VERSION_KEY: &str = "schemaVersion";
const BUDGETS_KEY: &str = "budgets";
const DAILY_LIMIT_KEY: &str = "dailyLimit";

type Step = fn(&mut Map<String, Value>) -> bool;

/// Ordered `(target version, description, step)` list.
const STEPS: &[(u32, &str, Step)] = &[
    (1, "add budgets block", add_budgets),
    (2, "backfill missing budget limits", backfill_budget_limits),
];

fn zeroed_budgets() -> Value {
    let mut limits = Map::new();
    limits.insert(DAILY_LIMIT_KEY.to_string(), json!(0));
    for c in Category::ALL {
        limits.insert(c.name().to_string(), json!(0));
    }
    Value::Object(limits)
}

fn add_budgets(root: &mut Map<String, Value>) -> bool {
    match root.get(BUDGETS_KEY) {
        Some(v) if !v.is_null() => false,
        _ => {
            root.insert(BUDGETS_KEY.to_string(), zeroed_budgets());
            true
        }
    }
}

fn backfill_budget_limits(root: &mut Map<String, Value>) -> bool {
    let Some(Value::Object(limits)) = root.get_mut(BUDGETS_KEY) else {
        return false;
    };
    let mut changed = false;
    let keys = std::iter::once(DAILY_LIMIT_KEY).chain(Category::ALL.iter().map(|c| c.name()));
    for key in keys {
        if !limits.contains_key(key) {
            limits.insert(key.to_string(), json!(0));
            changed = true;
        }
    }
    changed
}

/// Declared schema version of a raw document; documents that predate
/// versioning report 0.
pub fn schema_version(doc: &Value) -> Result<u32> {
    match doc.get(VERSION_KEY) {
        None => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| LedgerError::CorruptStorage(format!("invalid {VERSION_KEY} {v}"))),
    }
}

/// Brings `doc` up to [`CURRENT_SCHEMA_VERSION`]. Returns whether anything
/// changed and therefore needs to be written back.
pub fn migrate(doc: &mut Value) -> Result<bool> {
    let version = schema_version(doc)?;
    if version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::CorruptStorage(format!(
            "schema version {version} is newer than supported version {CURRENT_SCHEMA_VERSION}"
        )));
    }
    let root = doc
        .as_object_mut()
        .ok_or_else(|| LedgerError::CorruptStorage("root is not a JSON object".into()))?;

    let mut changed = false;
    for (target, description, step) in STEPS {
        if *target <= version {
            continue;
        }
        if step(root) {
            tracing::info!(target_version = *target, "applied migration: {}", description);
            changed = true;
        }
    }
    if version < CURRENT_SCHEMA_VERSION {
        root.insert(VERSION_KEY.to_string(), json!(CURRENT_SCHEMA_VERSION));
        changed = true;
    }
    Ok(changed)
}
