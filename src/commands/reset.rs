// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use anyhow::{Result, bail};

pub fn handle(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all data without --yes; this cannot be undone");
    }
    if store.wipe()? {
        println!("All data has been cleared");
    } else {
        println!("Nothing to clear");
    }
    Ok(())
}
