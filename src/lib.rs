// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod navigation;
pub mod store;
pub mod utils;
pub mod commands;

pub use error::{LedgerError, Result};
pub use store::LedgerStore;
