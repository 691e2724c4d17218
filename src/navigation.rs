// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Caller-held view context: which day or month a view is looking at.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::{LedgerError, Result};

pub fn previous_day(current: NaiveDate) -> NaiveDate {
    current.pred_opt().unwrap_or(current)
}

/// Steps forward one day, refusing to move past `today`.
pub fn next_day(current: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    let next = current
        .checked_add_days(Days::new(1))
        .ok_or(LedgerError::FutureDate(current))?;
    ensure_not_future(next, today)
}

pub fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    if date > today {
        return Err(LedgerError::FutureDate(date));
    }
    Ok(date)
}

/// A calendar month, always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.shift(1).first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Every calendar day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days_in_month()).filter_map(move |d| first.checked_add_days(Days::new(d.into())))
    }

    /// Moves by `delta` months, rolling the year as needed.
    pub fn shift(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
