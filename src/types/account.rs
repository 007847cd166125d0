//! Account and velocity window types
//!
//! This module defines the per-customer [`Account`] together with its two
//! rolling windows, and the calendar arithmetic that anchors them.
//!
//! # Windows
//!
//! Both windows are keyed on UTC calendar dates derived from request
//! timestamps:
//! - the daily window starts at the UTC date of the request
//! - the weekly window starts at the UTC Monday on or before that date
//!
//! Windows only ever move forward. A request dated inside an earlier window
//! than the account's current one is validated against the current window.

use super::request::CustomerId;
use crate::config::VelocityLimits;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Start of the daily window containing `timestamp`
pub fn beginning_of_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Start of the weekly window containing `timestamp` (the Monday on or before it)
pub fn beginning_of_week(timestamp: DateTime<Utc>) -> NaiveDate {
    let day = timestamp.date_naive();
    let since_monday = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(since_monday))
        .unwrap_or(NaiveDate::MIN)
}

/// Which velocity check a request failed
///
/// Diagnostic only: a breach is a normal rejection, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBreach {
    /// Amount exceeds what is left of the daily load amount
    DailyAmount,
    /// No loads left in today's transaction count
    DailyCount,
    /// Amount exceeds what is left of the weekly load amount
    WeeklyAmount,
}

impl fmt::Display for LimitBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LimitBreach::DailyAmount => "daily load amount exceeded",
            LimitBreach::DailyCount => "daily transaction count exhausted",
            LimitBreach::WeeklyAmount => "weekly load amount exceeded",
        };
        f.write_str(label)
    }
}

/// Remaining daily quota
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLimit {
    /// UTC date this window covers
    pub window_start: NaiveDate,
    /// Amount that may still be loaded today
    pub remaining_amount: Decimal,
    /// Number of loads still allowed today
    pub remaining_count: u32,
}

impl DailyLimit {
    /// A full daily window containing `timestamp`
    pub fn new(timestamp: DateTime<Utc>, limits: &VelocityLimits) -> Self {
        DailyLimit {
            window_start: beginning_of_day(timestamp),
            remaining_amount: limits.max_daily_load_amount,
            remaining_count: limits.max_daily_transaction_count,
        }
    }

    fn check(&self, amount: Decimal) -> Result<(), LimitBreach> {
        if amount > self.remaining_amount {
            return Err(LimitBreach::DailyAmount);
        }
        if self.remaining_count < 1 {
            return Err(LimitBreach::DailyCount);
        }
        Ok(())
    }

    fn apply(&mut self, amount: Decimal) {
        self.remaining_amount -= amount;
        self.remaining_count -= 1;
    }
}

/// Remaining weekly quota
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyLimit {
    /// UTC Monday this window starts on
    pub window_start: NaiveDate,
    /// Amount that may still be loaded this week
    pub remaining_amount: Decimal,
}

impl WeeklyLimit {
    /// A full weekly window containing `timestamp`
    pub fn new(timestamp: DateTime<Utc>, limits: &VelocityLimits) -> Self {
        WeeklyLimit {
            window_start: beginning_of_week(timestamp),
            remaining_amount: limits.max_weekly_load_amount,
        }
    }

    fn check(&self, amount: Decimal) -> Result<(), LimitBreach> {
        if amount > self.remaining_amount {
            return Err(LimitBreach::WeeklyAmount);
        }
        Ok(())
    }

    fn apply(&mut self, amount: Decimal) {
        self.remaining_amount -= amount;
    }
}

/// Customer account state
///
/// Created on the first admitted request for a customer and kept for the rest
/// of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Customer this account belongs to
    pub customer_id: CustomerId,

    /// Sum of all accepted loads
    pub balance: Decimal,

    /// Current daily window
    pub daily: DailyLimit,

    /// Current weekly window
    pub weekly: WeeklyLimit,
}

impl Account {
    /// Open an account with zero balance and full windows containing `timestamp`
    pub fn open(customer_id: CustomerId, timestamp: DateTime<Utc>, limits: &VelocityLimits) -> Self {
        Account {
            customer_id,
            balance: Decimal::ZERO,
            daily: DailyLimit::new(timestamp, limits),
            weekly: WeeklyLimit::new(timestamp, limits),
        }
    }

    /// Reset any window that lapsed before `timestamp`
    ///
    /// The daily and weekly windows are checked independently. A timestamp in
    /// an earlier window leaves the account untouched.
    pub fn roll_windows(&mut self, timestamp: DateTime<Utc>, limits: &VelocityLimits) {
        if beginning_of_day(timestamp) > self.daily.window_start {
            self.daily = DailyLimit::new(timestamp, limits);
        }
        if beginning_of_week(timestamp) > self.weekly.window_start {
            self.weekly = WeeklyLimit::new(timestamp, limits);
        }
    }

    /// Check an amount against the current windows
    ///
    /// Checks run daily amount, daily count, then weekly amount; the first
    /// failure is reported. Equality with the remaining amount passes.
    pub fn check(&self, amount: Decimal) -> Result<(), LimitBreach> {
        self.daily.check(amount)?;
        self.weekly.check(amount)
    }

    /// Credit an amount and consume quota from both windows
    ///
    /// Callers must have passed [`Account::check`] for the same amount first.
    pub fn load(&mut self, amount: Decimal) {
        self.balance = self.balance.saturating_add(amount);
        self.daily.apply(amount);
        self.weekly.apply(amount);
    }
}
