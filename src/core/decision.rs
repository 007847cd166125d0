//! Velocity decision function
//!
//! [`evaluate`] is the pure heart of the engine: given a request, the
//! customer's current account (if any) and the configured thresholds, it
//! returns whether the load is accepted and the account as it must be stored
//! afterwards.
//!
//! Rejected requests still roll lapsed windows forward but consume no quota.

use crate::config::VelocityLimits;
use crate::types::{Account, LimitBreach, LoadRequest};

/// Outcome of evaluating one request
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Whether the load was accepted
    pub accepted: bool,
    /// Account state to store for the customer
    pub account: Account,
    /// The failed check, for rejected requests
    pub breach: Option<LimitBreach>,
}

/// Decide a load request against the customer's account
///
/// # Arguments
///
/// * `request` - The request being decided
/// * `existing` - The customer's stored account, or `None` on first sighting
/// * `limits` - Configured thresholds, used for new accounts and window resets
pub fn evaluate(
    request: &LoadRequest,
    existing: Option<Account>,
    limits: &VelocityLimits,
) -> Evaluation {
    let mut account = match existing {
        Some(mut account) => {
            account.roll_windows(request.timestamp, limits);
            account
        }
        None => Account::open(request.customer_id.clone(), request.timestamp, limits),
    };

    match account.check(request.amount) {
        Ok(()) => {
            account.load(request.amount);
            Evaluation {
                accepted: true,
                account,
                breach: None,
            }
        }
        Err(breach) => Evaluation {
            accepted: false,
            account,
            breach: Some(breach),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn limits() -> VelocityLimits {
        VelocityLimits::new(Decimal::new(5000, 0), 3, Decimal::new(20000, 0))
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        // January 2000: the 3rd, 10th, 17th and 24th are Mondays
        Utc.with_ymd_and_hms(2000, 1, d, h, 0, 0).unwrap()
    }

    fn request(id: &str, amount: i64, timestamp: DateTime<Utc>) -> LoadRequest {
        LoadRequest {
            id: id.to_string(),
            customer_id: "528".to_string(),
            amount: Decimal::new(amount, 0),
            timestamp,
        }
    }

    /// Evaluate a sequence of requests, threading the account through
    fn run(requests: &[LoadRequest], limits: &VelocityLimits) -> (Vec<bool>, Account) {
        let mut account = None;
        let mut outcomes = Vec::new();
        for request in requests {
            let evaluation = evaluate(request, account.take(), limits);
            outcomes.push(evaluation.accepted);
            account = Some(evaluation.account);
        }
        (outcomes, account.expect("at least one request"))
    }

    #[test]
    fn test_first_request_opens_account() {
        let evaluation = evaluate(&request("1", 3000, at(5, 8)), None, &limits());

        assert!(evaluation.accepted);
        assert_eq!(evaluation.breach, None);
        assert_eq!(evaluation.account.customer_id, "528");
        assert_eq!(evaluation.account.balance, Decimal::new(3000, 0));
        assert_eq!(evaluation.account.daily.remaining_amount, Decimal::new(2000, 0));
        assert_eq!(evaluation.account.daily.remaining_count, 2);
        assert_eq!(
            evaluation.account.weekly.remaining_amount,
            Decimal::new(17000, 0)
        );
    }

    #[test]
    fn test_first_request_over_daily_limit_still_opens_account() {
        let evaluation = evaluate(&request("1", 5001, at(5, 8)), None, &limits());

        assert!(!evaluation.accepted);
        assert_eq!(evaluation.breach, Some(LimitBreach::DailyAmount));
        assert_eq!(evaluation.account.balance, Decimal::ZERO);
        assert_eq!(evaluation.account.daily.remaining_amount, Decimal::new(5000, 0));
        assert_eq!(evaluation.account.daily.remaining_count, 3);
    }

    #[test]
    fn test_daily_scenario_with_next_day_reset() {
        let requests = [
            request("1", 3000, at(5, 1)),
            request("2", 2000, at(5, 2)),
            request("3", 1, at(5, 3)),
            request("4", 100, at(6, 1)),
        ];
        let (outcomes, account) = run(&requests, &limits());

        assert_eq!(outcomes, vec![true, true, false, true]);
        assert_eq!(account.daily.window_start, NaiveDate::from_ymd_opt(2000, 1, 6).unwrap());
        assert_eq!(account.daily.remaining_amount, Decimal::new(4900, 0));
        assert_eq!(account.daily.remaining_count, 2);
        assert_eq!(account.weekly.remaining_amount, Decimal::new(14900, 0));
        assert_eq!(account.balance, Decimal::new(5100, 0));
    }

    #[test]
    fn test_daily_amount_exhaustion_reports_breach() {
        let mut account = evaluate(&request("1", 5000, at(5, 1)), None, &limits()).account;
        account.daily.remaining_count = 2;

        let evaluation = evaluate(&request("2", 1, at(5, 2)), Some(account), &limits());
        assert!(!evaluation.accepted);
        assert_eq!(evaluation.breach, Some(LimitBreach::DailyAmount));
    }

    #[test]
    fn test_count_exhaustion_rejects_even_with_budget() {
        let requests = [
            request("1", 10, at(5, 1)),
            request("2", 10, at(5, 2)),
            request("3", 10, at(5, 3)),
            request("4", 10, at(5, 4)),
        ];
        let (outcomes, account) = run(&requests, &limits());

        assert_eq!(outcomes, vec![true, true, true, false]);
        assert_eq!(account.daily.remaining_count, 0);
        assert_eq!(account.daily.remaining_amount, Decimal::new(4970, 0));
    }

    #[test]
    fn test_count_boundary_of_one() {
        let limits = VelocityLimits::new(Decimal::new(5000, 0), 1, Decimal::new(20000, 0));
        let first = evaluate(&request("1", 10, at(5, 1)), None, &limits);
        assert!(first.accepted);
        assert_eq!(first.account.daily.remaining_count, 0);

        let second = evaluate(&request("2", 10, at(5, 2)), Some(first.account), &limits);
        assert!(!second.accepted);
        assert_eq!(second.breach, Some(LimitBreach::DailyCount));
    }

    #[test]
    fn test_weekly_limit_accumulates_across_days() {
        // Four full days of 5000 exhaust the weekly 20000 on Thursday
        let requests = [
            request("1", 5000, at(3, 1)),
            request("2", 5000, at(4, 1)),
            request("3", 5000, at(5, 1)),
            request("4", 5000, at(6, 1)),
            request("5", 1, at(7, 1)),
            request("6", 1, at(10, 1)),
        ];
        let (outcomes, account) = run(&requests, &limits());

        assert_eq!(outcomes, vec![true, true, true, true, false, true]);
        assert_eq!(account.weekly.window_start, NaiveDate::from_ymd_opt(2000, 1, 10).unwrap());
        assert_eq!(account.weekly.remaining_amount, Decimal::new(19999, 0));
    }

    #[test]
    fn test_weekly_breach_reported() {
        let limits = VelocityLimits::new(Decimal::new(5000, 0), 3, Decimal::new(1000, 0));
        let evaluation = evaluate(&request("1", 3000, at(5, 1)), None, &limits);
        assert!(!evaluation.accepted);
        assert_eq!(evaluation.breach, Some(LimitBreach::WeeklyAmount));
    }

    #[test]
    fn test_rejected_request_still_rolls_windows() {
        let first = evaluate(&request("1", 100, at(5, 1)), None, &limits());

        let rejected = evaluate(&request("2", 6000, at(11, 1)), Some(first.account), &limits());
        assert!(!rejected.accepted);
        assert_eq!(
            rejected.account.daily.window_start,
            NaiveDate::from_ymd_opt(2000, 1, 11).unwrap()
        );
        assert_eq!(rejected.account.daily.remaining_amount, Decimal::new(5000, 0));
        assert_eq!(
            rejected.account.weekly.window_start,
            NaiveDate::from_ymd_opt(2000, 1, 10).unwrap()
        );
        assert_eq!(rejected.account.weekly.remaining_amount, Decimal::new(20000, 0));
        assert_eq!(rejected.account.balance, Decimal::new(100, 0));
    }

    #[test]
    fn test_out_of_order_request_uses_current_window() {
        let first = evaluate(&request("1", 4000, at(12, 1)), None, &limits());

        // Earlier day, but the account stays anchored on the 12th
        let earlier = evaluate(&request("2", 1500, at(11, 1)), Some(first.account), &limits());
        assert!(!earlier.accepted);
        assert_eq!(
            earlier.account.daily.window_start,
            NaiveDate::from_ymd_opt(2000, 1, 12).unwrap()
        );
        assert_eq!(earlier.account.daily.remaining_amount, Decimal::new(1000, 0));
    }

    #[test]
    fn test_windows_are_monotonic() {
        let days = [5, 3, 12, 10, 12, 4, 20, 17];
        let mut account = None;
        let mut last_daily = None;
        let mut last_weekly = None;

        for (i, day) in days.iter().enumerate() {
            let evaluation = evaluate(
                &request(&i.to_string(), 1, at(*day, 1)),
                account.take(),
                &limits(),
            );
            let daily = evaluation.account.daily.window_start;
            let weekly = evaluation.account.weekly.window_start;
            if let (Some(d), Some(w)) = (last_daily, last_weekly) {
                assert!(daily >= d, "daily window moved back at step {}", i);
                assert!(weekly >= w, "weekly window moved back at step {}", i);
            }
            last_daily = Some(daily);
            last_weekly = Some(weekly);
            account = Some(evaluation.account);
        }
    }

    #[rstest]
    #[case::zero(0, true)]
    #[case::exact(5000, true)]
    #[case::over(5001, false)]
    fn test_amount_boundaries(#[case] amount: i64, #[case] accepted: bool) {
        let evaluation = evaluate(&request("1", amount, at(5, 1)), None, &limits());
        assert_eq!(evaluation.accepted, accepted);
    }

    #[test]
    fn test_fractional_amount_one_cent_over() {
        let limits = VelocityLimits::new(Decimal::new(10050, 2), 3, Decimal::new(20000, 0));
        let mut req = request("1", 0, at(5, 1));

        req.amount = Decimal::new(10050, 2);
        assert!(evaluate(&req, None, &limits).accepted);

        req.amount = Decimal::new(10051, 2);
        assert!(!evaluate(&req, None, &limits).accepted);
    }
}
