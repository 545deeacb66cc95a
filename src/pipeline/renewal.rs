//! Renewal eligibility.

use chrono::{Duration, NaiveDate};

/// A loan may be renewed while it has been renewed fewer than `max_renewals` times.
pub fn can_renew(renewal_count: u32, max_renewals: u32) -> bool {
    renewal_count < max_renewals
}

/// Due date after one renewal.
pub fn renewed_due_date(due: NaiveDate, renewal_period_days: u32) -> NaiveDate {
    due + Duration::days(i64::from(renewal_period_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_renew_matches_strict_less_than() {
        assert!(can_renew(1, 2));
        assert!(!can_renew(2, 2));
        assert!(!can_renew(0, 0));
        for r in 0..5 {
            for m in 0..5 {
                assert_eq!(can_renew(r, m), r < m);
            }
        }
    }

    #[test]
    fn test_renewal_extends_due_date() {
        let due = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        assert_eq!(
            renewed_due_date(due, 14),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }
}
