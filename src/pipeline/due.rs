//! Due-date arithmetic and overdue detection.
//!
//! "Now" is always passed in, never read from the clock, so every result
//! is reproducible.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{Borrower, NotificationType, RecordStatus};

/// Loans due within this many days are flagged as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    OnTime,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueSoon => "Due Soon",
            DueStatus::OnTime => "On Time",
        }
    }
}

/// Whole days until the due date, rounded up.
///
/// The due date counts from midnight UTC, so a loan due today reads 0 for
/// the whole day and turns negative at the next midnight.
pub fn days_until_due(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due_at = due.and_time(NaiveTime::MIN).and_utc();
    let millis = (due_at - now).num_milliseconds();
    let days = millis.div_euclid(DAY_MS);
    if millis.rem_euclid(DAY_MS) == 0 {
        days
    } else {
        days + 1
    }
}

pub fn classify_days(days_until_due: i64) -> DueStatus {
    if days_until_due < 0 {
        DueStatus::Overdue
    } else if days_until_due <= DUE_SOON_DAYS {
        DueStatus::DueSoon
    } else {
        DueStatus::OnTime
    }
}

pub fn classify(due: NaiveDate, now: DateTime<Utc>) -> DueStatus {
    classify_days(days_until_due(due, now))
}

/// Days a return on `returned` is past `due`; zero when on time.
pub fn days_late(due: NaiveDate, returned: NaiveDate) -> u32 {
    (returned - due).num_days().max(0) as u32
}

/// Fine for a loan that is `days` late.
pub fn late_fine(days: u32, fine_per_day: u32) -> u32 {
    days.saturating_mul(fine_per_day)
}

/// Flip one borrower's lapsed loans to overdue and bring fines up to date.
///
/// Open loans whose due date has passed are marked overdue; every overdue
/// loan's fine is recomputed from its lateness and any growth is added to
/// the borrower's balance. Each newly flipped loan raises `overdue_count`
/// and posts one overdue notification. Returns the ids of newly flipped
/// records.
pub fn sweep_borrower(borrower: &mut Borrower, now: DateTime<Utc>, fine_per_day: u32) -> Vec<u64> {
    let today = now.date_naive();
    let mut flipped = Vec::new();
    let mut notices = Vec::new();
    let mut fine_growth = 0u32;

    for record in borrower.borrowing_history.iter_mut() {
        if record.status == RecordStatus::Returned {
            continue;
        }
        let days = days_until_due(record.due_date, now);
        if days >= 0 {
            continue;
        }

        let late = days.unsigned_abs() as u32;
        let fine = late_fine(late, fine_per_day);
        if fine > record.fine {
            fine_growth = fine_growth.saturating_add(fine - record.fine);
            record.fine = fine;
        }

        if record.status == RecordStatus::Borrowed {
            record.status = RecordStatus::Overdue;
            flipped.push(record.id);
            notices.push(format!(
                "Book '{}' is {} days overdue. Fine: ₹{}",
                record.book_title, late, record.fine
            ));
        }
    }

    borrower.fines = borrower.fines.saturating_add(fine_growth);
    borrower.overdue_count += flipped.len() as u32;
    for message in notices {
        borrower.notify(NotificationType::Overdue, "Book Overdue", message, today);
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seed;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_until_due_rounds_up() {
        let due = day(2024, 2, 10);
        assert_eq!(days_until_due(due, at(2024, 2, 10, 0)), 0);
        assert_eq!(days_until_due(due, at(2024, 2, 9, 12)), 1);
        assert_eq!(days_until_due(due, at(2024, 2, 3, 0)), 7);
        assert_eq!(days_until_due(due, at(2024, 2, 10, 9)), 0);
        assert_eq!(days_until_due(due, at(2024, 2, 11, 9)), -1);
        assert_eq!(days_until_due(due, at(2024, 2, 13, 0)), -3);
    }

    #[test]
    fn test_classification_windows() {
        let due = day(2024, 2, 10);
        assert_eq!(classify(due, at(2024, 2, 12, 8)), DueStatus::Overdue);
        assert_eq!(classify(due, at(2024, 2, 10, 8)), DueStatus::DueSoon);
        assert_eq!(classify(due, at(2024, 2, 7, 0)), DueStatus::DueSoon);
        assert_eq!(classify(due, at(2024, 2, 6, 12)), DueStatus::OnTime);
    }

    #[test]
    fn test_overdue_iff_negative_days() {
        let due = day(2024, 3, 1);
        for offset in -48..48 {
            let now = at(2024, 3, 1, 0) + chrono::Duration::hours(offset * 7);
            let days = days_until_due(due, now);
            assert_eq!(classify(due, now) == DueStatus::Overdue, days < 0);
        }
    }

    #[test]
    fn test_late_fine() {
        assert_eq!(days_late(day(2024, 1, 15), day(2024, 1, 18)), 3);
        assert_eq!(days_late(day(2024, 1, 15), day(2024, 1, 10)), 0);
        assert_eq!(late_fine(3, 40), 120);
    }

    #[test]
    fn test_sweep_flips_lapsed_loans_once() {
        let mut arjun = Seed::default().borrowers.remove(0);
        let now = at(2024, 2, 8, 10);

        // Clean Code was due 2024-02-05; the Knuth loan is still on time
        let flipped = sweep_borrower(&mut arjun, now, 40);
        assert_eq!(flipped, vec![2]);
        assert_eq!(arjun.record(2).unwrap().status, RecordStatus::Overdue);
        assert_eq!(arjun.record(2).unwrap().fine, 120);
        assert_eq!(arjun.record(1).unwrap().status, RecordStatus::Borrowed);
        assert_eq!(arjun.fines, 120);
        assert_eq!(arjun.overdue_count, 1);
        assert_eq!(arjun.unread_count(), 2);

        // A second sweep the same day changes nothing
        assert!(sweep_borrower(&mut arjun, now, 40).is_empty());
        assert_eq!(arjun.fines, 120);
        assert_eq!(arjun.notifications.len(), 2);
    }

    #[test]
    fn test_sweep_grows_existing_overdue_fines() {
        let mut priya = Seed::default().borrowers.remove(1);
        // Due 2024-01-15, seeded with a three-day fine of 120
        let flipped = sweep_borrower(&mut priya, at(2024, 1, 20, 9), 40);
        assert!(flipped.is_empty());
        assert_eq!(priya.record(3).unwrap().fine, 200);
        assert_eq!(priya.fines, 200);
        assert_eq!(priya.overdue_count, 1);
    }

    #[test]
    fn test_sweep_ignores_returned_loans() {
        let mut rahul = Seed::default().borrowers.remove(2);
        let before = rahul.clone();
        assert!(sweep_borrower(&mut rahul, at(2025, 1, 1, 0), 40).is_empty());
        assert_eq!(rahul, before);
    }
}
